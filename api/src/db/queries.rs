use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::TripRow;
use crate::services::trips::TripRecord;

/// Insert a new trip. Trips are never updated.
pub async fn insert_trip(pool: &PgPool, record: &TripRecord) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO trips (id, shareable_id, plan, preferences, created_at, expires_at)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(record.id)
    .bind(record.shareable_id)
    .bind(Json(&record.plan))
    .bind(Json(&record.preferences))
    .bind(record.created_at)
    .bind(record.expires_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Get a trip by its primary id.
pub async fn get_trip_by_id(pool: &PgPool, id: Uuid) -> Result<Option<TripRow>, sqlx::Error> {
    sqlx::query_as::<_, TripRow>(
        "SELECT id, shareable_id, plan, preferences, created_at, expires_at
         FROM trips WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Get a trip by its share link id. Expiry is checked by the caller.
pub async fn get_trip_by_shareable_id(
    pool: &PgPool,
    shareable_id: Uuid,
) -> Result<Option<TripRow>, sqlx::Error> {
    sqlx::query_as::<_, TripRow>(
        "SELECT id, shareable_id, plan, preferences, created_at, expires_at
         FROM trips WHERE shareable_id = $1",
    )
    .bind(shareable_id)
    .fetch_optional(pool)
    .await
}

/// Connectivity check.
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|_| ())
}
