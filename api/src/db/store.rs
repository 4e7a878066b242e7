//! Trip storage backends.
//!
//! [`TripStore`] has insert-only writes and point lookups on two independent
//! unique keys. [`PgTripStore`] is the production backend;
//! [`MemoryTripStore`] serves local runs without `DATABASE_URL` and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::queries;
use crate::services::trips::TripRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("trip identifier already exists")]
    Duplicate,
}

#[async_trait]
pub trait TripStore: Send + Sync {
    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;

    async fn insert(&self, record: &TripRecord) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TripRecord>, StoreError>;

    async fn find_by_shareable_id(
        &self,
        shareable_id: Uuid,
    ) -> Result<Option<TripRecord>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

/// Postgres-backed store.
#[derive(Debug, Clone)]
pub struct PgTripStore {
    pool: PgPool,
}

impl PgTripStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TripStore for PgTripStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn insert(&self, record: &TripRecord) -> Result<(), StoreError> {
        queries::insert_trip(&self.pool, record)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Duplicate,
                other => StoreError::Database(other),
            })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TripRecord>, StoreError> {
        let row = queries::get_trip_by_id(&self.pool, id).await?;
        Ok(row.map(TripRecord::from))
    }

    async fn find_by_shareable_id(
        &self,
        shareable_id: Uuid,
    ) -> Result<Option<TripRecord>, StoreError> {
        let row = queries::get_trip_by_shareable_id(&self.pool, shareable_id).await?;
        Ok(row.map(TripRecord::from))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        queries::ping(&self.pool).await?;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemoryTrips {
    by_id: HashMap<Uuid, TripRecord>,
    /// shareable id -> primary id
    share_index: HashMap<Uuid, Uuid>,
}

/// Process-local store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryTripStore {
    trips: RwLock<MemoryTrips>,
}

impl MemoryTripStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TripStore for MemoryTripStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, record: &TripRecord) -> Result<(), StoreError> {
        let mut trips = self.trips.write().await;
        if trips.by_id.contains_key(&record.id)
            || trips.share_index.contains_key(&record.shareable_id)
        {
            return Err(StoreError::Duplicate);
        }
        trips.share_index.insert(record.shareable_id, record.id);
        trips.by_id.insert(record.id, record.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TripRecord>, StoreError> {
        Ok(self.trips.read().await.by_id.get(&id).cloned())
    }

    async fn find_by_shareable_id(
        &self,
        shareable_id: Uuid,
    ) -> Result<Option<TripRecord>, StoreError> {
        let trips = self.trips.read().await;
        Ok(trips
            .share_index
            .get(&shareable_id)
            .and_then(|id| trips.by_id.get(id))
            .cloned())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
