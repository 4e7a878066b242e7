use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::services::plan::TripPlan;
use crate::services::preferences::TripPreferences;
use crate::services::trips::TripRecord;

/// A stored trip. Plan and preferences are kept as JSONB documents.
#[derive(Debug, Clone, FromRow)]
pub struct TripRow {
    pub id: Uuid,
    pub shareable_id: Uuid,
    pub plan: Json<TripPlan>,
    pub preferences: Json<TripPreferences>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<TripRow> for TripRecord {
    fn from(row: TripRow) -> Self {
        Self {
            id: row.id,
            shareable_id: row.shareable_id,
            plan: row.plan.0,
            preferences: row.preferences.0,
            created_at: row.created_at,
            expires_at: row.expires_at,
        }
    }
}
