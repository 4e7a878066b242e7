//! Trip persistence and share links.
//!
//! A trip is stored once, right after generation, and never changed. Each
//! record gets two independently generated v4 UUIDs: the primary id and the
//! share id. Expiry is evaluated at read time; nothing deletes expired rows.
//!
//! Lookups by primary id do not check expiry. Lookups by share id do, and
//! report an expired record as [`LookupError::Expired`] rather than not found.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use super::plan::TripPlan;
use super::preferences::TripPreferences;
use crate::db::store::{StoreError, TripStore};

/// Default lifetime of a share link.
pub const DEFAULT_SHARE_TTL_DAYS: i64 = 7;

/// A persisted trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripRecord {
    pub id: Uuid,
    /// Public identifier used in share links
    pub shareable_id: Uuid,
    pub plan: TripPlan,
    pub preferences: TripPreferences,
    pub created_at: DateTime<Utc>,
    /// Share links stop resolving at this instant
    pub expires_at: DateTime<Utc>,
}

impl TripRecord {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("trip not found")]
    NotFound,
    #[error("share link expired at {0}")]
    Expired(DateTime<Utc>),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct TripService {
    store: Arc<dyn TripStore>,
    share_ttl: Duration,
}

impl TripService {
    pub fn new(store: Arc<dyn TripStore>, share_ttl: Duration) -> Self {
        Self { store, share_ttl }
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    /// Persist a freshly generated plan. The record expires `share_ttl`
    /// after `now`.
    pub async fn create(
        &self,
        plan: TripPlan,
        preferences: TripPreferences,
        now: DateTime<Utc>,
    ) -> Result<TripRecord, StoreError> {
        let record = TripRecord {
            id: Uuid::new_v4(),
            shareable_id: Uuid::new_v4(),
            plan,
            preferences,
            created_at: now,
            expires_at: now + self.share_ttl,
        };
        self.store.insert(&record).await?;
        tracing::info!(
            "Stored trip {} (share {}, expires {})",
            record.id,
            record.shareable_id,
            record.expires_at.to_rfc3339()
        );
        Ok(record)
    }

    /// Fetch by primary id, regardless of expiry.
    pub async fn get_by_id(&self, id: Uuid) -> Result<TripRecord, LookupError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(LookupError::NotFound)
    }

    /// Fetch by share id; expired records are reported as such.
    pub async fn get_by_shareable_id(
        &self,
        shareable_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<TripRecord, LookupError> {
        let record = self
            .store
            .find_by_shareable_id(shareable_id)
            .await?
            .ok_or(LookupError::NotFound)?;
        if record.is_expired(now) {
            return Err(LookupError::Expired(record.expires_at));
        }
        Ok(record)
    }

    pub async fn ping(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Trip store ping failed: {}", e);
                false
            }
        }
    }
}
