//! Dining directory enrichment.
//!
//! Optionally queries an external restaurant directory for venue names to
//! suggest in the model prompt. Results are kept in an injected [`TtlCache`]
//! keyed by the query string. Lookups never fail: an unreachable directory
//! just means no suggestions.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Deserialize;
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::services::preferences::Budget;

/// Maximum number of venue names handed to the prompt.
const MAX_SUGGESTIONS: usize = 8;

/// Bounded-lifetime in-process cache. Stale entries are never returned and are
/// dropped by [`TtlCache::evict_expired`] or overwritten on the next insert.
///
/// Concurrent callers may race to fill the same key; the last write wins,
/// which is fine for supplementary content.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: RwLock<HashMap<K, (Instant, V)>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Fresh value for `key`, if any.
    pub async fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|(inserted, _)| inserted.elapsed() < self.ttl)
            .map(|(_, v)| v.clone())
    }

    pub async fn insert(&self, key: K, value: V) {
        self.entries
            .write()
            .await
            .insert(key, (Instant::now(), value));
    }

    /// Drop every expired entry. Returns how many were removed.
    pub async fn evict_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, (inserted, _)| inserted.elapsed() < self.ttl);
        before - entries.len()
    }
}

/// A restaurant as returned by the directory.
#[derive(Debug, Clone, Deserialize)]
pub struct Venue {
    pub name: String,
}

/// HTTP client for the restaurant directory.
#[derive(Debug, Clone)]
pub struct VenueClient {
    client: reqwest::Client,
    base_url: String,
}

impl VenueClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.to_string(),
        }
    }

    /// Fetch venues for a price level ("low", "medium", "high").
    pub async fn fetch(&self, price_level: &str) -> Result<Vec<Venue>, AppError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("priceLevel", price_level)])
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("venue directory request failed: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "venue directory returned HTTP {}",
                response.status()
            )));
        }

        response.json().await.map_err(|e| {
            AppError::ExternalServiceError(format!("venue directory JSON parse error: {}", e))
        })
    }
}

/// Cached dining suggestions keyed by budget tier.
pub struct DiningDirectory {
    client: Option<VenueClient>,
    cache: Arc<TtlCache<String, Vec<String>>>,
}

impl DiningDirectory {
    pub fn new(client: Option<VenueClient>, cache: Arc<TtlCache<String, Vec<String>>>) -> Self {
        Self { client, cache }
    }

    /// Directory without a backing service; always returns no suggestions.
    pub fn disabled() -> Self {
        Self::new(None, Arc::new(TtlCache::new(Duration::ZERO)))
    }

    /// Venue names for `budget`, from cache when fresh. Empty on any failure.
    pub async fn suggestions(&self, budget: Budget) -> Vec<String> {
        let Some(client) = &self.client else {
            return Vec::new();
        };

        let key = format!("priceLevel={}", budget.as_str());
        if let Some(hit) = self.cache.get(&key).await {
            return hit;
        }

        match client.fetch(budget.as_str()).await {
            Ok(venues) => {
                let names: Vec<String> = venues
                    .into_iter()
                    .map(|v| v.name)
                    .filter(|n| !n.trim().is_empty())
                    .take(MAX_SUGGESTIONS)
                    .collect();
                self.cache.insert(key, names.clone()).await;
                names
            }
            Err(e) => {
                tracing::warn!("Dining directory unavailable, continuing without: {}", e);
                Vec::new()
            }
        }
    }
}
