pub mod health;
pub mod seasons;
pub mod trips;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::services::planner::TripPlanner;
use crate::services::trips::TripService;

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub trips: Arc<TripService>,
    pub planner: Arc<TripPlanner>,
}

/// API routes without middleware or docs.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health::health_check))
        .route("/api/v1/seasons", get(seasons::get_season))
        .route("/api/v1/trips", post(trips::create_trip))
        .route("/api/v1/trips/:id", get(trips::get_trip))
        .route(
            "/api/v1/trips/share/:shareable_id",
            get(trips::get_shared_trip),
        )
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::time::Duration;

    use crate::db::store::{MemoryTripStore, TripStore};
    use crate::services::telemetry::TracingObserver;
    use crate::services::venues::DiningDirectory;

    /// State backed by `store` with the model path disabled.
    pub(crate) fn rules_only_state(store: Arc<dyn TripStore>) -> AppState {
        AppState {
            trips: Arc::new(TripService::new(store, chrono::Duration::days(7))),
            planner: Arc::new(TripPlanner::new(
                None,
                DiningDirectory::disabled(),
                Arc::new(TracingObserver),
                Duration::from_secs(5),
            )),
        }
    }

    pub(crate) fn memory_state() -> AppState {
        rules_only_state(Arc::new(MemoryTripStore::new()))
    }

    pub(crate) async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}
