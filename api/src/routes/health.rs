use axum::extract::State;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use super::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Service status ("ok" when healthy, "degraded" when the store is unreachable)
    pub status: String,
    /// API version
    pub version: String,
    /// Whether the trip store is reachable
    pub database: bool,
    /// Storage backend ("postgres" or "memory")
    pub storage: String,
    /// Whether model-backed generation is enabled
    pub model_configured: bool,
}

/// Health check endpoint.
///
/// Pings the trip store. Returns status "degraded" (still 200) if the store
/// is unreachable, so load balancers can distinguish partial failures.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_ok = state.trips.ping().await;

    Json(HealthResponse {
        status: if db_ok {
            "ok".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_ok,
        storage: state.trips.backend().to_string(),
        model_configured: state.planner.model_configured(),
    })
}
