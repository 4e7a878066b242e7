use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::AppState;
use crate::errors::{AppError, ErrorResponse};
use crate::helpers::today_utc;
use crate::services::plan::TripPlan;
use crate::services::planner::PlanSource;
use crate::services::preferences::TripPreferences;
use crate::services::season::{resolve_season, Season};
use crate::services::trips::TripRecord;

/// Request body for POST /api/v1/trips.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTripRequest {
    pub preferences: TripPreferences,
}

/// Response body for POST /api/v1/trips.
///
/// `id`, `shareableId` and `expiresAt` are null when the plan could not be
/// stored; the plan itself is still returned.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTripResponse {
    pub plan: TripPlan,
    pub preferences: TripPreferences,
    pub generated_at: DateTime<Utc>,
    pub id: Option<Uuid>,
    pub shareable_id: Option<Uuid>,
    pub expires_at: Option<DateTime<Utc>>,
    pub season: Season,
    /// Which generator produced the plan
    pub source: PlanSource,
}

/// Generate and store a trip plan.
#[utoipa::path(
    post,
    path = "/api/v1/trips",
    tag = "Trips",
    request_body = CreateTripRequest,
    responses(
        (status = 201, description = "Plan generated", body = CreateTripResponse),
        (status = 400, description = "Invalid preferences", body = ErrorResponse),
    )
)]
pub async fn create_trip(
    State(state): State<AppState>,
    payload: Result<Json<CreateTripRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateTripResponse>), AppError> {
    let Json(CreateTripRequest { preferences }) =
        payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    preferences.validate()?;

    let now = Utc::now();
    let start_date = preferences.start_date_or(today_utc(now));
    let season = resolve_season(start_date);
    tracing::debug!(
        "Planning {}-day {} trip from {}",
        preferences.days,
        season.as_str(),
        start_date
    );

    let generated = state
        .planner
        .generate_trip_plan(&preferences, season, start_date)
        .await;

    let stored = match state
        .trips
        .create(generated.plan.clone(), preferences.clone(), now)
        .await
    {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::error!("Failed to store generated trip, returning it unsaved: {}", e);
            None
        }
    };

    let response = CreateTripResponse {
        plan: generated.plan,
        preferences,
        generated_at: now,
        id: stored.as_ref().map(|r| r.id),
        shareable_id: stored.as_ref().map(|r| r.shareable_id),
        expires_at: stored.as_ref().map(|r| r.expires_at),
        season,
        source: generated.source,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Get a stored trip by id. Expired trips are still returned.
#[utoipa::path(
    get,
    path = "/api/v1/trips/{id}",
    tag = "Trips",
    params(
        ("id" = Uuid, Path, description = "Trip UUID"),
    ),
    responses(
        (status = 200, description = "Stored trip", body = TripRecord),
        (status = 404, description = "Trip not found", body = ErrorResponse),
    )
)]
pub async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TripRecord>, AppError> {
    let id = parse_id(&id)?;
    Ok(Json(state.trips.get_by_id(id).await?))
}

/// Get a shared trip. Returns 410 once the share link has expired.
#[utoipa::path(
    get,
    path = "/api/v1/trips/share/{shareable_id}",
    tag = "Trips",
    params(
        ("shareable_id" = Uuid, Path, description = "Share link UUID"),
    ),
    responses(
        (status = 200, description = "Shared trip", body = TripRecord),
        (status = 404, description = "Trip not found", body = ErrorResponse),
        (status = 410, description = "Share link expired", body = ErrorResponse),
    )
)]
pub async fn get_shared_trip(
    State(state): State<AppState>,
    Path(shareable_id): Path<String>,
) -> Result<Json<TripRecord>, AppError> {
    let shareable_id = parse_id(&shareable_id)?;
    Ok(Json(
        state
            .trips
            .get_by_shareable_id(shareable_id, Utc::now())
            .await?,
    ))
}

/// Identifiers that are not UUIDs cannot exist, so they are reported as 404.
fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("Trip not found".to_string()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::Duration;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::db::store::tests::{sample_record, FailingStore};
    use crate::db::store::{MemoryTripStore, TripStore};
    use crate::routes::api_router;
    use crate::routes::testing::{body_json, rules_only_state};

    fn preferences() -> Value {
        json!({
            "days": 3,
            "budget": "medium",
            "interests": ["aurora", "dining"],
            "transport": "car",
            "difficulty": "moderate",
            "startDate": "2026-02-01",
            "groupSize": 2
        })
    }

    fn post_trip(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/trips")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_create_trip_end_to_end() {
        let store = Arc::new(MemoryTripStore::new());
        let app = api_router(rules_only_state(store.clone()));

        let response = app
            .clone()
            .oneshot(post_trip(json!({ "preferences": preferences() })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        assert_eq!(body["season"], "winter");
        assert_eq!(body["source"], "rules");

        let days = body["plan"]["days"].as_array().unwrap();
        let dates: Vec<&str> = days.iter().map(|d| d["date"].as_str().unwrap()).collect();
        assert_eq!(dates, vec!["2026-02-01", "2026-02-02", "2026-02-03"]);
        assert!(days.iter().all(|d| d["aurora"].is_object()));

        let activity_sum: u64 = days
            .iter()
            .flat_map(|d| d["activities"].as_array().unwrap())
            .map(|a| a["cost"].as_u64().unwrap())
            .sum();
        assert_eq!(body["plan"]["totalCost"].as_u64().unwrap(), activity_sum);

        let id = body["id"].as_str().unwrap().to_string();
        let shareable_id = body["shareableId"].as_str().unwrap().to_string();
        assert_ne!(id, shareable_id);

        let by_id = body_json(
            app.clone()
                .oneshot(get(&format!("/api/v1/trips/{}", id)))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(by_id["shareableId"], shareable_id.as_str());
        assert_eq!(by_id["plan"], body["plan"]);
        assert_eq!(by_id["preferences"]["days"], 3);

        let shared = app
            .oneshot(get(&format!("/api/v1/trips/share/{}", shareable_id)))
            .await
            .unwrap();
        assert_eq!(shared.status(), StatusCode::OK);
        assert_eq!(body_json(shared).await["id"], id.as_str());
    }

    #[tokio::test]
    async fn test_too_many_days_rejected() {
        let mut prefs = preferences();
        prefs["days"] = json!(15);
        let response = api_router(rules_only_state(Arc::new(MemoryTripStore::new())))
            .oneshot(post_trip(json!({ "preferences": prefs })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("days"));
    }

    #[tokio::test]
    async fn test_empty_interests_rejected() {
        let mut prefs = preferences();
        prefs["days"] = json!(2);
        prefs["interests"] = json!([]);
        let response = api_router(rules_only_state(Arc::new(MemoryTripStore::new())))
            .oneshot(post_trip(json!({ "preferences": prefs })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_body_rejected() {
        let response = api_router(rules_only_state(Arc::new(MemoryTripStore::new())))
            .oneshot(post_trip(json!({ "preferences": { "days": "three" } })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_plan_returned_when_store_fails() {
        let response = api_router(rules_only_state(Arc::new(FailingStore)))
            .oneshot(post_trip(json!({ "preferences": preferences() })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert!(body["id"].is_null());
        assert!(body["shareableId"].is_null());
        assert_eq!(body["plan"]["days"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found() {
        let app = api_router(rules_only_state(Arc::new(MemoryTripStore::new())));
        let missing = uuid::Uuid::new_v4();

        for uri in [
            format!("/api/v1/trips/{}", missing),
            format!("/api/v1/trips/share/{}", missing),
            "/api/v1/trips/not-a-uuid".to_string(),
            "/api/v1/trips/share/not-a-uuid".to_string(),
        ] {
            let response = app.clone().oneshot(get(&uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_expired_share_link_is_gone() {
        let store = Arc::new(MemoryTripStore::new());
        let mut record = sample_record();
        record.created_at = chrono::Utc::now() - Duration::days(8);
        record.expires_at = record.created_at + Duration::days(7);
        store.insert(&record).await.unwrap();
        let app = api_router(rules_only_state(store));

        let shared = app
            .clone()
            .oneshot(get(&format!("/api/v1/trips/share/{}", record.shareable_id)))
            .await
            .unwrap();
        assert_eq!(shared.status(), StatusCode::GONE);

        // Lookups by primary id do not enforce expiry.
        let by_id = app
            .oneshot(get(&format!("/api/v1/trips/{}", record.id)))
            .await
            .unwrap();
        assert_eq!(by_id.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_store_failure_on_lookup_is_internal_error() {
        let response = api_router(rules_only_state(Arc::new(FailingStore)))
            .oneshot(get(&format!("/api/v1/trips/{}", uuid::Uuid::new_v4())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await["error"],
            "Internal storage error"
        );
    }
}
