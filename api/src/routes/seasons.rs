use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::errors::{AppError, ErrorResponse};
use crate::helpers::today_utc;
use crate::services::season::{resolve_season, Season};

#[derive(Debug, Deserialize, IntoParams)]
pub struct SeasonQuery {
    /// Date to resolve (YYYY-MM-DD); defaults to today
    pub date: Option<NaiveDate>,
}

/// Season and its display metadata for a date.
#[derive(Debug, Serialize, ToSchema)]
pub struct SeasonResponse {
    pub date: NaiveDate,
    pub season: Season,
    /// Display name (e.g. "Polar Night")
    pub name: String,
    pub highlights: Vec<String>,
    /// Typical weather description
    pub weather: String,
}

/// Resolve the travel season for a date.
#[utoipa::path(
    get,
    path = "/api/v1/seasons",
    tag = "Seasons",
    params(SeasonQuery),
    responses(
        (status = 200, description = "Season for the date", body = SeasonResponse),
        (status = 400, description = "Invalid date", body = ErrorResponse),
    )
)]
pub async fn get_season(
    query: Result<Query<SeasonQuery>, QueryRejection>,
) -> Result<Json<SeasonResponse>, AppError> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let date = query.date.unwrap_or_else(|| today_utc(Utc::now()));
    let season = resolve_season(date);
    let info = season.info();

    Ok(Json(SeasonResponse {
        date,
        season,
        name: info.name.to_string(),
        highlights: info.highlights.iter().map(|h| h.to_string()).collect(),
        weather: info.weather.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::routes::api_router;
    use crate::routes::testing::{body_json, memory_state};

    async fn get(uri: &str) -> axum::response::Response {
        api_router(memory_state())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_season_for_january_is_polar_night() {
        let response = get("/api/v1/seasons?date=2026-01-10").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["season"], "polar-night");
        assert_eq!(body["date"], "2026-01-10");
        assert!(!body["highlights"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_season_for_july_is_summer() {
        let body = body_json(get("/api/v1/seasons?date=2026-07-01").await).await;
        assert_eq!(body["season"], "summer");
    }

    #[tokio::test]
    async fn test_season_defaults_to_today() {
        let response = get("/api/v1/seasons").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_invalid_date_is_bad_request() {
        let response = get("/api/v1/seasons?date=2026-13-40").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }
}
