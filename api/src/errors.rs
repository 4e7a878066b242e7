use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::db::store::StoreError;
use crate::services::preferences::PreferenceError;
use crate::services::trips::LookupError;

/// Standard error response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Gone: {0}")]
    Gone(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Gone(msg) => (StatusCode::GONE, msg.clone()),
            AppError::ExternalServiceError(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            AppError::StoreError(err) => {
                tracing::error!("Store error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal storage error".to_string(),
                )
            }
        };

        (status, axum::Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<PreferenceError> for AppError {
    fn from(err: PreferenceError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<LookupError> for AppError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::NotFound => AppError::NotFound("Trip not found".to_string()),
            LookupError::Expired(at) => {
                AppError::Gone(format!("Share link expired at {}", at.to_rfc3339()))
            }
            LookupError::Store(e) => AppError::StoreError(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (AppError::Gone("x".into()), StatusCode::GONE),
            (
                AppError::ExternalServiceError("x".into()),
                StatusCode::BAD_GATEWAY,
            ),
            (
                AppError::StoreError(StoreError::Duplicate),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_lookup_errors_stay_distinct() {
        let expired = Utc.with_ymd_and_hms(2026, 2, 8, 0, 0, 0).unwrap();
        assert!(matches!(
            AppError::from(LookupError::NotFound),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(LookupError::Expired(expired)),
            AppError::Gone(_)
        ));
    }

    #[test]
    fn test_preference_error_is_bad_request() {
        let err = AppError::from(PreferenceError::DaysOutOfRange(15));
        assert_eq!(
            err.to_string(),
            "Bad request: days must be between 1 and 14, got 15"
        );
    }
}
