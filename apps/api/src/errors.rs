use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so handlers can return `Result<T, AppError>`.
///
/// Wire shape is a flat `{"error": CODE, "message": ...}` object. The
/// taxonomy the UI branches on: MISSING_INPUT means fix the request,
/// RATE_LIMIT means wait and resubmit unchanged, PARSE_ERROR means the
/// generation output was structurally invalid and only a retry helps,
/// INTERNAL_ERROR is everything unexpected.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Invalid webhook signature")]
    InvalidSignature,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited: {0}")]
    RateLimit(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::MissingInput(msg) => (StatusCode::BAD_REQUEST, "MISSING_INPUT", msg.clone()),
            AppError::InvalidSignature => (
                StatusCode::BAD_REQUEST,
                "INVALID_SIGNATURE",
                "Webhook signature verification failed".to_string(),
            ),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::RateLimit(msg) => {
                (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMIT", msg.clone())
            }
            AppError::Parse(msg) => {
                tracing::warn!("generation output parse failure: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PARSE_ERROR",
                    "The AI response did not match the expected structure".to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": code,
            "message": message
        }));

        (status, body).into_response()
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::RateLimited => AppError::RateLimit(
                "The AI rate limit was reached. Wait a moment and resubmit.".to_string(),
            ),
            other => AppError::Llm(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                AppError::MissingInput("x".into()),
                StatusCode::BAD_REQUEST,
            ),
            (AppError::InvalidSignature, StatusCode::BAD_REQUEST),
            (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (
                AppError::RateLimit("x".into()),
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (AppError::Parse("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::Llm("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_rate_limit_passthrough_from_llm() {
        let err: AppError = LlmError::RateLimited.into();
        assert!(matches!(err, AppError::RateLimit(_)));
        let err: AppError = LlmError::EmptyContent.into();
        assert!(matches!(err, AppError::Llm(_)));
    }
}
