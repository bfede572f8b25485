//! Error types for paypilot-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use paypilot_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("{0}")]
    Upstream(#[from] CoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Upstream(e) if e.is_retryable() => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> String {
        match self {
            ApiError::NotFound { .. } => "NOT_FOUND".to_string(),
            ApiError::Upstream(e) => e.code().to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("API error: {}", self);
        }
        let message = match &self {
            ApiError::Upstream(e) => e.user_message(),
            other => other.to_string(),
        };
        let body = serde_json::json!({
            "error": message,
            "code": self.code(),
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_code() {
        let error = ApiError::from(CoreError::fetch_failed("down"));
        assert_eq!(error.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(error.code(), "FETCH_FAILED");

        let error = ApiError::from(CoreError::InvalidData { message: "bad".to_string() });
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.code(), "INVALID_DATA");

        let error = ApiError::NotFound { resource: "page".to_string() };
        assert_eq!(error.status(), StatusCode::NOT_FOUND);
        assert_eq!(error.to_string(), "Not found: page");
    }
}
