//! Response envelopes and the HTTP mapping of errors

use crate::error::ChatAnalyzerError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

pub const SUCCESS_MESSAGE: &str = "Obtenido correctamente";

/// Success envelope: `{error: 0, message, data}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub error: u8,
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            error: 0,
            message: SUCCESS_MESSAGE.to_string(),
            data,
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    /// Rejected before any processing; rendered as `{detail}`
    #[error("{0}")]
    BadRequest(String),

    /// Body over the size limit; rendered as `{detail}` with 413
    #[error("{0}")]
    PayloadTooLarge(String),

    /// Rendered as `{error: 1, message, data: []}`
    #[error("{0}")]
    Internal(String),
}

impl From<ChatAnalyzerError> for ApiError {
    fn from(err: ChatAnalyzerError) -> Self {
        match err {
            ChatAnalyzerError::Validation(message) => ApiError::BadRequest(message),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(rejection.body_text())
        } else {
            ApiError::BadRequest(rejection.body_text())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(detail) => {
                log::warn!("Rejected request: {}", detail);
                (StatusCode::BAD_REQUEST, Json(json!({ "detail": detail }))).into_response()
            }
            ApiError::PayloadTooLarge(detail) => {
                log::warn!("Rejected oversized request: {}", detail);
                (StatusCode::PAYLOAD_TOO_LARGE, Json(json!({ "detail": detail }))).into_response()
            }
            ApiError::Internal(message) => {
                log::error!("Analysis failed: {}", message);
                let body = Json(json!({
                    "error": 1,
                    "message": message,
                    "data": [],
                }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let value = serde_json::to_value(ApiResponse::success(vec![1, 2])).unwrap();
        assert_eq!(value["error"], 0);
        assert_eq!(value["message"], "Obtenido correctamente");
        assert_eq!(value["data"], json!([1, 2]));
    }

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err = ApiError::from(ChatAnalyzerError::empty_text());
        assert!(matches!(err, ApiError::BadRequest(ref m) if m == "El texto no puede estar vacío"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_other_errors_map_to_internal() {
        let err = ApiError::from(ChatAnalyzerError::Processing("boom".to_string()));
        assert!(matches!(err, ApiError::Internal(ref m) if m == "Processing error: boom"));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
