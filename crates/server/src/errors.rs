use std::any::Any;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::errors::ModelError;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// Body text of every 500; details stay in the server log.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Handler-level error mapped onto an HTTP status and an `{"error": ...}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) | ServiceError::Model(ModelError::Validation(msg)) => ApiError::Validation(msg),
            ServiceError::NotFound(msg) => ApiError::NotFound(msg),
            ServiceError::Conflict(msg) => ApiError::Conflict(msg),
            other @ (ServiceError::Db(_) | ServiceError::Model(ModelError::Db(_))) => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(r: JsonRejection) -> Self {
        ApiError::Validation(format!("invalid request body: {}", r.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = match self {
            ApiError::Internal(detail) => {
                error!(error = %detail, "request failed");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            ApiError::Validation(msg) | ApiError::NotFound(msg) | ApiError::Conflict(msg) => msg,
        };
        (status, Json(serde_json::json!({"error": msg}))).into_response()
    }
}

/// Converts a handler panic into the same opaque 500 as any other internal failure.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    ApiError::Internal(format!("handler panicked: {detail}")).into_response()
}
