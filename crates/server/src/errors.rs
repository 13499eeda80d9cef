use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::{ErrorKind, ServiceError};
use tracing::error;

/// Error response rendered as `{"error": message}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn method_not_allowed() -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
    }

    pub fn invalid_json() -> Self {
        Self::bad_request("invalid JSON format")
    }

    /// Map a service failure by kind. Client-fixable errors keep their
    /// message; collaborator faults are logged and replaced by `fallback`.
    pub fn from_service(err: ServiceError, fallback: &'static str) -> Self {
        match err.kind() {
            ErrorKind::Validation => Self::bad_request(err.to_string()),
            ErrorKind::NotFound => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            ErrorKind::Storage => {
                error!(error = %err, code = err.code(), "storage failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, fallback)
            }
            ErrorKind::Upstream => {
                error!(error = %err, code = err.code(), "upstream failure");
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, fallback)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({"error": self.message}))).into_response()
    }
}
