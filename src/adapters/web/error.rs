//! HTTP error responses for the gateway.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::domain::error::FluxbackError;
use crate::domain::reply::ErrorBody;

pub const MISSING_INPUT_MESSAGE: &str = "Missing strategy or data";
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON body";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";
pub const REQUEST_TIMEOUT_MESSAGE: &str = "Request timed out";

#[derive(Debug)]
pub struct GatewayError {
    pub status: StatusCode,
    pub message: String,
}

impl GatewayError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn method_not_allowed() -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_MESSAGE)
    }
}

impl From<FluxbackError> for GatewayError {
    fn from(err: FluxbackError) -> Self {
        match err {
            FluxbackError::MissingInput { .. } => Self::bad_request(MISSING_INPUT_MESSAGE),
            FluxbackError::InvalidJson { .. } => Self::bad_request(INVALID_JSON_MESSAGE),
            FluxbackError::Engine { .. }
            | FluxbackError::Transport { .. }
            | FluxbackError::Decode { .. }
            | FluxbackError::InvalidResult { .. } => {
                Self::new(StatusCode::BAD_GATEWAY, err.to_string())
            }
            _ => Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, message = %self.message, "gateway error");
        } else {
            tracing::debug!(status = %self.status, message = %self.message, "request refused");
        }
        (self.status, Json(ErrorBody::new(self.message))).into_response()
    }
}
