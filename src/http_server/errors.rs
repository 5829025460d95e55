//! HTTP error responses
//!
//! Every failure leaves the server as
//! `{"error": {"msg": "<reason>", "status": <code>}}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::dispatch::Rejection;

/// Error surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request failed validation
    #[error("{0}")]
    BadRequest(String),

    /// Body could not be decoded for its content type
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// Query string could not be decoded
    #[error("malformed query string: {0}")]
    MalformedQuery(String),

    /// Body larger than the configured limit
    #[error("request body exceeds {0} bytes")]
    PayloadTooLarge(usize),
}

impl ApiError {
    /// Status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::MalformedBody(_) | ApiError::MalformedQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

impl From<Rejection> for ApiError {
    fn from(rejection: Rejection) -> Self {
        ApiError::BadRequest(rejection.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = json!({
            "error": {
                "msg": self.to_string(),
                "status": status.as_u16(),
            }
        });
        (status, Json(body)).into_response()
    }
}
