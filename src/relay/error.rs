//! Relay error taxonomy and its single mapping to HTTP responses.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::upstream::UpstreamError;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Only POST requests are accepted.")]
    MethodNotAllowed,

    #[error("Invalid JSON body.")]
    InvalidJson,

    #[error("Missing prompt in request body.")]
    MissingPrompt,

    #[error("Prompt must be a string.")]
    PromptNotString,

    /// Non-2xx from the completion API. `error_text` is logged, not returned.
    #[error("Error from completion API: {}", .status.as_u16())]
    Upstream {
        status: StatusCode,
        error_text: String,
    },

    #[error("An internal server error occurred: {0}")]
    Internal(#[from] UpstreamError),

    /// The whole relay, body read included, overran `timeouts.request_secs`.
    #[error("An internal server error occurred: request timed out after {0} seconds")]
    Timeout(u64),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::InvalidJson | RelayError::MissingPrompt | RelayError::PromptNotString => {
                StatusCode::BAD_REQUEST
            }
            RelayError::Upstream { status, .. } => *status,
            RelayError::Internal(_) | RelayError::Timeout(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = self.to_string();
        match self {
            RelayError::MethodNotAllowed => {
                (status, [(header::ALLOW, "POST")], body).into_response()
            }
            _ => (status, body).into_response(),
        }
    }
}
