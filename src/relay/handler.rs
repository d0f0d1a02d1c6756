//! The relay handler.
//!
//! Method check → body parse → prompt validation → one upstream call →
//! unwrap or map the failure. Every branch ends in exactly one response,
//! including the request deadline.

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::relay::error::RelayError;
use crate::relay::prompt::extract_prompt;
use crate::upstream::CompletionOutcome;

/// Success body returned to the caller.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelayResponse {
    pub response: String,
}

/// Axum entry point. Never fails: errors are already responses.
pub async fn relay_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let request_id = request_id(&request);

    let deadline = state.request_timeout;
    let outcome = match tokio::time::timeout(deadline, relay(&state, request)).await {
        Ok(outcome) => outcome,
        Err(_) => Err(RelayError::Timeout(deadline.as_secs())),
    };

    match outcome {
        Ok(text) => Json(RelayResponse { response: text }).into_response(),
        Err(err) => {
            match &err {
                RelayError::Upstream { status, error_text } => {
                    tracing::error!(
                        request_id = %request_id,
                        status = status.as_u16(),
                        error_text = %error_text,
                        "Completion API error"
                    );
                }
                RelayError::Internal(source) => {
                    tracing::error!(request_id = %request_id, error = %source, "Relay failed");
                }
                RelayError::Timeout(secs) => {
                    tracing::error!(request_id = %request_id, timeout_secs = *secs, "Relay timed out");
                }
                _ => {
                    tracing::debug!(request_id = %request_id, error = %err, "Rejected request");
                }
            }
            err.into_response()
        }
    }
}

async fn relay(state: &AppState, request: Request<Body>) -> Result<String, RelayError> {
    if request.method() != Method::POST {
        return Err(RelayError::MethodNotAllowed);
    }

    let body = axum::body::to_bytes(request.into_body(), state.max_body_bytes)
        .await
        .map_err(|_| RelayError::InvalidJson)?;
    let prompt = extract_prompt(&body)?;

    tracing::debug!(
        prompt_chars = prompt.chars().count(),
        endpoint = %state.client.endpoint(),
        "Relaying prompt"
    );

    match state.client.complete(&prompt).await? {
        CompletionOutcome::Success(completion) => Ok(completion.text()),
        CompletionOutcome::Failure { status, error_text } => {
            Err(RelayError::Upstream { status, error_text })
        }
    }
}
