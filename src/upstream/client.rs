//! Completion API client.
//!
//! # Responsibilities
//! - Build the single-message request from a validated prompt
//! - Attach the credential and version headers
//! - Perform exactly one POST per call, bounded by the configured timeouts
//! - Classify the response as success, upstream failure, or internal error

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use reqwest::{Client, Url};
use thiserror::Error;

use crate::config::{ApiKey, TimeoutConfig, UpstreamConfig};
use crate::upstream::types::{Message, MessagesRequest, MessagesResponse};

pub const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");
pub const API_VERSION_HEADER: HeaderName = HeaderName::from_static("anthropic-version");

/// Failures that are not an upstream status code.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection, TLS, timeout or body read failure.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// A success status whose body is not a completion.
    #[error("malformed completion body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    /// Endpoint or header values could not be used.
    #[error("invalid upstream configuration: {0}")]
    Config(String),
}

/// Result of the one upstream call.
#[derive(Debug)]
pub enum CompletionOutcome {
    /// 2xx with a parsed body.
    Success(MessagesResponse),
    /// Any other status, with the raw error body.
    Failure { status: StatusCode, error_text: String },
}

/// Client for the Messages endpoint. Cheap to clone.
#[derive(Clone, Debug)]
pub struct CompletionClient {
    http: Client,
    endpoint: Url,
    api_key: ApiKey,
    api_version: HeaderValue,
    model: String,
    max_tokens: u32,
    temperature: Option<f32>,
    system: Option<String>,
}

impl CompletionClient {
    pub fn new(
        upstream: &UpstreamConfig,
        timeouts: &TimeoutConfig,
        api_key: ApiKey,
    ) -> Result<Self, UpstreamError> {
        let endpoint = Url::parse(&upstream.endpoint)
            .map_err(|e| UpstreamError::Config(format!("endpoint '{}': {}", upstream.endpoint, e)))?;
        let api_version = HeaderValue::from_str(&upstream.api_version)
            .map_err(|e| UpstreamError::Config(format!("api_version: {}", e)))?;

        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(Duration::from_secs(timeouts.upstream_secs));
        if !upstream.use_system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            endpoint,
            api_key,
            api_version,
            model: upstream.model.clone(),
            max_tokens: upstream.max_tokens,
            temperature: upstream.temperature,
            system: upstream.system.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Wrap `prompt` as the only user message with the fixed parameters.
    pub fn build_request(&self, prompt: &str) -> MessagesRequest {
        MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![Message::user(prompt)],
            temperature: self.temperature,
            system: self.system.clone(),
        }
    }

    /// Send one completion request.
    pub async fn complete(&self, prompt: &str) -> Result<CompletionOutcome, UpstreamError> {
        let body = self.build_request(prompt);

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, self.api_key.header_value().clone())
            .header(API_VERSION_HEADER, self.api_version.clone())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            return Ok(CompletionOutcome::Failure { status, error_text });
        }

        let bytes = response.bytes().await?;
        let parsed: MessagesResponse = serde_json::from_slice(&bytes)?;
        Ok(CompletionOutcome::Success(parsed))
    }
}
