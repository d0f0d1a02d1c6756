//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the relay handler
//! - Wire up middleware (tracing, request ID)
//! - Bind server to listener
//! - Graceful shutdown on signal or trigger

use std::time::Duration;

use axum::{routing::any, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::{ApiKey, RelayConfig};
use crate::http::request::{MakeRequestUuidV4, X_REQUEST_ID};
use crate::relay::relay_handler;
use crate::upstream::{CompletionClient, UpstreamError};

/// Application state injected into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub client: CompletionClient,
    pub max_body_bytes: usize,
    /// Deadline for the whole relay, body read included.
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(config: &RelayConfig, api_key: ApiKey) -> Result<Self, UpstreamError> {
        let client = CompletionClient::new(&config.upstream, &config.timeouts, api_key)?;
        Ok(Self {
            client,
            max_body_bytes: config.listener.max_body_bytes,
            request_timeout: Duration::from_secs(config.timeouts.request_secs),
        })
    }
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and credential.
    pub fn new(config: RelayConfig, api_key: ApiKey) -> Result<Self, UpstreamError> {
        let state = AppState::new(&config, api_key)?;
        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The request deadline is enforced inside the handler so that it maps
    /// through `RelayError` like every other failure.
    pub fn build_router(state: AppState) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID));

        Router::new()
            .route("/", any(relay_handler))
            .route("/{*path}", any(relay_handler))
            .with_state(state)
            .layer(middleware)
    }

    /// Run the server until `shutdown` fires or the sender is dropped.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            model = %self.config.upstream.model,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
