//! Prompt relay server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client                 ┌──────────────────────────────────────┐
//!     POST {"prompt"}  ────▶ │ http::server (request id, timeout,   │
//!                            │               trace)                 │
//!                            │        │                             │
//!                            │        ▼                             │
//!                            │ relay::handler ──▶ upstream::client ─┼──▶ Messages API
//!                            │        │                  │          │
//!     {"response"}     ◀──── │ relay::error ◀────────────┘          │
//!                            └──────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use prompt_relay::config::{load_or_default, ApiKey};
use prompt_relay::lifecycle::{trigger_on_signal, Shutdown};
use prompt_relay::observability::init_logging;
use prompt_relay::HttpServer;

#[derive(Parser)]
#[command(name = "prompt-relay")]
#[command(about = "Relay prompts to the Anthropic Messages API", long_about = None)]
struct Args {
    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_or_default(args.config.as_deref())?;
    init_logging(&config.observability)?;

    tracing::info!("prompt-relay v{} starting", env!("CARGO_PKG_VERSION"));

    let api_key = ApiKey::from_env()?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        endpoint = %config.upstream.endpoint,
        model = %config.upstream.model,
        max_tokens = config.upstream.max_tokens,
        upstream_timeout_secs = config.timeouts.upstream_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, api_key)?;
    let server_shutdown = shutdown.subscribe();

    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        trigger_on_signal(&signal_shutdown).await;
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
