//! Prompt relay library.
//!
//! Accepts `POST {"prompt": "..."}`, forwards the prompt to the Anthropic
//! Messages API as a single user message, and answers with
//! `{"response": "..."}`.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod relay;
pub mod upstream;

pub use config::{ApiKey, RelayConfig};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
