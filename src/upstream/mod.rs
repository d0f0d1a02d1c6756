//! Upstream completion API.
//!
//! # Data Flow
//! ```text
//! validated prompt
//!     → client.rs (build MessagesRequest, attach headers, POST once)
//!     → types.rs (MessagesResponse / raw error text)
//!     → CompletionOutcome back to the relay handler
//! ```

pub mod client;
pub mod types;

pub use client::{CompletionClient, CompletionOutcome, UpstreamError};
pub use types::{ContentBlock, Message, MessagesRequest, MessagesResponse};
