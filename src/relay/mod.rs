//! Prompt relay.
//!
//! # Data Flow
//! ```text
//! POST { "prompt": ... }
//!     → handler.rs (method check, body read)
//!     → prompt.rs (JSON decode, prompt extraction)
//!     → upstream::CompletionClient (one call)
//!     → handler.rs ({"response": text})
//!
//! Any failure:
//!     → error.rs (RelayError → status + plain-text body)
//! ```
//!
//! # Design Decisions
//! - No retries, no caching, no state between requests
//! - One error type threaded through every step, mapped once at the top

pub mod error;
pub mod handler;
pub mod prompt;

pub use error::RelayError;
pub use handler::{relay_handler, RelayResponse};
pub use prompt::extract_prompt;
