//! Observability subsystem.
//!
//! Logging only: request IDs flow from the HTTP layer into every handler
//! log line, and `tower-http` emits a span per request.

pub mod logging;

pub use logging::init_logging;
