//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Load credential → Init logging → Bind → Serve
//!
//! Shutdown:
//!     SIGTERM/SIGINT → signals.rs → Shutdown::trigger → server drains → Exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - In-flight requests finish before exit

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::trigger_on_signal;
