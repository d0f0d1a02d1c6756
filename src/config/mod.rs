//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!
//! ANTHROPIC_API_KEY
//!     → credentials.rs (ApiKey, redacted, read-only)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - All fields have defaults so the relay runs with no file at all
//! - The API key never appears in the file or in logs

pub mod credentials;
pub mod loader;
pub mod schema;
pub mod validation;

pub use credentials::{ApiKey, CredentialError, API_KEY_ENV_VAR};
pub use loader::{load_config, load_or_default, parse_config, ConfigError};
pub use schema::{
    ListenerConfig, LogFormat, ObservabilityConfig, RelayConfig, TimeoutConfig, UpstreamConfig,
};
pub use validation::ValidationError;
