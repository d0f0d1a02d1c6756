//! Upstream API credential.
//!
//! # Security
//! - The key is loaded ONLY from the environment, once, at startup
//! - It is stored as a sensitive header value and never logged

use std::fmt;

use axum::http::HeaderValue;
use thiserror::Error;

/// Environment variable holding the completion API key.
pub const API_KEY_ENV_VAR: &str = "ANTHROPIC_API_KEY";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Environment variable {0} not set")]
    Missing(&'static str),

    #[error("API key is empty")]
    Empty,

    #[error("API key contains characters not allowed in an HTTP header")]
    InvalidHeader,
}

/// Read-only API key shared by every request.
#[derive(Clone)]
pub struct ApiKey(HeaderValue);

impl ApiKey {
    pub fn new(key: &str) -> Result<Self, CredentialError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(CredentialError::Empty);
        }
        let mut value = HeaderValue::from_str(key).map_err(|_| CredentialError::InvalidHeader)?;
        value.set_sensitive(true);
        Ok(Self(value))
    }

    /// Load from `ANTHROPIC_API_KEY`.
    pub fn from_env() -> Result<Self, CredentialError> {
        let key =
            std::env::var(API_KEY_ENV_VAR).map_err(|_| CredentialError::Missing(API_KEY_ENV_VAR))?;
        Self::new(&key)
    }

    pub fn header_value(&self) -> &HeaderValue {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_is_redacted() {
        let key = ApiKey::new("sk-ant-secret").unwrap();
        let printed = format!("{:?}", key);
        assert!(!printed.contains("sk-ant-secret"));
        assert!(key.header_value().is_sensitive());
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let key = ApiKey::new("  sk-ant-secret\n").unwrap();
        assert_eq!(key.header_value(), "sk-ant-secret");
    }

    #[test]
    fn rejects_empty_and_unprintable_keys() {
        assert_eq!(ApiKey::new("   ").unwrap_err(), CredentialError::Empty);
        assert_eq!(
            ApiKey::new("sk\u{0}ant").unwrap_err(),
            CredentialError::InvalidHeader
        );
    }
}
