//! Configuration validation.
//!
//! Serde handles the syntax; this module checks value ranges and formats.
//! Every error is collected rather than stopping at the first one.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("listener.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,

    #[error("upstream.endpoint '{0}' is not an http(s) URL")]
    Endpoint(String),

    #[error("upstream.{0} must not be empty")]
    Empty(&'static str),

    #[error("upstream.max_tokens must be greater than zero")]
    ZeroMaxTokens,

    #[error("upstream.temperature {0} is outside 0.0..=1.0")]
    Temperature(f32),

    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("timeouts.request_secs ({request}) must be longer than timeouts.upstream_secs ({upstream})")]
    RequestNotLongerThanUpstream { request: u64, upstream: u64 },
}

/// Validate a configuration, returning every problem found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let listener = &config.listener;
    if listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(listener.bind_address.clone()));
    }
    if listener.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    let upstream = &config.upstream;
    match Url::parse(&upstream.endpoint) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        _ => errors.push(ValidationError::Endpoint(upstream.endpoint.clone())),
    }
    if upstream.api_version.trim().is_empty() {
        errors.push(ValidationError::Empty("api_version"));
    }
    if upstream.model.trim().is_empty() {
        errors.push(ValidationError::Empty("model"));
    }
    if upstream.max_tokens == 0 {
        errors.push(ValidationError::ZeroMaxTokens);
    }
    if let Some(t) = upstream.temperature {
        if !(0.0..=1.0).contains(&t) {
            errors.push(ValidationError::Temperature(t));
        }
    }

    let timeouts = &config.timeouts;
    for (name, value) in [
        ("connect_secs", timeouts.connect_secs),
        ("upstream_secs", timeouts.upstream_secs),
        ("request_secs", timeouts.request_secs),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout(name));
        }
    }
    if timeouts.request_secs <= timeouts.upstream_secs {
        errors.push(ValidationError::RequestNotLongerThanUpstream {
            request: timeouts.request_secs,
            upstream: timeouts.upstream_secs,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&RelayConfig::default()), Ok(()));
    }

    #[test]
    fn collects_all_errors() {
        let mut config = RelayConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.upstream.endpoint = "ftp://example.com/v1/messages".into();
        config.upstream.model = "  ".into();
        config.upstream.max_tokens = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::Empty("model")));
        assert!(errors.contains(&ValidationError::ZeroMaxTokens));
    }

    #[test]
    fn rejects_out_of_range_temperature() {
        let mut config = RelayConfig::default();
        config.upstream.temperature = Some(1.5);
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::Temperature(1.5)])
        );
    }

    #[test]
    fn request_timeout_must_cover_upstream_timeout() {
        let mut config = RelayConfig::default();
        config.timeouts.upstream_secs = 120;
        config.timeouts.request_secs = 30;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::RequestNotLongerThanUpstream {
                request: 30,
                upstream: 120,
            }])
        );
    }

    #[test]
    fn equal_request_and_upstream_timeouts_are_rejected() {
        let mut config = RelayConfig::default();
        config.timeouts.upstream_secs = 1;
        config.timeouts.request_secs = 1;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::RequestNotLongerThanUpstream {
                request: 1,
                upstream: 1,
            }])
        );
    }
}
