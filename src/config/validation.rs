//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, ports valid)
//! - Check the upstream endpoint and metrics address parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LookupConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::LookupConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.host must not be empty")]
    EmptyHost,

    #[error("listener.port must be non-zero")]
    ZeroPort,

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error(
        "listener.request_timeout_secs ({request}) must exceed upstream.timeout_secs ({upstream})"
    )]
    RequestTimeoutTooShort { request: u64, upstream: u64 },

    #[error("upstream.endpoint '{0}' is not a valid http(s) URL")]
    InvalidEndpoint(String),

    #[error("observability.metrics_address '{0}' is not a valid socket address")]
    InvalidMetricsAddress(String),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &LookupConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }
    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }
    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("listener.request_timeout_secs"));
    }
    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("upstream.timeout_secs"));
    }
    // The inbound deadline must leave room for the fallback report.
    if config.listener.request_timeout_secs <= config.upstream.timeout_secs {
        errors.push(ValidationError::RequestTimeoutTooShort {
            request: config.listener.request_timeout_secs,
            upstream: config.upstream.timeout_secs,
        });
    }

    match Url::parse(&config.upstream.endpoint) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        _ => errors.push(ValidationError::InvalidEndpoint(
            config.upstream.endpoint.clone(),
        )),
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
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
    fn test_default_config_is_valid() {
        assert!(validate_config(&LookupConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = LookupConfig::default();
        config.listener.port = 0;
        config.upstream.endpoint = "ftp://example.com".into();
        config.upstream.timeout_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::ZeroPort));
        assert!(errors.contains(&ValidationError::ZeroTimeout("upstream.timeout_secs")));
        assert!(errors.contains(&ValidationError::InvalidEndpoint("ftp://example.com".into())));
    }

    #[test]
    fn test_request_timeout_must_exceed_upstream() {
        let mut config = LookupConfig::default();
        config.listener.request_timeout_secs = 20;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::RequestTimeoutTooShort {
                request: 20,
                upstream: 20
            }]
        );
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = LookupConfig::default();
        config.observability.metrics_address = "not-an-address".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidMetricsAddress(_)));
    }
}
