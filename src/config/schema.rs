//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the lookup
//! service. All types derive Serde traits for deserialization from config files.

use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::lookup::upstream::{DEFAULT_TIMEOUT_SECS, DVLA_ENDPOINT};

/// Root configuration for the lookup service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LookupConfig {
    /// Listener configuration (bind address, request deadline).
    pub listener: ListenerConfig,

    /// Vehicle-enquiry upstream settings.
    pub upstream: UpstreamConfig,

    /// Failure handling policy.
    pub fallback: FallbackConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// Listen port. Overridden by `PORT`.
    pub port: u16,

    /// Total time allowed per inbound request in seconds.
    pub request_timeout_secs: u64,
}

impl ListenerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5050,
            request_timeout_secs: 30,
        }
    }
}

/// Upstream vehicle-enquiry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Vehicle-enquiry endpoint URL.
    pub endpoint: String,

    /// Upstream request timeout in seconds.
    pub timeout_secs: u64,

    /// API key sent as `x-api-key`. Overridden by `DVLA_X_API_KEY`.
    #[serde(skip_serializing)]
    pub api_key: Option<Secret<String>>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            endpoint: DVLA_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            api_key: None,
        }
    }
}

/// How upstream-side failures reach the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FallbackMode {
    /// Always answer 200 with a degraded report.
    #[default]
    Tolerant,
    /// Answer with an HTTP error status.
    Strict,
}

/// Fallback configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FallbackConfig {
    pub mode: FallbackMode,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log line format.
    pub log_format: LogFormat,

    /// Expose Prometheus metrics.
    pub metrics_enabled: bool,

    /// Metrics listener address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_defaults_match_upstream_contract() {
        let config = LookupConfig::default();
        assert_eq!(config.listener.bind_address(), "0.0.0.0:5050");
        assert_eq!(config.upstream.endpoint, DVLA_ENDPOINT);
        assert_eq!(config.upstream.timeout_secs, 20);
        assert!(config.upstream.api_key.is_none());
        assert_eq!(config.fallback.mode, FallbackMode::Tolerant);
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_partial_toml() {
        let config: LookupConfig = toml::from_str(
            r#"
            [listener]
            port = 8080

            [upstream]
            api_key = "abc"

            [fallback]
            mode = "strict"

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.port, 8080);
        assert_eq!(config.listener.host, "0.0.0.0");
        assert_eq!(config.upstream.timeout_secs, 20);
        assert_eq!(
            config.upstream.api_key.as_ref().map(|k| k.expose_secret().as_str()),
            Some("abc")
        );
        assert_eq!(config.fallback.mode, FallbackMode::Strict);
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }

    #[test]
    fn test_api_key_never_serialized() {
        let mut config = LookupConfig::default();
        config.upstream.api_key = Some(Secret::new("abc".to_string()));
        let rendered = toml::to_string(&config).unwrap();
        assert!(!rendered.contains("abc"));
        assert!(!format!("{:?}", config).contains("abc"));
    }
}
