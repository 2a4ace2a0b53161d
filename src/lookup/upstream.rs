//! Vehicle-enquiry upstream client.
//!
//! # Responsibilities
//! - Build the DVLA request (credential header, JSON body)
//! - Enforce the request deadline
//! - Classify failures into `UpstreamError`
//!
//! # Design Decisions
//! - One call per lookup; no retries, no caching
//! - The credential header is marked sensitive
//! - A 2xx body that is not a JSON object counts as malformed

use std::fmt;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use secrecy::{ExposeSecret, Secret};
use serde_json::{json, Value};

use crate::config::UpstreamConfig;
use crate::lookup::registration::RegistrationKey;
use crate::lookup::types::{UpstreamError, UpstreamPayload};
use crate::observability::metrics;

/// Production vehicle-enquiry endpoint.
pub const DVLA_ENDPOINT: &str =
    "https://driver-vehicle-licensing.api.gov.uk/vehicle-enquiry/v1/vehicles";

/// Upstream deadline in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

const API_KEY_HEADER: &str = "x-api-key";

/// Secret used to authenticate against the vehicle-enquiry service.
#[derive(Clone)]
pub struct UpstreamCredential(Secret<String>);

impl UpstreamCredential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(Secret::new(key.into()))
    }

    pub(crate) fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<Secret<String>> for UpstreamCredential {
    fn from(secret: Secret<String>) -> Self {
        Self(secret)
    }
}

impl fmt::Debug for UpstreamCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UpstreamCredential([REDACTED])")
    }
}

/// A source of vehicle data keyed by registration.
#[async_trait]
pub trait VehicleEnquiry: Send + Sync {
    async fn lookup(
        &self,
        key: &RegistrationKey,
        credential: &UpstreamCredential,
    ) -> Result<UpstreamPayload, UpstreamError>;
}

/// reqwest-backed client for the DVLA vehicle-enquiry API.
#[derive(Clone)]
pub struct DvlaClient {
    client: reqwest::Client,
    endpoint: String,
    timeout_secs: u64,
}

impl DvlaClient {
    /// Create a client from upstream configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(
        &self,
        key: &RegistrationKey,
        api_key: HeaderValue,
    ) -> Result<UpstreamPayload, UpstreamError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, api_key)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(&json!({ "registrationNumber": key.as_str() }))
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        match serde_json::from_slice::<Value>(&body) {
            Ok(Value::Object(payload)) => Ok(payload),
            Ok(_) => Err(UpstreamError::MalformedBody(
                "expected a JSON object".to_string(),
            )),
            Err(e) => Err(UpstreamError::MalformedBody(e.to_string())),
        }
    }

    fn classify(&self, err: reqwest::Error) -> UpstreamError {
        if err.is_timeout() {
            UpstreamError::Timeout(self.timeout_secs)
        } else {
            UpstreamError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl VehicleEnquiry for DvlaClient {
    async fn lookup(
        &self,
        key: &RegistrationKey,
        credential: &UpstreamCredential,
    ) -> Result<UpstreamPayload, UpstreamError> {
        let mut api_key = HeaderValue::from_str(credential.expose()).map_err(|_| {
            UpstreamError::Transport("credential is not a valid header value".to_string())
        })?;
        api_key.set_sensitive(true);

        let start = Instant::now();
        let result = self.send(key, api_key).await;

        metrics::record_upstream_call(start, result.as_ref().err());

        match &result {
            Ok(_) => tracing::debug!(reg = %key, "DVLA lookup succeeded"),
            Err(e) => tracing::warn!(reg = %key, error = %e, "DVLA lookup failed"),
        }
        result
    }
}
