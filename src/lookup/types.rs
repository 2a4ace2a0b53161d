//! Lookup error taxonomy and shared payload types.

use serde_json::{Map, Value};
use thiserror::Error;

/// Raw JSON object returned by the vehicle-enquiry service.
pub type UpstreamPayload = Map<String, Value>;

/// Failures of the upstream vehicle-enquiry call.
///
/// Every variant belongs to the "upstream unavailable" category: the
/// caller's request was valid but live data could not be obtained.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The call did not complete within the configured deadline.
    #[error("DVLA request timed out after {0} seconds")]
    Timeout(u64),

    /// Connection, TLS or other transport failure.
    #[error("DVLA request failed: {0}")]
    Transport(String),

    /// Upstream answered with a non-success status code.
    #[error("DVLA returned HTTP {0}")]
    Status(u16),

    /// Upstream answered 2xx but the body was not a JSON object.
    #[error("DVLA returned a malformed body: {0}")]
    MalformedBody(String),
}

impl UpstreamError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Timeout(_) => "timeout",
            UpstreamError::Transport(_) => "transport",
            UpstreamError::Status(_) => "status",
            UpstreamError::MalformedBody(_) => "malformed_body",
        }
    }
}

/// Errors surfaced by the lookup orchestrator.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Registration was missing or normalized to an empty string.
    #[error("Missing reg")]
    InvalidInput,

    /// No upstream credential is configured.
    #[error("DVLA_X_API_KEY not set")]
    CredentialMissing,

    /// The upstream call failed.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Result type for lookup operations.
pub type LookupResult<T> = Result<T, LookupError>;
