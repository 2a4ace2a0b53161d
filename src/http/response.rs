//! Response mapping.
//!
//! # Responsibilities
//! - Serialize lookup outcomes as JSON reports
//! - Map lookup errors to HTTP status codes
//!
//! # Design Decisions
//! - Every body is JSON with a stable shape: a `VehicleReport` or
//!   `{"error": ...}`
//! - Upstream timeouts result in 504 Gateway Timeout, other upstream
//!   failures in 502, a missing credential in 503 (strict mode only)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::lookup::{LookupError, LookupOutcome, UpstreamError};

/// JSON error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl LookupError {
    /// HTTP status used when this error reaches the caller.
    pub fn status_code(&self) -> StatusCode {
        match self {
            LookupError::InvalidInput => StatusCode::BAD_REQUEST,
            LookupError::CredentialMissing => StatusCode::SERVICE_UNAVAILABLE,
            LookupError::Upstream(UpstreamError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            LookupError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

impl IntoResponse for LookupOutcome {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.into_report())).into_response()
    }
}
