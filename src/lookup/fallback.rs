//! Degradation policy for failed lookups.

use crate::config::FallbackMode;
use crate::lookup::registration::RegistrationKey;
use crate::lookup::report::VehicleReport;
use crate::lookup::types::{LookupError, LookupResult};
use crate::lookup::LookupOutcome;

/// Note attached when no credential is configured.
pub const CREDENTIAL_PENDING_NOTE: &str =
    "DVLA key pending. Add DVLA_X_API_KEY to the service environment to enable live DVLA data.";

/// Note attached when the upstream call itself failed.
pub const UPSTREAM_UNAVAILABLE_NOTE: &str =
    "DVLA temporarily unavailable. Live vehicle data could not be retrieved; try again later.";

/// Decides what a caller sees when live data cannot be obtained.
#[derive(Debug, Clone, Copy)]
pub struct FallbackPolicy {
    mode: FallbackMode,
}

impl FallbackPolicy {
    pub fn new(mode: FallbackMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> FallbackMode {
        self.mode
    }

    /// Build the placeholder report for a failed lookup. Never fails.
    pub fn degrade(&self, key: &RegistrationKey, failure: &LookupError) -> VehicleReport {
        let note = match failure {
            LookupError::CredentialMissing => CREDENTIAL_PENDING_NOTE,
            _ => UPSTREAM_UNAVAILABLE_NOTE,
        };

        let mut report = VehicleReport::placeholder(key);
        report.note = Some(note.to_string());
        report.error = Some(failure.to_string());
        report
    }

    /// Turn an upstream-side failure into the caller-facing outcome.
    ///
    /// Tolerant mode always answers with a degraded report. Strict mode
    /// hands the failure back unchanged. Input errors are never degraded.
    pub fn intercept(
        &self,
        key: &RegistrationKey,
        failure: LookupError,
    ) -> LookupResult<LookupOutcome> {
        if self.mode == FallbackMode::Strict || matches!(failure, LookupError::InvalidInput) {
            return Err(failure);
        }

        tracing::info!(reg = %key, error = %failure, "Serving fallback report");
        Ok(LookupOutcome::Degraded(self.degrade(key, &failure)))
    }
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self::new(FallbackMode::default())
    }
}
