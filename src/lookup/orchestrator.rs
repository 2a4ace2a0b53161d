//! Lookup orchestration.
//!
//! ```text
//! raw reg ─▶ normalize ──(empty)──────────────────────────▶ Err(InvalidInput)
//!               │
//!               ▼
//!         credential? ──(none)──┐
//!               │               │
//!               ▼               ▼
//!         upstream call ──(err)─▶ FallbackPolicy ─▶ Degraded | Err
//!               │
//!               ▼
//!         from_payload ─────────────────────────────────────▶ Live
//! ```

use std::sync::Arc;

use crate::config::LookupConfig;
use crate::lookup::fallback::FallbackPolicy;
use crate::lookup::registration::RegistrationKey;
use crate::lookup::report::VehicleReport;
use crate::lookup::types::{LookupError, LookupResult, UpstreamError, UpstreamPayload};
use crate::lookup::upstream::{DvlaClient, UpstreamCredential, VehicleEnquiry};

/// Result of a lookup that produced a report.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// Report built from live upstream data.
    Live(VehicleReport),
    /// Placeholder report produced by the fallback policy.
    Degraded(VehicleReport),
}

impl LookupOutcome {
    pub fn report(&self) -> &VehicleReport {
        match self {
            LookupOutcome::Live(r) | LookupOutcome::Degraded(r) => r,
        }
    }

    pub fn into_report(self) -> VehicleReport {
        match self {
            LookupOutcome::Live(r) | LookupOutcome::Degraded(r) => r,
        }
    }
}

/// Composes normalization, the upstream call and the fallback policy.
///
/// Holds no per-request state; one instance serves every request.
#[derive(Clone)]
pub struct LookupOrchestrator {
    client: Arc<dyn VehicleEnquiry>,
    credential: Option<UpstreamCredential>,
    fallback: FallbackPolicy,
}

impl LookupOrchestrator {
    pub fn new(
        client: Arc<dyn VehicleEnquiry>,
        credential: Option<UpstreamCredential>,
        fallback: FallbackPolicy,
    ) -> Self {
        Self {
            client,
            credential,
            fallback,
        }
    }

    /// Build an orchestrator backed by the DVLA client.
    pub fn from_config(config: &LookupConfig) -> Result<Self, UpstreamError> {
        let client = DvlaClient::new(&config.upstream)?;
        let credential = config
            .upstream
            .api_key
            .clone()
            .map(UpstreamCredential::from);

        Ok(Self::new(
            Arc::new(client),
            credential,
            FallbackPolicy::new(config.fallback.mode),
        ))
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    pub fn fallback(&self) -> &FallbackPolicy {
        &self.fallback
    }

    /// Run one lookup for raw caller input.
    pub async fn lookup(&self, raw: &str) -> LookupResult<LookupOutcome> {
        let key = RegistrationKey::normalize(raw)?;

        match self.fetch(&key).await {
            Ok(payload) => Ok(LookupOutcome::Live(VehicleReport::from_payload(
                &key, &payload,
            ))),
            Err(failure) => self.fallback.intercept(&key, failure),
        }
    }

    async fn fetch(&self, key: &RegistrationKey) -> LookupResult<UpstreamPayload> {
        let credential = self
            .credential
            .as_ref()
            .ok_or(LookupError::CredentialMissing)?;
        Ok(self.client.lookup(key, credential).await?)
    }
}
