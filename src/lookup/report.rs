//! Stable output schema and upstream field projection.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::lookup::registration::RegistrationKey;
use crate::lookup::types::UpstreamPayload;

/// Where the report's data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LookupStatus {
    #[serde(rename = "DVLA_OK")]
    DvlaOk,
    #[serde(rename = "FALLBACK_ACTIVE")]
    FallbackActive,
}

impl LookupStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupStatus::DvlaOk => "DVLA_OK",
            LookupStatus::FallbackActive => "FALLBACK_ACTIVE",
        }
    }
}

/// Vehicle report returned to callers.
///
/// The seven vehicle fields are always serialized, as `null` when the
/// upstream did not supply them. `note` and `error` only appear on
/// degraded reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleReport {
    pub reg: String,
    pub status: LookupStatus,
    pub make: Option<Value>,
    pub year: Option<Value>,
    pub fuel: Option<Value>,
    pub engine_cc: Option<Value>,
    pub colour: Option<Value>,
    pub mot_status: Option<Value>,
    pub tax_status: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VehicleReport {
    /// Project an upstream payload onto the stable schema.
    ///
    /// Values are passed through untouched; a missing or `null` upstream
    /// field becomes `null`.
    pub fn from_payload(key: &RegistrationKey, payload: &UpstreamPayload) -> Self {
        let field = |name: &str| payload.get(name).filter(|v| !v.is_null()).cloned();

        Self {
            reg: key.to_string(),
            status: LookupStatus::DvlaOk,
            make: field("make"),
            year: field("yearOfManufacture"),
            fuel: field("fuelType"),
            engine_cc: field("engineCapacity"),
            colour: field("colour"),
            mot_status: field("motStatus"),
            tax_status: field("taxStatus"),
            note: None,
            error: None,
        }
    }

    /// Report with every vehicle field empty.
    pub fn placeholder(key: &RegistrationKey) -> Self {
        Self {
            reg: key.to_string(),
            status: LookupStatus::FallbackActive,
            make: None,
            year: None,
            fuel: None,
            engine_cc: None,
            colour: None,
            mot_status: None,
            tax_status: None,
            note: None,
            error: None,
        }
    }

    pub fn is_live(&self) -> bool {
        self.status == LookupStatus::DvlaOk
    }
}
