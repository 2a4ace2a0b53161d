//! Vehicle lookup subsystem.
//!
//! # Data Flow
//! ```text
//! GET /lookup?reg=...
//!     → registration.rs (normalize to canonical key)
//!     → upstream.rs (DVLA vehicle-enquiry call, guarded by credential)
//!     → report.rs (project payload onto stable schema)
//!     → On failure: fallback.rs (degraded report or propagate)
//! ```
//!
//! # Design Decisions
//! - Each request is independent; nothing is cached or persisted
//! - Failures are explicit `LookupError` values; the fallback branch is a
//!   plain `match` in the orchestrator
//! - Tolerant vs strict handling is one deployment-wide setting

pub mod fallback;
pub mod orchestrator;
pub mod registration;
pub mod report;
pub mod types;
pub mod upstream;

pub use fallback::FallbackPolicy;
pub use orchestrator::{LookupOrchestrator, LookupOutcome};
pub use registration::RegistrationKey;
pub use report::{LookupStatus, VehicleReport};
pub use types::{LookupError, LookupResult, UpstreamError, UpstreamPayload};
pub use upstream::{DvlaClient, UpstreamCredential, VehicleEnquiry};
