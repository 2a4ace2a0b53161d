//! Vehicle registration lookup proxy.
//!
//! Normalizes a registration, queries the DVLA vehicle-enquiry API and
//! answers with a stable `VehicleReport`, degrading to a placeholder
//! report when the credential is missing or the upstream fails.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod lookup;
pub mod observability;

pub use config::schema::LookupConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use lookup::{LookupOrchestrator, VehicleReport};
