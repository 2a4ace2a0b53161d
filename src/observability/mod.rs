//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Lookup path produces:
//!     → logging.rs (structured log events, request id in HTTP spans)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```

pub mod logging;
pub mod metrics;
