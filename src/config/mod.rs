//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, overlay DVLA_X_API_KEY / PORT)
//!     → validation.rs (semantic checks)
//!     → LookupConfig (validated, immutable)
//!     → LookupOrchestrator built from it
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → atomic swap of the orchestrator in the HTTP server
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Environment wins over the file
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load, load_config, load_with_env, ConfigError, API_KEY_VAR, PORT_VAR};
pub use schema::{
    FallbackConfig, FallbackMode, ListenerConfig, LogFormat, LookupConfig, ObservabilityConfig,
    UpstreamConfig,
};
pub use validation::ValidationError;
