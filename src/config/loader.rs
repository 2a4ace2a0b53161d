//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use secrecy::Secret;
use thiserror::Error;

use crate::config::schema::LookupConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the upstream credential.
pub const API_KEY_VAR: &str = "DVLA_X_API_KEY";

/// Environment variable holding the listen port.
pub const PORT_VAR: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("Invalid value for {name}: '{value}'")]
    InvalidEnv { name: &'static str, value: String },
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl LookupConfig {
    /// Overlay environment values using `var` as the variable source.
    ///
    /// An empty `DVLA_X_API_KEY` counts as unset.
    pub fn apply_env_overrides<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = var(API_KEY_VAR) {
            self.upstream.api_key = if key.trim().is_empty() {
                None
            } else {
                Some(Secret::new(key))
            };
        }

        if let Some(port) = var(PORT_VAR) {
            self.listener.port = port.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: PORT_VAR,
                value: port.clone(),
            })?;
        }

        Ok(())
    }
}

fn parse_config(path: &Path) -> Result<LookupConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<LookupConfig, ConfigError> {
    let config = parse_config(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Resolve the effective configuration: file (or defaults), then process
/// environment, then validation.
pub fn load(path: Option<&Path>) -> Result<LookupConfig, ConfigError> {
    load_with_env(path, |name| std::env::var(name).ok())
}

/// Same as [`load`], reading environment values from `var`.
///
/// Validation runs once, after the overrides, so the environment can
/// repair a value the file leaves invalid.
pub fn load_with_env<F>(path: Option<&Path>, var: F) -> Result<LookupConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => parse_config(path)?,
        None => LookupConfig::default(),
    };

    config.apply_env_overrides(var)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
