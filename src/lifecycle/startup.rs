//! Startup orchestration.
//!
//! Order: load config → logging → metrics → config watcher → bind → serve.
//! Any error before the listener is bound is fatal.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::config::{self, ConfigError, FallbackMode, LookupConfig};
use crate::config::watcher::ConfigWatcher;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::lookup::UpstreamError;
use crate::observability::{logging, metrics};

/// Startup parameters coming from the command line.
#[derive(Debug, Clone, Default)]
pub struct StartupOptions {
    /// Optional TOML configuration file, watched for changes.
    pub config_path: Option<PathBuf>,
    /// Port override taking precedence over file and `PORT`.
    pub port: Option<u16>,
}

/// Fatal startup failures.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("upstream client error: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("config watcher error: {0}")]
    Watch(#[from] notify::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn missing_credential_warning(config: &LookupConfig) -> Option<String> {
    if config.upstream.api_key.is_some() {
        return None;
    }
    let effect = match config.fallback.mode {
        FallbackMode::Tolerant => "lookups will return fallback reports",
        FallbackMode::Strict => "lookups will be rejected with 503",
    };
    Some(format!("{} not set; {}", config::API_KEY_VAR, effect))
}

/// Start the service and block until shutdown.
pub async fn run(options: StartupOptions) -> Result<(), StartupError> {
    let mut config = config::load(options.config_path.as_deref())?;
    if let Some(port) = options.port {
        config.listener.port = port;
    }

    logging::init_logging(config.observability.log_format);
    tracing::info!("vehicle-lookup v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        upstream = %config.upstream.endpoint,
        upstream_timeout_secs = config.upstream.timeout_secs,
        mode = ?config.fallback.mode,
        "Configuration loaded"
    );
    if let Some(warning) = missing_credential_warning(&config) {
        tracing::warn!("{}", warning);
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // The watcher handle must outlive the server.
    let (config_updates, _watcher) = match &options.config_path {
        Some(path) => {
            let (watcher, rx) = ConfigWatcher::new(path);
            (rx, Some(watcher.run()?))
        }
        None => {
            let (_, rx) = mpsc::unbounded_channel();
            (rx, None)
        }
    };

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    server.run(listener, config_updates, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
