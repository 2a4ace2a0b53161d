//! HTTP server setup and handlers.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, request timeout)
//! - Bind server to listener
//! - Dispatch `/lookup` to the lookup orchestrator
//! - Swap in a new orchestrator when configuration reloads

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::{Query, State},
    http::{HeaderMap, Request},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{FallbackMode, LookupConfig};
use crate::http::request::{
    propagate_request_id_layer, request_id, set_request_id_layer, X_REQUEST_ID,
};
use crate::lifecycle::signals::shutdown_signal;
use crate::lookup::{LookupError, LookupOrchestrator, LookupOutcome, UpstreamError};
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ArcSwap<LookupOrchestrator>>,
}

/// HTTP server for the lookup service.
pub struct HttpServer {
    router: Router,
    config: LookupConfig,
    orchestrator: Arc<ArcSwap<LookupOrchestrator>>,
}

impl HttpServer {
    /// Create a new HTTP server backed by the DVLA client.
    pub fn new(config: LookupConfig) -> Result<Self, UpstreamError> {
        let orchestrator = LookupOrchestrator::from_config(&config)?;
        Ok(Self::with_orchestrator(config, orchestrator))
    }

    /// Create a server around an already-built orchestrator.
    pub fn with_orchestrator(config: LookupConfig, orchestrator: LookupOrchestrator) -> Self {
        let orchestrator = Arc::new(ArcSwap::from_pointee(orchestrator));
        let state = AppState {
            orchestrator: orchestrator.clone(),
        };

        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            orchestrator,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &LookupConfig, state: AppState) -> Router {
        let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            let request_id = request
                .headers()
                .get(X_REQUEST_ID)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("unknown");
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id
            )
        });

        Router::new()
            .route("/", get(home_handler))
            .route("/lookup", get(lookup_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(trace)
                    .layer(propagate_request_id_layer())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.listener.request_timeout_secs,
                    ))),
            )
    }

    /// Router with all layers applied, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until a shutdown signal arrives.
    ///
    /// Configurations received on `config_updates` replace the
    /// orchestrator; requests already in flight finish on the old one.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<LookupConfig>,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mode = ?self.config.fallback.mode,
            credential_configured = self.config.upstream.api_key.is_some(),
            "HTTP server starting"
        );

        let orchestrator = self.orchestrator.clone();
        let bound_port = self.config.listener.port;
        let reloader = tokio::spawn(async move {
            while let Some(new_config) = config_updates.recv().await {
                if new_config.listener.port != bound_port {
                    tracing::warn!(
                        port = new_config.listener.port,
                        "Listener port changes require a restart; ignoring"
                    );
                }
                match LookupOrchestrator::from_config(&new_config) {
                    Ok(next) => {
                        orchestrator.store(Arc::new(next));
                        tracing::info!(
                            mode = ?new_config.fallback.mode,
                            credential_configured = new_config.upstream.api_key.is_some(),
                            "Configuration reloaded"
                        );
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to apply reloaded configuration");
                    }
                }
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        reloader.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &LookupConfig {
        &self.config
    }
}

/// First `reg` value of the query string; later repeats are ignored.
fn first_reg(params: &[(String, String)]) -> &str {
    params
        .iter()
        .find(|(name, _)| name == "reg")
        .map(|(_, value)| value.as_str())
        .unwrap_or_default()
}

/// `GET /lookup?reg=...`
async fn lookup_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let start = Instant::now();
    let request_id = request_id(&headers);
    let orchestrator = state.orchestrator.load_full();
    let raw = first_reg(&params);

    match orchestrator.lookup(raw).await {
        Ok(outcome) => {
            let label = match &outcome {
                LookupOutcome::Live(_) => "dvla_ok",
                LookupOutcome::Degraded(_) => "fallback",
            };
            metrics::record_lookup(label, start);
            tracing::info!(
                request_id = %request_id,
                reg = %outcome.report().reg,
                status = outcome.report().status.as_str(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Lookup complete"
            );
            outcome.into_response()
        }
        Err(LookupError::InvalidInput) => {
            metrics::record_lookup("rejected", start);
            tracing::debug!(request_id = %request_id, "Rejected lookup without registration");
            LookupError::InvalidInput.into_response()
        }
        Err(e) => {
            metrics::record_lookup("error", start);
            tracing::warn!(request_id = %request_id, error = %e, "Lookup failed");
            e.into_response()
        }
    }
}

/// `GET /` liveness text.
async fn home_handler(State(state): State<AppState>) -> &'static str {
    match state.orchestrator.load().fallback().mode() {
        FallbackMode::Tolerant => "Vehicle Lookup OK (fallback enabled if DVLA key missing)",
        FallbackMode::Strict => "Vehicle Lookup OK (strict mode)",
    }
}
