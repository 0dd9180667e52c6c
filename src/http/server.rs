//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, limits, request ID, rate limiting)
//! - Bind the server to a listener with graceful shutdown
//! - Share the probe executor with handlers

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ProbeConfig;
use crate::http::handlers::{healthz, probe_handler, status_handler};
use crate::net::SystemResolver;
use crate::probe::{ProbeError, ProbeExecutor};
use crate::security::rate_limit::{rate_limit_middleware, RateLimiterState};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub executor: Arc<ProbeExecutor>,
    pub started_at: Instant,
}

/// HTTP server for the probe service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProbeConfig) -> Result<Self, ProbeError> {
        let executor = Arc::new(ProbeExecutor::new(
            config.probe.clone(),
            Arc::new(SystemResolver),
        )?);
        let limiter = Arc::new(RateLimiterState::new(config.rate_limit.clone()));

        let state = AppState {
            executor,
            started_at: Instant::now(),
        };

        let router = Self::build_router(&config, state, limiter);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(
        config: &ProbeConfig,
        state: AppState,
        limiter: Arc<RateLimiterState>,
    ) -> Router {
        Router::new()
            .route(
                "/probe",
                post(probe_handler)
                    .layer(middleware::from_fn_with_state(limiter, rate_limit_middleware)),
            )
            .route("/status", get(status_handler))
            .route("/healthz", get(healthz))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(RequestBodyLimitLayer::new(config.listener.max_body_bytes))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server, accepting connections until shutdown triggers.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
