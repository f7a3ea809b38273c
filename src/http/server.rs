//! HTTP server setup.
//!
//! # Responsibilities
//! - Build the Axum router with all handlers
//! - Wire up middleware (telemetry hooks, timeout, trace)
//! - Serve until the shutdown signal fires
//!
//! # Design Decisions
//! - The telemetry middleware is a route layer on the availability route
//!   only; the liveness probe stays out of the demo's metrics
//! - Graceful shutdown listens on the process-wide broadcast channel so
//!   tests and signal handling share one mechanism

use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServiceConfig;
use crate::http::handlers;
use crate::http::middleware::{instrument_request, RequestHooks};

/// Application state injected into handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    pub hooks: Arc<RequestHooks>,
}

/// HTTP server for the availability service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Self {
        let state = AppState {
            hooks: Arc::new(RequestHooks::standard()),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/availability/{value}", get(handlers::availability))
            .route_layer(axum::middleware::from_fn_with_state(
                state.clone(),
                instrument_request,
            ))
            .route("/health", get(handlers::health))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until the shutdown channel fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
