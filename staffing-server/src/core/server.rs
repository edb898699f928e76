//! Server Implementation
//!
//! Router assembly, HTTP listener and graceful shutdown.

use std::net::SocketAddr;

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::{BackgroundTasks, Config, Result, ServerError, ServerState, TaskKind};
use crate::middleware::logging_middleware;
use crate::services::ReconcileScheduler;

/// Build the fully layered application
///
/// Used by the HTTP server and by tests (`tower::ServiceExt::oneshot`).
pub fn build_app(state: &ServerState) -> Router {
    crate::api::build_router()
        // JWT authentication; public routes are skipped inside require_auth
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state.clone())
        .layer(middleware::from_fn(logging_middleware))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// HTTP Server
pub struct Server {
    config: Config,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Serve until Ctrl-C, then stop background tasks
    pub async fn run(&self) -> Result<()> {
        let state = ServerState::initialize(&self.config).await?;

        let mut tasks = BackgroundTasks::new();
        match self.config.reconcile_interval() {
            Some(interval) => {
                let scheduler = ReconcileScheduler::new(
                    state.reconcile_service().clone(),
                    interval,
                    tasks.shutdown_token(),
                );
                tasks.spawn("reconcile_scheduler", TaskKind::Periodic, scheduler.run());
            }
            None => tracing::info!("Periodic reconciliation disabled"),
        }

        let app = build_app(&state);
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Internal(e.into()))?;
        tracing::info!("Staffing server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.into()))?;

        tasks.shutdown(self.config.shutdown_timeout()).await;
        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down...");
}
