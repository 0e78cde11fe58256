//! HTTP boundary for the review workflow.
//!
//! Serves page views and accepts reviewer actions as JSON. Rendering is left
//! to whatever front end consumes these endpoints.

pub mod routes;

use std::net::SocketAddr;

use crate::review::ReviewService;

/// HTTP server wrapping a [`ReviewService`].
pub struct ReviewServer {
    service: ReviewService,
}

impl ReviewServer {
    /// Create a new server.
    #[must_use]
    pub fn new(service: ReviewService) -> Self {
        Self { service }
    }

    /// Run until Ctrl+C.
    ///
    /// # Errors
    ///
    /// Returns error if the port cannot be bound or the server fails.
    pub async fn run_http(self, port: u16) -> anyhow::Result<()> {
        let router = routes::create_router(self.service);
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        tracing::info!("HTTP server listening on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

        tracing::info!("HTTP server shut down");
        Ok(())
    }
}

impl std::fmt::Debug for ReviewServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewServer").field("service", &self.service).finish()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install CTRL+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}
