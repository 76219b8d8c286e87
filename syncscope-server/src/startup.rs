//! Server startup and shutdown logic

use anyhow::{Context, Result};
use axum::Router;
use std::future::IntoFuture;
use std::time::Duration;
use syncscope_config::SyncscopeConfig;
use syncscope_logging::LoggingGuard;
use syncscope_rest_api::create_rest_app;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::services::{init_logging, rest_app_config, ServiceContainer};

/// Server application struct
pub struct Server {
    config: SyncscopeConfig,
    services: ServiceContainer,
    _logging: LoggingGuard,
}

impl Server {
    /// Create a new server instance.
    ///
    /// Logging is initialized first so adapter construction is already traced.
    pub fn new(config: SyncscopeConfig) -> Result<Self> {
        let logging = init_logging(&config)?;
        let services = ServiceContainer::new(&config);

        Ok(Self {
            config,
            services,
            _logging: logging,
        })
    }

    /// Build the complete application router
    pub fn build_app(&self) -> Router {
        let context = self.services.rest_context(&self.config);
        create_rest_app(context, rest_app_config(&self.config.server))
    }

    /// Bind, serve until a shutdown signal arrives, then drain.
    ///
    /// Open status streams never finish on their own, so draining is bounded
    /// by `server.shutdown_timeout`.
    pub async fn start(self) -> Result<()> {
        let addr = self.config.server.socket_address();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;

        self.log_config_summary();
        tracing::info!("Server listening on {}", addr);

        let app = self.build_app();
        let shutdown = CancellationToken::new();
        let signalled = shutdown.clone();

        let serve = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                signalled.cancel();
            })
            .into_future();

        tokio::select! {
            result = serve => result?,
            _ = drain_deadline(shutdown, self.config.server.shutdown_timeout) => {
                tracing::warn!(
                    "Connections still open after {:?}, shutting down anyway",
                    self.config.server.shutdown_timeout
                );
            }
        }

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Log configuration summary
    fn log_config_summary(&self) {
        let config = &self.config;
        let enabled = |on: bool| if on { "Enabled" } else { "Disabled" };

        tracing::info!("=== Syncscope Server Configuration ===");
        tracing::info!("Bind Address: {}", config.server.socket_address());
        tracing::info!("API Prefix: {}", config.server.api_prefix);
        tracing::info!("Service Unit: {}", config.service.unit);
        tracing::info!("Repository List: {}", config.registry.list_path.display());
        tracing::info!(
            "Journal: {}{}",
            config.journal.journalctl_path,
            if config.journal.use_sudo { " (via sudo)" } else { "" }
        );
        tracing::info!("Status Poll Interval: {:?}", config.broadcast.poll_interval);
        tracing::info!("CORS: {}", enabled(config.server.cors.enabled));
        tracing::info!("Request ID: {}", enabled(config.server.enable_request_id));
        tracing::info!("Tracing: {}", enabled(config.server.enable_tracing));
        tracing::info!("======================================");
    }
}

/// Resolves `timeout` after shutdown has been requested
async fn drain_deadline(shutdown: CancellationToken, timeout: Duration) {
    shutdown.cancelled().await;
    tokio::time::sleep(timeout).await;
}

/// Graceful shutdown signal.
///
/// A handler that fails to install is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_drain_deadline_waits_for_cancellation() {
        let token = CancellationToken::new();
        let deadline = drain_deadline(token.clone(), Duration::from_millis(10));
        tokio::pin!(deadline);

        let early = tokio::time::timeout(Duration::from_millis(50), &mut deadline).await;
        assert!(early.is_err());

        token.cancel();
        tokio::time::timeout(Duration::from_secs(1), deadline)
            .await
            .expect("deadline should resolve after cancellation");
    }
}
