//! Main application configuration and router setup

use axum::{middleware::from_fn, routing::get, Router};
use syncscope_web::middleware::{
    cors_layer_with_config, error_handler_middleware, handle_not_found, request_id_middleware, CorsConfig,
};
use tower_http::trace::TraceLayer;

use crate::{context::AppContext, handlers};

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Enable CORS middleware
    pub enable_cors: bool,
    pub cors: CorsConfig,
    /// Enable request ID tracking
    pub enable_request_id: bool,
    /// Enable request tracing
    pub enable_tracing: bool,
    /// API path prefix
    pub api_prefix: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            enable_cors: true,
            cors: CorsConfig::default(),
            enable_request_id: true,
            enable_tracing: true,
            api_prefix: "/api".to_string(),
        }
    }
}

/// Create the complete REST API application
pub fn create_rest_app(context: AppContext, config: AppConfig) -> Router {
    let app = Router::new()
        // Health endpoint (no prefix)
        .route("/health", get(handlers::health_check))
        // API routes with prefix
        .nest(&config.api_prefix, create_api_router())
        .fallback(handle_not_found)
        .with_state(context);

    // Add middleware layers (applied in reverse order)
    let mut app = app.layer(from_fn(error_handler_middleware));

    if config.enable_tracing {
        app = app.layer(TraceLayer::new_for_http());
    }

    if config.enable_request_id {
        app = app.layer(from_fn(request_id_middleware));
    }

    if config.enable_cors {
        app = app.layer(cors_layer_with_config(config.cors));
    }

    app
}

/// Dashboard API routes
fn create_api_router() -> Router<AppContext> {
    Router::new()
        .route("/repositories", get(handlers::list_repositories))
        .route("/service-status", get(handlers::get_service_status))
        .route("/logs", get(handlers::get_logs))
        .route("/statistics", get(handlers::get_statistics))
        .route("/status/stream", get(handlers::status_stream))
}
