//! # syncscope web utilities
//!
//! Middleware and error types shared by the syncscope HTTP surface:
//! a JSON error envelope, CORS from configuration, request IDs and
//! server-error logging.
//!
//! ## Example
//!
//! ```rust,no_run
//! use axum::{middleware::from_fn, routing::get, Router};
//! use syncscope_web::middleware::{cors_layer_with_config, error_handler_middleware, request_id_middleware, CorsConfig};
//!
//! async fn ping() -> &'static str {
//!     "pong"
//! }
//!
//! # #[tokio::main]
//! # async fn main() {
//! let app: Router = Router::new()
//!     .route("/ping", get(ping))
//!     .layer(from_fn(error_handler_middleware))
//!     .layer(from_fn(request_id_middleware))
//!     .layer(cors_layer_with_config(CorsConfig::default()));
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3002").await.unwrap();
//! axum::serve(listener, app).await.unwrap();
//! # }
//! ```

pub mod errors;
pub mod middleware;

// Re-export commonly used types and functions
pub use errors::{ErrorLogged, WebError};
pub use middleware::{
    cors_layer_with_config, error_handler_middleware, handle_not_found, request_id_middleware, CorsConfig,
    REQUEST_ID_HEADER,
};
