//! # syncscope REST API
//!
//! Read-only HTTP surface of the repository synchronization dashboard:
//! repository list, service status, classified activity, keyword statistics
//! and a server-sent event stream of live status updates.
//!
//! ## Architecture
//!
//! Handlers reach the journal and the service manager only through the
//! `JournalSource` and `ServiceProbe` traits held in [`AppContext`], so the
//! router can be exercised with in-memory fakes.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use syncscope_core::{Classifier, JournalSource, ServiceProbe};
//! use syncscope_rest_api::{create_rest_app, AppConfig, AppContext};
//!
//! # async fn example(journal: Arc<dyn JournalSource>, probe: Arc<dyn ServiceProbe>) -> Result<(), Box<dyn std::error::Error>> {
//! let context = AppContext::new(journal, probe, "/home/sync/.github-repos-list")
//!     .with_classifier(Classifier::default())
//!     .with_poll_interval(Duration::from_secs(5));
//!
//! let app = create_rest_app(context, AppConfig::default());
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3002").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod context;
pub mod errors;
pub mod handlers;
pub mod models;

// Re-export commonly used types
pub use app::{create_rest_app, AppConfig};
pub use context::AppContext;
pub use errors::{RestError, RestResult};
pub use models::*;
