//! REST API request handlers

pub mod activity;
pub mod health;
pub mod repositories;
pub mod status;

pub use activity::{get_logs, get_statistics};
pub use health::health_check;
pub use repositories::list_repositories;
pub use status::{get_service_status, status_stream, STATUS_EVENT};
