pub mod health;

pub use health::HealthResponse;

// Wire types returned by the handlers
pub use syncscope_core::{ActivityEvent, RepositoryRecord, ServiceStatus, Statistics, StatusUpdate};
