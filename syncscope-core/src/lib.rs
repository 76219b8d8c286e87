//! Core domain models and types for syncscope
//!
//! This crate contains the telemetry pipeline that sits between the systemd
//! journal of a repository synchronization daemon and the HTTP surface:
//! query normalization, log classification, keyword statistics, the
//! repository registry and the per-observer live status broadcaster. It has
//! no knowledge of HTTP or of how the journal is actually queried; those
//! collaborators are reached through the traits in [`source`].

pub mod broadcast;
pub mod classify;
pub mod error;
pub mod query;
pub mod registry;
pub mod source;
pub mod stats;
pub mod types;

// Re-export commonly used types at the crate root
pub use broadcast::{StatusBroadcaster, StatusSubscription, DEFAULT_POLL_INTERVAL};
pub use classify::{Classifier, UnmatchedOperation};
pub use error::{ClassifyError, RegistryError, SourceError};
pub use query::{
    normalize_log_query, normalize_stats_query, LogQuery, RawLogQuery, RawStatsQuery, StatsQuery, TimeWindow,
};
pub use registry::list_repositories;
pub use source::{service_status, JournalSource, ServiceProbe};
pub use stats::aggregate;
pub use types::{
    ActivityEvent, Operation, OperationStatus, RepositoryRecord, RepositoryStats, RepositoryStatus, ServiceStatus,
    Statistics, StatusUpdate,
};
