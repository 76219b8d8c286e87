//! Core type definitions for syncscope
//!
//! Every type here is a value type built fresh per request. Field names are
//! camelCase on the wire to match the dashboard that consumes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of synchronization activity a journal record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Push,
    Pull,
    Merge,
    Conflict,
    /// Only produced when the classifier is configured not to fall back to `pull`
    Unknown,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Push => "push",
            Operation::Pull => "pull",
            Operation::Merge => "merge",
            Operation::Conflict => "conflict",
            Operation::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of an activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum OperationStatus {
    #[default]
    Success,
    Failed,
    Pending,
}

impl OperationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationStatus::Success => "success",
            OperationStatus::Failed => "failed",
            OperationStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One classified journal record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEvent {
    /// Ordinal-derived, stable within a single scan only
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub repository: String,
    pub operation: Operation,
    pub status: OperationStatus,
    /// The raw journal message
    pub details: String,
}

/// Availability of the synchronization daemon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    pub is_active: bool,
    /// Activation timestamp as reported by the service manager, or `"Unknown"`
    pub uptime: String,
    pub last_check: DateTime<Utc>,
}

impl ServiceStatus {
    pub const UNKNOWN_UPTIME: &'static str = "Unknown";
}

/// Message pushed to live observers on every poll tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub is_active: bool,
    pub timestamp: DateTime<Utc>,
}

/// Keyword occurrence counts over a raw journal window.
///
/// Counters are independent: one line may bump several of them. `total` is
/// the raw line count and is not expected to match any event count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub pushes: u64,
    pub pulls: u64,
    pub merges: u64,
    pub conflicts: u64,
    pub total: u64,
}

/// Sync state of a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum RepositoryStatus {
    #[default]
    Synced,
    Syncing,
    Error,
    Pending,
}

/// Per-repository activity counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryStats {
    pub pushes: u64,
    pub pulls: u64,
    pub conflicts: u64,
    pub merges: u64,
}

/// A repository known to the synchronization daemon.
///
/// Only `name` comes from the repository list. There is no live per-repository
/// sync state to draw on, so every other field carries a neutral default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryRecord {
    pub name: String,
    pub auto_sync: bool,
    pub last_sync: DateTime<Utc>,
    pub status: RepositoryStatus,
    pub uncommitted_changes: u32,
    pub stats: RepositoryStats,
}

impl RepositoryRecord {
    /// Build a record with default metadata, stamped at `now`
    pub fn with_defaults(name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            auto_sync: true,
            last_sync: now,
            status: RepositoryStatus::Synced,
            uncommitted_changes: 0,
            stats: RepositoryStats::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_activity_event_wire_format() {
        let event = ActivityEvent {
            id: "log-0".to_string(),
            timestamp: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
            repository: "repoA".to_string(),
            operation: Operation::Push,
            status: OperationStatus::Success,
            details: "[repoA] Pushing branch main".to_string(),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["operation"], "push");
        assert_eq!(json["status"], "success");
        assert_eq!(json["repository"], "repoA");
        assert_eq!(json["timestamp"], "2023-11-14T22:13:20Z");
    }

    #[test]
    fn test_repository_record_defaults() {
        let now = Utc::now();
        let record = RepositoryRecord::with_defaults("dotfiles", now);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["name"], "dotfiles");
        assert_eq!(json["autoSync"], true);
        assert_eq!(json["status"], "synced");
        assert_eq!(json["uncommittedChanges"], 0);
        assert_eq!(json["stats"]["merges"], 0);
    }

    #[test]
    fn test_service_status_camel_case() {
        let status = ServiceStatus {
            is_active: true,
            uptime: ServiceStatus::UNKNOWN_UPTIME.to_string(),
            last_check: Utc::now(),
        };

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["isActive"], true);
        assert_eq!(json["uptime"], "Unknown");
        assert!(json.get("lastCheck").is_some());
    }
}
