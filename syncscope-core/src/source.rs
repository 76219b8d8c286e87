//! Interfaces to the external collaborators
//!
//! The journal and the service manager live outside this process. Handlers
//! and the broadcaster only see these traits, so tests can substitute
//! in-memory fakes for `journalctl` and `systemctl`.

use async_trait::async_trait;
use chrono::Utc;
use tracing::warn;

use crate::error::SourceError;
use crate::query::{LogQuery, StatsQuery};
use crate::types::ServiceStatus;

/// Time-windowed access to the synchronization daemon's log stream
#[async_trait]
pub trait JournalSource: Send + Sync {
    /// The most recent structured records, one JSON object per line, in the
    /// order the journal emits them
    async fn fetch_logs(&self, query: &LogQuery) -> Result<String, SourceError>;

    /// Every record in the window as plain text
    async fn fetch_raw_window(&self, query: &StatsQuery) -> Result<String, SourceError>;
}

/// Active/inactive state of the synchronization daemon
#[async_trait]
pub trait ServiceProbe: Send + Sync {
    /// Whether the service manager reports the unit as active
    async fn is_active(&self) -> Result<bool, SourceError>;

    /// When the unit last entered the active state, as reported verbatim
    async fn active_since(&self) -> Result<Option<String>, SourceError>;
}

/// Take a [`ServiceStatus`] snapshot from the probe.
///
/// Never fails. A probe error reads as inactive, and a missing or blank
/// activation time reads as [`ServiceStatus::UNKNOWN_UPTIME`].
pub async fn service_status(probe: &dyn ServiceProbe) -> ServiceStatus {
    let is_active = match probe.is_active().await {
        Ok(active) => active,
        Err(e) => {
            warn!(error = %e, "Service state query failed, reporting inactive");
            false
        }
    };

    let uptime = match probe.active_since().await {
        Ok(Some(since)) if !since.trim().is_empty() => since.trim().to_string(),
        Ok(_) => ServiceStatus::UNKNOWN_UPTIME.to_string(),
        Err(e) => {
            warn!(error = %e, "Activation time query failed");
            ServiceStatus::UNKNOWN_UPTIME.to_string()
        }
    };

    ServiceStatus {
        is_active,
        uptime,
        last_check: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticProbe {
        active: Result<bool, ()>,
        since: Result<Option<&'static str>, ()>,
    }

    fn unavailable() -> SourceError {
        SourceError::Spawn {
            program: "systemctl".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        }
    }

    #[async_trait]
    impl ServiceProbe for StaticProbe {
        async fn is_active(&self) -> Result<bool, SourceError> {
            self.active.map_err(|_| unavailable())
        }

        async fn active_since(&self) -> Result<Option<String>, SourceError> {
            self.since.map(|s| s.map(str::to_string)).map_err(|_| unavailable())
        }
    }

    #[tokio::test]
    async fn test_active_service_with_uptime() {
        let probe = StaticProbe {
            active: Ok(true),
            since: Ok(Some(" Mon 2024-01-15 10:00:00 UTC ")),
        };
        let status = service_status(&probe).await;
        assert!(status.is_active);
        assert_eq!(status.uptime, "Mon 2024-01-15 10:00:00 UTC");
    }

    #[tokio::test]
    async fn test_blank_uptime_is_unknown() {
        let probe = StaticProbe {
            active: Ok(false),
            since: Ok(Some("")),
        };
        let status = service_status(&probe).await;
        assert!(!status.is_active);
        assert_eq!(status.uptime, ServiceStatus::UNKNOWN_UPTIME);
    }

    #[tokio::test]
    async fn test_probe_failures_degrade() {
        let probe = StaticProbe {
            active: Err(()),
            since: Err(()),
        };
        let status = service_status(&probe).await;
        assert!(!status.is_active);
        assert_eq!(status.uptime, ServiceStatus::UNKNOWN_UPTIME);
    }
}
