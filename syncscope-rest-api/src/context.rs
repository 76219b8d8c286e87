//! Shared state handed to every handler

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use syncscope_core::{Classifier, JournalSource, ServiceProbe, StatusBroadcaster, DEFAULT_POLL_INTERVAL};

/// Interval between SSE keep-alive comments when none is configured
pub const DEFAULT_KEEP_ALIVE: Duration = Duration::from_secs(15);

/// Dependencies of the dashboard API.
///
/// The broadcaster shares the same probe as the service status endpoint.
#[derive(Clone)]
pub struct AppContext {
    /// Journal of the synchronization daemon
    pub journal: Arc<dyn JournalSource>,
    /// Active/inactive state of the daemon
    pub probe: Arc<dyn ServiceProbe>,
    /// Per-observer live status polling
    pub broadcaster: StatusBroadcaster,
    pub classifier: Classifier,
    /// Newline-separated repository list
    pub repository_list: PathBuf,
    pub keep_alive: Duration,
}

impl AppContext {
    pub fn new(
        journal: Arc<dyn JournalSource>,
        probe: Arc<dyn ServiceProbe>,
        repository_list: impl Into<PathBuf>,
    ) -> Self {
        Self {
            journal,
            broadcaster: StatusBroadcaster::new(probe.clone(), DEFAULT_POLL_INTERVAL),
            probe,
            classifier: Classifier::default(),
            repository_list: repository_list.into(),
            keep_alive: DEFAULT_KEEP_ALIVE,
        }
    }

    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Rebuild the broadcaster with a different poll interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.broadcaster = StatusBroadcaster::new(self.probe.clone(), interval);
        self
    }

    pub fn with_keep_alive(mut self, keep_alive: Duration) -> Self {
        self.keep_alive = keep_alive;
        self
    }
}
