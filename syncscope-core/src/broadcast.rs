//! Per-observer live status polling
//!
//! Every observer gets its own poll task and its own channel; nothing is
//! fanned out between observers. The task is owned by the
//! [`StatusSubscription`] handed back from [`StatusBroadcaster::subscribe`]:
//! when the subscription is dropped the task is cancelled, and since the
//! subscription also owns the receiving end, no update can be observed after
//! teardown begins.

use chrono::Utc;
use futures_util::Stream;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::source::ServiceProbe;
use crate::types::StatusUpdate;

/// Poll interval used when none is configured
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Updates buffered per observer before new ones are dropped
const CHANNEL_CAPACITY: usize = 8;

/// Hands out independent live status subscriptions
#[derive(Clone)]
pub struct StatusBroadcaster {
    probe: Arc<dyn ServiceProbe>,
    interval: Duration,
    live: Arc<AtomicUsize>,
    next_id: Arc<AtomicU64>,
}

impl StatusBroadcaster {
    pub fn new(probe: Arc<dyn ServiceProbe>, interval: Duration) -> Self {
        Self {
            probe,
            interval,
            live: Arc::new(AtomicUsize::new(0)),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of subscriptions that have not been dropped yet
    pub fn active_subscriptions(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// Start polling for a new observer.
    ///
    /// The first update arrives one interval after subscribing. Must be called
    /// from within a Tokio runtime.
    pub fn subscribe(&self) -> StatusSubscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);
        let token = CancellationToken::new();

        let task = tokio::spawn(poll_service(
            id,
            self.probe.clone(),
            self.interval,
            sender,
            token.clone(),
        ));

        let live = self.live.fetch_add(1, Ordering::SeqCst) + 1;
        info!(observer = id, live, "Observer connected");

        StatusSubscription {
            id,
            receiver,
            _poller: PollerGuard {
                id,
                token,
                task,
                live: self.live.clone(),
            },
        }
    }
}

/// One observer's stream of [`StatusUpdate`]s.
///
/// Dropping it stops the poll task for this observer.
pub struct StatusSubscription {
    id: u64,
    receiver: mpsc::Receiver<StatusUpdate>,
    _poller: PollerGuard,
}

impl StatusSubscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Wait for the next update
    pub async fn recv(&mut self) -> Option<StatusUpdate> {
        self.receiver.recv().await
    }

    /// Explicitly end the subscription
    pub fn close(self) {}
}

impl Stream for StatusSubscription {
    type Item = StatusUpdate;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

impl std::fmt::Debug for StatusSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusSubscription").field("id", &self.id).finish()
    }
}

/// Cancels the poll task exactly once, on drop
struct PollerGuard {
    id: u64,
    token: CancellationToken,
    task: JoinHandle<()>,
    live: Arc<AtomicUsize>,
}

impl Drop for PollerGuard {
    fn drop(&mut self) {
        self.token.cancel();
        self.task.abort();
        let live = self.live.fetch_sub(1, Ordering::SeqCst) - 1;
        info!(observer = self.id, live, "Observer disconnected");
    }
}

async fn poll_service(
    id: u64,
    probe: Arc<dyn ServiceProbe>,
    period: Duration,
    sender: mpsc::Sender<StatusUpdate>,
    token: CancellationToken,
) {
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let is_active = tokio::select! {
            biased;
            _ = token.cancelled() => break,
            result = probe.is_active() => match result {
                Ok(is_active) => is_active,
                Err(e) => {
                    warn!(observer = id, "Service status poll failed, skipping tick: {}", e);
                    continue;
                }
            },
        };

        let update = StatusUpdate {
            is_active,
            timestamp: Utc::now(),
        };

        match sender.try_send(update) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                debug!(observer = id, "Observer is lagging, dropping status update");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => break,
        }
    }

    debug!(observer = id, "Status poller stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceError;
    use async_trait::async_trait;
    use futures_util::StreamExt;
    use std::sync::atomic::AtomicBool;

    const INTERVAL: Duration = Duration::from_secs(5);

    #[derive(Default)]
    struct FakeProbe {
        calls: AtomicUsize,
        active: AtomicBool,
        fail_first: AtomicBool,
    }

    impl FakeProbe {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ServiceProbe for FakeProbe {
        async fn is_active(&self) -> Result<bool, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_first.swap(false, Ordering::SeqCst) {
                return Err(SourceError::Io(std::io::Error::other("systemctl unavailable")));
            }
            Ok(self.active.load(Ordering::SeqCst))
        }

        async fn active_since(&self) -> Result<Option<String>, SourceError> {
            Ok(None)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_update_after_one_interval() {
        let probe = Arc::new(FakeProbe::default());
        probe.active.store(true, Ordering::SeqCst);
        let broadcaster = StatusBroadcaster::new(probe.clone(), INTERVAL);

        let start = Instant::now();
        let mut subscription = broadcaster.subscribe();
        let update = subscription.next().await.unwrap();

        assert!(update.is_active);
        assert_eq!(start.elapsed(), INTERVAL);
        assert_eq!(probe.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_updates_follow_probe_state() {
        let probe = Arc::new(FakeProbe::default());
        let broadcaster = StatusBroadcaster::new(probe.clone(), INTERVAL);
        let mut subscription = broadcaster.subscribe();

        assert!(!subscription.recv().await.unwrap().is_active);
        probe.active.store(true, Ordering::SeqCst);
        assert!(subscription.recv().await.unwrap().is_active);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_polls_after_disconnect() {
        let probe = Arc::new(FakeProbe::default());
        let broadcaster = StatusBroadcaster::new(probe.clone(), INTERVAL);

        let mut subscription = broadcaster.subscribe();
        subscription.recv().await.unwrap();
        assert_eq!(broadcaster.active_subscriptions(), 1);

        drop(subscription);
        let calls_at_disconnect = probe.calls();
        assert_eq!(broadcaster.active_subscriptions(), 0);

        tokio::time::sleep(INTERVAL * 2).await;
        assert_eq!(probe.calls(), calls_at_disconnect);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_before_first_tick() {
        let probe = Arc::new(FakeProbe::default());
        let broadcaster = StatusBroadcaster::new(probe.clone(), INTERVAL);

        broadcaster.subscribe().close();
        tokio::time::sleep(INTERVAL * 2).await;

        assert_eq!(probe.calls(), 0);
        assert_eq!(broadcaster.active_subscriptions(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_tick_is_skipped() {
        let probe = Arc::new(FakeProbe::default());
        probe.fail_first.store(true, Ordering::SeqCst);
        let broadcaster = StatusBroadcaster::new(probe.clone(), INTERVAL);

        let start = Instant::now();
        let mut subscription = broadcaster.subscribe();
        subscription.recv().await.unwrap();

        assert_eq!(start.elapsed(), INTERVAL * 2);
        assert_eq!(probe.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_observers_are_polled_independently() {
        let probe = Arc::new(FakeProbe::default());
        let broadcaster = StatusBroadcaster::new(probe.clone(), INTERVAL);

        let mut first = broadcaster.subscribe();
        let mut second = broadcaster.subscribe();
        assert_ne!(first.id(), second.id());

        first.recv().await.unwrap();
        second.recv().await.unwrap();
        assert_eq!(probe.calls(), 2);
        assert_eq!(broadcaster.active_subscriptions(), 2);

        drop(first);
        assert_eq!(broadcaster.active_subscriptions(), 1);

        let calls = probe.calls();
        second.recv().await.unwrap();
        assert_eq!(probe.calls(), calls + 1);
    }
}
