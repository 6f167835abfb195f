//! Webhook reachability monitoring.
//!
//! [`HealthMonitor`] probes a [`ResearchSource`] once at start, then on a
//! fixed interval and whenever [`HealthHandle::refresh`] is called. The
//! latest [`ApiStatus`] is published on a watch channel. Dropping the
//! monitor stops the background task.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Notify, watch};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use zekat_search::ResearchSource;

/// Reachability of the search webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiStatus {
    /// No probe has completed yet.
    Checking,
    /// The last probe got a success status.
    Online,
    /// The last probe failed; searches are answered from the demo corpus.
    Offline,
}

impl ApiStatus {
    fn from_probe(online: bool) -> Self {
        if online { Self::Online } else { Self::Offline }
    }
}

impl fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Checking => "checking",
            Self::Online => "online",
            Self::Offline => "offline",
        })
    }
}

/// Cloneable trigger for an immediate re-probe.
#[derive(Debug, Clone)]
pub struct HealthHandle {
    refresh: Arc<Notify>,
}

impl HealthHandle {
    /// Ask the monitor to probe now instead of waiting for the next tick.
    ///
    /// Requests made while a probe is running are coalesced into one
    /// follow-up probe.
    pub fn refresh(&self) {
        self.refresh.notify_one();
    }
}

/// Background poller that owns the probe task.
pub struct HealthMonitor {
    status: watch::Receiver<ApiStatus>,
    handle: HealthHandle,
    cancel: CancellationToken,
}

impl HealthMonitor {
    /// Start probing `source` every `poll_interval`.
    ///
    /// The first probe runs immediately. Must be called from within a
    /// tokio runtime.
    pub fn spawn<S>(source: Arc<S>, poll_interval: Duration) -> Self
    where
        S: ResearchSource + 'static,
    {
        let (status_tx, status) = watch::channel(ApiStatus::Checking);
        let refresh = Arc::new(Notify::new());
        let cancel = CancellationToken::new();

        tokio::spawn(poll_loop(
            source,
            poll_interval,
            status_tx,
            Arc::clone(&refresh),
            cancel.clone(),
        ));

        Self {
            status,
            handle: HealthHandle { refresh },
            cancel,
        }
    }

    /// Latest published status.
    pub fn status(&self) -> ApiStatus {
        *self.status.borrow()
    }

    /// Subscribe to status changes.
    pub fn subscribe(&self) -> watch::Receiver<ApiStatus> {
        self.status.clone()
    }

    /// A trigger that can be handed to other components.
    pub fn handle(&self) -> HealthHandle {
        self.handle.clone()
    }

    /// Probe now.
    pub fn refresh(&self) {
        self.handle.refresh();
    }
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn poll_loop<S: ResearchSource>(
    source: Arc<S>,
    poll_interval: Duration,
    status_tx: watch::Sender<ApiStatus>,
    refresh: Arc<Notify>,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(poll_interval);
    debug!(interval_secs = poll_interval.as_secs(), "health monitor started");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
            _ = refresh.notified() => ticker.reset(),
        }

        let online = tokio::select! {
            _ = cancel.cancelled() => break,
            online = source.check_health() => online,
        };

        let next = ApiStatus::from_probe(online);
        let previous = status_tx.send_replace(next);
        if previous != next {
            info!(from = %previous, to = %next, "webhook status changed");
        }
    }

    debug!("health monitor stopped");
}

/// Tracks the temporary offline warning shown while a query is active.
///
/// The warning appears when a probe reports [`ApiStatus::Offline`] with a
/// query on screen and stays up for a fixed duration; afterwards the
/// quieter demo-mode notice is shown instead.
#[derive(Debug, Clone)]
pub struct OfflineNotice {
    duration: Duration,
    shown_at: Option<Instant>,
}

impl OfflineNotice {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            shown_at: None,
        }
    }

    /// Feed a freshly published status.
    pub fn observe(&mut self, status: ApiStatus, has_query: bool, now: Instant) {
        if status == ApiStatus::Offline && has_query {
            self.shown_at = Some(now);
        }
    }

    /// Whether the warning is still visible at `now`.
    pub fn is_active(&self, now: Instant) -> bool {
        self.shown_at
            .is_some_and(|shown| now.saturating_duration_since(shown) < self.duration)
    }
}
