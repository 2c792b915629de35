//! Pending Refresh Scheduler
//!
//! Re-executes a view's query on a fixed interval while any visible result is
//! still being processed server-side. A tick is skipped whenever the current
//! snapshot is loading, so at most one refresh is outstanding; skipped ticks are
//! not retried early.
//!
//! The recurring check is a scoped resource: [`PendingRefreshScheduler::activate`]
//! hands back a [`RefreshHandle`] that cancels the check when deactivated or
//! dropped. After that no further refresh is issued.

use crate::config::RefreshConfig;
use crate::feed::ResultFeed;
use crate::query::QueryModel;
use crate::snapshot::ResultSnapshot;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Interval between refresh ticks when none is configured.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(2000);

/// Whether a snapshot warrants a refresh.
///
/// True only if it is not loading, its total is known, and at least one
/// visible record is pending.
pub fn should_refresh(snapshot: &ResultSnapshot) -> bool {
    !snapshot.is_loading() && snapshot.total().is_some() && snapshot.has_pending()
}

/// The query a refresh would issue, if one is warranted.
///
/// The limit is the number of visible results so the same window comes back
/// with updated statuses.
pub fn refresh_query(query: &QueryModel, snapshot: &ResultSnapshot) -> Option<QueryModel> {
    should_refresh(snapshot).then(|| query.with_limit(snapshot.visible_count()))
}

/// Periodic refresh policy
#[derive(Debug, Clone)]
pub struct PendingRefreshScheduler {
    interval: Duration,
}

impl Default for PendingRefreshScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH_INTERVAL)
    }
}

impl PendingRefreshScheduler {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn from_config(config: &RefreshConfig) -> Self {
        Self::new(Duration::from_millis(config.interval_ms))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Evaluate once and issue a refresh if warranted.
    ///
    /// Returns true if a refresh was issued.
    pub fn tick(feed: &ResultFeed) -> bool {
        let (query, snapshot) = feed.current();
        match refresh_query(&query, &snapshot) {
            Some(refresh) => {
                debug!(limit = refresh.limit(), "Refreshing pending results");
                feed.issue(refresh).is_some()
            }
            None => {
                debug!(
                    loading = snapshot.is_loading(),
                    pending = snapshot.has_pending(),
                    "Refresh not warranted"
                );
                false
            }
        }
    }

    /// Start the recurring check against `feed`.
    ///
    /// Evaluates once immediately, then every interval. Must be called from
    /// within a tokio runtime.
    pub fn activate(&self, feed: ResultFeed) -> RefreshHandle {
        Self::tick(&feed);

        let active = Arc::new(RwLock::new(true));
        let task_active = Arc::clone(&active);
        // tokio intervals reject a zero period
        let period = self.interval.max(Duration::from_millis(1));

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                // Held through the issue so deactivation cannot interleave.
                let active = task_active.read();
                if !*active {
                    break;
                }
                Self::tick(&feed);
            }
        });

        info!(interval_ms = period.as_millis() as u64, "Pending refresh activated");
        RefreshHandle {
            active,
            task: Some(task),
        }
    }
}

/// Cancels the recurring refresh check when deactivated or dropped.
pub struct RefreshHandle {
    active: Arc<RwLock<bool>>,
    task: Option<JoinHandle<()>>,
}

impl RefreshHandle {
    pub fn is_active(&self) -> bool {
        *self.active.read()
    }

    /// Cancel the recurring check. Idempotent.
    ///
    /// Requests issued before this call may still complete.
    pub fn deactivate(&mut self) {
        {
            let mut active = self.active.write();
            if !*active {
                return;
            }
            *active = false;
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
        info!("Pending refresh deactivated");
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.deactivate();
    }
}
