//! Shared test utilities for integration tests
//!
//! Provides a latency-controlled executor for driving views under paused tokio
//! time, snapshot builders, and isolated environment setup for config tests.

use async_trait::async_trait;
use docview::error::ExecutionError;
use docview::service::{QueryExecutor, ReplayExecutor};
use docview::{EntityRecord, EntityStatus, QueryModel, ResultSnapshot};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;

/// Replays snapshots like [`ReplayExecutor`], answering each call after a delay.
///
/// The call is recorded when it starts, so counts reflect issued requests
/// even while responses are still in flight.
pub struct DelayedExecutor {
    replay: ReplayExecutor,
    latencies: Mutex<VecDeque<Duration>>,
    default_latency: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl DelayedExecutor {
    pub fn new(snapshots: Vec<ResultSnapshot>, latency: Duration) -> Self {
        Self {
            replay: ReplayExecutor::new(snapshots),
            latencies: Mutex::new(VecDeque::new()),
            default_latency: latency,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn immediate(snapshots: Vec<ResultSnapshot>) -> Self {
        Self::new(snapshots, Duration::ZERO)
    }

    /// Per-call latencies, consumed in call order before the default applies.
    pub fn with_latencies(self, latencies: Vec<Duration>) -> Self {
        *self.latencies.lock().unwrap() = latencies.into();
        self
    }

    pub fn calls(&self) -> Vec<QueryModel> {
        self.replay.calls()
    }

    pub fn call_count(&self) -> usize {
        self.replay.call_count()
    }

    /// Highest number of executions that were outstanding at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QueryExecutor for DelayedExecutor {
    async fn execute(&self, query: QueryModel) -> Result<ResultSnapshot, ExecutionError> {
        let latency = self
            .latencies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.default_latency);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let result = self.replay.execute(query).await;
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

/// Loaded snapshot with one record per status, ids `doc-0`, `doc-1`, ...
pub fn snapshot_of(statuses: &[EntityStatus]) -> ResultSnapshot {
    let results = statuses
        .iter()
        .enumerate()
        .map(|(i, status)| EntityRecord::new(format!("doc-{}", i), status.clone()))
        .collect::<Vec<_>>();
    ResultSnapshot::loaded(results.len() as u64, results)
}

/// Sleep under paused time long enough for every timer up to `ms` to fire.
pub async fn run_for(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ISOLATED_VARS: &[&str] = &[
    "HOME",
    "XDG_CONFIG_HOME",
    "DOCVIEW_REFRESH__INTERVAL_MS",
    "DOCVIEW_LISTING__DEFAULT_SORT_FIELD",
    "DOCVIEW_LISTING__DEFAULT_LIMIT",
];

/// Environment variable state to restore after test
struct EnvState {
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            saved: ISOLATED_VARS
                .iter()
                .map(|name| (*name, std::env::var(name).ok()))
                .collect(),
        }
    }

    fn restore(self) {
        for (name, value) in self.saved {
            match value {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }
    }
}

/// Run `f` with HOME and XDG_CONFIG_HOME pointed into `test_dir` and every
/// `DOCVIEW_` override cleared. The original environment is restored afterwards.
pub fn with_isolated_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let test_home = test_dir.path().join("home");
    std::fs::create_dir_all(&test_home).unwrap();

    for name in ISOLATED_VARS {
        std::env::remove_var(name);
    }
    std::env::set_var("HOME", test_home.to_str().unwrap());
    std::env::set_var("XDG_CONFIG_HOME", test_dir.path().to_str().unwrap());

    let result = f();

    env_state.restore();

    result
}
