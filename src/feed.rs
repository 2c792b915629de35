//! Result Feed
//!
//! Live (query, snapshot) pair shared between the owning view and the refresh
//! scheduler. Executions are spawned on the tokio runtime; snapshots for the
//! current query are applied in the order they arrive, with no reordering
//! against issue order. Arrivals for a replaced query are discarded, as is
//! every late arrival once the feed is closed.

use crate::error::ExecutionError;
use crate::query::QueryModel;
use crate::service::QueryExecutor;
use crate::snapshot::ResultSnapshot;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Request ID for tracing executions through the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        RequestId(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Feed statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedStats {
    /// Executions handed to the service
    pub issued: usize,
    /// Snapshots that replaced the current one
    pub applied: usize,
    /// Executions that failed; the previous snapshot was kept
    pub failed: usize,
    /// Arrivals dropped because their query was replaced or the feed was closed
    pub discarded: usize,
}

struct FeedState {
    query: QueryModel,
    snapshot: ResultSnapshot,
    stats: FeedStats,
}

struct FeedInner {
    executor: Arc<dyn QueryExecutor>,
    state: RwLock<FeedState>,
    closed: AtomicBool,
}

/// Shared handle to the live result state of one view.
#[derive(Clone)]
pub struct ResultFeed {
    inner: Arc<FeedInner>,
}

impl ResultFeed {
    /// Create a feed for `query`. Nothing is executed until [`ResultFeed::issue`].
    pub fn new(executor: Arc<dyn QueryExecutor>, query: QueryModel) -> Self {
        Self {
            inner: Arc::new(FeedInner {
                executor,
                state: RwLock::new(FeedState {
                    query,
                    snapshot: ResultSnapshot::loading(),
                    stats: FeedStats::default(),
                }),
                closed: AtomicBool::new(false),
            }),
        }
    }

    pub fn query(&self) -> QueryModel {
        self.inner.state.read().query.clone()
    }

    pub fn snapshot(&self) -> ResultSnapshot {
        self.inner.state.read().snapshot.clone()
    }

    /// Current query and snapshot read under one lock.
    pub fn current(&self) -> (QueryModel, ResultSnapshot) {
        let state = self.inner.state.read();
        (state.query.clone(), state.snapshot.clone())
    }

    pub fn stats(&self) -> FeedStats {
        self.inner.state.read().stats.clone()
    }

    /// Replace the query. The new query has no prior snapshot.
    ///
    /// Returns false if the query was unchanged.
    pub fn set_query(&self, query: QueryModel) -> bool {
        let mut state = self.inner.state.write();
        if state.query == query {
            return false;
        }
        state.query = query;
        state.snapshot = ResultSnapshot::loading();
        true
    }

    /// Execute the current query.
    pub fn issue_current(&self) -> Option<JoinHandle<()>> {
        let query = self.query();
        self.issue(query)
    }

    /// Execute `query` and apply its snapshot when it arrives.
    ///
    /// The current snapshot is flagged as loading until then. Must be called
    /// from within a tokio runtime. Returns `None` once the feed is closed.
    pub fn issue(&self, query: QueryModel) -> Option<JoinHandle<()>> {
        if self.is_closed() {
            debug!("Feed closed; not issuing query");
            return None;
        }

        let request_id = RequestId::next();
        {
            let mut state = self.inner.state.write();
            state.snapshot = state.snapshot.mark_loading();
            state.stats.issued += 1;
        }
        debug!(
            request_id = request_id.as_u64(),
            limit = query.limit(),
            "Issuing query execution"
        );

        let inner = Arc::clone(&self.inner);
        Some(tokio::spawn(async move {
            let result = inner.executor.execute(query.clone()).await;
            inner.apply(request_id, &query, result);
        }))
    }

    /// Stop accepting arrivals. Idempotent.
    pub fn close(&self) {
        if !self.inner.closed.swap(true, Ordering::AcqRel) {
            debug!("Result feed closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }
}

impl FeedInner {
    fn apply(
        &self,
        request_id: RequestId,
        issued: &QueryModel,
        result: Result<ResultSnapshot, ExecutionError>,
    ) {
        let mut state = self.state.write();
        if self.closed.load(Ordering::Acquire) {
            state.stats.discarded += 1;
            debug!(
                request_id = request_id.as_u64(),
                "Discarding snapshot for closed feed"
            );
            return;
        }
        if !issued.same_selection(&state.query) {
            state.stats.discarded += 1;
            debug!(
                request_id = request_id.as_u64(),
                "Discarding snapshot for superseded query"
            );
            return;
        }

        match result {
            Ok(snapshot) => {
                debug!(
                    request_id = request_id.as_u64(),
                    total = ?snapshot.total(),
                    visible = snapshot.visible_count(),
                    "Applying snapshot"
                );
                state.snapshot = snapshot;
                state.stats.applied += 1;
            }
            Err(e) => {
                warn!(
                    request_id = request_id.as_u64(),
                    error = %e,
                    "Query execution failed; keeping previous snapshot"
                );
                state.snapshot = state.snapshot.settled();
                state.stats.failed += 1;
            }
        }
    }
}
