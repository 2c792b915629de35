//! Query Execution Service
//!
//! Abstract interface to whatever actually runs a query (search backend, HTTP API,
//! fixture replay). The controller only ever awaits a snapshot from it; retries and
//! caching are the service's concern.

use crate::error::{DocviewError, ExecutionError};
use crate::query::QueryModel;
use crate::snapshot::ResultSnapshot;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::Path;
use tracing::debug;

/// Query execution service trait
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Execute a query and return the resulting snapshot
    async fn execute(&self, query: QueryModel) -> Result<ResultSnapshot, ExecutionError>;
}

/// Executor that replays a fixed sequence of snapshots.
///
/// Each call returns the next snapshot; once the sequence is exhausted the last
/// one is repeated. Every executed query is recorded.
pub struct ReplayExecutor {
    snapshots: Vec<ResultSnapshot>,
    state: Mutex<ReplayState>,
}

#[derive(Default)]
struct ReplayState {
    next: usize,
    calls: Vec<QueryModel>,
}

impl ReplayExecutor {
    pub fn new(snapshots: Vec<ResultSnapshot>) -> Self {
        Self {
            snapshots,
            state: Mutex::new(ReplayState::default()),
        }
    }

    /// Load a JSON array of snapshots.
    pub fn from_file(path: &Path) -> Result<Self, DocviewError> {
        let raw = std::fs::read_to_string(path)?;
        let snapshots: Vec<ResultSnapshot> = serde_json::from_str(&raw)?;
        if snapshots.is_empty() {
            return Err(DocviewError::FixtureError(format!(
                "Fixture {} contains no snapshots",
                path.display()
            )));
        }
        Ok(Self::new(snapshots))
    }

    /// Queries executed so far, in call order.
    pub fn calls(&self) -> Vec<QueryModel> {
        self.state.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().calls.len()
    }
}

#[async_trait]
impl QueryExecutor for ReplayExecutor {
    async fn execute(&self, query: QueryModel) -> Result<ResultSnapshot, ExecutionError> {
        let mut state = self.state.lock();
        state.calls.push(query);

        let index = state.next.min(self.snapshots.len().saturating_sub(1));
        state.next += 1;
        debug!(index, "Replaying fixture snapshot");

        self.snapshots
            .get(index)
            .cloned()
            .ok_or_else(|| ExecutionError::Unavailable("Replay fixture is empty".to_string()))
    }
}
