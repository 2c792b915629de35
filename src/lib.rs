//! Docview: Query, Refresh and Selection Control for Document Lists
//!
//! Controller layer behind a document collection browser. Keeps a search box in
//! step with an externally owned query, refreshes result lists while documents
//! are still being processed, and tracks the selection feeding bulk deletion.

pub mod cli;
pub mod config;
pub mod deletion;
pub mod error;
pub mod feed;
pub mod logging;
pub mod query;
pub mod scheduler;
pub mod selection;
pub mod service;
pub mod snapshot;
pub mod sync;
pub mod view;

pub use deletion::{CollectionInfo, DeletionWorkflow, DialogClose, DialogState, ViewScope};
pub use error::{DocviewError, ExecutionError};
pub use feed::ResultFeed;
pub use query::{QueryModel, SortDirection, SortSpec};
pub use scheduler::{PendingRefreshScheduler, RefreshHandle};
pub use selection::SelectionSet;
pub use service::QueryExecutor;
pub use snapshot::{EntityId, EntityRecord, EntityStatus, ResultSnapshot};
pub use sync::{SearchInputSynchronizer, SubmitOutcome, SyncDecision};
pub use view::DocumentManager;
