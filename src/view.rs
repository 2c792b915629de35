//! Document Manager
//!
//! Owning scope of a document list view. Combines the result feed, the pending
//! refresh, the selection and the deletion workflow, each keeping its own narrow
//! contract. Incoming queries get the listing defaults applied before execution:
//! a default sort when none is set, and cache bypass for writeable collections.
//!
//! # Lifecycle
//!
//! ```text
//! new() ──► mount() ──► update_query()* / toggle_selection()* / delete dialog*
//!              │
//!              └──► unmount() (or drop): refresh cancelled, feed closed,
//!                   selection and dialog reset; the view is done
//! ```

use crate::config::{DocviewConfig, ListingConfig};
use crate::deletion::{
    allows_mutation, CollectionInfo, DeletionDialogProps, DeletionWorkflow, DialogClose,
    ViewScope,
};
use crate::feed::{FeedStats, ResultFeed};
use crate::query::QueryModel;
use crate::scheduler::{PendingRefreshScheduler, RefreshHandle};
use crate::selection::SelectionSet;
use crate::service::QueryExecutor;
use crate::snapshot::{EntityId, ResultSnapshot};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Apply listing defaults to an incoming query.
pub fn prepare_query(
    query: &QueryModel,
    listing: &ListingConfig,
    collection: Option<&CollectionInfo>,
) -> QueryModel {
    let query = query.with_default_sort(&listing.default_sort_field, listing.default_sort_direction);
    if collection.map(|c| c.writeable).unwrap_or(false) {
        query.with_cache_bypass(true)
    } else {
        query
    }
}

/// List-view controller for the documents of one collection scope.
pub struct DocumentManager {
    collection: Option<CollectionInfo>,
    scope: ViewScope,
    listing: ListingConfig,
    feed: ResultFeed,
    scheduler: PendingRefreshScheduler,
    refresh: Option<RefreshHandle>,
    selection: SelectionSet,
    deletion: DeletionWorkflow,
}

impl DocumentManager {
    pub fn new(
        executor: Arc<dyn QueryExecutor>,
        collection: Option<CollectionInfo>,
        scope: ViewScope,
        query: &QueryModel,
        config: &DocviewConfig,
    ) -> Self {
        let listing = config.listing.clone();
        let prepared = prepare_query(query, &listing, collection.as_ref());
        Self {
            feed: ResultFeed::new(executor, prepared),
            scheduler: PendingRefreshScheduler::from_config(&config.refresh),
            refresh: None,
            selection: SelectionSet::new(),
            deletion: DeletionWorkflow::new(),
            collection,
            scope,
            listing,
        }
    }

    /// Execute the query and start the pending refresh.
    ///
    /// Must be called from within a tokio runtime. Mounting twice is a no-op,
    /// and a view cannot be mounted again once unmounted.
    pub fn mount(&mut self) {
        if self.refresh.is_some() {
            return;
        }
        if self.feed.is_closed() {
            warn!("Document view was unmounted; refusing to mount again");
            return;
        }
        info!(
            collection = self.collection.as_ref().map(|c| c.id.as_str()).unwrap_or("-"),
            actions = self.actions_enabled(),
            "Mounting document view"
        );
        self.selection = SelectionSet::new();
        self.feed.issue_current();
        self.refresh = Some(self.scheduler.activate(self.feed.clone()));
    }

    /// Tear the view down for good. Idempotent.
    ///
    /// No refresh is issued afterwards and late snapshots are discarded.
    pub fn unmount(&mut self) {
        if let Some(mut refresh) = self.refresh.take() {
            refresh.deactivate();
            info!("Unmounting document view");
        }
        self.feed.close();
        self.deletion.close(&mut self.selection, DialogClose::Cancelled);
    }

    pub fn is_mounted(&self) -> bool {
        self.refresh.is_some()
    }

    /// Accept a query from the owning scope.
    ///
    /// Re-executes only if the prepared query differs from the current one.
    pub fn update_query(&mut self, query: &QueryModel) -> bool {
        let prepared = prepare_query(query, &self.listing, self.collection.as_ref());
        if !self.feed.set_query(prepared) {
            debug!("Query unchanged; not re-executing");
            return false;
        }
        if self.is_mounted() {
            self.feed.issue_current();
        }
        true
    }

    pub fn query(&self) -> QueryModel {
        self.feed.query()
    }

    pub fn snapshot(&self) -> ResultSnapshot {
        self.feed.snapshot()
    }

    pub fn feed_stats(&self) -> FeedStats {
        self.feed.stats()
    }

    /// Whether documents are still being processed, for the processing notice.
    pub fn has_pending(&self) -> bool {
        self.feed.snapshot().has_pending()
    }

    /// Export link passed through from the snapshot.
    pub fn export_link(&self) -> Option<String> {
        self.feed.snapshot().export_link().map(str::to_string)
    }

    pub fn collection(&self) -> Option<&CollectionInfo> {
        self.collection.as_ref()
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// Whether selection and the delete affordance are offered.
    pub fn actions_enabled(&self) -> bool {
        allows_mutation(self.collection.as_ref(), &self.scope)
    }

    /// Toggle an item's selection. Ignored when actions are not offered.
    ///
    /// Returns true if the item is selected afterwards.
    pub fn toggle_selection(&mut self, id: &EntityId) -> bool {
        if !self.actions_enabled() {
            debug!(id = %id, "Selection not offered in this scope");
            return false;
        }
        self.selection.toggle(id)
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Whether the delete affordance is actionable.
    pub fn can_delete(&self) -> bool {
        self.actions_enabled() && DeletionWorkflow::can_open(&self.selection)
    }

    pub fn open_delete(&mut self) {
        self.deletion.open();
    }

    /// Handle the dialog's close signal.
    pub fn close_delete(&mut self, reason: DialogClose) {
        self.deletion.close(&mut self.selection, reason);
    }

    /// The dialog's own toggle.
    pub fn toggle_delete(&mut self) {
        self.deletion.toggle(&mut self.selection);
    }

    pub fn delete_dialog(&self) -> DeletionDialogProps {
        self.deletion.props(&self.selection)
    }
}

impl Drop for DocumentManager {
    fn drop(&mut self) {
        self.unmount();
    }
}
