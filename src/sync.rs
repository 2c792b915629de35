//! Search Input Synchronization
//!
//! Keeps a locally edited search box value in step with an externally owned query.
//! External changes to the term overwrite the box only when the term actually moved
//! and the box does not already show it, so changes to sort or filters never reset
//! what the user is typing.

use crate::query::QueryModel;
use tracing::debug;

/// Path of the standalone search view used when no query owner is present.
pub const SEARCH_PATH: &str = "/search";

/// Outcome of reconciling an external query update against the local value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncDecision {
    /// Local value stays as it is
    Keep,
    /// Local value is replaced with the external term
    Overwrite(String),
}

/// Decide whether an external query update should replace the local value.
///
/// An absent term is treated as the empty string on both sides.
pub fn reconcile(previous: Option<&QueryModel>, next: &QueryModel, local: &str) -> SyncDecision {
    let previous_term = previous.and_then(QueryModel::term).unwrap_or("");
    let next_term = next.term().unwrap_or("");

    if previous_term != next_term && next_term != local {
        SyncDecision::Overwrite(next_term.to_string())
    } else {
        SyncDecision::Keep
    }
}

/// Callback supplied by a scope that owns the query.
pub trait QueryUpdater {
    fn update_query(&self, query: QueryModel);
}

impl<F> QueryUpdater for F
where
    F: Fn(QueryModel),
{
    fn update_query(&self, query: QueryModel) {
        self(query)
    }
}

/// Navigation target for a standalone search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchLocation {
    pub path: String,
    /// Encoded query string without the leading `?`
    pub search: String,
}

impl SearchLocation {
    /// Location carrying only the term; no other parameters survive.
    pub fn for_term(term: &str) -> Self {
        Self {
            path: SEARCH_PATH.to_string(),
            search: format!("q={}", urlencoding::encode(term)),
        }
    }

    pub fn to_url(&self) -> String {
        format!("{}?{}", self.path, self.search)
    }
}

/// What a submit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The query owner was handed this model
    Updated(QueryModel),
    /// No owner: navigate to the search view
    Navigate(SearchLocation),
}

/// Local search value plus the last external query it was reconciled with.
#[derive(Debug, Clone, Default)]
pub struct SearchInputSynchronizer {
    local: String,
    last_query: Option<QueryModel>,
}

impl SearchInputSynchronizer {
    /// Seed the local value from the external term, if any.
    pub fn new(initial: Option<&QueryModel>) -> Self {
        let local = initial
            .and_then(QueryModel::term)
            .unwrap_or_default()
            .to_string();
        Self {
            local,
            last_query: initial.cloned(),
        }
    }

    pub fn value(&self) -> &str {
        &self.local
    }

    pub fn last_query(&self) -> Option<&QueryModel> {
        self.last_query.as_ref()
    }

    /// Apply a keystroke-level edit. Never touches the external query.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.local = text.into();
    }

    /// Observe an external query update and reconcile the local value.
    pub fn observe(&mut self, next: &QueryModel) -> SyncDecision {
        let decision = reconcile(self.last_query.as_ref(), next, &self.local);
        if let SyncDecision::Overwrite(ref term) = decision {
            debug!(term = %term, "External query term replaced local search value");
            self.local = term.clone();
        }
        self.last_query = Some(next.clone());
        decision
    }

    /// Submit the local value.
    ///
    /// With an updater the derived query is handed to it; without one the
    /// result is a navigation to the standalone search view.
    pub fn submit(&self, updater: Option<&dyn QueryUpdater>) -> SubmitOutcome {
        match updater {
            Some(updater) => {
                let base = self.last_query.clone().unwrap_or_default();
                let query = base.with_term(self.local.as_str());
                debug!(term = %self.local, "Submitting search to query owner");
                updater.update_query(query.clone());
                SubmitOutcome::Updated(query)
            }
            None => {
                let location = SearchLocation::for_term(&self.local);
                debug!(url = %location.to_url(), "Submitting search as navigation");
                SubmitOutcome::Navigate(location)
            }
        }
    }
}
