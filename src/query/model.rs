//! Immutable query descriptor handed to the execution service.

use super::sort::{SortDirection, SortSpec};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Filter key holding the free-text search term.
pub const TERM_KEY: &str = "q";

/// Result-size limit used when none is given.
pub const DEFAULT_LIMIT: usize = 30;

/// Filter, sort and pagination descriptor.
///
/// Every `with_*` operation returns a new model and leaves `self` untouched.
/// Equality is structural; filters are kept in key order so two models built
/// in different orders compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryModel {
    filters: BTreeMap<String, String>,
    sort: Option<SortSpec>,
    limit: usize,
    bypass_cache: bool,
}

impl Default for QueryModel {
    fn default() -> Self {
        Self {
            filters: BTreeMap::new(),
            sort: None,
            limit: DEFAULT_LIMIT,
            bypass_cache: false,
        }
    }
}

impl QueryModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new builder for constructing a QueryModel
    ///
    /// # Example
    /// ```rust
    /// use docview::query::{QueryModel, SortDirection};
    ///
    /// let query = QueryModel::builder()
    ///     .term("ledger")
    ///     .filter("filter:collection_id", "12")
    ///     .sort("created_at", SortDirection::Desc)
    ///     .limit(50)
    ///     .build();
    /// assert_eq!(query.term(), Some("ledger"));
    /// ```
    pub fn builder() -> QueryModelBuilder {
        QueryModelBuilder::default()
    }

    /// Return a copy with `key` set to `value`, replacing any previous value.
    pub fn with_filter(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.filters.insert(key.into(), value.into());
        next
    }

    /// Return a copy with `key` removed.
    pub fn without_filter(&self, key: &str) -> Self {
        let mut next = self.clone();
        next.filters.remove(key);
        next
    }

    pub fn with_sort(&self, field: impl Into<String>, direction: SortDirection) -> Self {
        let mut next = self.clone();
        next.sort = Some(SortSpec::new(field, direction));
        next
    }

    pub fn with_limit(&self, limit: usize) -> Self {
        let mut next = self.clone();
        next.limit = limit;
        next
    }

    pub fn with_cache_bypass(&self, bypass: bool) -> Self {
        let mut next = self.clone();
        next.bypass_cache = bypass;
        next
    }

    /// Return a copy with the search term set.
    pub fn with_term(&self, term: impl Into<String>) -> Self {
        self.with_filter(TERM_KEY, term)
    }

    /// Apply the default ordering if no sort is present.
    ///
    /// Idempotent: a model that already has a sort is returned unchanged.
    pub fn with_default_sort(&self, field: &str, direction: SortDirection) -> Self {
        if self.has_sort() {
            self.clone()
        } else {
            self.with_sort(field, direction)
        }
    }

    /// Whether both models select the same results, ignoring the limit.
    ///
    /// A refresh only changes the limit, so it answers for the same query.
    pub fn same_selection(&self, other: &QueryModel) -> bool {
        self.filters == other.filters
            && self.sort == other.sort
            && self.bypass_cache == other.bypass_cache
    }

    pub fn has_sort(&self) -> bool {
        self.sort.is_some()
    }

    pub fn get_filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    /// The free-text search term, if any.
    pub fn term(&self) -> Option<&str> {
        self.get_filter(TERM_KEY)
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn bypass_cache(&self) -> bool {
        self.bypass_cache
    }

    pub fn filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Builder for constructing QueryModel with a fluent API
#[derive(Debug, Default)]
pub struct QueryModelBuilder {
    filters: BTreeMap<String, String>,
    sort: Option<SortSpec>,
    limit: Option<usize>,
    bypass_cache: bool,
}

impl QueryModelBuilder {
    pub fn term(self, term: impl Into<String>) -> Self {
        self.filter(TERM_KEY, term)
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    pub fn sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(SortSpec::new(field, direction));
        self
    }

    /// Defaults to [`DEFAULT_LIMIT`] if not specified.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn bypass_cache(mut self, bypass: bool) -> Self {
        self.bypass_cache = bypass;
        self
    }

    pub fn build(self) -> QueryModel {
        QueryModel {
            filters: self.filters,
            sort: self.sort,
            limit: self.limit.unwrap_or(DEFAULT_LIMIT),
            bypass_cache: self.bypass_cache,
        }
    }
}
