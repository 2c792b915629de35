//! Result snapshots and the entity records they carry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of an entity within a collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        EntityId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        EntityId::new(id)
    }
}

/// Server-side processing status of an entity.
///
/// Anything other than `Pending` is terminal from the controller's point of
/// view. Unknown server values are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityStatus {
    Pending,
    Success,
    Failure,
    Other(String),
}

impl EntityStatus {
    pub fn as_str(&self) -> &str {
        match self {
            EntityStatus::Pending => "pending",
            EntityStatus::Success => "success",
            EntityStatus::Failure => "failure",
            EntityStatus::Other(s) => s.as_str(),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, EntityStatus::Pending)
    }
}

impl From<String> for EntityStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => EntityStatus::Pending,
            "success" => EntityStatus::Success,
            "failure" => EntityStatus::Failure,
            _ => EntityStatus::Other(s),
        }
    }
}

impl From<EntityStatus> for String {
    fn from(status: EntityStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for EntityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One item of a result list. Never mutated by the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub id: EntityId,
    pub status: EntityStatus,
    #[serde(default)]
    pub name: Option<String>,
    /// Schema name, e.g. `Folder`, `Pdf`, `Person`
    #[serde(default)]
    pub schema: Option<String>,
}

impl EntityRecord {
    pub fn new(id: impl Into<String>, status: EntityStatus) -> Self {
        Self {
            id: EntityId::new(id),
            status,
            name: None,
            schema: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }
}

/// Latest known outcome of executing a query.
///
/// `total` and `results` are both absent exactly while the first execution of
/// a query is still loading. Later loads keep the prior data visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SnapshotRepr")]
pub struct ResultSnapshot {
    is_loading: bool,
    total: Option<u64>,
    results: Option<Vec<EntityRecord>>,
    /// Pre-built download link supplied by the service
    export_link: Option<String>,
}

/// Wire shape of a snapshot, checked before it becomes a [`ResultSnapshot`].
#[derive(Deserialize)]
struct SnapshotRepr {
    #[serde(default)]
    is_loading: bool,
    #[serde(default)]
    total: Option<u64>,
    #[serde(default)]
    results: Option<Vec<EntityRecord>>,
    #[serde(default)]
    export_link: Option<String>,
}

impl TryFrom<SnapshotRepr> for ResultSnapshot {
    type Error = String;

    fn try_from(repr: SnapshotRepr) -> Result<Self, Self::Error> {
        match (&repr.total, &repr.results) {
            (Some(_), None) => return Err("snapshot has a total but no results".to_string()),
            (None, Some(_)) => return Err("snapshot has results but no total".to_string()),
            (None, None) if !repr.is_loading => {
                return Err("snapshot without data must be loading".to_string())
            }
            _ => {}
        }
        Ok(Self {
            is_loading: repr.is_loading,
            total: repr.total,
            results: repr.results,
            export_link: repr.export_link,
        })
    }
}

impl Default for ResultSnapshot {
    fn default() -> Self {
        Self::loading()
    }
}

impl ResultSnapshot {
    /// Snapshot for a query with no prior result.
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            total: None,
            results: None,
            export_link: None,
        }
    }

    /// Completed snapshot; result order is kept as given.
    pub fn loaded(total: u64, results: Vec<EntityRecord>) -> Self {
        Self {
            is_loading: false,
            total: Some(total),
            results: Some(results),
            export_link: None,
        }
    }

    pub fn with_export_link(mut self, link: impl Into<String>) -> Self {
        self.export_link = Some(link.into());
        self
    }

    /// Same data, flagged as loading a newer version.
    pub fn mark_loading(&self) -> Self {
        Self {
            is_loading: true,
            ..self.clone()
        }
    }

    /// Same data, no longer loading. Used when a load failed.
    pub fn settled(&self) -> Self {
        Self {
            is_loading: false,
            ..self.clone()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// Visible records in server order; empty while unknown.
    pub fn results(&self) -> &[EntityRecord] {
        self.results.as_deref().unwrap_or(&[])
    }

    pub fn has_results(&self) -> bool {
        self.results.is_some()
    }

    pub fn visible_count(&self) -> usize {
        self.results().len()
    }

    /// Whether any visible record is still being processed server-side.
    pub fn has_pending(&self) -> bool {
        self.results().iter().any(|r| r.status.is_pending())
    }

    /// The export link, surfaced only for a known non-zero total.
    pub fn export_link(&self) -> Option<&str> {
        match (self.results.as_ref(), self.total) {
            (Some(_), Some(total)) if total > 0 => self.export_link.as_deref(),
            _ => None,
        }
    }
}
