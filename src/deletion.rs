//! Deletion workflow and write gating.
//!
//! The workflow only gates the confirmation dialog. Removing documents is the
//! dialog's job; whichever way the dialog closes, the selection is emptied.

use crate::selection::SelectionSet;
use crate::snapshot::EntityId;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Schema name of folder-like containers.
pub const FOLDER_SCHEMA: &str = "Folder";

/// Collection the view lists documents from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub writeable: bool,
}

impl CollectionInfo {
    pub fn new(id: impl Into<String>, writeable: bool) -> Self {
        Self {
            id: id.into(),
            label: None,
            writeable,
        }
    }
}

/// What the view is scoped to inside the collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewScope {
    /// Top level of the collection
    #[default]
    Collection,
    /// Children of a document
    Document {
        id: EntityId,
        schema: Option<String>,
    },
}

impl ViewScope {
    pub fn is_container(&self) -> bool {
        match self {
            ViewScope::Collection => true,
            ViewScope::Document { schema, .. } => schema.as_deref() == Some(FOLDER_SCHEMA),
        }
    }
}

/// Whether selection and the delete affordance are exposed.
///
/// Requires a writeable collection and a container scope.
pub fn allows_mutation(collection: Option<&CollectionInfo>, scope: &ViewScope) -> bool {
    collection.map(|c| c.writeable).unwrap_or(false) && scope.is_container()
}

/// Dialog state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Closed,
    Open,
}

/// How the dialog was closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogClose {
    Cancelled,
    Confirmed,
}

/// Input handed to the confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionDialogProps {
    pub documents: Vec<EntityId>,
    pub is_open: bool,
}

/// Two-state gate around the delete confirmation dialog.
#[derive(Debug, Clone, Default)]
pub struct DeletionWorkflow {
    state: DialogState,
}

impl DeletionWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == DialogState::Open
    }

    /// Whether opening would be actionable for the surface.
    pub fn can_open(selection: &SelectionSet) -> bool {
        !selection.is_empty()
    }

    /// Open the dialog. Unconditional; see [`DeletionWorkflow::can_open`].
    pub fn open(&mut self) {
        self.state = DialogState::Open;
    }

    /// Close the dialog, emptying the selection.
    ///
    /// The selection is cleared even if the dialog was already closed.
    pub fn close(&mut self, selection: &mut SelectionSet, reason: DialogClose) {
        debug!(
            ?reason,
            selected = selection.len(),
            "Closing deletion dialog"
        );
        selection.clear();
        self.state = DialogState::Closed;
    }

    /// Flip between open and closed, as the dialog's own toggle does.
    ///
    /// Closing this way counts as a cancel.
    pub fn toggle(&mut self, selection: &mut SelectionSet) -> DialogState {
        match self.state {
            DialogState::Closed => self.open(),
            DialogState::Open => self.close(selection, DialogClose::Cancelled),
        }
        self.state
    }

    pub fn props(&self, selection: &SelectionSet) -> DeletionDialogProps {
        DeletionDialogProps {
            documents: selection.as_list().to_vec(),
            is_open: self.is_open(),
        }
    }
}
