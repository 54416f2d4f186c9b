//! Owner record container with dirty tracking and an undo log
//!
//! Adapters never hold a live handle into a record. They read a snapshot
//! through [`Record::get`], build a complete replacement and hand it back
//! through [`Record::commit`], which pushes one undo entry per call.

use crate::adapter::NestedTableKind;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Lifecycle of a record relative to its base (on-disk) version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordState {
    /// Only the base version exists
    BaseOnly,
    /// Base version with local modifications
    Modified,
    /// Created locally, no base version
    ModifiedOnly,
    /// Marked for deletion
    Deleted,
}

/// A commit that can be undone
#[derive(Debug, Clone)]
pub struct UndoEntry<T> {
    /// When the commit happened
    pub timestamp: DateTime<Utc>,
    /// Revision the commit produced
    pub revision: u64,
    /// Nested tables whose rows changed in this commit
    pub touched: Vec<NestedTableKind>,
    previous: Option<T>,
    previous_state: RecordState,
}

/// An editable record holding a base snapshot and an optional modified one
#[derive(Debug, Clone)]
pub struct Record<T> {
    label: String,
    base: T,
    modified: Option<T>,
    state: RecordState,
    revision: u64,
    undo: Vec<UndoEntry<T>>,
}

impl<T: Clone> Record<T> {
    /// Wrap an existing base version
    pub fn new(base: T) -> Self {
        Self {
            label: String::new(),
            base,
            modified: None,
            state: RecordState::BaseOnly,
            revision: 0,
            undo: Vec::new(),
        }
    }

    /// Wrap a record created locally
    pub fn new_modified_only(value: T) -> Self {
        Self {
            modified: Some(value.clone()),
            state: RecordState::ModifiedOnly,
            ..Self::new(value)
        }
    }

    /// Name the record in log output, usually its id
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Name used in log output
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Current snapshot: the modified version if there is one, otherwise the base
    pub fn get(&self) -> &T {
        match (self.state, &self.modified) {
            (RecordState::BaseOnly | RecordState::Deleted, _) | (_, None) => &self.base,
            (_, Some(modified)) => modified,
        }
    }

    /// The base version
    pub fn base(&self) -> &T {
        &self.base
    }

    /// Current lifecycle state
    pub fn state(&self) -> RecordState {
        self.state
    }

    /// Number of commits applied so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Check if the record has local modifications
    pub fn is_modified(&self) -> bool {
        matches!(self.state, RecordState::Modified | RecordState::ModifiedOnly)
    }

    /// Check if the record is marked for deletion
    pub fn is_deleted(&self) -> bool {
        self.state == RecordState::Deleted
    }

    /// Replace the current snapshot
    pub fn set_modified(&mut self, value: T) {
        self.commit(value, &[]);
    }

    /// Replace the current snapshot, recording which nested tables changed
    pub fn commit(&mut self, value: T, touched: &[NestedTableKind]) {
        let previous = self.modified.take();
        self.push_undo(previous, touched);

        self.modified = Some(value);
        if self.state != RecordState::ModifiedOnly {
            self.state = RecordState::Modified;
        }

        debug!(
            record = %self.label,
            revision = self.revision,
            ?touched,
            "record modified"
        );
    }

    fn push_undo(&mut self, previous: Option<T>, touched: &[NestedTableKind]) {
        self.revision += 1;
        self.undo.push(UndoEntry {
            timestamp: Utc::now(),
            revision: self.revision,
            touched: touched.to_vec(),
            previous,
            previous_state: self.state,
        });
    }

    /// Nested tables touched by the most recent commit still in the undo log
    pub fn last_touched(&self) -> &[NestedTableKind] {
        self.undo.last().map(|e| e.touched.as_slice()).unwrap_or(&[])
    }

    /// Commits that can still be undone, oldest first
    pub fn history(&self) -> &[UndoEntry<T>] {
        &self.undo
    }

    /// Roll back the most recent commit or deletion. Returns the tables it had touched.
    pub fn undo(&mut self) -> Result<Vec<NestedTableKind>> {
        let entry = self.undo.pop().ok_or(Error::NothingToUndo)?;
        self.modified = entry.previous;
        self.state = entry.previous_state;

        debug!(record = %self.label, revision = entry.revision, "commit undone");
        Ok(entry.touched)
    }

    /// Fold the current snapshot into the base version.
    ///
    /// A deleted record stays deleted; dropping it is left to the owning store.
    pub fn merge(&mut self) {
        if self.state == RecordState::Deleted {
            self.modified = None;
        } else {
            if let Some(modified) = self.modified.take() {
                self.base = modified;
            }
            self.state = RecordState::BaseOnly;
        }
        self.undo.clear();
    }

    /// Drop local modifications and return to the base version
    pub fn revert(&mut self) {
        self.modified = None;
        self.state = RecordState::BaseOnly;
        self.undo.clear();
    }

    /// Mark the record for deletion. The deletion goes on the undo log.
    pub fn mark_deleted(&mut self) {
        let previous = self.modified.clone();
        self.push_undo(previous, &[]);
        self.state = RecordState::Deleted;

        debug!(record = %self.label, revision = self.revision, "record deleted");
    }
}
