use crate::models::core::Song;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum number of past snapshots retained; the oldest is evicted first
pub const HISTORY_LIMIT: usize = 100;

/// Manages undo/redo history as whole-document snapshots.
///
/// Every mutating action pushes a deep copy of the *pre-mutation* song
/// before applying its change, so undo is always an exact restore with
/// no per-mutation inverse operations to hand-write or get wrong. Snapshots
/// share no mutable substructure with the live document (the tree is
/// fully owned, so `Clone` is a total deep copy).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HistoryStack {
    /// Snapshots available for undo, oldest first
    past: VecDeque<Song>,
    /// Snapshots available for redo, most recently undone last
    future: Vec<Song>,
    /// Maximum number of past snapshots to keep
    max_size: usize,
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new(HISTORY_LIMIT)
    }
}

impl HistoryStack {
    /// Create a history stack with the given snapshot cap
    pub fn new(max_size: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: Vec::new(),
            max_size,
        }
    }

    /// Record the pre-mutation document.
    ///
    /// Call this immediately before applying a mutation. Any redo history
    /// is invalidated; when the cap is exceeded the oldest snapshot is
    /// evicted, so very long sessions cannot grow history unboundedly.
    pub fn push(&mut self, current: &Song) {
        self.past.push_back(current.clone());
        if self.past.len() > self.max_size {
            self.past.pop_front();
        }
        self.future.clear();
    }

    /// Swap the live document with the most recent past snapshot.
    ///
    /// Returns false (a silent no-op) when there is nothing to undo.
    pub fn undo(&mut self, current: &mut Song) -> bool {
        let Some(snapshot) = self.past.pop_back() else {
            return false;
        };
        self.future.push(std::mem::replace(current, snapshot));
        true
    }

    /// Mirror of `undo`: restore the most recently undone snapshot.
    pub fn redo(&mut self, current: &mut Song) -> bool {
        let Some(snapshot) = self.future.pop() else {
            return false;
        };
        self.past.push_back(std::mem::replace(current, snapshot));
        true
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Drop all history (song load / wholesale replacement)
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    /// Number of available undo steps
    pub fn undo_count(&self) -> usize {
        self.past.len()
    }

    /// Number of available redo steps
    pub fn redo_count(&self) -> usize {
        self.future.len()
    }
}
