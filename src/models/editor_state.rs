//! Editor state management
//!
//! This module contains the EditorState struct which represents the complete
//! state of the editor: the song document, the slot selection, and the
//! undo/redo history.
//!
//! This is the WASM-owned source of truth for all editor state. It is an
//! explicit container handed to call sites; nothing in the crate reaches
//! for process-wide mutable state.

use serde::{Deserialize, Serialize};

use crate::models::chord::Chord;
use crate::models::core::{Section, SectionKind, SlotRef, Song};
use crate::movement::{self, MoveMode};
use crate::selection::SelectionManager;
use crate::undo::HistoryStack;

/// Complete editor state (WASM-owned source of truth)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EditorState {
    /// The song being arranged
    pub song: Song,

    /// Slot selection, anchor, and active chord
    pub selection: SelectionManager,

    /// Snapshot-based undo/redo stacks
    pub history: HistoryStack,
}

impl EditorState {
    /// Create an editor over a fresh untitled song
    pub fn new() -> Self {
        Self::with_song(Song::new())
    }

    /// Create an editor over an existing song
    pub fn with_song(song: Song) -> Self {
        Self {
            song,
            selection: SelectionManager::new(),
            history: HistoryStack::default(),
        }
    }

    /// Replace the document wholesale (song load).
    ///
    /// Selection is reset and both history stacks are cleared; nothing
    /// from the previous song survives.
    pub fn load_song(&mut self, song: Song) {
        self.song = song;
        self.selection.clear();
        self.history.clear();
    }

    // ------------------------------------------------------------------
    // Chord assignment primitives. Every higher-level action funnels
    // through these two, so each wraps itself in a history snapshot.
    // ------------------------------------------------------------------

    /// Place a chord into a slot. Returns false (no mutation, no history
    /// entry) when the reference does not resolve.
    pub fn add_chord_to_slot(&mut self, chord: Chord, section_id: &str, slot_id: &str) -> bool {
        if self.song.find_slot(section_id, slot_id).is_none() {
            log::warn!("add_chord_to_slot: slot {slot_id} not found");
            return false;
        }

        self.history.push(&self.song);
        if let Some(slot) = self.song.find_slot_mut(section_id, slot_id) {
            slot.chord = Some(chord.clone());
        }
        self.song.touch();

        // Keep the chord detail view honest when the primary slot changed
        if self.is_primary(section_id, slot_id) {
            self.selection.active_chord = Some(chord);
        }
        true
    }

    /// Empty a slot. The slot keeps its identity; only the chord goes.
    pub fn clear_slot(&mut self, section_id: &str, slot_id: &str) -> bool {
        if self.song.find_slot(section_id, slot_id).is_none() {
            return false;
        }

        self.history.push(&self.song);
        if let Some(slot) = self.song.find_slot_mut(section_id, slot_id) {
            slot.chord = None;
        }
        self.song.touch();

        if self.is_primary(section_id, slot_id) {
            self.selection.active_chord = None;
        }
        true
    }

    /// Relocate or duplicate the current selection; see `movement`.
    pub fn move_selection(&mut self, active: &SlotRef, target: &SlotRef, mode: MoveMode) -> bool {
        movement::move_selection(self, active, target, mode)
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Undo the last mutation. Restored documents may lack slots the
    /// selection still references, so selection is re-validated.
    pub fn undo(&mut self) {
        if self.history.undo(&mut self.song) {
            self.selection.ensure_selection_still_exists(&self.song, None);
        }
    }

    /// Redo the most recently undone mutation
    pub fn redo(&mut self) {
        if self.history.redo(&mut self.song) {
            self.selection.ensure_selection_still_exists(&self.song, None);
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ------------------------------------------------------------------
    // Structural editing bridge. Section/measure edits arrive from the
    // arrangement panel; each snapshots history and re-validates the
    // selection because slots may disappear.
    // ------------------------------------------------------------------

    /// Append a new section; returns its id
    pub fn add_section(
        &mut self,
        kind: SectionKind,
        name: &str,
        measure_count: usize,
        beats_per_measure: usize,
    ) -> String {
        self.history.push(&self.song);
        let section = Section::new(kind, name, measure_count, beats_per_measure);
        let id = section.id.clone();
        self.song.sections.push(section);
        self.song.touch();
        self.selection
            .ensure_selection_still_exists(&self.song, None);
        id
    }

    /// Remove a section and every slot in it
    pub fn remove_section(&mut self, section_id: &str) -> bool {
        let Some(index) = self.song.sections.iter().position(|s| s.id == section_id) else {
            return false;
        };

        self.history.push(&self.song);
        self.song.sections.remove(index);
        self.song.touch();
        self.selection
            .ensure_selection_still_exists(&self.song, None);
        true
    }

    /// Change a measure's beat count (resubdivision)
    pub fn set_measure_beats(&mut self, measure_id: &str, beat_count: usize) -> bool {
        if self.song.find_measure_mut(measure_id).is_none() {
            return false;
        }

        self.history.push(&self.song);
        if let Some(measure) = self.song.find_measure_mut(measure_id) {
            measure.resubdivide(beat_count);
        }
        self.song.touch();
        self.selection
            .ensure_selection_still_exists(&self.song, None);
        true
    }

    fn is_primary(&self, section_id: &str, slot_id: &str) -> bool {
        self.selection
            .primary()
            .is_some_and(|p| p.section_id == section_id && p.slot_id == slot_id)
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}
