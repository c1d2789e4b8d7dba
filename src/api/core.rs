//! WASM API for the arrangement editor
//!
//! This module provides the JavaScript-facing `ArrangementEditor` class.
//! The class owns the complete editor state (song document, selection,
//! history) and exposes the selection/mutation/history operations consumed
//! by the wheel, timeline, and persistence collaborators.

use wasm_bindgen::prelude::*;

use crate::api::helpers::{deserialize, serialize, validation_error};
use crate::models::chord::Chord;
use crate::models::core::{SectionKind, SlotRef, Song};
use crate::models::editor_state::EditorState;
use crate::movement::MoveMode;
use crate::{wasm_info, wasm_log};

/// JavaScript-facing editor class (owns the WASM source of truth).
///
/// All operations run synchronously to completion; the UI reads back the
/// reconciled selection/document state after each call.
#[wasm_bindgen]
pub struct ArrangementEditor {
    state: EditorState,
}

#[wasm_bindgen]
impl ArrangementEditor {
    /// Create an editor over a fresh untitled song
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        wasm_info!("ArrangementEditor created");
        Self {
            state: EditorState::new(),
        }
    }

    // ========================================================================
    // Song lifecycle
    // ========================================================================

    /// Replace the document with a song loaded from persistence.
    ///
    /// Selection and history are reset. Rejects documents that fail
    /// structural validation (the storage collaborator is expected to fall
    /// back to an empty song).
    #[wasm_bindgen(js_name = loadSong)]
    pub fn load_song(&mut self, song_js: JsValue) -> Result<(), JsValue> {
        let song: Song = deserialize(song_js, "loadSong: invalid song document")?;
        song.validate()
            .map_err(|e| validation_error(format!("loadSong: {}", e)))?;

        wasm_info!("loadSong: '{}' ({} slots)", song.title, song.slot_count());
        self.state.load_song(song);
        Ok(())
    }

    /// Start over with a fresh untitled song
    #[wasm_bindgen(js_name = newSong)]
    pub fn new_song(&mut self) {
        self.state.load_song(Song::new());
    }

    /// Export the current song in the persisted logical schema.
    ///
    /// The debounced storage collaborator calls this after mutations; the
    /// returned document round-trips losslessly through `loadSong`.
    #[wasm_bindgen(js_name = exportSong)]
    pub fn export_song(&self) -> Result<JsValue, JsValue> {
        serialize(&self.state.song, "exportSong: serialization failed")
    }

    // ========================================================================
    // Selection operations
    // ========================================================================

    /// Navigational selection: select exactly one slot without touching
    /// the active chord. Passing nulls clears the selection.
    #[wasm_bindgen(js_name = selectSlotOnly)]
    pub fn select_slot_only(&mut self, section_id: Option<String>, slot_id: Option<String>) {
        self.state
            .selection
            .select_slot_only(section_id.as_deref(), slot_id.as_deref());
    }

    /// Content selection: select one slot and mirror its chord into the
    /// active chord.
    #[wasm_bindgen(js_name = setSelectedSlot)]
    pub fn set_selected_slot(&mut self, section_id: Option<String>, slot_id: Option<String>) {
        self.state.selection.set_selected_slot(
            &self.state.song,
            section_id.as_deref(),
            slot_id.as_deref(),
        );
    }

    /// Toggle a slot's membership in the multi-selection
    #[wasm_bindgen(js_name = toggleSlotSelection)]
    pub fn toggle_slot_selection(&mut self, section_id: String, slot_id: String) {
        self.state
            .selection
            .toggle_slot_selection(&self.state.song, &section_id, &slot_id);
    }

    /// Extend the selection from the anchor to the given slot, inclusive
    #[wasm_bindgen(js_name = selectRangeTo)]
    pub fn select_range_to(&mut self, section_id: String, slot_id: String) {
        self.state
            .selection
            .select_range_to(&self.state.song, &section_id, &slot_id);
    }

    /// Bulk-replace the selection with an array of `{sectionId, slotId}`
    /// reference pairs
    #[wasm_bindgen(js_name = setSelectedSlots)]
    pub fn set_selected_slots(&mut self, slots_js: JsValue) -> Result<(), JsValue> {
        let slots: Vec<SlotRef> = deserialize(slots_js, "setSelectedSlots: invalid slot list")?;
        self.state
            .selection
            .set_selected_slots(&self.state.song, slots);
        Ok(())
    }

    /// Advance the selection past the given slot (chord entry workflow).
    /// Returns false at the end of the document.
    #[wasm_bindgen(js_name = selectNextSlotAfter)]
    pub fn select_next_slot_after(&mut self, section_id: String, slot_id: String) -> bool {
        self.state
            .selection
            .select_next_slot_after(&self.state.song, &section_id, &slot_id)
    }

    /// Currently selected slots, most recently touched last
    ///
    /// # Returns
    /// JavaScript array of `{sectionId, slotId}` objects
    #[wasm_bindgen(js_name = selectedSlots)]
    pub fn selected_slots(&self) -> Result<js_sys::Array, JsValue> {
        let result = js_sys::Array::new();
        for slot in &self.state.selection.selected_slots {
            result.push(&serialize(slot, "selectedSlots: serialization failed")?);
        }
        Ok(result)
    }

    /// Chord of the most recently touched slot (null when none)
    #[wasm_bindgen(js_name = activeChord)]
    pub fn active_chord(&self) -> Result<JsValue, JsValue> {
        match &self.state.selection.active_chord {
            Some(chord) => serialize(chord, "activeChord: serialization failed"),
            None => Ok(JsValue::NULL),
        }
    }

    /// Complete selection state `{selectedSlots, anchor, activeChord}` in
    /// one call, for collaborators that re-render after every action
    #[wasm_bindgen(js_name = selectionState)]
    pub fn selection_state(&self) -> Result<JsValue, JsValue> {
        serialize(&self.state.selection, "selectionState: serialization failed")
    }

    // ========================================================================
    // Chord mutation and move/copy
    // ========================================================================

    /// Place a chord (as produced by the chord picker) into a slot
    ///
    /// # Returns
    /// false when the slot reference does not resolve; no mutation occurs
    #[wasm_bindgen(js_name = addChordToSlot)]
    pub fn add_chord_to_slot(
        &mut self,
        chord_js: JsValue,
        section_id: String,
        slot_id: String,
    ) -> Result<bool, JsValue> {
        let chord: Chord = deserialize(chord_js, "addChordToSlot: invalid chord payload")?;
        wasm_log!("addChordToSlot: '{}' -> {}", chord.symbol, slot_id);
        Ok(self
            .state
            .add_chord_to_slot(chord, &section_id, &slot_id))
    }

    /// Empty a slot (the slot itself survives)
    #[wasm_bindgen(js_name = clearSlot)]
    pub fn clear_slot(&mut self, section_id: String, slot_id: String) -> bool {
        self.state.clear_slot(&section_id, &slot_id)
    }

    /// Relocate or duplicate the current selection by the offset between
    /// `active` and `target`.
    ///
    /// # Parameters
    /// - `active_js` / `target_js`: `{sectionId, slotId}` reference pairs
    /// - `mode`: "move" (default) or "copy"
    ///
    /// # Returns
    /// false when any destination would fall outside the document; the
    /// whole operation is rejected and nothing changes
    #[wasm_bindgen(js_name = moveSelection)]
    pub fn move_selection(
        &mut self,
        active_js: JsValue,
        target_js: JsValue,
        mode: Option<String>,
    ) -> Result<bool, JsValue> {
        let active: SlotRef = deserialize(active_js, "moveSelection: invalid active slot")?;
        let target: SlotRef = deserialize(target_js, "moveSelection: invalid target slot")?;
        let mode = MoveMode::from_str(mode.as_deref().unwrap_or("move"));

        wasm_log!(
            "moveSelection: {} -> {} ({:?})",
            active.slot_id,
            target.slot_id,
            mode
        );
        Ok(self.state.move_selection(&active, &target, mode))
    }

    // ========================================================================
    // History
    // ========================================================================

    /// Undo the last mutation (silent no-op when there is none)
    pub fn undo(&mut self) {
        self.state.undo();
    }

    /// Redo the most recently undone mutation
    pub fn redo(&mut self) {
        self.state.redo();
    }

    /// Whether undo is available (the UI disables its control otherwise)
    #[wasm_bindgen(getter, js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.state.can_undo()
    }

    /// Whether redo is available
    #[wasm_bindgen(getter, js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.state.can_redo()
    }

    // ========================================================================
    // Structural editing bridge
    // ========================================================================

    /// Append a section of empty measures
    ///
    /// # Parameters
    /// - `section_type_js`: section kind string ("verse", "chorus", ...)
    ///
    /// # Returns
    /// The new section's id
    #[wasm_bindgen(js_name = addSection)]
    pub fn add_section(
        &mut self,
        section_type_js: JsValue,
        name: String,
        measure_count: usize,
        beats_per_measure: usize,
    ) -> Result<String, JsValue> {
        let kind: SectionKind = deserialize(section_type_js, "addSection: invalid section type")?;
        Ok(self
            .state
            .add_section(kind, &name, measure_count, beats_per_measure))
    }

    /// Remove a section and every slot in it
    #[wasm_bindgen(js_name = removeSection)]
    pub fn remove_section(&mut self, section_id: String) -> bool {
        self.state.remove_section(&section_id)
    }

    /// Change a measure's beat count (resubdivision)
    #[wasm_bindgen(js_name = setMeasureBeats)]
    pub fn set_measure_beats(&mut self, measure_id: String, beat_count: usize) -> bool {
        self.state.set_measure_beats(&measure_id, beat_count)
    }
}

impl Default for ArrangementEditor {
    fn default() -> Self {
        Self::new()
    }
}
