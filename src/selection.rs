//! Selection manager for chord-slot selection operations
//!
//! Tracks which slots are selected, the range-selection anchor, and the
//! derived active chord shown by the chord detail view. Entries are id
//! pairs only; they are resolved against the current document at
//! evaluation time and pruned when they no longer exist.

use serde::{Deserialize, Serialize};

use crate::flatten::{flatten_song, position_of};
use crate::models::chord::Chord;
use crate::models::core::{SlotRef, Song};

/// Selection state for the arrangement editor.
///
/// `selected_slots` is kept in insertion order (recency, not document
/// order); the *primary* slot, the one whose chord the detail view
/// mirrors, is the last element.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SelectionManager {
    /// Currently selected slots, most recently touched last
    pub selected_slots: Vec<SlotRef>,

    /// Base slot for range selection
    pub anchor: Option<SlotRef>,

    /// Chord of the most recently touched slot, mirrored for the UI
    pub active_chord: Option<Chord>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently touched selected slot
    pub fn primary(&self) -> Option<&SlotRef> {
        self.selected_slots.last()
    }

    pub fn is_empty(&self) -> bool {
        self.selected_slots.is_empty()
    }

    /// Navigational selection: replace the selection with exactly this slot
    /// and anchor on it, leaving `active_chord` alone.
    ///
    /// Selecting an empty slot this way must not blank out the chord detail
    /// view. Passing None ids clears selection and anchor, again without
    /// touching `active_chord`.
    pub fn select_slot_only(&mut self, section_id: Option<&str>, slot_id: Option<&str>) {
        match (section_id, slot_id) {
            (Some(section_id), Some(slot_id)) => {
                let slot = SlotRef::new(section_id, slot_id);
                self.selected_slots = vec![slot.clone()];
                self.anchor = Some(slot);
            }
            _ => {
                self.selected_slots.clear();
                self.anchor = None;
            }
        }
    }

    /// Content selection: like `select_slot_only`, but `active_chord` is
    /// set to whatever the slot holds (or cleared if empty/absent).
    pub fn set_selected_slot(
        &mut self,
        song: &Song,
        section_id: Option<&str>,
        slot_id: Option<&str>,
    ) {
        self.select_slot_only(section_id, slot_id);
        self.active_chord = match self.primary() {
            Some(slot) => song.chord_at(slot),
            None => None,
        };
    }

    /// XOR a slot's membership in the selection.
    ///
    /// When the toggled-off slot was the anchor, the first remaining
    /// selected slot becomes the anchor; when a slot is toggled on and
    /// there was no prior anchor, the newly added slot becomes the anchor.
    /// `active_chord` always tracks the last element of the resulting list.
    pub fn toggle_slot_selection(&mut self, song: &Song, section_id: &str, slot_id: &str) {
        let slot = SlotRef::new(section_id, slot_id);

        if let Some(index) = self.selected_slots.iter().position(|s| *s == slot) {
            self.selected_slots.remove(index);
            if self.anchor.as_ref() == Some(&slot) {
                self.anchor = self.selected_slots.first().cloned();
            }
        } else {
            self.selected_slots.push(slot.clone());
            if self.anchor.is_none() {
                self.anchor = Some(slot);
            }
        }

        self.active_chord = self.primary().and_then(|s| song.chord_at(s));
    }

    /// Select every slot between the anchor and the target, inclusive.
    ///
    /// The anchor resolves through a fallback chain: the explicit anchor if
    /// it still exists in the document, else the last selected slot, else
    /// the target itself. The resulting list runs anchor → target (so the
    /// anchor is its first element) and works in both directions. When no
    /// anchor resolves, selection degrades to the single target slot.
    pub fn select_range_to(&mut self, song: &Song, section_id: &str, slot_id: &str) {
        let target = SlotRef::new(section_id, slot_id);
        let flat = flatten_song(song);

        let target_pos = position_of(&flat, &target);
        let anchor_pos = self
            .anchor
            .as_ref()
            .and_then(|a| position_of(&flat, a))
            .or_else(|| self.primary().and_then(|s| position_of(&flat, s)));

        let (anchor_pos, target_pos) = match (anchor_pos, target_pos) {
            (Some(a), Some(t)) => (a, t),
            _ => {
                log::debug!("range anchor or target unresolvable, selecting target only");
                self.selected_slots = vec![target.clone()];
                self.anchor = Some(target);
                self.active_chord = self.primary().and_then(|s| song.chord_at(s));
                return;
            }
        };

        // Anchor → target order keeps the anchor first and the target
        // primary, whichever direction the range runs.
        let range: Vec<SlotRef> = if anchor_pos <= target_pos {
            flat[anchor_pos..=target_pos].iter().map(|f| f.slot_ref()).collect()
        } else {
            flat[target_pos..=anchor_pos].iter().rev().map(|f| f.slot_ref()).collect()
        };

        self.anchor = range.first().cloned();
        self.active_chord = range.last().and_then(|s| song.chord_at(s));
        self.selected_slots = range;
    }

    /// Bulk-replace the selection.
    ///
    /// Entries that do not resolve in the current document are filtered
    /// out; the anchor becomes the first surviving entry and `active_chord`
    /// derives from the last.
    pub fn set_selected_slots(&mut self, song: &Song, slots: Vec<SlotRef>) {
        self.selected_slots = slots
            .into_iter()
            .filter(|s| song.contains_slot(s))
            .collect();
        self.anchor = self.selected_slots.first().cloned();
        self.active_chord = self.primary().and_then(|s| song.chord_at(s));
    }

    /// Advance the selection to the slot after the given one in flatten
    /// order, without touching `active_chord`.
    ///
    /// Supports the "type chord, advance, type next chord" workflow.
    /// Returns false (and changes nothing) at the end of the document or
    /// when the given slot does not resolve.
    pub fn select_next_slot_after(&mut self, song: &Song, section_id: &str, slot_id: &str) -> bool {
        let flat = flatten_song(song);
        let Some(pos) = position_of(&flat, &SlotRef::new(section_id, slot_id)) else {
            return false;
        };
        let Some(next) = flat.get(pos + 1) else {
            return false;
        };

        let next = next.slot_ref();
        self.selected_slots = vec![next.clone()];
        self.anchor = Some(next);
        true
    }

    /// Re-derive selection state after a structural edit may have deleted
    /// slots.
    ///
    /// Dead entries are pruned. If the primary slot was dropped, the
    /// caller-supplied fallback (the edit's explicit target) takes its
    /// place when it resolves. `active_chord` is recomputed from whatever
    /// primary survives, or cleared.
    pub fn ensure_selection_still_exists(&mut self, song: &Song, fallback: Option<&SlotRef>) {
        let primary_dropped = self
            .primary()
            .is_some_and(|p| !song.contains_slot(p));

        self.selected_slots.retain(|s| song.contains_slot(s));

        if primary_dropped {
            if let Some(fallback) = fallback.filter(|f| song.contains_slot(f)).cloned() {
                self.selected_slots = vec![fallback.clone()];
                self.anchor = Some(fallback.clone());
            } else {
                log::debug!("primary selection slot removed with no usable fallback");
            }
        }

        if self
            .anchor
            .as_ref()
            .is_some_and(|a| !song.contains_slot(a))
        {
            self.anchor = self.selected_slots.first().cloned();
        }

        self.active_chord = self.primary().and_then(|s| song.chord_at(s));
    }

    /// Drop all selection state (song load / wholesale replacement)
    pub fn clear(&mut self) {
        self.selected_slots.clear();
        self.anchor = None;
        self.active_chord = None;
    }
}
