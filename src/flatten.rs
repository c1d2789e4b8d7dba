//! Slot flattening: the canonical linear ordering of all chord slots
//!
//! Range selection and move/copy offsets are computed over this sequence.
//! It is derived fresh for every operation (measure resubdivision changes
//! beat counts, so a cached sequence would go stale) and it is never
//! exposed as external selection state.

use serde::{Deserialize, Serialize};

use crate::models::chord::Chord;
use crate::models::core::{SlotRef, Song};

/// One slot as seen in flatten order
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlatSlot {
    pub section_id: String,
    pub slot_id: String,
    pub chord: Option<Chord>,
}

impl FlatSlot {
    /// Reference pair addressing this slot
    pub fn slot_ref(&self) -> SlotRef {
        SlotRef::new(self.section_id.clone(), self.slot_id.clone())
    }
}

/// Flatten the section → measure → beat tree into document order:
/// sections in array order, measures in array order, beats in array order.
pub fn flatten_song(song: &Song) -> Vec<FlatSlot> {
    let mut flat = Vec::with_capacity(song.slot_count());
    for section in &song.sections {
        for measure in &section.measures {
            for slot in &measure.beats {
                flat.push(FlatSlot {
                    section_id: section.id.clone(),
                    slot_id: slot.id.clone(),
                    chord: slot.chord.clone(),
                });
            }
        }
    }
    flat
}

/// Position of a referenced slot in flatten order.
///
/// Two slots compare by their index here. Returns None when the reference
/// does not resolve in the flattened document.
pub fn position_of(flat: &[FlatSlot], slot: &SlotRef) -> Option<usize> {
    flat.iter()
        .position(|f| f.slot_id == slot.slot_id && f.section_id == slot.section_id)
}
