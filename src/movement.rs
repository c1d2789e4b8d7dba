//! Move/copy engine for relocating chord content across slots
//!
//! Moves are offset-based: the whole selection shifts by the flatten-index
//! distance between the active slot and the drop target. The bounds check
//! is all-or-nothing: a single out-of-range destination rejects the whole
//! operation with no mutation and no history entry.

use std::collections::HashSet;

use crate::flatten::{flatten_song, position_of};
use crate::models::core::{SlotRef, Song};
use crate::models::editor_state::EditorState;

/// Whether a drag relocates chords or duplicates them
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MoveMode {
    #[default]
    Move,
    Copy,
}

impl MoveMode {
    /// Parse the wire form used by the UI layer; anything unrecognized
    /// falls back to a plain move.
    pub fn from_str(mode: &str) -> Self {
        match mode {
            "copy" => MoveMode::Copy,
            _ => MoveMode::Move,
        }
    }
}

/// Relocate (or duplicate) the current selection by the offset between
/// `active` and `target` in flatten order.
///
/// Returns false, leaving document, selection, and history untouched,
/// when any slot involved fails to resolve or any destination would land
/// outside the document. On success the selection is re-anchored to the
/// destination slots.
pub fn move_selection(
    state: &mut EditorState,
    active: &SlotRef,
    target: &SlotRef,
    mode: MoveMode,
) -> bool {
    let flat = flatten_song(&state.song);

    let (Some(active_pos), Some(target_pos)) =
        (position_of(&flat, active), position_of(&flat, target))
    else {
        log::warn!("move rejected: active or target slot not found");
        return false;
    };
    let offset = target_pos as isize - active_pos as isize;

    // An empty selection moves just the active slot
    let sources: Vec<SlotRef> = if state.selection.is_empty() {
        vec![active.clone()]
    } else {
        state.selection.selected_slots.clone()
    };

    // Resolve every source and destination up front; any miss rejects the
    // whole operation before anything is touched.
    let mut pairs: Vec<(SlotRef, SlotRef)> = Vec::with_capacity(sources.len());
    for source in &sources {
        let Some(source_pos) = position_of(&flat, source) else {
            return false;
        };
        let dest_pos = source_pos as isize + offset;
        if dest_pos < 0 || dest_pos as usize >= flat.len() {
            log::debug!("move rejected: destination offset {dest_pos} out of bounds");
            return false;
        }
        pairs.push((source.clone(), flat[dest_pos as usize].slot_ref()));
    }

    state.history.push(&state.song);

    if pairs.len() == 1 && mode == MoveMode::Move {
        swap_slots(&mut state.song, &pairs[0].0, &pairs[0].1);
    } else {
        batch_write(&mut state.song, &flat, &pairs, mode);
    }
    state.song.touch();

    // Re-anchor the selection onto the destinations; an anchor that was
    // part of the moved set tracks its destination.
    let old_anchor = state.selection.anchor.clone();
    let dests: Vec<SlotRef> = pairs.iter().map(|(_, d)| d.clone()).collect();
    state.selection.set_selected_slots(&state.song, dests);
    if let Some(old_anchor) = old_anchor {
        let moved_anchor = pairs
            .iter()
            .find(|(s, _)| *s == old_anchor)
            .map(|(_, d)| d.clone());
        match moved_anchor {
            Some(dest) => state.selection.anchor = Some(dest),
            None if state.song.contains_slot(&old_anchor) => {
                state.selection.anchor = Some(old_anchor);
            }
            None => {}
        }
    }

    true
}

/// Legacy single-slot move semantics: the two slots exchange chords
/// rather than the source overwriting the destination.
fn swap_slots(song: &mut Song, a: &SlotRef, b: &SlotRef) {
    if a == b {
        return;
    }
    let chord_a = song
        .find_slot_mut(&a.section_id, &a.slot_id)
        .and_then(|slot| slot.chord.take());
    let chord_b = match song.find_slot_mut(&b.section_id, &b.slot_id) {
        Some(slot) => std::mem::replace(&mut slot.chord, chord_a),
        None => None,
    };
    if let Some(slot) = song.find_slot_mut(&a.section_id, &a.slot_id) {
        slot.chord = chord_b;
    }
}

/// Multi-slot batch semantics: every source chord is written to its
/// computed destination (last write wins on coincidence); in move mode,
/// sources that are not themselves some item's destination are cleared.
fn batch_write(
    song: &mut Song,
    flat: &[crate::flatten::FlatSlot],
    pairs: &[(SlotRef, SlotRef)],
    mode: MoveMode,
) {
    // Chords are read from the pre-mutation flatten snapshot so overlapping
    // writes cannot observe each other.
    let writes: Vec<(SlotRef, Option<crate::models::chord::Chord>)> = pairs
        .iter()
        .map(|(source, dest)| {
            let chord = position_of(flat, source)
                .and_then(|pos| flat[pos].chord.clone());
            (dest.clone(), chord)
        })
        .collect();

    if mode == MoveMode::Move {
        let dest_ids: HashSet<&str> = pairs.iter().map(|(_, d)| d.slot_id.as_str()).collect();
        for (source, dest) in pairs {
            if source.slot_id != dest.slot_id && !dest_ids.contains(source.slot_id.as_str()) {
                if let Some(slot) = song.find_slot_mut(&source.section_id, &source.slot_id) {
                    slot.chord = None;
                }
            }
        }
    }

    for (dest, chord) in writes {
        if let Some(slot) = song.find_slot_mut(&dest.section_id, &dest.slot_id) {
            slot.chord = chord;
        }
    }
}
