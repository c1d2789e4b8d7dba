//! Core data structures for the Song Arrangement Editor
//!
//! This module defines the nested Song → Section → Measure → ChordSlot
//! document tree and the reference types used to address slots within it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use super::chord::Chord;
use super::serde_helpers;

/// Generate a fresh string id for sections, measures, and slots.
///
/// Ids are globally unique and never reused within a session.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Time signature as a [numerator, denominator] pair (serialized as an array)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeSignature(pub u8, pub u8);

impl Default for TimeSignature {
    fn default() -> Self {
        Self(4, 4)
    }
}

/// Structural role of a section within the arrangement
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Intro,
    Verse,
    PreChorus,
    Chorus,
    Bridge,
    Solo,
    Instrumental,
    Outro,
}

/// A single chord-holding position (one beat) within a measure.
///
/// Identity persists whether or not a chord is present; a slot with no
/// chord is "empty", never "deleted".
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChordSlot {
    /// Unique within the whole song
    pub id: String,

    /// The chord occupying this beat, if any (explicit null on the wire)
    pub chord: Option<Chord>,

    /// Duration weight relative to sibling beats
    #[serde(default = "serde_helpers::default_duration")]
    pub duration: f32,
}

impl ChordSlot {
    /// Create a new empty slot with a fresh id
    pub fn new() -> Self {
        Self {
            id: new_id(),
            chord: None,
            duration: 1.0,
        }
    }

    /// Check whether this slot currently holds a chord
    pub fn is_empty(&self) -> bool {
        self.chord.is_none()
    }
}

impl Default for ChordSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// One measure: an ordered run of chord slots (beats)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Measure {
    pub id: String,
    pub beats: Vec<ChordSlot>,
}

impl Measure {
    /// Create a measure with `beat_count` empty slots
    pub fn new(beat_count: usize) -> Self {
        Self {
            id: new_id(),
            beats: (0..beat_count).map(|_| ChordSlot::new()).collect(),
        }
    }

    /// Change the beat count in place (resubdivision).
    ///
    /// Growing appends empty slots; shrinking drops slots from the tail,
    /// discarding whatever chords they held. Any flatten sequence computed
    /// before this call is stale afterwards.
    pub fn resubdivide(&mut self, beat_count: usize) {
        if beat_count < self.beats.len() {
            self.beats.truncate(beat_count);
        } else {
            while self.beats.len() < beat_count {
                self.beats.push(ChordSlot::new());
            }
        }
    }
}

/// A named section of the arrangement (verse, chorus, ...).
///
/// Section identity is stable across reorders; array order is the
/// playback/arrangement order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub name: String,

    /// Structural role ("type" on the wire)
    #[serde(rename = "type")]
    pub kind: SectionKind,

    /// Per-section override of the song time signature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_signature: Option<TimeSignature>,

    pub measures: Vec<Measure>,
}

impl Section {
    /// Create a section with `measure_count` measures of `beats_per_measure`
    /// empty slots each
    pub fn new(
        kind: SectionKind,
        name: impl Into<String>,
        measure_count: usize,
        beats_per_measure: usize,
    ) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            kind,
            time_signature: None,
            measures: (0..measure_count)
                .map(|_| Measure::new(beats_per_measure))
                .collect(),
        }
    }
}

/// Reference pair addressing one slot in the document.
///
/// Never holds chord data itself, only identity; selection state is built
/// entirely out of these.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SlotRef {
    pub section_id: String,
    pub slot_id: String,
}

impl SlotRef {
    pub fn new(section_id: impl Into<String>, slot_id: impl Into<String>) -> Self {
        Self {
            section_id: section_id.into(),
            slot_id: slot_id.into(),
        }
    }
}

/// Root document: the whole song arrangement
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: String,
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tempo: Option<u16>,

    pub time_signature: TimeSignature,

    pub sections: Vec<Section>,

    #[serde(default)]
    pub notes: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(with = "serde_helpers::iso_date")]
    pub created_at: DateTime<Utc>,

    #[serde(with = "serde_helpers::iso_date")]
    pub updated_at: DateTime<Utc>,
}

impl Song {
    /// Create a new untitled song with no sections
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            title: "Untitled Song".to_string(),
            artist: None,
            key: None,
            tempo: None,
            time_signature: TimeSignature::default(),
            sections: Vec::new(),
            notes: String::new(),
            tags: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh the modification timestamp; called by every successful mutation
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Look up a section by id
    pub fn find_section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    /// Look up a slot by its (section, slot) reference pair
    pub fn find_slot(&self, section_id: &str, slot_id: &str) -> Option<&ChordSlot> {
        self.find_section(section_id)?
            .measures
            .iter()
            .flat_map(|m| m.beats.iter())
            .find(|slot| slot.id == slot_id)
    }

    /// Mutable slot lookup
    pub fn find_slot_mut(&mut self, section_id: &str, slot_id: &str) -> Option<&mut ChordSlot> {
        self.sections
            .iter_mut()
            .find(|s| s.id == section_id)?
            .measures
            .iter_mut()
            .flat_map(|m| m.beats.iter_mut())
            .find(|slot| slot.id == slot_id)
    }

    /// Check whether a slot reference resolves in this document
    pub fn contains_slot(&self, slot: &SlotRef) -> bool {
        self.find_slot(&slot.section_id, &slot.slot_id).is_some()
    }

    /// Chord currently held at a referenced slot, if the reference resolves
    /// and the slot is occupied
    pub fn chord_at(&self, slot: &SlotRef) -> Option<Chord> {
        self.find_slot(&slot.section_id, &slot.slot_id)?.chord.clone()
    }

    /// Mutable measure lookup across all sections
    pub fn find_measure_mut(&mut self, measure_id: &str) -> Option<&mut Measure> {
        self.sections
            .iter_mut()
            .flat_map(|s| s.measures.iter_mut())
            .find(|m| m.id == measure_id)
    }

    /// Total number of slots across the whole arrangement
    pub fn slot_count(&self) -> usize {
        self.sections
            .iter()
            .map(|s| s.measures.iter().map(|m| m.beats.len()).sum::<usize>())
            .sum()
    }

    /// Validate document structure.
    ///
    /// Loaders call this before trusting an external document; the editing
    /// core assumes it holds.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for section in &self.sections {
            for measure in &section.measures {
                for slot in &measure.beats {
                    if !seen.insert(slot.id.as_str()) {
                        return Err(ValidationError::DuplicateSlotId {
                            section_id: section.id.clone(),
                            slot_id: slot.id.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Serialize to the persisted logical schema
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Rehydrate from the persisted logical schema, rejecting documents
    /// that violate structural invariants
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        let song: Song = serde_json::from_str(json)?;
        song.validate()?;
        Ok(song)
    }
}

impl Default for Song {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when validating or loading a document
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("duplicate slot id {slot_id} in section {section_id}")]
    DuplicateSlotId { section_id: String, slot_id: String },

    #[error("malformed song document: {0}")]
    Malformed(#[from] serde_json::Error),
}
