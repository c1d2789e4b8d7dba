//! Opaque chord payload supplied by the external theory collaborator
//!
//! The arrangement core stores and relocates chords; it never interprets
//! them. Whatever the chord picker produces (root, quality, extensions,
//! voicings) rides along in a flattened map and round-trips verbatim.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A chord as produced by the chord picker / theory layer.
///
/// Equality is by `id` only: two chords with the same identity are the
/// same chord regardless of payload, and the core never compares payloads.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Chord {
    /// Stable identity assigned by the theory collaborator
    pub id: String,

    /// Display symbol (e.g. "Cmaj7", "F#m"), shown verbatim by the UI
    pub symbol: String,

    /// Everything else the theory layer attached (root, quality, notes...).
    /// Carried verbatim so persisted documents round-trip losslessly.
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Chord {
    /// Create a chord with no extra payload (mostly useful in tests)
    pub fn new(id: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
            payload: Map::new(),
        }
    }
}

impl PartialEq for Chord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
