//! Song Arrangement Editor WASM Module
//!
//! This is the main WASM module for the Song Arrangement Editor.
//! It provides the selection, mutation, and undo/redo engine for
//! chord-slot based song arrangement.

pub mod models;
pub mod flatten;
pub mod selection;
pub mod movement;
pub mod undo;
pub mod api;

// Re-export commonly used types
pub use models::chord::Chord;
pub use models::core::*;
pub use models::editor_state::EditorState;
pub use movement::MoveMode;
pub use selection::SelectionManager;
pub use undo::HistoryStack;

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).expect("failed to initialize logger");

    log::info!("Song Arrangement Editor WASM module initialized");
}
