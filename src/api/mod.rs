//! Song Arrangement Editor WASM API
//!
//! This module provides the JavaScript-facing API for the arrangement
//! editor. It includes shared utilities for serialization and error
//! handling, plus the `ArrangementEditor` class that wraps the editor
//! state container.
//!
//! # Module Structure
//!
//! - `helpers`: Shared utilities for serialization, error handling, and logging
//! - `core`: The `ArrangementEditor` WASM class (selection, move/copy,
//!   chord assignment, undo/redo, song lifecycle)

pub mod helpers;
pub mod core;

pub use core::ArrangementEditor;
