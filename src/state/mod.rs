//! State management module
//!
//! This module contains the editor's data model:
//! - EditorState: the single mutable record behind the editor
//! - EditorEvent: user actions mapped onto state updates
//! - AccentColor: the picker's hex output
//! - ImageRef: a locally selected image

mod color;
mod editor;
mod image_ref;

pub use color::*;
pub use editor::*;
pub use image_ref::*;
