//! Theme module - Named settings profiles
//!
//! This module provides functionality for:
//! - Loading the active theme triad from the local store and sync mirror
//! - Creating, importing, switching and removing named themes
//! - Exporting themes as portable JSON documents
//! - Promoting edits of the read-only `default` profile to `custom`
//!
//! # Module Structure
//!
//! - `names` - Name sanitizing, validation and disambiguation
//! - `document` - Exported theme document (de)serialization
//! - `transition` - Named state transitions and the render hook
//! - `registry` - The registry owning the triad and its persistence
//! - `mutator` - Single-setting edits with default -> custom promotion

mod document;
mod mutator;
pub mod names;
mod registry;
mod transition;

pub use document::{export_file_name, ThemeDocument};
pub use registry::{default_theme_list, fallback_theme, is_protected, ThemeRegistry};
pub use transition::{RenderHook, ThemeTransition};

#[cfg(test)]
#[path = "theme_tests.rs"]
mod tests;
