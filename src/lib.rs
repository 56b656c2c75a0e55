//! ntultra - New-tab theme and settings core
//!
//! This library owns the active settings, the named theme profiles and
//! their persistence to a local key-value store and an optional sync mirror.

pub mod config;
pub mod error;
pub mod logging;
pub mod settings;
pub mod store;
pub mod sync;
pub mod theme;

pub use error::{ErrorSeverity, StoreError, ThemeError, ValidationError};
pub use settings::Settings;
pub use store::{Collection, ConfigStore, MemoryStore, SqliteStore};
pub use sync::{DirectoryMirror, NoopMirror, SyncMirror};
pub use theme::{ThemeDocument, ThemeRegistry, ThemeTransition};
