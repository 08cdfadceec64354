// Core types for glyphsheet: sheet configuration, character sets,
// grid geometry and the JSON sidecar. No font or image dependencies.

pub mod charset;
pub mod config;
pub mod error;
pub mod grid;
pub mod metadata;

pub use charset::{CharacterSet, DEFAULT_CHARACTERS};
pub use config::SheetConfig;
pub use error::{CharsetError, ConfigError, LayoutError};
pub use grid::{GlyphCell, GridLayout};
pub use metadata::{AtlasMetadata, CharacterMap, GlyphRecord};
