// Font side of glyphsheet: locate a font, fit it to the cell, rasterize
// the atlas and assemble a sheet for one requested size.

pub mod atlas;
pub mod builtin;
pub mod error;
pub mod face;
pub mod fit;
pub mod locate;
pub mod sheet;

pub use atlas::{render_atlas, RenderedAtlas};
pub use builtin::FixedFont;
pub use error::{FitError, FontError, GenerationError, GlyphError};
pub use face::{FontHandle, GlyphBitmap, InkBand, ScalableFont};
pub use fit::{FitStrategy, FittedFont, Recovery, SizeFitter};
pub use locate::{FontLocator, FontOrigin, LocateStrategy, NameVariant, ResolvedFont, SearchRule};
pub use sheet::{base_name, GeneratedSheet, SheetGenerator, SheetPaths, SheetRequest};
