use std::io;
use std::path::PathBuf;

use glyphsheet_core::LayoutError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FontError {
    /// Nothing matched and the built-in fallback is disabled.
    #[error("could not find font: {0}")]
    NotFound(String),
    #[error("failed to read font file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse font data from {origin}")]
    Parse { origin: String },
    #[error("font from {origin} has no family name")]
    NoFamily { origin: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GlyphError {
    #[error("font has no glyph for {0:?}")]
    Unsupported(char),
    #[error("could not measure {character:?} at size {size}")]
    Measure { character: char, size: u32 },
    #[error("none of the probe glyphs could be measured at size {size}")]
    NoProbeGlyphs { size: u32 },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FitError {
    #[error("no size from {initial} down to {floor} fits and no fallback font is allowed")]
    Exhausted { initial: u32, floor: u32 },
}

/// Failure producing the sheet for one requested size.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("size {size}: {source}")]
    Font {
        size: u32,
        #[source]
        source: FontError,
    },
    #[error("size {size}: {source}")]
    Fit {
        size: u32,
        #[source]
        source: FitError,
    },
    #[error("size {size}: {source}")]
    Layout {
        size: u32,
        #[source]
        source: LayoutError,
    },
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to write metadata {path}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
