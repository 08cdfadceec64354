use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Side length of every atlas cell, in pixels.
pub const CELL_SIZE: u32 = 16;

/// Blank margin kept on each side of a glyph inside its cell.
pub const PADDING: u32 = 2;

/// Smallest point size the fitter will probe.
pub const MIN_PROBE_SIZE: u32 = 5;

/// Size used when no probed size fits.
pub const FLOOR_SIZE: u32 = 8;

/// Letters, an ascender pair, a descender pair and a digit.
pub const PROBE_GLYPHS: &str = "ABHMWbdgy0";

/// Process-wide sheet parameters. Validated once at startup and then
/// passed by reference to every stage of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    pub cell_size: u32,
    pub padding: u32,
    pub min_probe_size: u32,
    pub floor_size: u32,
    pub probe_glyphs: String,
    /// Fall back to the compiled-in bitmap font when nothing else loads.
    pub builtin_fallback: bool,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,
            padding: PADDING,
            min_probe_size: MIN_PROBE_SIZE,
            floor_size: FLOOR_SIZE,
            probe_glyphs: PROBE_GLYPHS.to_owned(),
            builtin_fallback: true,
        }
    }
}

impl SheetConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.padding.saturating_mul(2) > self.cell_size {
            return Err(ConfigError::PaddingTooLarge {
                padding: self.padding,
                cell_size: self.cell_size,
            });
        }
        if self.probe_glyphs.is_empty() {
            return Err(ConfigError::EmptyProbeSet);
        }
        if self.min_probe_size == 0 || self.floor_size == 0 {
            return Err(ConfigError::ZeroSize);
        }
        Ok(())
    }

    /// Largest glyph extent that fits in a cell once padding is removed.
    pub fn max_fit(&self) -> u32 {
        self.cell_size - 2 * self.padding
    }
}
