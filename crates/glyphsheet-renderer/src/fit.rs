// Size fitting: pick the largest size at which the probe glyphs fit inside
// a cell once padding is removed.

use glyphsheet_core::SheetConfig;

use crate::builtin::FixedFont;
use crate::error::{FitError, GlyphError};
use crate::face::{FontHandle, GlyphBitmap, InkBand, ScalableFont};

/// How a [`FittedFont`] got its size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitStrategy {
    /// Largest probed size that fit.
    Probed,
    /// Nothing in the probe range fit; the floor size did.
    FloorSize,
    /// The scalable font was given up on for the built-in bitmap font.
    Builtin,
    /// The handle was already a fixed-size font.
    FixedNominal,
}

/// Steps tried in order once the probe range is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    FloorSize,
    Builtin,
}

/// A font pinned to the size it will be rendered at.
#[derive(Debug)]
pub struct FittedFont {
    pub handle: FontHandle,
    pub size: u32,
    /// Ink extent of the probe glyphs at `size`
    pub band: InkBand,
    pub strategy: FitStrategy,
}

impl FittedFont {
    fn fixed(font: FixedFont, strategy: FitStrategy) -> Self {
        Self {
            handle: FontHandle::Fixed(font),
            size: FixedFont::NOMINAL_SIZE,
            band: font.band(),
            strategy,
        }
    }

    pub fn rasterize(&mut self, character: char) -> Result<GlyphBitmap, GlyphError> {
        self.handle.rasterize(character, self.size)
    }

    pub fn name(&self) -> &str {
        self.handle.name()
    }
}

fn fits(band: &InkBand, max_fit: u32) -> bool {
    band.height() <= max_fit && band.max_width <= max_fit
}

#[derive(Debug, Clone)]
pub struct SizeFitter {
    config: SheetConfig,
}

impl SizeFitter {
    pub fn new(config: &SheetConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn recovery_chain(&self) -> Vec<Recovery> {
        let mut chain = vec![Recovery::FloorSize];
        if self.config.builtin_fallback {
            chain.push(Recovery::Builtin);
        }
        chain
    }

    /// Fit `handle` starting from `initial` and working down. Fixed fonts are
    /// returned at their nominal size without probing.
    pub fn fit(&self, handle: FontHandle, initial: u32) -> Result<FittedFont, FitError> {
        let mut font = match handle {
            FontHandle::Fixed(font) => {
                return Ok(FittedFont::fixed(font, FitStrategy::FixedNominal));
            }
            FontHandle::Scalable(font) => font,
        };

        let max_fit = self.config.max_fit();
        // Sizes above the outline limit are rejected by the prefilter anyway.
        let start = match font.outline_size_limit(self.config.probe_glyphs.chars(), max_fit) {
            Some(limit) => initial.min(limit.saturating_add(1)),
            None => initial,
        };
        for size in (self.config.min_probe_size..=start).rev() {
            if self.outline_exceeds(&font, size, max_fit) {
                continue;
            }
            match self.measure(&mut font, size) {
                Ok(band) if fits(&band, max_fit) => {
                    log::debug!(
                        "'{}' fits at size {size} ({}x{} ink)",
                        font.family(),
                        band.max_width,
                        band.height()
                    );
                    return Ok(FittedFont {
                        handle: FontHandle::Scalable(font),
                        size,
                        band,
                        strategy: FitStrategy::Probed,
                    });
                }
                Ok(_) => {}
                // Smaller sizes have no more ink than this one.
                Err(e @ GlyphError::NoProbeGlyphs { .. }) => {
                    log::warn!("Stopping size search at {size}: {e}");
                    break;
                }
                Err(e) => log::warn!("Skipping size {size}: {e}"),
            }
        }

        let floor = self.config.floor_size;
        log::warn!(
            "No size from {initial} down to {} fits '{}' in {max_fit}px",
            self.config.min_probe_size,
            font.family()
        );

        for step in self.recovery_chain() {
            match step {
                Recovery::FloorSize => match self.measure(&mut font, floor) {
                    Ok(band) if fits(&band, max_fit) => {
                        log::warn!("Using floor size {floor} for '{}'", font.family());
                        return Ok(FittedFont {
                            handle: FontHandle::Scalable(font),
                            size: floor,
                            band,
                            strategy: FitStrategy::FloorSize,
                        });
                    }
                    Ok(band) => log::warn!(
                        "Floor size {floor} does not fit either ({}x{} ink)",
                        band.max_width,
                        band.height()
                    ),
                    Err(e) => log::warn!("Floor size {floor} failed: {e}"),
                },
                Recovery::Builtin => {
                    log::warn!("Falling back to built-in bitmap font");
                    return Ok(FittedFont::fixed(FixedFont::builtin(), FitStrategy::Builtin));
                }
            }
        }

        Err(FitError::Exhausted { initial, floor })
    }

    /// Ink band of the probe glyphs at `size`. Probe glyphs the font lacks
    /// are left out; if none remain the size cannot be measured.
    pub fn measure(&self, font: &mut ScalableFont, size: u32) -> Result<InkBand, GlyphError> {
        let mut band: Option<InkBand> = None;
        for character in self.config.probe_glyphs.chars() {
            let bitmap = match font.rasterize(character, size) {
                Ok(bitmap) => bitmap,
                Err(GlyphError::Unsupported(_)) => continue,
                Err(e) => return Err(e),
            };
            if bitmap.is_empty() {
                continue;
            }
            let glyph = InkBand::of(&bitmap);
            band = Some(band.map_or(glyph, |b| b.union(glyph)));
        }
        band.ok_or(GlyphError::NoProbeGlyphs { size })
    }

    // Raster boxes are never smaller than outline boxes, so an outline that
    // is already too big rules the size out without rasterizing.
    fn outline_exceeds(&self, font: &ScalableFont, size: u32, max_fit: u32) -> bool {
        let limit = max_fit as f32;
        self.config
            .probe_glyphs
            .chars()
            .filter_map(|c| font.outline_extent(c, size))
            .any(|(w, h)| w > limit || h > limit)
    }
}
