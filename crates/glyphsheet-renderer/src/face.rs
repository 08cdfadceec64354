// Font handles: scalable outline fonts rasterized through cosmic-text, and
// the fixed bitmap fallback. Both hand out GlyphBitmaps with the same
// baseline-relative placement so the fitter and renderer treat them alike.

use std::fmt;
use std::path::Path;

use cosmic_text::{
    Attrs, Buffer as CosmicBuffer, Family, FontSystem, Metrics, Shaping, SwashCache, SwashContent,
};

use crate::builtin::FixedFont;
use crate::error::{FontError, GlyphError};

/// Rasterized coverage for one glyph.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GlyphBitmap {
    pub width: u32,
    pub height: u32,
    /// Offset of the left edge from the pen position
    pub left: i32,
    /// Distance from the baseline up to the top row
    pub top: i32,
    /// One alpha byte per pixel, row-major
    pub coverage: Vec<u8>,
}

impl GlyphBitmap {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Vertical extent of a set of glyphs around a shared baseline, plus the
/// widest ink box among them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InkBand {
    pub ascent: i32,
    pub descent: i32,
    pub max_width: u32,
}

impl InkBand {
    pub fn of(bitmap: &GlyphBitmap) -> Self {
        Self {
            ascent: bitmap.top,
            descent: bitmap.height as i32 - bitmap.top,
            max_width: bitmap.width,
        }
    }

    pub fn union(self, other: Self) -> Self {
        Self {
            ascent: self.ascent.max(other.ascent),
            descent: self.descent.max(other.descent),
            max_width: self.max_width.max(other.max_width),
        }
    }

    pub fn height(&self) -> u32 {
        (self.ascent + self.descent).max(0) as u32
    }
}

// ──────────────────────────────────────────────
// ScalableFont
// ──────────────────────────────────────────────

/// An outline font loaded from disk or from the system database.
///
/// The cosmic-text `FontSystem` only knows about this one face, so shaping
/// never silently substitutes another font. It and the swash cache are built
/// once and reused for every size the fitter probes.
pub struct ScalableFont {
    origin: String,
    family: String,
    data: Vec<u8>,
    face_index: u32,
    units_per_em: f32,
    font_system: FontSystem,
    swash_cache: SwashCache,
}

impl fmt::Debug for ScalableFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalableFont")
            .field("origin", &self.origin)
            .field("family", &self.family)
            .field("face_index", &self.face_index)
            .finish_non_exhaustive()
    }
}

impl ScalableFont {
    pub fn from_path(path: &Path) -> Result<Self, FontError> {
        let data = std::fs::read(path).map_err(|source| FontError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(data, 0, path.display().to_string())
    }

    pub fn from_bytes(data: Vec<u8>, face_index: u32, origin: String) -> Result<Self, FontError> {
        let units_per_em = match ttf_parser::Face::parse(&data, face_index) {
            Ok(face) => face.units_per_em() as f32,
            Err(e) => {
                log::debug!("ttf-parser rejected {origin}: {e}");
                return Err(FontError::Parse { origin });
            }
        };

        let mut db = fontdb::Database::new();
        db.load_font_data(data.clone());
        let family = db
            .faces()
            .find(|face| face.index == face_index)
            .and_then(|face| face.families.first())
            .map(|(name, _)| name.clone());
        let Some(family) = family else {
            return Err(FontError::NoFamily { origin });
        };

        let font_system = FontSystem::new_with_locale_and_db("en-US".to_string(), db);
        log::debug!("Loaded font family '{family}' from {origin}");

        Ok(Self {
            origin,
            family,
            data,
            face_index,
            units_per_em,
            font_system,
            swash_cache: SwashCache::new(),
        })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    fn face(&self) -> Option<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(&self.data, self.face_index).ok()
    }

    pub fn has_glyph(&self, character: char) -> bool {
        self.face()
            .and_then(|face| face.glyph_index(character))
            .is_some()
    }

    /// Outline bounding box in font units.
    fn outline_units(&self, character: char) -> Option<(f32, f32)> {
        let face = self.face()?;
        let glyph_id = face.glyph_index(character)?;
        let bbox = face.glyph_bounding_box(glyph_id)?;
        Some((bbox.width() as f32, bbox.height() as f32))
    }

    /// Outline bounding box scaled to `size`, without rasterizing.
    /// `None` when the glyph is missing or has no outline (e.g. space).
    pub fn outline_extent(&self, character: char, size: u32) -> Option<(f32, f32)> {
        let (w, h) = self.outline_units(character)?;
        let scale = size as f32 / self.units_per_em;
        Some((w * scale, h * scale))
    }

    /// Largest size at which every outline among `chars` stays within
    /// `max_extent` pixels. Outlines scale linearly, so one pass over the
    /// font units is enough. `None` when none of `chars` has an outline.
    pub fn outline_size_limit(
        &self,
        chars: impl IntoIterator<Item = char>,
        max_extent: u32,
    ) -> Option<u32> {
        let widest = chars
            .into_iter()
            .filter_map(|c| self.outline_units(c))
            .map(|(w, h)| w.max(h))
            .fold(0.0f32, f32::max);
        if widest <= 0.0 {
            return None;
        }
        Some((max_extent as f32 * self.units_per_em / widest).floor() as u32)
    }

    /// Shape and rasterize one character at `size` pixels per em.
    pub fn rasterize(&mut self, character: char, size: u32) -> Result<GlyphBitmap, GlyphError> {
        if !self.has_glyph(character) {
            return Err(GlyphError::Unsupported(character));
        }

        let font_size = size as f32;
        let metrics = Metrics::new(font_size, (font_size * 1.2).ceil());
        let mut buffer = CosmicBuffer::new(&mut self.font_system, metrics);
        let text = character.to_string();
        buffer.set_text(
            &mut self.font_system,
            &text,
            Attrs::new().family(Family::Name(&self.family)),
            Shaping::Advanced,
        );
        buffer.shape_until_scroll(&mut self.font_system, false);

        let shaped = buffer
            .layout_runs()
            .next()
            .and_then(|run| run.glyphs.first())
            .map(|glyph| (glyph.physical((0.0, 0.0), 1.0).cache_key, glyph.glyph_id));
        let Some((cache_key, glyph_id)) = shaped else {
            return Err(GlyphError::Measure { character, size });
        };
        if glyph_id == 0 {
            return Err(GlyphError::Unsupported(character));
        }

        let Some(image) = self.swash_cache.get_image(&mut self.font_system, cache_key) else {
            return Ok(GlyphBitmap::default());
        };
        let width = image.placement.width;
        let height = image.placement.height;
        if width == 0 || height == 0 {
            return Ok(GlyphBitmap::default());
        }

        let coverage: Vec<u8> = match image.content {
            SwashContent::Mask => image.data.clone(),
            SwashContent::Color => {
                // RGBA -> take alpha channel
                image.data.chunks(4).map(|c| c.get(3).copied().unwrap_or(255)).collect()
            }
            SwashContent::SubpixelMask => {
                // RGB subpixel -> average as grayscale
                image
                    .data
                    .chunks(3)
                    .map(|c| {
                        let r = c.first().copied().unwrap_or(0) as u16;
                        let g = c.get(1).copied().unwrap_or(0) as u16;
                        let b = c.get(2).copied().unwrap_or(0) as u16;
                        ((r + g + b) / 3) as u8
                    })
                    .collect()
            }
        };
        if coverage.len() != (width * height) as usize {
            return Err(GlyphError::Measure { character, size });
        }

        Ok(GlyphBitmap {
            width,
            height,
            left: image.placement.left,
            top: image.placement.top,
            coverage,
        })
    }
}

// ──────────────────────────────────────────────
// FontHandle
// ──────────────────────────────────────────────

/// A loaded font, tagged by whether it can be rendered at arbitrary sizes.
#[derive(Debug)]
pub enum FontHandle {
    Scalable(ScalableFont),
    Fixed(FixedFont),
}

impl FontHandle {
    pub fn builtin() -> Self {
        Self::Fixed(FixedFont::builtin())
    }

    pub fn supports_resizing(&self) -> bool {
        matches!(self, Self::Scalable(_))
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Scalable(font) => font.family(),
            Self::Fixed(font) => font.name(),
        }
    }

    /// `size` is ignored by fixed fonts.
    pub fn rasterize(&mut self, character: char, size: u32) -> Result<GlyphBitmap, GlyphError> {
        match self {
            Self::Scalable(font) => font.rasterize(character, size),
            Self::Fixed(font) => font.rasterize(character),
        }
    }
}
