// Sidecar metadata: grid parameters plus the per-character cell/UV map.

use std::io;
use std::path::Path;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::grid::GridLayout;

/// Decimal places kept for UV coordinates.
pub const UV_PRECISION: i32 = 6;

pub fn round_uv(value: f64) -> f64 {
    let scale = 10f64.powi(UV_PRECISION);
    (value * scale).round() / scale
}

/// Pixel cell and texture coordinates for a single character.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GlyphRecord {
    #[serde(skip)]
    pub character: char,
    pub index: u32,
    pub x: u32,
    pub y: u32,
    pub u0: f64,
    pub v0: f64,
    pub u1: f64,
    pub v1: f64,
}

/// Records in grid-index order; serialized as an object keyed by character.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CharacterMap(Vec<GlyphRecord>);

impl CharacterMap {
    pub fn get(&self, character: char) -> Option<&GlyphRecord> {
        self.0.iter().find(|r| r.character == character)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GlyphRecord> {
        self.0.iter()
    }
}

impl Serialize for CharacterMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        let mut buf = [0u8; 4];
        for record in &self.0 {
            let key: &str = record.character.encode_utf8(&mut buf);
            map.serialize_entry(key, record)?;
        }
        map.end()
    }
}

/// Everything a consumer needs to sample glyphs out of the sheet image.
/// Built once per generated sheet; field names are the sidecar format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtlasMetadata {
    pub font_name: String,
    /// Resolved size, which may differ from the requested one.
    pub font_size: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    pub columns: u32,
    pub rows: u32,
    pub image_width: u32,
    pub image_height: u32,
    pub character_count: u32,
    pub character_map: CharacterMap,
}

impl AtlasMetadata {
    pub fn from_layout(font_name: &str, font_size: u32, layout: &GridLayout) -> Self {
        let records = layout
            .cells()
            .iter()
            .map(|cell| {
                let [u0, v0, u1, v1] = layout.uv(cell);
                GlyphRecord {
                    character: cell.character,
                    index: cell.index,
                    x: cell.x,
                    y: cell.y,
                    u0: round_uv(u0),
                    v0: round_uv(v0),
                    u1: round_uv(u1),
                    v1: round_uv(v1),
                }
            })
            .collect();

        Self {
            font_name: font_name.to_owned(),
            font_size,
            cell_width: layout.cell_size,
            cell_height: layout.cell_size,
            columns: layout.columns,
            rows: layout.rows,
            image_width: layout.image_width,
            image_height: layout.image_height,
            character_count: layout.character_count(),
            character_map: CharacterMap(records),
        }
    }

    /// Pretty-printed JSON with a two-space indent. Identical input gives
    /// identical bytes.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn write(&self, path: &Path) -> io::Result<()> {
        let json = self.to_json().map_err(io::Error::other)?;
        std::fs::write(path, json)
    }
}
