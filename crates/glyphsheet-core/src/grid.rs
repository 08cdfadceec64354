// Row-major packing of a character set into fixed-size cells.
//
// GridLayout is the single source of truth for rows and image dimensions;
// the renderer and the metadata writer both read from it.

use crate::charset::CharacterSet;
use crate::error::LayoutError;

/// One character's cell in the atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphCell {
    pub character: char,
    pub index: u32,
    pub row: u32,
    pub col: u32,
    /// Pixel position of the cell's top-left corner
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: u32,
    pub rows: u32,
    pub cell_size: u32,
    pub image_width: u32,
    pub image_height: u32,
    cells: Vec<GlyphCell>,
}

impl GridLayout {
    pub fn new(charset: &CharacterSet, columns: u32, cell_size: u32) -> Result<Self, LayoutError> {
        if columns == 0 {
            return Err(LayoutError::ZeroColumns);
        }
        if charset.is_empty() {
            return Err(LayoutError::EmptyCharset);
        }

        let count = charset.len() as u32;
        let rows = count.div_ceil(columns);
        let too_large = || LayoutError::TooLarge {
            columns,
            rows,
            cell_size,
        };
        let image_width = columns.checked_mul(cell_size).ok_or_else(too_large)?;
        let image_height = rows.checked_mul(cell_size).ok_or_else(too_large)?;

        let cells = charset
            .iter()
            .enumerate()
            .map(|(i, character)| {
                let index = i as u32;
                let row = index / columns;
                let col = index % columns;
                GlyphCell {
                    character,
                    index,
                    row,
                    col,
                    x: col * cell_size,
                    y: row * cell_size,
                }
            })
            .collect();

        Ok(Self {
            columns,
            rows,
            cell_size,
            image_width,
            image_height,
            cells,
        })
    }

    pub fn cells(&self) -> &[GlyphCell] {
        &self.cells
    }

    pub fn character_count(&self) -> u32 {
        self.cells.len() as u32
    }

    pub fn cell_for(&self, character: char) -> Option<&GlyphCell> {
        self.cells.iter().find(|c| c.character == character)
    }

    /// Normalized texture coordinates `[u0, v0, u1, v1]` of a cell.
    pub fn uv(&self, cell: &GlyphCell) -> [f64; 4] {
        let w = self.image_width as f64;
        let h = self.image_height as f64;
        [
            cell.x as f64 / w,
            cell.y as f64 / h,
            (cell.x + self.cell_size) as f64 / w,
            (cell.y + self.cell_size) as f64 / h,
        ]
    }
}
