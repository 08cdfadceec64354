// Atlas rasterization: draw every character of a layout into its cell.

use glyphsheet_core::{GlyphCell, GridLayout};
use image::{Rgba, RgbaImage};

use crate::face::GlyphBitmap;
use crate::fit::FittedFont;

/// The rendered sheet plus the characters that could not be drawn.
#[derive(Debug)]
pub struct RenderedAtlas {
    pub image: RgbaImage,
    /// Cells left transparent, in grid order
    pub blank: Vec<char>,
}

/// Render each cell of `layout` with `font`.
///
/// Glyphs share a baseline placed so the font's ink band sits centered in
/// the cell; each glyph's ink is centered horizontally. A glyph that fails to
/// rasterize leaves its cell empty.
pub fn render_atlas(layout: &GridLayout, font: &mut FittedFont) -> RenderedAtlas {
    let mut image = RgbaImage::new(layout.image_width, layout.image_height);
    let cell_size = layout.cell_size as i32;
    let band = font.band;
    let baseline = (cell_size - band.height() as i32) / 2 + band.ascent;

    let mut blank = Vec::new();
    for cell in layout.cells() {
        match font.rasterize(cell.character) {
            Ok(bitmap) => blit(&mut image, cell, cell_size, baseline, &bitmap),
            Err(e) => {
                log::warn!("Failed to render {:?}: {e}", cell.character);
                blank.push(cell.character);
            }
        }
    }

    RenderedAtlas { image, blank }
}

fn blit(
    image: &mut RgbaImage,
    cell: &GlyphCell,
    cell_size: i32,
    baseline: i32,
    bitmap: &GlyphBitmap,
) {
    if bitmap.is_empty() {
        return;
    }
    let cell_x = cell.x as i32;
    let cell_y = cell.y as i32;
    let origin_x = cell_x + (cell_size - bitmap.width as i32) / 2;
    let origin_y = cell_y + baseline - bitmap.top;

    let width = bitmap.width as usize;
    for (i, &alpha) in bitmap.coverage.iter().enumerate() {
        if alpha == 0 {
            continue;
        }
        let x = origin_x + (i % width) as i32;
        let y = origin_y + (i / width) as i32;
        // Clip to the cell, not just the image
        if x < cell_x || x >= cell_x + cell_size || y < cell_y || y >= cell_y + cell_size {
            continue;
        }
        image.put_pixel(x as u32, y as u32, Rgba([255, 255, 255, alpha]));
    }
}
