// Per-size pipeline: resolve -> fit -> layout -> render -> metadata.

use std::path::{Path, PathBuf};

use glyphsheet_core::{AtlasMetadata, CharacterSet, GridLayout, SheetConfig};
use image::{ImageFormat, RgbaImage};

use crate::atlas::render_atlas;
use crate::error::GenerationError;
use crate::fit::{FitStrategy, SizeFitter};
use crate::locate::{FontLocator, FontOrigin};

const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc"];

/// One sheet to produce.
#[derive(Debug, Clone)]
pub struct SheetRequest {
    /// Font name or path, as given by the user
    pub font_name: String,
    /// Requested size; the resolved size may be smaller
    pub size: u32,
    pub columns: u32,
    pub charset: CharacterSet,
}

/// File stem shared by the image and sidecar: the font name (or a font
/// file's stem) with spaces replaced, then the resolved size.
pub fn base_name(font_name: &str, size: u32) -> String {
    let path = Path::new(font_name);
    let is_font_file = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| FONT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
    let stem = if is_font_file {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| font_name.to_owned())
    } else {
        font_name.to_owned()
    };
    format!("{}_{size}", stem.replace(' ', "_"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetPaths {
    pub image: PathBuf,
    pub metadata: PathBuf,
}

/// A finished sheet held in memory until written.
#[derive(Debug)]
pub struct GeneratedSheet {
    pub base_name: String,
    pub metadata: AtlasMetadata,
    pub image: RgbaImage,
    pub blank_glyphs: Vec<char>,
    pub strategy: FitStrategy,
    pub origin: FontOrigin,
}

impl GeneratedSheet {
    pub fn paths_in(&self, dir: &Path) -> SheetPaths {
        SheetPaths {
            image: dir.join(format!("{}.sheet.png", self.base_name)),
            metadata: dir.join(format!("{}.sheet.json", self.base_name)),
        }
    }

    /// Write `{base}.sheet.png` and `{base}.sheet.json` into `dir`, creating
    /// it if needed.
    pub fn write_to(&self, dir: &Path) -> Result<SheetPaths, GenerationError> {
        std::fs::create_dir_all(dir).map_err(|source| GenerationError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let paths = self.paths_in(dir);
        self.image
            .save_with_format(&paths.image, ImageFormat::Png)
            .map_err(|source| GenerationError::Image {
                path: paths.image.clone(),
                source,
            })?;
        self.metadata
            .write(&paths.metadata)
            .map_err(|source| GenerationError::Metadata {
                path: paths.metadata.clone(),
                source,
            })?;

        log::debug!("Wrote {} and {}", paths.image.display(), paths.metadata.display());
        Ok(paths)
    }
}

#[derive(Debug, Clone)]
pub struct SheetGenerator {
    config: SheetConfig,
    locator: FontLocator,
    fitter: SizeFitter,
}

impl SheetGenerator {
    pub fn new(config: &SheetConfig, locator: FontLocator) -> Self {
        Self {
            config: config.clone(),
            locator,
            fitter: SizeFitter::new(config),
        }
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    /// Build one sheet from scratch. Nothing is shared between calls, so a
    /// failure here leaves other sizes unaffected.
    pub fn generate(&self, request: &SheetRequest) -> Result<GeneratedSheet, GenerationError> {
        let size = request.size;
        let resolved = self
            .locator
            .resolve(&request.font_name)
            .map_err(|source| GenerationError::Font { size, source })?;
        let origin = resolved.origin;

        let mut fitted = self
            .fitter
            .fit(resolved.handle, size)
            .map_err(|source| GenerationError::Fit { size, source })?;
        if fitted.size != size {
            log::info!("Size {size} resolved to {} ({:?})", fitted.size, fitted.strategy);
        }

        let layout = GridLayout::new(&request.charset, request.columns, self.config.cell_size)
            .map_err(|source| GenerationError::Layout { size, source })?;
        let atlas = render_atlas(&layout, &mut fitted);
        let metadata = AtlasMetadata::from_layout(&request.font_name, fitted.size, &layout);

        Ok(GeneratedSheet {
            base_name: base_name(&request.font_name, fitted.size),
            metadata,
            image: atlas.image,
            blank_glyphs: atlas.blank,
            strategy: fitted.strategy,
            origin,
        })
    }
}
