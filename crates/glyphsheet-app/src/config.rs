// Settings: config file merged under command-line flags.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use glyphsheet_core::{CharacterSet, SheetConfig};
use glyphsheet_renderer::FontLocator;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

pub const DEFAULT_FONT: &str = "DejaVuSans";
pub const DEFAULT_SIZE: u32 = 12;
pub const DEFAULT_OUTPUT: &str = "./output";
pub const DEFAULT_COLUMNS: u32 = 10;

/// Optional JSON config file. Unset fields fall through to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub font: Option<String>,
    pub sizes: Option<Vec<u32>>,
    pub columns: Option<u32>,
    pub output: Option<PathBuf>,
    pub characters: Option<String>,
    /// Searched after the conventional font locations
    pub font_dirs: Vec<PathBuf>,
    pub system_lookup: bool,
    pub sheet: SheetConfig,
}

impl AppConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("glyphsheet").join("config.json"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// An explicit path must exist. The default location is used only if a
    /// file is there.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => {
                log::debug!("Using config file {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}

/// Fully resolved run parameters.
#[derive(Debug, Clone)]
pub struct Settings {
    pub font: String,
    pub sizes: Vec<u32>,
    pub columns: u32,
    pub output: PathBuf,
    pub charset: CharacterSet,
    pub font_dirs: Vec<PathBuf>,
    pub system_lookup: bool,
    pub sheet: SheetConfig,
}

impl Settings {
    pub fn resolve(cli: &Cli, file: AppConfig) -> Result<Self> {
        let sizes = cli
            .sizes
            .clone()
            .or_else(|| cli.size.map(|size| vec![size]))
            .or(file.sizes)
            .unwrap_or_else(|| vec![DEFAULT_SIZE]);
        if sizes.is_empty() {
            bail!("no sizes requested");
        }

        let charset = match cli.characters.as_deref().or(file.characters.as_deref()) {
            Some(text) => CharacterSet::new(text).context("invalid character set")?,
            None => CharacterSet::default(),
        };

        let mut sheet = file.sheet;
        if cli.no_builtin_fallback {
            sheet.builtin_fallback = false;
        }
        sheet.validate().context("invalid sheet configuration")?;

        let mut font_dirs = file.font_dirs;
        font_dirs.extend(cli.font_dirs.iter().cloned());

        Ok(Self {
            font: cli
                .font
                .clone()
                .or(file.font)
                .unwrap_or_else(|| DEFAULT_FONT.to_owned()),
            sizes,
            columns: cli.columns.or(file.columns).unwrap_or(DEFAULT_COLUMNS),
            output: cli
                .output
                .clone()
                .or(file.output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            charset,
            font_dirs,
            system_lookup: cli.system_lookup || file.system_lookup,
            sheet,
        })
    }

    pub fn locator(&self) -> FontLocator {
        let mut locator = FontLocator::new(&self.sheet);
        for dir in &self.font_dirs {
            locator.add_font_dir(dir);
        }
        if self.system_lookup {
            locator.enable_system_lookup();
        }
        locator
    }
}
