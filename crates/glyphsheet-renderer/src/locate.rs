// Font discovery: turn a font name or path into a loaded FontHandle.
//
// Resolution runs an ordered list of strategies; the first one that produces
// a font wins and later strategies are never consulted.

use std::fmt;
use std::path::{Path, PathBuf};

use glyphsheet_core::SheetConfig;

use crate::error::FontError;
use crate::face::{FontHandle, ScalableFont};

const TTF: &[&str] = &["ttf"];
const TTF_OTF: &[&str] = &["ttf", "otf"];

/// How a font name is spelled in a candidate file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameVariant {
    Exact,
    Lowercase,
    /// Vendor prefix glued to the name, e.g. `DejaVu` + `Sans`.
    Prefixed(String),
}

/// One place a font file might live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRule {
    pub dir: PathBuf,
    /// Look inside a subdirectory named after the lower-cased font name.
    pub nest_lowercase: bool,
    pub variant: NameVariant,
    pub extensions: &'static [&'static str],
}

impl SearchRule {
    pub fn new(dir: impl Into<PathBuf>, variant: NameVariant) -> Self {
        Self {
            dir: dir.into(),
            nest_lowercase: false,
            variant,
            extensions: TTF,
        }
    }

    fn nested(mut self) -> Self {
        self.nest_lowercase = true;
        self
    }

    fn with_extensions(mut self, extensions: &'static [&'static str]) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn candidates(&self, name: &str) -> Vec<PathBuf> {
        let stem = match &self.variant {
            NameVariant::Exact => name.to_owned(),
            NameVariant::Lowercase => name.to_lowercase(),
            NameVariant::Prefixed(prefix) => format!("{prefix}{name}"),
        };
        let dir = if self.nest_lowercase {
            self.dir.join(name.to_lowercase())
        } else {
            self.dir.clone()
        };
        self.extensions
            .iter()
            .map(|ext| dir.join(format!("{stem}.{ext}")))
            .collect()
    }
}

/// Install locations probed for a bare font name, in priority order.
pub fn conventional_rules() -> Vec<SearchRule> {
    let mut rules = vec![
        SearchRule::new("/usr/share/fonts/truetype", NameVariant::Exact).nested(),
        SearchRule::new("/usr/share/fonts/truetype", NameVariant::Lowercase),
        SearchRule::new("/usr/share/fonts/TTF", NameVariant::Exact),
        SearchRule::new("/System/Library/Fonts", NameVariant::Exact),
        SearchRule::new(r"C:\Windows\Fonts", NameVariant::Exact),
        SearchRule::new(
            "/usr/share/fonts/truetype/dejavu",
            NameVariant::Prefixed("DejaVu".to_owned()),
        ),
        SearchRule::new(
            "/usr/share/fonts/truetype/liberation",
            NameVariant::Prefixed("Liberation".to_owned()),
        ),
    ];
    if let Some(user_dir) = dirs::font_dir() {
        rules.push(SearchRule::new(user_dir, NameVariant::Exact).with_extensions(TTF_OTF));
    }
    rules
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocateStrategy {
    /// The input is itself a path to a font file.
    DirectPath,
    /// Probe the search rules with spellings of the name.
    ConventionalPaths,
    /// Ask the installed-font database for a matching family.
    SystemDatabase,
    /// The compiled-in bitmap font.
    Builtin,
}

/// Where a resolved font came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontOrigin {
    Path(PathBuf),
    System(String),
    Builtin,
}

impl fmt::Display for FontOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::System(family) => write!(f, "system font '{family}'"),
            Self::Builtin => f.write_str("built-in bitmap font"),
        }
    }
}

#[derive(Debug)]
pub struct ResolvedFont {
    pub handle: FontHandle,
    pub origin: FontOrigin,
}

impl ResolvedFont {
    fn builtin() -> Self {
        Self {
            handle: FontHandle::builtin(),
            origin: FontOrigin::Builtin,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.origin == FontOrigin::Builtin
    }
}

#[derive(Debug, Clone)]
pub struct FontLocator {
    rules: Vec<SearchRule>,
    strategies: Vec<LocateStrategy>,
}

impl FontLocator {
    /// Conventional install locations, with the built-in font as the last
    /// resort when the config allows it.
    pub fn new(config: &SheetConfig) -> Self {
        Self::with_rules(conventional_rules(), config)
    }

    pub fn with_rules(rules: Vec<SearchRule>, config: &SheetConfig) -> Self {
        let mut strategies = vec![LocateStrategy::DirectPath, LocateStrategy::ConventionalPaths];
        if config.builtin_fallback {
            strategies.push(LocateStrategy::Builtin);
        }
        Self { rules, strategies }
    }

    pub fn strategies(&self) -> &[LocateStrategy] {
        &self.strategies
    }

    pub fn rules(&self) -> &[SearchRule] {
        &self.rules
    }

    /// Search `dir` for `{name}.ttf` / `{name}.otf` after the existing rules.
    pub fn add_font_dir(&mut self, dir: impl Into<PathBuf>) {
        self.rules
            .push(SearchRule::new(dir, NameVariant::Exact).with_extensions(TTF_OTF));
    }

    /// Query installed fonts by family name before giving up on a name.
    pub fn enable_system_lookup(&mut self) {
        if self.strategies.contains(&LocateStrategy::SystemDatabase) {
            return;
        }
        let at = self
            .strategies
            .iter()
            .position(|s| *s == LocateStrategy::Builtin)
            .unwrap_or(self.strategies.len());
        self.strategies.insert(at, LocateStrategy::SystemDatabase);
    }

    /// First existing candidate file for a bare name.
    pub fn search(&self, name: &str) -> Option<PathBuf> {
        self.rules
            .iter()
            .flat_map(|rule| rule.candidates(name))
            .find(|path| path.is_file())
    }

    pub fn resolve(&self, name: &str) -> Result<ResolvedFont, FontError> {
        for strategy in &self.strategies {
            let path = match strategy {
                LocateStrategy::DirectPath => {
                    let path = Path::new(name);
                    path.is_file().then(|| path.to_path_buf())
                }
                LocateStrategy::ConventionalPaths => self.search(name),
                LocateStrategy::SystemDatabase => {
                    if let Some(font) = system_font(name) {
                        return Ok(ResolvedFont {
                            handle: FontHandle::Scalable(font),
                            origin: FontOrigin::System(name.to_owned()),
                        });
                    }
                    None
                }
                LocateStrategy::Builtin => {
                    log::warn!("Font '{name}' not found, using built-in bitmap font");
                    return Ok(ResolvedFont::builtin());
                }
            };

            // The first existing file wins, even if it turns out unloadable.
            if let Some(path) = path {
                return self.load_found(name, path);
            }
        }
        Err(FontError::NotFound(name.to_owned()))
    }

    fn load_found(&self, name: &str, path: PathBuf) -> Result<ResolvedFont, FontError> {
        match ScalableFont::from_path(&path) {
            Ok(font) => {
                log::debug!("Font '{name}' resolved to {}", path.display());
                Ok(ResolvedFont {
                    handle: FontHandle::Scalable(font),
                    origin: FontOrigin::Path(path),
                })
            }
            Err(e) if self.strategies.contains(&LocateStrategy::Builtin) => {
                log::warn!("Font '{name}' could not be loaded ({e}), using built-in bitmap font");
                Ok(ResolvedFont::builtin())
            }
            Err(e) => Err(e),
        }
    }
}

fn system_font(name: &str) -> Option<ScalableFont> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    let families = [fontdb::Family::Name(name)];
    let query = fontdb::Query {
        families: &families,
        weight: fontdb::Weight::NORMAL,
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    };
    let face_id = db.query(&query)?;

    let loaded = db.with_face_data(face_id, |data, index| {
        ScalableFont::from_bytes(data.to_vec(), index, format!("system font '{name}'"))
    })?;
    match loaded {
        Ok(font) => Some(font),
        Err(e) => {
            log::debug!("System font '{name}' matched but failed to load: {e}");
            None
        }
    }
}
