use std::path::PathBuf;

use clap::Parser;

/// Every value is optional so a config file can fill in what the command
/// line leaves out.
#[derive(Parser, Debug, Default)]
#[command(
    name = "glyphsheet",
    version,
    about = "Generate fixed-grid font sprite sheets with JSON UV metadata",
    long_about = None
)]
pub struct Cli {
    /// Font name (e.g. DejaVuSans) or path to a .ttf/.otf file [default: DejaVuSans]
    #[arg(short, long)]
    pub font: Option<String>,
    /// Point size to try first [default: 12]
    #[arg(short, long)]
    pub size: Option<u32>,
    /// Generate one sheet per size; overrides --size
    #[arg(long, num_args = 1..)]
    pub sizes: Option<Vec<u32>>,
    /// Directory the sheets are written to [default: ./output]
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Cells per row [default: 10]
    #[arg(short, long)]
    pub columns: Option<u32>,
    /// Characters to include, in grid order
    #[arg(long)]
    pub characters: Option<String>,
    /// JSON config file [default: <config dir>/glyphsheet/config.json]
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Extra directory to search for fonts (repeatable)
    #[arg(long = "font-dir")]
    pub font_dirs: Vec<PathBuf>,
    /// Also look fonts up by family name among installed fonts
    #[arg(long)]
    pub system_lookup: bool,
    /// Fail instead of using the built-in bitmap font
    #[arg(long)]
    pub no_builtin_fallback: bool,
    /// Debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,
    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        }
    }
}
