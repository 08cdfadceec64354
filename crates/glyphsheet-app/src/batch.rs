// Batch loop: one independent sheet per requested size.

use glyphsheet_renderer::{GenerationError, SheetGenerator, SheetPaths, SheetRequest};

use crate::config::Settings;

#[derive(Debug)]
pub enum SizeOutcome {
    Written {
        requested: u32,
        resolved: u32,
        paths: SheetPaths,
        blank_glyphs: Vec<char>,
    },
    Failed {
        requested: u32,
        error: GenerationError,
    },
}

impl SizeOutcome {
    pub fn requested(&self) -> u32 {
        match self {
            Self::Written { requested, .. } | Self::Failed { requested, .. } => *requested,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written { .. })
    }
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<SizeOutcome>,
}

impl BatchReport {
    pub fn written(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_written()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.written()
    }
}

pub fn print_header(settings: &Settings) {
    println!("Generating sprite sheets for font: {}", settings.font);
    println!("Character set: {} characters", settings.charset.len());
    println!(
        "Cell size: {}x{} pixels",
        settings.sheet.cell_size, settings.sheet.cell_size
    );
    println!("Output directory: {}", settings.output.display());
    println!();
}

fn generate_size(
    settings: &Settings,
    generator: &SheetGenerator,
    size: u32,
) -> Result<SizeOutcome, GenerationError> {
    let request = SheetRequest {
        font_name: settings.font.clone(),
        size,
        columns: settings.columns,
        charset: settings.charset.clone(),
    };
    let sheet = generator.generate(&request)?;
    let paths = sheet.write_to(&settings.output)?;
    Ok(SizeOutcome::Written {
        requested: size,
        resolved: sheet.metadata.font_size,
        paths,
        blank_glyphs: sheet.blank_glyphs,
    })
}

/// Generate every requested size in order. A failed size is reported and
/// the loop moves on.
pub fn run_batch(settings: &Settings, generator: &SheetGenerator) -> BatchReport {
    let mut report = BatchReport::default();
    for &size in &settings.sizes {
        println!("Generating sprite sheet for size {size}...");
        let outcome = match generate_size(settings, generator, size) {
            Ok(outcome) => outcome,
            Err(error) => SizeOutcome::Failed {
                requested: size,
                error,
            },
        };

        match &outcome {
            SizeOutcome::Written {
                resolved,
                paths,
                blank_glyphs,
                ..
            } => {
                if *resolved != size {
                    log::info!("Size {size} was rendered at {resolved}");
                }
                println!("  ✓ Created: {}", paths.image.display());
                println!("  ✓ Created: {}", paths.metadata.display());
                if !blank_glyphs.is_empty() {
                    log::warn!(
                        "Size {size}: {} character(s) left blank",
                        blank_glyphs.len()
                    );
                }
            }
            SizeOutcome::Failed { error, .. } => {
                println!("  ✗ Error generating size {size}: {error}");
                log::error!("Size {size} failed: {error:?}");
            }
        }
        report.outcomes.push(outcome);
    }
    println!();
    println!("Done!");
    report
}
