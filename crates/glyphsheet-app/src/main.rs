// glyphsheet: render a font into fixed-grid sprite sheets with a JSON
// sidecar of per-character cells and UVs, one pair per requested size.

mod batch;
mod cli;
mod config;
mod tests;

use anyhow::Result;
use clap::Parser;
use glyphsheet_renderer::SheetGenerator;

use crate::batch::{print_header, run_batch, SizeOutcome};
use crate::cli::Cli;
use crate::config::{AppConfig, Settings};

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    let file = AppConfig::discover(cli.config.as_deref())?;
    let settings = Settings::resolve(&cli, file)?;

    print_header(&settings);
    let generator = SheetGenerator::new(&settings.sheet, settings.locator());
    let report = run_batch(&settings, &generator);

    // Per-size failures were already reported; they don't change the exit code.
    if report.failed() > 0 {
        let failed: Vec<u32> = report
            .outcomes
            .iter()
            .filter(|o| !o.is_written())
            .map(SizeOutcome::requested)
            .collect();
        log::warn!(
            "{} of {} size(s) failed: {failed:?}",
            report.failed(),
            report.outcomes.len()
        );
    }
    Ok(())
}
