#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use clap::Parser;
    use glyphsheet_core::SheetConfig;
    use glyphsheet_renderer::{FontError, GenerationError, SheetGenerator};

    use crate::batch::{run_batch, SizeOutcome};
    use crate::cli::Cli;
    use crate::config::{AppConfig, Settings, DEFAULT_COLUMNS, DEFAULT_FONT, DEFAULT_SIZE};

    const SCALABLE_FONT: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["glyphsheet"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn settings_in(output: &Path, font: &str, sizes: &[u32]) -> Settings {
        let mut settings = Settings::resolve(&Cli::default(), AppConfig::default()).unwrap();
        settings.font = font.to_string();
        settings.sizes = sizes.to_vec();
        settings.output = output.to_path_buf();
        settings
    }

    fn generator_for(settings: &Settings) -> SheetGenerator {
        SheetGenerator::new(&settings.sheet, settings.locator())
    }

    // ──────────────────────────────────────────
    // Command line
    // ──────────────────────────────────────────

    #[test]
    fn test_cli_parses_sizes_and_font_dirs() {
        let cli = cli(&["--sizes", "8", "16", "--font-dir", "/a", "--font-dir", "/b", "-c", "4"]);
        assert_eq!(cli.sizes, Some(vec![8, 16]));
        assert_eq!(cli.font_dirs, vec![PathBuf::from("/a"), PathBuf::from("/b")]);
        assert_eq!(cli.columns, Some(4));
        assert_eq!(cli.log_filter(), "info");
    }

    #[test]
    fn test_cli_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["glyphsheet", "-v", "-q"]).is_err());
        assert_eq!(cli(&["-v"]).log_filter(), "debug");
        assert_eq!(cli(&["-q"]).log_filter(), "error");
    }

    // ──────────────────────────────────────────
    // Settings
    // ──────────────────────────────────────────

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve(&Cli::default(), AppConfig::default()).unwrap();
        assert_eq!(settings.font, DEFAULT_FONT);
        assert_eq!(settings.sizes, vec![DEFAULT_SIZE]);
        assert_eq!(settings.columns, DEFAULT_COLUMNS);
        assert_eq!(settings.output, PathBuf::from("./output"));
        assert_eq!(settings.sheet, SheetConfig::default());
        assert!(!settings.system_lookup);
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let file = AppConfig {
            font: Some("FromFile".into()),
            sizes: Some(vec![20, 24]),
            columns: Some(16),
            font_dirs: vec![PathBuf::from("/file/fonts")],
            ..AppConfig::default()
        };
        let cli = cli(&["--font", "FromCli", "--size", "9", "--font-dir", "/cli/fonts"]);
        let settings = Settings::resolve(&cli, file).unwrap();

        assert_eq!(settings.font, "FromCli");
        assert_eq!(settings.sizes, vec![9]);
        assert_eq!(settings.columns, 16);
        assert_eq!(
            settings.font_dirs,
            vec![PathBuf::from("/file/fonts"), PathBuf::from("/cli/fonts")]
        );
    }

    #[test]
    fn test_sizes_flag_beats_size_flag() {
        let cli = cli(&["--size", "9", "--sizes", "10", "11"]);
        let settings = Settings::resolve(&cli, AppConfig::default()).unwrap();
        assert_eq!(settings.sizes, vec![10, 11]);
    }

    #[test]
    fn test_characters_are_deduplicated() {
        let cli = cli(&["--characters", "ABBA"]);
        let settings = Settings::resolve(&cli, AppConfig::default()).unwrap();
        assert_eq!(settings.charset.chars(), &['A', 'B']);
    }

    #[test]
    fn test_empty_characters_rejected() {
        assert!(Settings::resolve(&cli(&["--characters", ""]), AppConfig::default()).is_err());
    }

    #[test]
    fn test_no_builtin_fallback_flag() {
        let cli = cli(&["--no-builtin-fallback"]);
        let settings = Settings::resolve(&cli, AppConfig::default()).unwrap();
        assert!(!settings.sheet.builtin_fallback);
    }

    #[test]
    fn test_invalid_sheet_config_rejected() {
        let file = AppConfig {
            sheet: SheetConfig {
                padding: 9,
                ..SheetConfig::default()
            },
            ..AppConfig::default()
        };
        let err = Settings::resolve(&Cli::default(), file).unwrap_err();
        assert!(err.to_string().contains("sheet configuration"));
    }

    #[test]
    fn test_load_partial_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{
                "font": "Mono",
                "sizes": [10, 14],
                "system_lookup": true,
                "sheet": { "padding": 1 }
            }"#,
        )
        .unwrap();

        let file = AppConfig::discover(Some(&path)).unwrap();
        assert_eq!(file.font.as_deref(), Some("Mono"));
        assert_eq!(file.sizes, Some(vec![10, 14]));
        assert!(file.system_lookup);
        assert_eq!(file.sheet.padding, 1);
        assert_eq!(file.sheet.cell_size, 16);
        assert_eq!(file.columns, None);
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let err = AppConfig::discover(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn test_malformed_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(AppConfig::load(&path).is_err());
    }

    // ──────────────────────────────────────────
    // Batch
    // ──────────────────────────────────────────

    #[test]
    fn test_batch_with_unknown_font_uses_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path(), "No Such Font Here", &[12, 16]);
        let report = run_batch(&settings, &generator_for(&settings));

        assert_eq!(report.written(), 2);
        assert_eq!(report.failed(), 0);
        // Both sizes land on the bitmap font's nominal size.
        assert!(dir.path().join("No_Such_Font_Here_8.sheet.png").is_file());
        assert!(dir.path().join("No_Such_Font_Here_8.sheet.json").is_file());
    }

    #[test]
    fn test_batch_continues_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = settings_in(dir.path(), "NoSuchFont", &[10, 12]);
        settings.sheet.builtin_fallback = false;
        let report = run_batch(&settings, &generator_for(&settings));

        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.failed(), 2);
        let requested: Vec<u32> = report.outcomes.iter().map(SizeOutcome::requested).collect();
        assert_eq!(requested, vec![10, 12]);
        assert!(matches!(
            &report.outcomes[1],
            SizeOutcome::Failed {
                error: GenerationError::Font {
                    source: FontError::NotFound(_),
                    ..
                },
                ..
            }
        ));
    }

    #[test]
    fn test_batch_small_and_oversized_sizes() {
        if !Path::new(SCALABLE_FONT).is_file() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path(), SCALABLE_FONT, &[8, 1000]);
        let report = run_batch(&settings, &generator_for(&settings));

        assert_eq!(report.written(), 2);
        let SizeOutcome::Written { resolved, paths, .. } = &report.outcomes[0] else {
            panic!("size 8 failed");
        };
        assert_eq!(*resolved, 8);
        assert!(paths.image.is_file() && paths.metadata.is_file());

        let SizeOutcome::Written { resolved, .. } = &report.outcomes[1] else {
            panic!("size 1000 failed");
        };
        assert!(*resolved <= settings.sheet.max_fit());
    }
}
