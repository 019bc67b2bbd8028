//! Integration tests for configuration management

use examprep::config::{Config, ConfigOverrides};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert_eq!(config.paths.reading_list, "reading_list.md");
    assert_eq!(config.paths.exercises_dir, "JSONS");
    assert_eq!(config.paths.charts_dir, "graphs_professional");
    assert_eq!(config.charts.dpi, 300);
    assert_eq!(config.charts.seed, 42);
    assert!(!config.reading_list.strict);
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[paths]
reading_list = "out/list.md"
exercises_dir = "data"
charts_dir = "out/charts"

[charts]
dpi = 150
seed = 7

[reading_list]
strict = true
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.reading_list, "out/list.md");
    assert_eq!(config.paths.exercises_dir, "data");
    assert_eq!(config.paths.charts_dir, "out/charts");
    assert_eq!(config.charts.dpi, 150);
    assert_eq!(config.charts.seed, 7);
    assert!(config.reading_list.strict);
}

#[test]
fn test_config_from_toml_partial() {
    let toml_str = r#"
[logging]
level = "error"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert_eq!(config.paths.charts_dir, "");
    // numeric fields fall back to their serde defaults
    assert_eq!(config.charts.dpi, 300);
    assert_eq!(config.charts.seed, 42);
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$EXAMPREP/test.log"

[paths]
charts_dir = "$EXAMPREP/charts"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    assert!(config.logging.file.contains("examprep"));
    assert!(!config.logging.file.contains("$EXAMPREP"));
    assert!(config.paths.charts_dir.ends_with("charts"));
    assert!(!config.paths.charts_dir.contains("$EXAMPREP"));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "debug").expect("Failed to set level");
    assert_eq!(config.get("level").unwrap(), "debug");

    config.set("verbose", "true").expect("Failed to set verbose");
    assert!(config.logging.verbose);

    config.set("charts-dir", "plots").expect("Failed to set charts dir");
    assert_eq!(config.get("charts_dir").unwrap(), "plots");

    config.set("dpi", "600").expect("Failed to set dpi");
    assert_eq!(config.charts.dpi, 600);

    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
}

#[test]
fn test_config_set_rejects_bad_values() {
    let mut config = Config::from_defaults();

    assert!(config.set("dpi", "0").is_err());
    assert!(config.set("dpi", "high").is_err());
    assert!(config.set("seed", "-1").is_err());
    assert!(config.set("strict", "maybe").is_err());
    assert_eq!(config.charts.dpi, 300);
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("exercises_dir", "elsewhere").unwrap();
    config.set("seed", "9").unwrap();

    config.unset("exercises_dir", &defaults).unwrap();
    config.unset("seed", &defaults).unwrap();
    assert_eq!(config.paths.exercises_dir, defaults.paths.exercises_dir);
    assert_eq!(config.charts.seed, defaults.charts.seed);

    assert!(config.unset("nope", &defaults).is_err());
}

#[test]
fn test_config_save_and_load_roundtrip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("config.toml");

    let mut config = Config::from_defaults();
    config.set("level", "info").expect("Failed to set level");
    config.set("strict", "true").expect("Failed to set strict");

    let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");
    fs::write(&config_file, toml_str).expect("Failed to write config");

    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    let loaded = Config::from_toml(&content).expect("Failed to parse loaded config");

    assert_eq!(loaded.logging.level, "info");
    assert!(loaded.reading_list.strict);
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        reading_list: Some("docs/reading.md".to_string()),
        exercises_dir: Some("input".to_string()),
        charts_dir: Some("output".to_string()),
        dpi: Some(72),
        strict: Some(true),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.reading_list, "docs/reading.md");
    assert_eq!(config.paths.exercises_dir, "input");
    assert_eq!(config.paths.charts_dir, "output");
    assert_eq!(config.charts.dpi, 72);
    assert!(config.reading_list.strict);
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let overrides = ConfigOverrides {
        charts_dir: Some("out".to_string()),
        ..Default::default()
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.paths.charts_dir, "out");
    assert_eq!(config.paths.exercises_dir, "JSONS");
    assert_eq!(config.charts.dpi, 300);
}

#[test]
fn test_config_display_format() {
    let display_str = format!("{}", Config::from_defaults());

    for section in ["[logging]", "[paths]", "[charts]", "[reading_list]"] {
        assert!(display_str.contains(section), "missing {section}");
    }
    assert!(display_str.contains("exercises_dir = \"JSONS\""));
    assert!(display_str.contains("dpi = 300"));
}

#[test]
fn test_merge_defaults_fills_empty_paths() {
    let toml_str = r#"
[logging]
level = "error"

[paths]
reading_list = ""
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    assert!(config.merge_defaults(&defaults));
    assert_eq!(config.logging.level, "error");
    assert_eq!(config.paths.reading_list, "reading_list.md");
    assert_eq!(config.paths.charts_dir, "graphs_professional");
    assert!(!config.merge_defaults(&defaults));
}

#[test]
fn test_get_examprep_dir() {
    let dir = Config::get_examprep_dir();
    assert!(dir.to_string_lossy().contains("examprep"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path_str = Config::get_config_file_path().to_string_lossy().to_string();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}
