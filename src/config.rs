//! Configuration module for `examprep`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Placeholder expanded to the examprep config directory
const DIR_VARIABLE: &str = "$EXAMPREP";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Input and output locations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Markdown file written by the reading list builder
    #[serde(default)]
    pub reading_list: String,
    /// Directory scanned for exercise `.json` files
    #[serde(default)]
    pub exercises_dir: String,
    /// Directory receiving the chart images
    #[serde(default)]
    pub charts_dir: String,
}

/// Chart rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartsConfig {
    /// Raster resolution in dots per inch
    #[serde(default = "default_dpi")]
    pub dpi: u32,
    /// Seed for the network layout
    #[serde(default = "default_seed")]
    pub seed: u64,
}

const fn default_dpi() -> u32 {
    300
}

const fn default_seed() -> u64 {
    42
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            dpi: default_dpi(),
            seed: default_seed(),
        }
    }
}

/// Reading list builder settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadingListConfig {
    /// Treat sections naming no known book as errors instead of dropping them
    #[serde(default)]
    pub strict: bool,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Chart settings
    #[serde(default)]
    pub charts: ChartsConfig,
    /// Reading list settings
    #[serde(default)]
    pub reading_list: ReadingListConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override reading list output path
    pub reading_list: Option<String>,
    /// Override exercises directory
    pub exercises_dir: Option<String>,
    /// Override charts directory
    pub charts_dir: Option<String>,
    /// Override chart resolution
    pub dpi: Option<u32>,
    /// Override strict parsing of the reading list
    pub strict: Option<bool>,
}

impl Config {
    /// Get the `$EXAMPREP` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/examprep`
    /// - macOS: `~/Library/Application Support/examprep`
    /// - Windows: `%APPDATA%\examprep`
    #[must_use]
    pub fn get_examprep_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("examprep")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only string fields that are empty here and non-empty in `defaults` are
    /// filled. Numeric and boolean fields already fall back to their serde defaults.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let pairs = [
            (&mut self.logging.level, &defaults.logging.level),
            (&mut self.logging.file, &defaults.logging.file),
            (&mut self.paths.reading_list, &defaults.paths.reading_list),
            (&mut self.paths.exercises_dir, &defaults.paths.exercises_dir),
            (&mut self.paths.charts_dir, &defaults.paths.charts_dir),
        ];

        let mut changed = false;
        for (value, default) in pairs {
            if value.is_empty() && !default.is_empty() {
                value.clone_from(default);
                changed = true;
            }
        }
        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides only affect this run; nothing is written back to the config file.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut config = Config::load();
    /// let overrides = ConfigOverrides {
    ///     charts_dir: Some("out".to_string()),
    ///     ..Default::default()
    /// };
    /// config.apply_overrides(&overrides);
    /// ```
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(reading_list) = &overrides.reading_list {
            self.paths.reading_list.clone_from(reading_list);
        }
        if let Some(exercises_dir) = &overrides.exercises_dir {
            self.paths.exercises_dir.clone_from(exercises_dir);
        }
        if let Some(charts_dir) = &overrides.charts_dir {
            self.paths.charts_dir.clone_from(charts_dir);
        }

        if let Some(dpi) = overrides.dpi {
            self.charts.dpi = dpi;
        }
        if let Some(strict) = overrides.strict {
            self.reading_list.strict = strict;
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// [`get_examprep_dir`](Self::get_examprep_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_examprep_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$EXAMPREP` in a string to the config directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_examprep_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields use their serde defaults; `$EXAMPREP` is expanded in path values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.reading_list = Self::expand_variables(&config.paths.reading_list);
        config.paths.exercises_dir = Self::expand_variables(&config.paths.exercises_dir);
        config.paths.charts_dir = Self::expand_variables(&config.paths.charts_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create it from defaults on first run
    ///
    /// An existing file has missing fields merged from defaults and is saved back
    /// when that changed anything. Any read or parse failure falls back to defaults.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if !config_file.exists() {
            let _ = defaults.save();
            return defaults;
        }

        match fs::read_to_string(&config_file)
            .ok()
            .and_then(|content| Self::from_toml(&content).ok())
        {
            Some(mut config) => {
                if config.merge_defaults(&defaults) {
                    let _ = config.save();
                }
                config
            }
            None => defaults,
        }
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created, the config
    /// cannot be serialized, or the file cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `reading_list`, `exercises_dir`,
    /// `charts_dir`, `dpi`, `seed`, `strict`. Dashed spellings are accepted too.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "reading_list" | "reading-list" => Some(self.paths.reading_list.clone()),
            "exercises_dir" | "exercises-dir" => Some(self.paths.exercises_dir.clone()),
            "charts_dir" | "charts-dir" => Some(self.paths.charts_dir.clone()),
            "dpi" => Some(self.charts.dpi.to_string()),
            "seed" => Some(self.charts.seed.to_string()),
            "strict" => Some(self.reading_list.strict.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config only; call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value does not parse
    /// (booleans for `verbose`/`strict`, a positive integer for `dpi`, an integer for `seed`).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => self.logging.verbose = parse_bool(key, value)?,
            "reading_list" | "reading-list" => self.paths.reading_list = value.to_string(),
            "exercises_dir" | "exercises-dir" => self.paths.exercises_dir = value.to_string(),
            "charts_dir" | "charts-dir" => self.paths.charts_dir = value.to_string(),
            "dpi" => {
                self.charts.dpi = value
                    .parse::<u32>()
                    .ok()
                    .filter(|dpi| *dpi > 0)
                    .ok_or_else(|| format!("Invalid value for 'dpi': '{value}'"))?;
            }
            "seed" => {
                self.charts.seed = value
                    .parse::<u64>()
                    .map_err(|_| format!("Invalid value for 'seed': '{value}'"))?;
            }
            "strict" => self.reading_list.strict = parse_bool(key, value)?,
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset it to `defaults`)
    ///
    /// # Errors
    /// Returns an error if the key is unknown.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "reading_list" | "reading-list" => self
                .paths
                .reading_list
                .clone_from(&defaults.paths.reading_list),
            "exercises_dir" | "exercises-dir" => self
                .paths
                .exercises_dir
                .clone_from(&defaults.paths.exercises_dir),
            "charts_dir" | "charts-dir" => {
                self.paths.charts_dir.clone_from(&defaults.paths.charts_dir);
            }
            "dpi" => self.charts.dpi = defaults.charts.dpi,
            "seed" => self.charts.seed = defaults.charts.seed,
            "strict" => self.reading_list.strict = defaults.reading_list.strict,
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults by deleting the config file
    ///
    /// The next [`load()`](Config::load) recreates it. Succeeds if there is no file.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, String> {
    value
        .parse::<bool>()
        .map_err(|_| format!("Invalid boolean value for '{key}': '{value}'"))
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  reading_list = \"{}\"", self.paths.reading_list)?;
        writeln!(f, "  exercises_dir = \"{}\"", self.paths.exercises_dir)?;
        writeln!(f, "  charts_dir = \"{}\"", self.paths.charts_dir)?;

        writeln!(f, "\n[charts]")?;
        writeln!(f, "  dpi = {}", self.charts.dpi)?;
        writeln!(f, "  seed = {}", self.charts.seed)?;

        writeln!(f, "\n[reading_list]")?;
        writeln!(f, "  strict = {}", self.reading_list.strict)?;

        Ok(())
    }
}
