//! CLI argument definitions for `examprep`

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use examprep::config::ConfigOverrides;
use logger::Level;

/// CLI log level argument
///
/// Converts to `logger::Level` for runtime use and to a lowercase string for
/// display.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `charts_dir`, `dpi`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Build the textbook reading list.
    ///
    /// Parses the topic index (embedded by default) and writes a Markdown
    /// reading list grouped by textbook.
    ReadingList {
        /// Read the topic index from this file instead of the embedded one
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output Markdown path (defaults to config `reading_list`)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Fail on mapping sections that name no known textbook
        #[arg(long)]
        strict: bool,
    },
    /// Chart exercise statistics.
    ///
    /// Loads every `.json` file in the exercises directory and writes topic,
    /// source and co-occurrence charts as PNG images.
    Charts {
        /// Directory of exercise JSON files (defaults to config `exercises_dir`)
        #[arg(long, value_name = "DIR")]
        input_dir: Option<PathBuf>,

        /// Directory for the PNG images (defaults to config `charts_dir`)
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Image resolution in dots per inch (defaults to config `dpi`)
        #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
        dpi: Option<u32>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "examprep",
    about = "Exam preparation helpers: textbook reading list and exercise charts",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides (current run only) ---
    /// Override config reading list output path
    #[arg(long = "reading-list", value_name = "PATH")]
    pub reading_list: Option<PathBuf>,

    /// Override config exercises directory
    #[arg(long = "exercises-dir", value_name = "DIR")]
    pub exercises_dir: Option<PathBuf>,

    /// Override config charts directory
    #[arg(long = "charts-dir", value_name = "DIR")]
    pub charts_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

fn path_string(path: Option<&PathBuf>) -> Option<String> {
    path.map(|p| p.to_string_lossy().to_string())
}

impl Cli {
    /// Effective log level: `--debug`, then `--log-level`, then `configured`, else warn
    pub fn effective_level(&self, configured: &str) -> Level {
        if self.debug_flag {
            return Level::Debug;
        }
        self.log_level
            .map_or_else(|| configured.parse().unwrap_or(Level::Warn), Level::from)
    }

    /// Convert CLI flags into config overrides
    ///
    /// Subcommand flags (`--output`, `--input-dir`, `--output-dir`, `--dpi`,
    /// `--strict`) take precedence over the global path flags when both are given.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides {
            level: self.log_level.map(|lvl| lvl.to_string()),
            file: path_string(self.log_file.as_ref()),
            verbose: self.verbose.then_some(true),
            reading_list: path_string(self.reading_list.as_ref()),
            exercises_dir: path_string(self.exercises_dir.as_ref()),
            charts_dir: path_string(self.charts_dir.as_ref()),
            dpi: None,
            strict: None,
        };

        match &self.command {
            Command::ReadingList { output, strict, .. } => {
                if output.is_some() {
                    overrides.reading_list = path_string(output.as_ref());
                }
                overrides.strict = strict.then_some(true);
            }
            Command::Charts {
                input_dir,
                output_dir,
                dpi,
            } => {
                if input_dir.is_some() {
                    overrides.exercises_dir = path_string(input_dir.as_ref());
                }
                if output_dir.is_some() {
                    overrides.charts_dir = path_string(output_dir.as_ref());
                }
                overrides.dpi = *dpi;
            }
            Command::Config { .. } => {}
        }

        overrides
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(command: Command) -> Cli {
        Cli {
            log_level: None,
            verbose: false,
            debug_flag: false,
            log_file: None,
            reading_list: None,
            exercises_dir: None,
            charts_dir: None,
            command,
        }
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_effective_level_precedence() {
        let mut args = cli(Command::Config { subcommand: None });
        assert_eq!(args.effective_level("info"), Level::Info);
        assert_eq!(args.effective_level("loud"), Level::Warn);

        args.log_level = Some(LogLevelArg::Error);
        assert_eq!(args.effective_level("info"), Level::Error);

        args.debug_flag = true;
        assert_eq!(args.effective_level("info"), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = cli(Command::Config { subcommand: None }).to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.reading_list.is_none());
        assert!(overrides.exercises_dir.is_none());
        assert!(overrides.charts_dir.is_none());
        assert!(overrides.dpi.is_none());
        assert!(overrides.strict.is_none());
    }

    #[test]
    fn test_global_flags_become_overrides() {
        let mut args = cli(Command::Config { subcommand: None });
        args.log_level = Some(LogLevelArg::Debug);
        args.log_file = Some(PathBuf::from("/tmp/examprep.log"));
        args.verbose = true;
        args.charts_dir = Some(PathBuf::from("out/graphs"));

        let overrides = args.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/examprep.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.charts_dir, Some("out/graphs".to_string()));
    }

    #[test]
    fn test_subcommand_flags_take_precedence() {
        let mut args = cli(Command::Charts {
            input_dir: Some(PathBuf::from("data")),
            output_dir: None,
            dpi: Some(150),
        });
        args.exercises_dir = Some(PathBuf::from("JSONS"));
        args.charts_dir = Some(PathBuf::from("graphs"));

        let overrides = args.to_config_overrides();
        assert_eq!(overrides.exercises_dir, Some("data".to_string()));
        assert_eq!(overrides.charts_dir, Some("graphs".to_string()));
        assert_eq!(overrides.dpi, Some(150));
    }

    #[test]
    fn test_reading_list_flags() {
        let mut args = cli(Command::ReadingList {
            input: None,
            output: Some(PathBuf::from("docs/list.md")),
            strict: true,
        });
        args.reading_list = Some(PathBuf::from("ignored.md"));

        let overrides = args.to_config_overrides();
        assert_eq!(overrides.reading_list, Some("docs/list.md".to_string()));
        assert_eq!(overrides.strict, Some(true));
    }

    #[test]
    fn test_parse_command_line() {
        let args = Cli::try_parse_from([
            "examprep",
            "--charts-dir",
            "out",
            "charts",
            "--dpi",
            "96",
        ])
        .unwrap();
        assert!(matches!(args.command, Command::Charts { dpi: Some(96), .. }));
        assert_eq!(args.charts_dir, Some(PathBuf::from("out")));

        assert!(Cli::try_parse_from(["examprep", "charts", "--dpi", "0"]).is_err());
    }
}
