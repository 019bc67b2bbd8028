//! Command-line interface entry point for `examprep`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use examprep::config::Config;
use logger::{enable_debug, enable_verbose, info, init_file_logging, set_level, Level};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup; overrides apply to this run only
    let stored = Config::load();
    let defaults = Config::from_defaults();
    let mut config = stored.clone();
    config.apply_overrides(&args.to_config_overrides());

    let level = args.effective_level(&config.logging.level);
    if level == Level::Debug {
        enable_debug();
    }

    let verbose = config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    if !config.logging.file.is_empty() {
        let log_path = std::path::PathBuf::from(&config.logging.file);
        let display_path = log_path.to_string_lossy();
        match init_file_logging(&log_path) {
            Ok(()) if verbose => eprintln!("✓ File logging initialized at: {display_path}"),
            Ok(()) => info!("File logging initialized at: {display_path}"),
            Err(e) => eprintln!("✗ Failed to initialize file logging at {display_path}: {e}"),
        }
    }

    match args.command {
        Command::Config { subcommand } => {
            let mut stored = stored;
            commands::config::run(subcommand, &mut stored, &defaults);
        }
        Command::ReadingList { input, .. } => {
            commands::reading_list::run(input.as_deref(), &config);
        }
        Command::Charts { .. } => {
            commands::charts::run(&config);
        }
    }
}
