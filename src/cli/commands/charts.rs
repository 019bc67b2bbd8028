//! Charts command handler

use examprep::config::Config;
use examprep::core::charts::{generate_charts, ChartOptions};
use examprep::core::exercises::{load_exercises, LoadOutcome};
use logger::{error, info};
use std::path::Path;

/// Load the exercises and write the charts to the configured directory.
///
/// A missing input directory or an empty exercise set is reported and the
/// command returns without writing anything. Load and render failures exit
/// with status 1.
pub fn run(config: &Config) {
    let input_dir = Path::new(&config.paths.exercises_dir);
    let output_dir = Path::new(&config.paths.charts_dir);

    let table = match load_exercises(input_dir) {
        Ok(LoadOutcome::MissingDirectory) => {
            eprintln!(
                "✗ The directory '{}' was not found. No charts generated.",
                input_dir.display()
            );
            return;
        }
        Ok(LoadOutcome::Loaded { table, files }) => {
            println!(
                "✓ Loaded {} exercises from {} files in '{}'",
                table.len(),
                files.len(),
                input_dir.display()
            );
            table
        }
        Err(e) => fail(&e),
    };

    if table.is_empty() {
        println!("No exercises found. No charts generated.");
        return;
    }

    let options = ChartOptions {
        dpi: config.charts.dpi,
        seed: config.charts.seed,
    };
    info!(
        "Rendering charts at {} dpi into '{}'",
        options.dpi,
        output_dir.display()
    );

    match generate_charts(&table, output_dir, &options) {
        Ok(report) => {
            for path in &report.written {
                println!("✓ Graph saved to '{}'", path.display());
            }
            if report.network_skipped {
                println!("No topic co-occurrences found. Skipping network graph.");
            }
            println!("✓ All graphs have been generated successfully!");
        }
        Err(e) => fail(&e),
    }
}

fn fail(err: &dyn std::error::Error) -> ! {
    error!("Charts failed: {err}");
    eprintln!("✗ {err}");
    std::process::exit(1);
}
