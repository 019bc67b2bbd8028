//! Charts derived from the exercise table
//!
//! Three PNG images are produced: exercises per topic, exercises per source
//! PDF, and the topic co-occurrence network. The network is skipped when no
//! exercise lists two distinct topics.

pub mod bar_chart;
pub mod layout;
pub mod network;
pub mod network_chart;
pub mod raster;
pub mod stats;
pub mod svg;

pub use layout::{spring_layout, Layout, LayoutConfig, Point};
pub use network::{NetworkEdge, NetworkNode, TopicNetwork};
pub use raster::{RasterImage, Rasterizer};
pub use stats::{
    co_occurrence, count_values, source_frequencies, topic_frequencies, CoOccurrence, Frequency,
    TopicPair,
};

use crate::core::exercises::ExerciseTable;
use crate::error::{ExamPrepError, Result};
use logger::info;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the topic frequency chart
pub const TOPICS_CHART_FILE: &str = "topics_distribution.png";
/// File name of the source frequency chart
pub const SOURCES_CHART_FILE: &str = "source_distribution.png";
/// File name of the co-occurrence network chart
pub const NETWORK_CHART_FILE: &str = "topic_network.png";

/// Rendering settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartOptions {
    /// Output resolution
    pub dpi: u32,
    /// Seed for the network layout
    pub seed: u64,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self { dpi: 300, seed: 42 }
    }
}

/// Which charts a run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartReport {
    /// Paths of the images written, in generation order
    pub written: Vec<PathBuf>,
    /// Set when no topic pair co-occurred and the network image was not drawn
    pub network_skipped: bool,
}

/// Render every chart for `table` into `output_dir`, creating it if needed.
///
/// Existing images with the same names are replaced. A network image left by
/// an earlier run is removed when this run has no co-occurring topics.
///
/// # Errors
/// [`ExamPrepError::Io`] if the directory or a file cannot be written,
/// [`ExamPrepError::Render`] if an image cannot be produced.
pub fn generate_charts(
    table: &ExerciseTable,
    output_dir: &Path,
    options: &ChartOptions,
) -> Result<ChartReport> {
    fs::create_dir_all(output_dir).map_err(|e| ExamPrepError::io(output_dir, e))?;
    let rasterizer = Rasterizer::new(options.dpi);
    let mut report = ChartReport::default();

    info!("Generating 'Exercises per Topic' chart");
    let topics = topic_frequencies(table);
    let path = output_dir.join(TOPICS_CHART_FILE);
    rasterizer.render_png(
        &bar_chart::render_bar_chart(&topics, &bar_chart::TOPIC_CHART),
        &path,
    )?;
    report.written.push(path);

    info!("Generating 'Exercises per Source PDF' chart");
    let path = output_dir.join(SOURCES_CHART_FILE);
    rasterizer.render_png(
        &bar_chart::render_bar_chart(&source_frequencies(table), &bar_chart::SOURCE_CHART),
        &path,
    )?;
    report.written.push(path);

    info!("Generating 'Topic Co-occurrence Network' graph");
    let path = output_dir.join(NETWORK_CHART_FILE);
    match TopicNetwork::build(&co_occurrence(table), &topics) {
        Some(network) => {
            let layout = spring_layout(&network, &LayoutConfig::with_seed(options.seed));
            rasterizer.render_png(&network_chart::render_network(&network, &layout), &path)?;
            report.written.push(path);
        }
        None => {
            remove_stale(&path)?;
            report.network_skipped = true;
        }
    }

    Ok(report)
}

/// Delete a chart from a previous run that this run does not produce
fn remove_stale(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            info!("Removed stale chart '{}'", path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ExamPrepError::io(path, e)),
    }
}
