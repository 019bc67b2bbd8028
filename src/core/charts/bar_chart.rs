//! Horizontal bar charts of value counts
//!
//! One bar per category, most frequent at the top, with a count axis along
//! the bottom and dashed vertical grid lines. There are no titles or axis
//! labels; the top and right frame edges are omitted.

use super::stats::Frequency;
use super::svg::{estimate_text_width, SvgDocument, TextAnchor, TextStyle};

const POINTS_PER_INCH: f64 = 72.0;
const TICK_FONT_SIZE: f64 = 10.0;
const TICK_LENGTH: f64 = 3.5;
const TICK_PAD: f64 = 3.5;
const OUTER_MARGIN: f64 = 10.0;
const BAR_FILL: f64 = 0.8;
const AXIS_COLOR: &str = "#333333";
const GRID_COLOR: &str = "#b0b0b0";

/// Fraction of the figure width taken by the plotting area
const PLOT_WIDTH_FRACTION: f64 = 0.775;
/// Fraction of the figure height taken by the plotting area
const PLOT_HEIGHT_FRACTION: f64 = 0.77;

/// Size and color of a bar chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarChartStyle {
    /// Figure width in inches
    pub width_in: f64,
    /// Figure height in inches
    pub height_in: f64,
    /// Bar color
    pub color: &'static str,
}

/// Exercises per topic
pub const TOPIC_CHART: BarChartStyle = BarChartStyle {
    width_in: 8.0,
    height_in: 6.0,
    color: "#4c566a",
};

/// Exercises per source PDF
pub const SOURCE_CHART: BarChartStyle = BarChartStyle {
    width_in: 8.0,
    height_in: 5.0,
    color: "#5e81ac",
};

/// Draw `frequencies` in the given order, first entry at the top
#[must_use]
pub fn render_bar_chart(frequencies: &[Frequency], style: &BarChartStyle) -> SvgDocument {
    let plot_width = style.width_in * POINTS_PER_INCH * PLOT_WIDTH_FRACTION;
    let plot_height = style.height_in * POINTS_PER_INCH * PLOT_HEIGHT_FRACTION;

    let label_width = frequencies
        .iter()
        .map(|f| estimate_text_width(&f.label, TICK_FONT_SIZE))
        .fold(0.0, f64::max);
    let left = OUTER_MARGIN + label_width + TICK_LENGTH + TICK_PAD;
    let top = OUTER_MARGIN;
    let bottom = TICK_LENGTH + TICK_PAD + TICK_FONT_SIZE + OUTER_MARGIN;
    let right = OUTER_MARGIN + TICK_FONT_SIZE;

    let mut doc = SvgDocument::new(left + plot_width + right, top + plot_height + bottom);
    doc.rect(0.0, 0.0, doc.width(), doc.height(), "#ffffff");

    let max_count = frequencies.iter().map(|f| f.count).max().unwrap_or(0);
    let (step, axis_max) = count_axis(max_count);
    let x_of = |value: f64| left + value / axis_max * plot_width;
    let axis_y = top + plot_height;

    // grid and ticks
    let tick_style = TextStyle::new(TICK_FONT_SIZE).anchor(TextAnchor::Middle);
    let mut tick = 0.0;
    while tick <= axis_max + f64::EPSILON {
        let x = x_of(tick);
        doc.dashed_line((x, top), (x, axis_y), GRID_COLOR, 0.5, 0.6);
        doc.line((x, axis_y), (x, axis_y + TICK_LENGTH), AXIS_COLOR, 0.8, 1.0);
        doc.text(
            x,
            axis_y + TICK_LENGTH + TICK_PAD + TICK_FONT_SIZE * 0.8,
            &format_tick(tick),
            tick_style,
        );
        tick += step;
    }

    if !frequencies.is_empty() {
        let band = plot_height / frequencies.len() as f64;
        let label_style = TextStyle::new(TICK_FONT_SIZE).anchor(TextAnchor::End);
        for (i, frequency) in frequencies.iter().enumerate() {
            let center = top + band * (i as f64 + 0.5);
            let bar_height = band * BAR_FILL;
            doc.rect(
                left,
                center - bar_height / 2.0,
                x_of(frequency.count as f64) - left,
                bar_height,
                style.color,
            );
            doc.line((left - TICK_LENGTH, center), (left, center), AXIS_COLOR, 0.8, 1.0);
            doc.text(
                left - TICK_LENGTH - TICK_PAD,
                center + TICK_FONT_SIZE * 0.35,
                &frequency.label,
                label_style,
            );
        }
    }

    // left and bottom frame edges
    doc.line((left, top), (left, axis_y), AXIS_COLOR, 0.8, 1.0);
    doc.line((left, axis_y), (left + plot_width, axis_y), AXIS_COLOR, 0.8, 1.0);
    doc
}

/// Tick step and axis end for counts up to `max_count`
///
/// The axis extends 5% past the longest bar; ticks use a 1/2/2.5/5 x 10^n step
/// giving at most eight intervals and never fall below 1.
fn count_axis(max_count: usize) -> (f64, f64) {
    let axis_max = (max_count as f64 * 1.05).max(1.0);
    let raw = axis_max / 8.0;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|candidate| *candidate >= raw)
        .unwrap_or(10.0 * magnitude)
        .max(1.0);
    (step, axis_max)
}

fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Frequency> {
        vec![
            Frequency::new("Kinematics", 12),
            Frequency::new("Electrostatics", 7),
            Frequency::new("Optics", 1),
        ]
    }

    #[test]
    fn test_one_bar_per_category() {
        let svg = render_bar_chart(&sample(), &TOPIC_CHART).build();
        assert_eq!(svg.matches("fill=\"#4c566a\"").count(), 3);
        assert!(svg.contains(">Kinematics</text>"));
        assert!(svg.contains(">Optics</text>"));
    }

    #[test]
    fn test_first_category_is_on_top() {
        let svg = render_bar_chart(&sample(), &SOURCE_CHART).build();
        let first = svg.find(">Kinematics<").unwrap();
        let last = svg.find(">Optics<").unwrap();
        assert!(first < last);
    }

    #[test]
    fn test_bar_lengths_follow_counts() {
        let doc = render_bar_chart(&sample(), &TOPIC_CHART);
        let widths: Vec<f64> = doc
            .elements()
            .iter()
            .filter_map(|e| match e {
                crate::core::charts::svg::SvgElement::Rect { width, fill, .. }
                    if fill == TOPIC_CHART.color =>
                {
                    Some(*width)
                }
                _ => None,
            })
            .collect();
        assert_eq!(widths.len(), 3);
        assert!(widths[0] > widths[1] && widths[1] > widths[2]);
        assert!((widths[0] / widths[2] - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_labels_are_escaped() {
        let svg = render_bar_chart(&[Frequency::new("E&M <1>", 2)], &TOPIC_CHART).build();
        assert!(svg.contains(">E&amp;M &lt;1&gt;</text>"));
    }

    #[test]
    fn test_empty_chart_still_has_axes() {
        let doc = render_bar_chart(&[], &TOPIC_CHART);
        assert!(doc.width() > 0.0 && doc.height() > 0.0);
        assert!(doc.build().contains(">0</text>"));
    }

    #[test]
    fn test_count_axis_steps() {
        assert_eq!(count_axis(0), (1.0, 1.0));
        let (step, max) = count_axis(12);
        assert!((max - 12.6).abs() < 1e-9);
        assert!((step - 2.0).abs() < 1e-9);
        let (step, _) = count_axis(300);
        assert!((step - 50.0).abs() < 1e-9);
    }
}
