//! Topic co-occurrence network drawing

use super::layout::{Layout, Point};
use super::network::TopicNetwork;
use super::svg::{SvgDocument, TextAnchor, TextStyle};

const POINTS_PER_INCH: f64 = 72.0;

/// Figure side in inches; the figure is square
pub const FIGURE_SIZE_IN: f64 = 12.0;

/// Marker area in square points per exercise
pub const NODE_AREA_PER_EXERCISE: f64 = 70.0;

/// Edge width in points per shared exercise
pub const EDGE_WIDTH_PER_WEIGHT: f64 = 0.4;

const PLOT_FRACTION: f64 = 0.775;
const LABEL_FONT_SIZE: f64 = 9.0;
const NODE_FILL: &str = "#d8dee9";
const NODE_OUTLINE: &str = "#4c566a";
const EDGE_COLOR: &str = "#888888";
const EDGE_OPACITY: f64 = 0.7;
const LABEL_COLOR: &str = "#2e3440";

/// Radius in points of a node drawn for `frequency` exercises
#[must_use]
pub fn node_radius(frequency: usize) -> f64 {
    (frequency as f64 * NODE_AREA_PER_EXERCISE).sqrt() / 2.0
}

/// Stroke width in points of an edge with `weight`
#[must_use]
pub fn edge_width(weight: usize) -> f64 {
    weight as f64 * EDGE_WIDTH_PER_WEIGHT
}

/// Draw edges, then nodes, then labels, without axes
#[must_use]
pub fn render_network(network: &TopicNetwork, layout: &Layout) -> SvgDocument {
    let side = FIGURE_SIZE_IN * POINTS_PER_INCH;
    let center = side / 2.0;
    let largest = network
        .nodes()
        .iter()
        .map(|n| node_radius(n.frequency))
        .fold(0.0, f64::max);
    let half = (side * PLOT_FRACTION / 2.0 - largest).max(1.0);

    // layout y grows upward, SVG y grows downward
    let place = |p: Point| (center + p.x * half, center - p.y * half);
    let at = |index: usize| place(layout.position(index).unwrap_or(Point::new(0.0, 0.0)));

    let mut doc = SvgDocument::new(side, side);
    doc.rect(0.0, 0.0, side, side, "#ffffff");

    for edge in network.edges() {
        doc.line(
            at(edge.source),
            at(edge.target),
            EDGE_COLOR,
            edge_width(edge.weight),
            EDGE_OPACITY,
        );
    }

    for (index, node) in network.nodes().iter().enumerate() {
        doc.outlined_circle(
            at(index),
            node_radius(node.frequency),
            NODE_FILL,
            NODE_OUTLINE,
            1.0,
        );
    }

    let label_style = TextStyle::new(LABEL_FONT_SIZE)
        .anchor(TextAnchor::Middle)
        .color(LABEL_COLOR);
    for (index, node) in network.nodes().iter().enumerate() {
        let (x, y) = at(index);
        doc.text(x, y + LABEL_FONT_SIZE * 0.35, &node.topic, label_style);
    }

    doc
}
