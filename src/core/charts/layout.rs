//! Force-directed node placement
//!
//! Fruchterman & Reingold (1991): nodes repel each other with force `k²/d`
//! and edges pull their endpoints together with force `w·d²/k`. The step
//! size starts at a tenth of the initial spread and cools linearly to zero.
//! Initial positions come from a seeded RNG, so a fixed seed gives the same
//! layout on every run.

use super::network::TopicNetwork;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Distances are clipped to this value to keep forces finite
const MIN_DISTANCE: f64 = 0.01;

/// Displacements shorter than this are treated as this length
const MIN_DISPLACEMENT: f64 = 0.01;

/// Replacement length for near-zero displacements
const SHORT_DISPLACEMENT: f64 = 0.1;

/// A position in layout space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Create a point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Spring layout parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Optimal distance between nodes
    pub optimal_distance: f64,
    /// Maximum number of iterations
    pub iterations: usize,
    /// Stop once the mean node movement drops below this
    pub threshold: f64,
    /// RNG seed for the initial positions
    pub seed: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            optimal_distance: 0.9,
            iterations: 50,
            threshold: 1e-4,
            seed: 42,
        }
    }
}

impl LayoutConfig {
    /// Default parameters with a different seed
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}

/// Node positions, indexed like the network's nodes
///
/// Coordinates are centered on the origin and scaled so the largest absolute
/// coordinate is 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    positions: Vec<Point>,
}

impl Layout {
    /// All positions
    #[must_use]
    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    /// Position of node `index`
    #[must_use]
    pub fn position(&self, index: usize) -> Option<Point> {
        self.positions.get(index).copied()
    }

    /// Number of placed nodes
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether no node was placed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Place the nodes of `network` with a weighted spring simulation
#[must_use]
pub fn spring_layout(network: &TopicNetwork, config: &LayoutConfig) -> Layout {
    let n = network.node_count();
    match n {
        0 => {
            return Layout {
                positions: Vec::new(),
            }
        }
        1 => {
            return Layout {
                positions: vec![Point::new(0.0, 0.0)],
            }
        }
        _ => {}
    }

    let mut adjacency = vec![vec![0.0_f64; n]; n];
    for edge in network.edges() {
        let weight = edge.weight as f64;
        adjacency[edge.source][edge.target] += weight;
        adjacency[edge.target][edge.source] += weight;
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut positions: Vec<Point> = (0..n)
        .map(|_| Point::new(rng.gen::<f64>(), rng.gen::<f64>()))
        .collect();

    let k = config.optimal_distance;
    let mut temperature = 0.1 * spread(&positions);
    let cooling = temperature / (config.iterations as f64 + 1.0);

    for _ in 0..config.iterations {
        let mut moves = Vec::with_capacity(n);
        for i in 0..n {
            let mut disp = Point::new(0.0, 0.0);
            for j in 0..n {
                if i == j {
                    continue;
                }
                let dx = positions[i].x - positions[j].x;
                let dy = positions[i].y - positions[j].y;
                let distance = dx.hypot(dy).max(MIN_DISTANCE);
                let force = k * k / (distance * distance) - adjacency[i][j] * distance / k;
                disp.x += dx * force;
                disp.y += dy * force;
            }
            let mut length = disp.x.hypot(disp.y);
            if length < MIN_DISPLACEMENT {
                length = SHORT_DISPLACEMENT;
            }
            moves.push(Point::new(
                disp.x * temperature / length,
                disp.y * temperature / length,
            ));
        }

        let mut total = 0.0;
        for (pos, step) in positions.iter_mut().zip(&moves) {
            pos.x += step.x;
            pos.y += step.y;
            total += step.x * step.x + step.y * step.y;
        }
        temperature -= cooling;

        if total.sqrt() / (n as f64) < config.threshold {
            break;
        }
    }

    rescale(&mut positions);
    Layout { positions }
}

/// Larger of the horizontal and vertical extent
fn spread(positions: &[Point]) -> f64 {
    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for p in positions {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    (max_x - min_x).max(max_y - min_y)
}

/// Center on the mean position and scale into `[-1, 1]`
fn rescale(positions: &mut [Point]) {
    let n = positions.len() as f64;
    let mean_x = positions.iter().map(|p| p.x).sum::<f64>() / n;
    let mean_y = positions.iter().map(|p| p.y).sum::<f64>() / n;

    let mut limit: f64 = 0.0;
    for p in positions.iter_mut() {
        p.x -= mean_x;
        p.y -= mean_y;
        limit = limit.max(p.x.abs()).max(p.y.abs());
    }
    if limit > 0.0 {
        for p in positions.iter_mut() {
            p.x /= limit;
            p.y /= limit;
        }
    }
}
