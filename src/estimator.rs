//! Travel-time edge weights for the index graph.

use crate::geom::Point;
use crate::index_graph::RoadGeometry;

const KMPH_TO_MPS: f64 = 1000.0 / 3600.0;

/// Converts segment lengths into traversal times for one vehicle profile.
/// Projected tile units are metres; weights are seconds.
#[derive(Clone, Copy, Debug)]
pub struct EdgeEstimator {
    max_speed_kmph: f64,
}

impl EdgeEstimator {
    pub fn with_max_speed(max_speed_kmph: f64) -> Self {
        EdgeEstimator {
            max_speed_kmph: max_speed_kmph.max(1.0),
        }
    }

    pub fn max_speed_kmph(&self) -> f64 {
        self.max_speed_kmph
    }

    /// Traversal time of the segment [from, to] at `speed_kmph`, seconds.
    /// Never negative; speeds are clamped to (0, max].
    pub fn weight(&self, from: &Point, to: &Point, speed_kmph: f64) -> f64 {
        let speed = speed_kmph.clamp(1.0, self.max_speed_kmph) * KMPH_TO_MPS;
        from.distance(to) / speed
    }

    /// Traversal time of one segment of a road, seconds.
    pub fn segment_weight(&self, road: &RoadGeometry, segment_idx: u32) -> f64 {
        let i = segment_idx as usize;
        self.weight(&road.points[i], &road.points[i + 1], road.speed_kmph)
    }
}
