//! Planar geometry shared by the road graph and the builders.
//!
//! Tile coordinates are projected planar (x, y) pairs. Two notions of
//! coincidence exist side by side and must not be mixed up:
//!
//! - epsilon equality ([`POINTS_EQUAL_EPSILON`]), used when matching query
//!   points against polyline vertices;
//! - location-key equality ([`location_key`]), used by the index-graph
//!   builder, where the quantisation grid is the sole coalescence criterion.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Absolute tolerance under which two points are the same map location.
pub const POINTS_EQUAL_EPSILON: f64 = 1e-6;

/// Resolution of the location-key grid, in bits per axis.
pub const POINT_COORD_BITS: u32 = 30;

/// Half-width of the coordinate range covered by the location-key grid.
/// Projected tile coordinates stay inside [-COORD_RANGE, COORD_RANGE].
const COORD_RANGE: f64 = 180.0;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn squared_distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(&self, other: &Point) -> f64 {
        self.squared_distance(other).sqrt()
    }

    /// Epsilon equality: within [`POINTS_EQUAL_EPSILON`] of each other.
    pub fn almost_equal(&self, other: &Point) -> bool {
        self.squared_distance(other) <= POINTS_EQUAL_EPSILON * POINTS_EQUAL_EPSILON
    }

    /// Total lexicographic ordering over (x, y); usable as a map key.
    pub fn total_cmp(&self, other: &Point) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.total_cmp(other) == Ordering::Equal
    }
}

impl Eq for Point {}

fn quantize(v: f64, bits: u32) -> u64 {
    let cells = ((1u64 << bits) - 1) as f64;
    let clamped = v.clamp(-COORD_RANGE, COORD_RANGE);
    (((clamped + COORD_RANGE) / (2.0 * COORD_RANGE)) * cells).round() as u64
}

fn unquantize(q: u64, bits: u32) -> f64 {
    let cells = ((1u64 << bits) - 1) as f64;
    (q as f64 / cells) * (2.0 * COORD_RANGE) - COORD_RANGE
}

/// 64-bit key of the grid cell containing `p` at `bits` resolution.
pub fn location_key(p: &Point, bits: u32) -> u64 {
    (quantize(p.x, bits) << 32) | quantize(p.y, bits)
}

/// Packs a point into two fixed-point words for serialisation.
pub fn pack_point(p: &Point, bits: u32) -> (u32, u32) {
    (quantize(p.x, bits) as u32, quantize(p.y, bits) as u32)
}

/// Inverse of [`pack_point`], up to grid resolution.
pub fn unpack_point(x: u32, y: u32, bits: u32) -> Point {
    Point::new(unquantize(x as u64, bits), unquantize(y as u64, bits))
}

/// Closest point to `p` on the segment [a, b].
pub fn project_onto_segment(p: &Point, a: &Point, b: &Point) -> Point {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let len2 = abx * abx + aby * aby;
    if len2 == 0.0 {
        return *a;
    }
    let t = (((p.x - a.x) * abx + (p.y - a.y) * aby) / len2).clamp(0.0, 1.0);
    Point::new(a.x + t * abx, a.y + t * aby)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_almost_equal() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(1.0 + 1e-7, 2.0);
        let c = Point::new(1.0 + 1e-5, 2.0);
        assert!(a.almost_equal(&b));
        assert!(!a.almost_equal(&c));
    }

    #[test]
    fn test_location_key_coalesces_identical_points() {
        let a = Point::new(1.0, 0.0);
        let b = Point::new(1.0, 0.0);
        assert_eq!(
            location_key(&a, POINT_COORD_BITS),
            location_key(&b, POINT_COORD_BITS)
        );
    }

    #[test]
    fn test_location_key_separates_distinct_points() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 0.0);
        let c = Point::new(0.0, 1.0);
        assert_ne!(
            location_key(&a, POINT_COORD_BITS),
            location_key(&b, POINT_COORD_BITS)
        );
        assert_ne!(
            location_key(&b, POINT_COORD_BITS),
            location_key(&c, POINT_COORD_BITS)
        );
    }

    #[test]
    fn test_pack_point_roundtrip_within_grid_resolution() {
        let p = Point::new(12.345678, -76.54321);
        let (x, y) = pack_point(&p, POINT_COORD_BITS);
        let q = unpack_point(x, y, POINT_COORD_BITS);
        // Grid cell size at 30 bits is ~3.4e-7, below the epsilon.
        assert!(p.almost_equal(&q));
    }

    #[test]
    fn test_project_onto_segment() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        let inside = project_onto_segment(&Point::new(4.0, 3.0), &a, &b);
        assert_eq!(inside, Point::new(4.0, 0.0));
        let clamped = project_onto_segment(&Point::new(-5.0, 1.0), &a, &b);
        assert_eq!(clamped, a);
        let degenerate = project_onto_segment(&Point::new(7.0, 7.0), &a, &a);
        assert_eq!(degenerate, a);
    }
}
