//! R-tree indexes over road geometry for point queries.

use crate::features::{FeatureId, FeatureTable};
use crate::geom::{Point, POINTS_EQUAL_EPSILON};
use crate::profiles::VehicleModel;
use rstar::primitives::{GeomWithData, Line};
use rstar::RTree;
use std::cmp::Ordering;

type VertexRecord = GeomWithData<[f64; 2], (u32, u32)>;
type SegmentRecord = GeomWithData<Line<[f64; 2]>, (u32, u32)>;

/// Spatial index over every vertex and segment of a tile's road features.
pub struct RoadSpatialIndex {
    vertices: RTree<VertexRecord>,
    segments: RTree<SegmentRecord>,
}

impl RoadSpatialIndex {
    /// Indexes the features the model classifies as roads.
    pub fn build(features: &FeatureTable, model: &dyn VehicleModel) -> Self {
        let mut vertices = Vec::new();
        let mut segments = Vec::new();
        features.for_each(|feature, id| {
            if !model.is_road(feature) {
                return;
            }
            for i in 0..feature.point_count() {
                let p = feature.point(i);
                vertices.push(GeomWithData::new([p.x, p.y], (id.0, i as u32)));
                if i + 1 < feature.point_count() {
                    let q = feature.point(i + 1);
                    segments.push(GeomWithData::new(
                        Line::new([p.x, p.y], [q.x, q.y]),
                        (id.0, i as u32),
                    ));
                }
            }
        });
        RoadSpatialIndex {
            vertices: RTree::bulk_load(vertices),
            segments: RTree::bulk_load(segments),
        }
    }

    /// Road features with a polyline vertex at `point`, deduplicated, in
    /// feature-id order.
    pub fn features_at(&self, point: &Point) -> Vec<FeatureId> {
        let eps2 = POINTS_EQUAL_EPSILON * POINTS_EQUAL_EPSILON;
        let mut ids: Vec<u32> = self
            .vertices
            .locate_within_distance([point.x, point.y], eps2)
            .map(|record| record.data.0)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids.into_iter().map(FeatureId).collect()
    }

    /// Up to `count` segments closest to `point`, ascending by squared
    /// distance; exact ties settle by (feature, segment).
    pub fn closest_segments(&self, point: &Point, count: usize) -> Vec<(FeatureId, u32)> {
        if count == 0 {
            return Vec::new();
        }
        let mut hits: Vec<(f64, u32, u32)> = Vec::new();
        for (record, d2) in self
            .segments
            .nearest_neighbor_iter_with_distance_2(&[point.x, point.y])
        {
            if hits.len() >= count {
                // Candidates arrive in ascending order; keep draining only
                // while tied with the current cutoff.
                let cutoff = hits[hits.len() - 1].0;
                if d2 > cutoff {
                    break;
                }
            }
            hits.push((d2, record.data.0, record.data.1));
        }
        hits.sort_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .unwrap_or(Ordering::Equal)
                .then(a.1.cmp(&b.1))
                .then(a.2.cmp(&b.2))
        });
        hits.truncate(count);
        hits.into_iter()
            .map(|(_, feature, segment)| (FeatureId(feature), segment))
            .collect()
    }
}
