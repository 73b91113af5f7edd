//! The compact per-tile routing graph: features reduced to joints where
//! their vertices coincide, traversed segment by segment.

use crate::estimator::EdgeEstimator;
use crate::features::{FeatureId, FeatureTable};
use crate::geom::Point;
use crate::profiles::VehicleModel;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

/// One vertex of one feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoadPoint {
    pub feature_id: u32,
    pub point_id: u32,
}

impl RoadPoint {
    pub fn new(feature_id: u32, point_id: u32) -> Self {
        RoadPoint {
            feature_id,
            point_id,
        }
    }
}

/// The equivalence class of feature vertices sharing one location key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Joint {
    points: Vec<RoadPoint>,
}

impl Joint {
    pub fn add(&mut self, point: RoadPoint) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[RoadPoint] {
        &self.points
    }
}

impl FromIterator<RoadPoint> for Joint {
    fn from_iter<T: IntoIterator<Item = RoadPoint>>(iter: T) -> Self {
        Joint {
            points: iter.into_iter().collect(),
        }
    }
}

/// A directed traversal of one feature segment. Field order gives the
/// deterministic ordering used by the wave's tie-break.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Segment {
    pub feature_id: u32,
    pub segment_idx: u32,
    pub forward: bool,
}

impl Segment {
    pub fn new(feature_id: u32, segment_idx: u32, forward: bool) -> Self {
        Segment {
            feature_id,
            segment_idx,
            forward,
        }
    }

    /// Road point this traversal leaves from.
    pub fn start_point(&self) -> RoadPoint {
        let point_id = if self.forward {
            self.segment_idx
        } else {
            self.segment_idx + 1
        };
        RoadPoint::new(self.feature_id, point_id)
    }

    /// Road point this traversal arrives at.
    pub fn end_point(&self) -> RoadPoint {
        let point_id = if self.forward {
            self.segment_idx + 1
        } else {
            self.segment_idx
        };
        RoadPoint::new(self.feature_id, point_id)
    }
}

/// An available move between segments, with its traversal cost.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentEdge {
    pub target: Segment,
    pub weight: f64,
}

/// Per-feature routing geometry as seen by the active profile.
#[derive(Clone, Debug)]
pub struct RoadGeometry {
    pub points: Vec<Point>,
    pub speed_kmph: f64,
    pub one_way: bool,
}

impl RoadGeometry {
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

/// Loads and caches per-feature geometry for the index graph. Owned by the
/// graph after load; the build pipeline is single-threaded per tile.
pub struct GeometryLoader {
    features: Arc<FeatureTable>,
    model: Arc<dyn VehicleModel>,
    cache: RefCell<HashMap<u32, Arc<RoadGeometry>>>,
}

impl GeometryLoader {
    pub fn new(features: Arc<FeatureTable>, model: Arc<dyn VehicleModel>) -> Self {
        GeometryLoader {
            features,
            model,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Geometry of one feature, or `None` when the active profile does not
    /// consider it a road.
    pub fn road(&self, feature_id: u32) -> Option<Arc<RoadGeometry>> {
        if let Some(road) = self.cache.borrow().get(&feature_id) {
            return Some(road.clone());
        }
        let feature = self.features.get(FeatureId(feature_id))?;
        if !self.model.is_road(feature) {
            return None;
        }
        let road = Arc::new(RoadGeometry {
            points: feature.points().to_vec(),
            speed_kmph: self.model.speed_kmph(feature),
            one_way: self.model.is_one_way(feature),
        });
        self.cache.borrow_mut().insert(feature_id, road.clone());
        Some(road)
    }
}

/// The routable per-tile graph: the joint table plus geometry and weights.
pub struct IndexGraph {
    geometry: GeometryLoader,
    estimator: EdgeEstimator,
    // feature id -> point id -> joint id
    roads: HashMap<u32, HashMap<u32, u32>>,
    joints: Vec<Joint>,
}

impl IndexGraph {
    pub fn new(geometry: GeometryLoader, estimator: EdgeEstimator) -> Self {
        IndexGraph {
            geometry,
            estimator,
            roads: HashMap::new(),
            joints: Vec::new(),
        }
    }

    /// Installs the joint table, indexing every member road point.
    pub fn import(&mut self, joints: Vec<Joint>) {
        self.roads.clear();
        for (joint_id, joint) in joints.iter().enumerate() {
            for point in joint.points() {
                self.roads
                    .entry(point.feature_id)
                    .or_default()
                    .insert(point.point_id, joint_id as u32);
            }
        }
        self.joints = joints;
    }

    pub fn num_joints(&self) -> usize {
        self.joints.len()
    }

    pub fn num_roads(&self) -> usize {
        self.roads.len()
    }

    pub fn num_points(&self) -> usize {
        self.joints.iter().map(Joint::len).sum()
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    fn joint_at(&self, point: RoadPoint) -> Option<u32> {
        self.roads
            .get(&point.feature_id)
            .and_then(|points| points.get(&point.point_id))
            .copied()
    }

    /// Moves leaving (`outgoing`) or arriving at (`!outgoing`) `from`. The
    /// pivot is the traversal's end point for outgoing edges and its start
    /// point for ingoing ones; every road point of the pivot's joint
    /// contributes its own continuations.
    pub fn edge_list(&self, from: &Segment, outgoing: bool) -> Vec<SegmentEdge> {
        let pivot = if outgoing {
            from.end_point()
        } else {
            from.start_point()
        };
        let mut edges = Vec::new();
        match self.joint_at(pivot) {
            Some(joint_id) => {
                for &point in self.joints[joint_id as usize].points() {
                    self.neighbor_edges(from, point, outgoing, &mut edges);
                }
            }
            None => self.neighbor_edges(from, pivot, outgoing, &mut edges),
        }
        edges
    }

    fn neighbor_edges(
        &self,
        from: &Segment,
        point: RoadPoint,
        outgoing: bool,
        edges: &mut Vec<SegmentEdge>,
    ) {
        let Some(road) = self.geometry.road(point.feature_id) else {
            return;
        };
        let count = road.point_count() as u32;
        if point.point_id >= count {
            return;
        }
        if outgoing {
            if point.point_id + 1 < count {
                let target = Segment::new(point.feature_id, point.point_id, true);
                self.push_edge(from, target, outgoing, edges);
            }
            if point.point_id > 0 && !road.one_way {
                let target = Segment::new(point.feature_id, point.point_id - 1, false);
                self.push_edge(from, target, outgoing, edges);
            }
        } else {
            if point.point_id > 0 {
                let target = Segment::new(point.feature_id, point.point_id - 1, true);
                self.push_edge(from, target, outgoing, edges);
            }
            if point.point_id + 1 < count && !road.one_way {
                let target = Segment::new(point.feature_id, point.point_id, false);
                self.push_edge(from, target, outgoing, edges);
            }
        }
    }

    fn push_edge(
        &self,
        from: &Segment,
        target: Segment,
        outgoing: bool,
        edges: &mut Vec<SegmentEdge>,
    ) {
        // The traversal being paid for is the one entered (outgoing) or the
        // one left behind (ingoing).
        let weighted = if outgoing { &target } else { from };
        let Some(weight) = self.segment_weight(weighted) else {
            return;
        };
        edges.push(SegmentEdge { target, weight });
    }

    fn segment_weight(&self, segment: &Segment) -> Option<f64> {
        let road = self.geometry.road(segment.feature_id)?;
        if segment.segment_idx as usize >= road.segment_count() {
            return None;
        }
        Some(self.estimator.segment_weight(&road, segment.segment_idx))
    }
}
