//! Best-first wave propagation over the index graph.

use crate::index_graph::{IndexGraph, Segment};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

struct QueueEntry {
    weight: f64,
    segment: Segment,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap on weight; equal weights settle in segment order.
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.segment.cmp(&self.segment))
    }
}

/// Runs a Dijkstra wave from `start` over outgoing edges, filling
/// `distances` with the finalised costs. The wave runs until the queue is
/// exhausted or `should_stop` returns true for a dequeued segment (that
/// segment's distance is still recorded). Edge weights must be
/// non-negative; the heuristic is zero.
pub fn propagate_wave(
    graph: &IndexGraph,
    start: Segment,
    mut should_stop: impl FnMut(&Segment) -> bool,
    distances: &mut BTreeMap<Segment, f64>,
) {
    distances.clear();
    let mut best: BTreeMap<Segment, f64> = BTreeMap::new();
    let mut queue = BinaryHeap::new();
    best.insert(start, 0.0);
    queue.push(QueueEntry {
        weight: 0.0,
        segment: start,
    });

    while let Some(QueueEntry { weight, segment }) = queue.pop() {
        if distances.contains_key(&segment) {
            continue;
        }
        distances.insert(segment, weight);
        if should_stop(&segment) {
            break;
        }
        for edge in graph.edge_list(&segment, true) {
            let candidate = weight + edge.weight;
            match best.get(&edge.target) {
                Some(&known) if known <= candidate => {}
                _ => {
                    best.insert(edge.target, candidate);
                    queue.push(QueueEntry {
                        weight: candidate,
                        segment: edge.target,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::EdgeEstimator;
    use crate::features::{Feature, FeatureTable};
    use crate::geom::Point;
    use crate::index_graph::{GeometryLoader, Joint, RoadPoint};
    use crate::profiles::{self, VehicleType};
    use std::sync::Arc;

    fn residential(points: &[(f64, f64)]) -> Feature {
        Feature::new(
            vec![("highway".to_string(), "residential".to_string())],
            points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        )
    }

    fn line_graph() -> IndexGraph {
        // One straight road of four vertices, 100 m per segment.
        let mut table = FeatureTable::new();
        table.push(residential(&[
            (0.0, 0.0),
            (100.0, 0.0),
            (200.0, 0.0),
            (300.0, 0.0),
        ]));
        let model = profiles::model_for_country(VehicleType::Car, "belgium").unwrap();
        let loader = GeometryLoader::new(Arc::new(table), model);
        let mut graph = IndexGraph::new(loader, EdgeEstimator::with_max_speed(110.0));
        graph.import(Vec::new());
        graph
    }

    #[test]
    fn test_wave_reaches_whole_road() {
        let graph = line_graph();
        let mut distances = BTreeMap::new();
        propagate_wave(&graph, Segment::new(0, 0, true), |_| false, &mut distances);

        assert_eq!(distances[&Segment::new(0, 0, true)], 0.0);
        // 100 m at 30 km/h per downstream segment.
        let per_segment = 100.0 / (30.0 * 1000.0 / 3600.0);
        let d1 = distances[&Segment::new(0, 1, true)];
        let d2 = distances[&Segment::new(0, 2, true)];
        assert!((d1 - per_segment).abs() < 1e-9);
        assert!((d2 - 2.0 * per_segment).abs() < 1e-9);
    }

    #[test]
    fn test_wave_crosses_joints() {
        // A: (0,0)-(100,0); B: (100,0)-(100,100); connected at (100,0).
        let mut table = FeatureTable::new();
        table.push(residential(&[(0.0, 0.0), (100.0, 0.0)]));
        table.push(residential(&[(100.0, 0.0), (100.0, 100.0)]));
        let model = profiles::model_for_country(VehicleType::Car, "belgium").unwrap();
        let loader = GeometryLoader::new(Arc::new(table), model);
        let mut graph = IndexGraph::new(loader, EdgeEstimator::with_max_speed(110.0));
        graph.import(vec![Joint::from_iter([
            RoadPoint::new(0, 1),
            RoadPoint::new(1, 0),
        ])]);

        let mut distances = BTreeMap::new();
        propagate_wave(&graph, Segment::new(0, 0, true), |_| false, &mut distances);
        assert!(distances.contains_key(&Segment::new(1, 0, true)));
    }

    #[test]
    fn test_stop_predicate_halts_wave() {
        let graph = line_graph();
        let target = Segment::new(0, 1, true);
        let mut distances = BTreeMap::new();
        propagate_wave(
            &graph,
            Segment::new(0, 0, true),
            |segment| *segment == target,
            &mut distances,
        );
        // The stopping segment is finalised, later ones are not.
        assert!(distances.contains_key(&target));
        assert!(!distances.contains_key(&Segment::new(0, 2, true)));
    }

    #[test]
    fn test_disconnected_segment_unreached() {
        let mut table = FeatureTable::new();
        table.push(residential(&[(0.0, 0.0), (100.0, 0.0)]));
        table.push(residential(&[(500.0, 500.0), (600.0, 500.0)]));
        let model = profiles::model_for_country(VehicleType::Car, "belgium").unwrap();
        let loader = GeometryLoader::new(Arc::new(table), model);
        let mut graph = IndexGraph::new(loader, EdgeEstimator::with_max_speed(110.0));
        graph.import(Vec::new());

        let mut distances = BTreeMap::new();
        propagate_wave(&graph, Segment::new(0, 0, true), |_| false, &mut distances);
        assert!(!distances.keys().any(|s| s.feature_id == 1));
    }
}
