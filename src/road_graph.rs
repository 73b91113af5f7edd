//! The queryable road network: junctions, directed edges over feature
//! segments, and the per-request fake-edge overlay that attaches routing
//! endpoints to the graph.
//!
//! One [`RoadGraph`] instance serves one routing request. Queries only read
//! the shared underlying [`RoadSource`]; the overlay is private to the
//! request, so concurrent requests each build their own graph over the same
//! source.

use crate::features::{Altitude, FeatureId, ALTITUDE_UNKNOWN};
use crate::geom::{self, Point};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A node of the road network. Identity and ordering are those of the
/// point; the altitude rides along for downstream consumers and does not
/// take part in comparisons.
#[derive(Clone, Copy, Debug)]
pub struct Junction {
    point: Point,
    altitude: Altitude,
}

impl Junction {
    pub fn new(point: Point, altitude: Altitude) -> Self {
        Junction { point, altitude }
    }

    pub fn point(&self) -> &Point {
        &self.point
    }

    pub fn altitude(&self) -> Altitude {
        self.altitude
    }

    /// Epsilon equality on the underlying points.
    pub fn almost_equal(&self, other: &Junction) -> bool {
        self.point.almost_equal(&other.point)
    }
}

impl PartialEq for Junction {
    fn eq(&self, other: &Self) -> bool {
        self.point == other.point
    }
}

impl Eq for Junction {}

impl PartialOrd for Junction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Junction {
    fn cmp(&self, other: &Self) -> Ordering {
        self.point.total_cmp(&other.point)
    }
}

pub fn junctions_to_points(junctions: &[Junction]) -> Vec<Point> {
    junctions.iter().map(|j| *j.point()).collect()
}

pub fn junctions_to_altitudes(junctions: &[Junction]) -> Vec<Altitude> {
    junctions.iter().map(|j| j.altitude()).collect()
}

/// A directed traversal of one segment of one feature.
///
/// Fake edges carry [`FeatureId::INVALID`]; they exist only in the overlay
/// and connect routing endpoints to the real network.
#[derive(Clone, Debug)]
pub struct Edge {
    feature_id: FeatureId,
    forward: bool,
    part_of_real: bool,
    segment_index: u32,
    start: Junction,
    end: Junction,
}

impl Edge {
    pub fn real(
        feature_id: FeatureId,
        forward: bool,
        segment_index: u32,
        start: Junction,
        end: Junction,
    ) -> Self {
        Edge {
            feature_id,
            forward,
            part_of_real: true,
            segment_index,
            start,
            end,
        }
    }

    pub fn fake(start: Junction, end: Junction, part_of_real: bool) -> Self {
        Edge {
            feature_id: FeatureId::INVALID,
            forward: true,
            part_of_real,
            segment_index: 0,
            start,
            end,
        }
    }

    pub fn feature_id(&self) -> FeatureId {
        self.feature_id
    }

    pub fn is_forward(&self) -> bool {
        self.forward
    }

    pub fn segment_index(&self) -> u32 {
        self.segment_index
    }

    pub fn start_junction(&self) -> Junction {
        self.start
    }

    pub fn end_junction(&self) -> Junction {
        self.end
    }

    pub fn is_fake(&self) -> bool {
        !self.feature_id.is_valid()
    }

    pub fn is_part_of_real(&self) -> bool {
        self.part_of_real
    }

    /// The same segment traversed the other way.
    pub fn reversed(&self) -> Edge {
        Edge {
            feature_id: self.feature_id,
            forward: !self.forward,
            part_of_real: self.part_of_real,
            segment_index: self.segment_index,
            start: self.end,
            end: self.start,
        }
    }

    pub fn same_road_segment_and_direction(&self, other: &Edge) -> bool {
        self.feature_id == other.feature_id
            && self.segment_index == other.segment_index
            && self.forward == other.forward
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.feature_id == other.feature_id
            && self.forward == other.forward
            && self.part_of_real == other.part_of_real
            && self.segment_index == other.segment_index
            && self.start == other.start
            && self.end == other.end
    }
}

impl Eq for Edge {}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Edge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.feature_id
            .cmp(&other.feature_id)
            .then_with(|| self.segment_index.cmp(&other.segment_index))
            .then_with(|| self.forward.cmp(&other.forward))
            .then_with(|| self.start.cmp(&other.start))
            .then_with(|| self.end.cmp(&other.end))
            .then_with(|| self.part_of_real.cmp(&other.part_of_real))
    }
}

/// Routing-relevant metadata of one feature.
#[derive(Clone, Debug)]
pub struct RoadInfo {
    pub junctions: SmallVec<[Junction; 32]>,
    pub speed_kmph: f64,
    pub bidirectional: bool,
}

impl RoadInfo {
    pub fn new(
        bidirectional: bool,
        speed_kmph: f64,
        junctions: impl IntoIterator<Item = Junction>,
    ) -> Self {
        RoadInfo {
            junctions: junctions.into_iter().collect(),
            speed_kmph,
            bidirectional,
        }
    }
}

/// Whether one-way tags restrict edge emission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    ObeyOnewayTag,
    IgnoreOnewayTag,
}

/// Which side of a cross point a loader emits edges for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrossEdgeKind {
    Outgoing,
    Ingoing,
}

/// Collects the real edges incident to a cross point from every feature
/// whose polyline passes through it.
pub struct CrossEdgesLoader<'a> {
    cross: Junction,
    mode: Mode,
    kind: CrossEdgeKind,
    edges: &'a mut Vec<Edge>,
}

impl<'a> CrossEdgesLoader<'a> {
    pub fn new(
        kind: CrossEdgeKind,
        cross: Junction,
        mode: Mode,
        edges: &'a mut Vec<Edge>,
    ) -> Self {
        CrossEdgesLoader {
            cross,
            mode,
            kind,
            edges,
        }
    }

    pub fn load(&mut self, feature_id: FeatureId, info: &RoadInfo) {
        let cross = self.cross;
        let mode = self.mode;
        let kind = self.kind;
        let edges = &mut *self.edges;
        for_each_incident_segment(&cross, info, |segment_index, neighbor, forward| {
            match kind {
                CrossEdgeKind::Outgoing => {
                    if forward || info.bidirectional || mode == Mode::IgnoreOnewayTag {
                        edges.push(Edge::real(feature_id, forward, segment_index, cross, neighbor));
                    }
                }
                CrossEdgeKind::Ingoing => {
                    if !forward || info.bidirectional || mode == Mode::IgnoreOnewayTag {
                        edges.push(Edge::real(
                            feature_id,
                            !forward,
                            segment_index,
                            neighbor,
                            cross,
                        ));
                    }
                }
            }
        });
    }
}

/// Scans the polyline for vertices at the cross point. For each match the
/// callback fires for the segment towards the successor (`forward = true`,
/// the head case) and towards the predecessor (`forward = false`, the tail
/// case).
fn for_each_incident_segment(
    cross: &Junction,
    info: &RoadInfo,
    mut f: impl FnMut(u32, Junction, bool),
) {
    for i in 0..info.junctions.len() {
        if !cross.point().almost_equal(info.junctions[i].point()) {
            continue;
        }
        if i + 1 < info.junctions.len() {
            f(i as u32, info.junctions[i + 1], true);
        }
        if i > 0 {
            f((i - 1) as u32, info.junctions[i - 1], false);
        }
    }
}

/// Supplies the per-feature data a [`RoadGraph`] is a view over.
pub trait RoadSource {
    /// Routing metadata for one feature per the active vehicle profile, or
    /// `None` when the feature is not a road for that profile.
    fn road_info(&self, feature_id: FeatureId) -> Option<RoadInfo>;

    /// Travel speed for one feature, km/h.
    fn speed_kmph(&self, feature_id: FeatureId) -> Option<f64>;

    /// Fastest speed of the active profile, km/h.
    fn max_speed_kmph(&self) -> f64;

    /// Classification tags of one feature, as "key=value" strings.
    fn feature_types(&self, feature_id: FeatureId) -> Vec<String>;

    /// Calls `f` for every road feature with a polyline vertex at `point`.
    fn for_each_road_at(&self, point: &Point, f: &mut dyn FnMut(FeatureId, &RoadInfo));

    /// Up to `count` (feature, segment) pairs closest to `point`, ascending
    /// by squared distance to the projection, ties by (feature, segment).
    fn closest_segments(&self, point: &Point, count: usize) -> Vec<(FeatureId, u32)>;

    /// Drop any caches.
    fn clear_state(&self) {}
}

/// A road network view with a transient fake-edge overlay.
pub struct RoadGraph<S> {
    source: S,
    mode: Mode,
    fake_outgoing: BTreeMap<Junction, Vec<Edge>>,
    fake_ingoing: BTreeMap<Junction, Vec<Edge>>,
}

impl<S: RoadSource> RoadGraph<S> {
    pub fn new(source: S, mode: Mode) -> Self {
        RoadGraph {
            source,
            mode,
            fake_outgoing: BTreeMap::new(),
            fake_ingoing: BTreeMap::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Real and fake edges leaving `junction`.
    pub fn outgoing_edges(&self, junction: &Junction) -> Vec<Edge> {
        let mut edges = self.regular_outgoing_edges(junction);
        edges.extend(self.fake_outgoing_edges(junction));
        edges
    }

    /// Real and fake edges arriving at `junction`.
    pub fn ingoing_edges(&self, junction: &Junction) -> Vec<Edge> {
        let mut edges = self.regular_ingoing_edges(junction);
        edges.extend(self.fake_ingoing_edges(junction));
        edges
    }

    pub fn regular_outgoing_edges(&self, junction: &Junction) -> Vec<Edge> {
        self.load_cross_edges(junction, CrossEdgeKind::Outgoing)
    }

    pub fn regular_ingoing_edges(&self, junction: &Junction) -> Vec<Edge> {
        self.load_cross_edges(junction, CrossEdgeKind::Ingoing)
    }

    pub fn fake_outgoing_edges(&self, junction: &Junction) -> Vec<Edge> {
        self.fake_outgoing.get(junction).cloned().unwrap_or_default()
    }

    pub fn fake_ingoing_edges(&self, junction: &Junction) -> Vec<Edge> {
        self.fake_ingoing.get(junction).cloned().unwrap_or_default()
    }

    fn load_cross_edges(&self, junction: &Junction, kind: CrossEdgeKind) -> Vec<Edge> {
        let mut edges = Vec::new();
        let mut loader = CrossEdgesLoader::new(kind, *junction, self.mode, &mut edges);
        self.source
            .for_each_road_at(junction.point(), &mut |id, info| loader.load(id, info));
        edges
    }

    pub fn max_speed_kmph(&self) -> f64 {
        self.source.max_speed_kmph()
    }

    /// Travel speed on one feature, km/h.
    pub fn speed_kmph(&self, feature_id: FeatureId) -> f64 {
        self.source
            .speed_kmph(feature_id)
            .unwrap_or_else(|| self.max_speed_kmph())
    }

    /// Travel speed along one edge, km/h. Fake edges get the graph's
    /// maximum: their true cost is decided by the estimator downstream.
    pub fn edge_speed_kmph(&self, edge: &Edge) -> f64 {
        if edge.is_fake() {
            self.max_speed_kmph()
        } else {
            self.speed_kmph(edge.feature_id())
        }
    }

    pub fn road_info(&self, feature_id: FeatureId) -> Option<RoadInfo> {
        self.source.road_info(feature_id)
    }

    /// Up to `count` closest edges with their projected junctions, ascending
    /// by distance. The projection's altitude is interpolated between the
    /// segment endpoints when both are known.
    pub fn find_closest_edges(&self, point: &Point, count: usize) -> Vec<(Edge, Junction)> {
        let mut result = Vec::new();
        for (feature_id, segment_index) in self.source.closest_segments(point, count) {
            let Some(info) = self.source.road_info(feature_id) else {
                continue;
            };
            let i = segment_index as usize;
            if i + 1 >= info.junctions.len() {
                continue;
            }
            let a = info.junctions[i];
            let b = info.junctions[i + 1];
            let projection = geom::project_onto_segment(point, a.point(), b.point());
            let altitude = interpolate_altitude(&a, &b, &projection);
            result.push((
                Edge::real(feature_id, true, segment_index, a, b),
                Junction::new(projection, altitude),
            ));
        }
        result
    }

    /// Invokes `f` for every feature whose polyline has a vertex at `point`.
    pub fn for_each_feature_closest_to_cross(
        &self,
        point: &Point,
        f: &mut dyn FnMut(FeatureId, &RoadInfo),
    ) {
        self.source.for_each_road_at(point, f);
    }

    pub fn feature_types(&self, feature_id: FeatureId) -> Vec<String> {
        self.source.feature_types(feature_id)
    }

    pub fn edge_types(&self, edge: &Edge) -> Vec<String> {
        if edge.is_fake() {
            return Vec::new();
        }
        self.feature_types(edge.feature_id())
    }

    pub fn junction_types(&self, junction: &Junction) -> Vec<String> {
        let mut types = Vec::new();
        self.source
            .for_each_road_at(junction.point(), &mut |id, _info| {
                if types.is_empty() {
                    types = self.source.feature_types(id);
                }
            });
        types
    }

    /// Splits each vicinity edge at its projection and wires `junction` to
    /// the projections with paired fake edges. The overlay is additive.
    pub fn add_fake_edges(&mut self, junction: &Junction, vicinities: &[(Edge, Junction)]) {
        for (edge, projection) in vicinities {
            let a = edge.start_junction();
            let b = edge.end_junction();
            let p = *projection;
            let mut fakes: Vec<Edge> = Vec::new();
            if !p.almost_equal(&a) {
                fakes.push(Edge::fake(a, p, true));
                fakes.push(Edge::fake(p, a, true));
            }
            if !p.almost_equal(&b) {
                fakes.push(Edge::fake(p, b, true));
                fakes.push(Edge::fake(b, p, true));
            }
            if !p.almost_equal(junction) {
                fakes.push(Edge::fake(*junction, p, true));
                fakes.push(Edge::fake(p, *junction, true));
            }
            for fake in fakes {
                self.fake_outgoing
                    .entry(fake.start_junction())
                    .or_default()
                    .push(fake.clone());
                self.fake_ingoing
                    .entry(fake.end_junction())
                    .or_default()
                    .push(fake);
            }
        }
    }

    /// Empties both fake overlays.
    pub fn reset_fakes(&mut self) {
        self.fake_outgoing.clear();
        self.fake_ingoing.clear();
    }

    pub fn clear_state(&self) {
        self.source.clear_state();
    }
}

fn interpolate_altitude(a: &Junction, b: &Junction, projection: &Point) -> Altitude {
    if a.altitude() == ALTITUDE_UNKNOWN || b.altitude() == ALTITUDE_UNKNOWN {
        return ALTITUDE_UNKNOWN;
    }
    let total = a.point().distance(b.point());
    if total == 0.0 {
        return a.altitude();
    }
    let t = a.point().distance(projection) / total;
    let altitude = a.altitude() as f64 + (b.altitude() as f64 - a.altitude() as f64) * t;
    altitude.round() as Altitude
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::ALTITUDE_DEFAULT;

    fn junction(x: f64, y: f64) -> Junction {
        Junction::new(Point::new(x, y), ALTITUDE_DEFAULT)
    }

    fn road(bidirectional: bool, speed: f64, points: &[(f64, f64)]) -> RoadInfo {
        RoadInfo::new(
            bidirectional,
            speed,
            points.iter().map(|&(x, y)| junction(x, y)),
        )
    }

    /// Source over a fixed set of roads, without spatial acceleration.
    struct FixtureSource {
        roads: Vec<RoadInfo>,
    }

    impl RoadSource for FixtureSource {
        fn road_info(&self, feature_id: FeatureId) -> Option<RoadInfo> {
            self.roads.get(feature_id.0 as usize).cloned()
        }

        fn speed_kmph(&self, feature_id: FeatureId) -> Option<f64> {
            self.roads.get(feature_id.0 as usize).map(|r| r.speed_kmph)
        }

        fn max_speed_kmph(&self) -> f64 {
            110.0
        }

        fn feature_types(&self, _feature_id: FeatureId) -> Vec<String> {
            vec!["highway=residential".to_string()]
        }

        fn for_each_road_at(&self, point: &Point, f: &mut dyn FnMut(FeatureId, &RoadInfo)) {
            for (i, info) in self.roads.iter().enumerate() {
                if info.junctions.iter().any(|j| j.point().almost_equal(point)) {
                    f(FeatureId(i as u32), info);
                }
            }
        }

        fn closest_segments(&self, point: &Point, count: usize) -> Vec<(FeatureId, u32)> {
            let mut hits: Vec<(f64, u32, u32)> = Vec::new();
            for (i, info) in self.roads.iter().enumerate() {
                for s in 0..info.junctions.len().saturating_sub(1) {
                    let proj = geom::project_onto_segment(
                        point,
                        info.junctions[s].point(),
                        info.junctions[s + 1].point(),
                    );
                    hits.push((proj.squared_distance(point), i as u32, s as u32));
                }
            }
            hits.sort_by(|a, b| {
                a.0.partial_cmp(&b.0)
                    .unwrap_or(Ordering::Equal)
                    .then(a.1.cmp(&b.1))
                    .then(a.2.cmp(&b.2))
            });
            hits.truncate(count);
            hits.into_iter()
                .map(|(_, f, s)| (FeatureId(f), s))
                .collect()
        }
    }

    fn straight_road_graph(mode: Mode) -> RoadGraph<FixtureSource> {
        // P = (0,0) -- (1,0) -- (2,0), bidirectional, 50 km/h
        RoadGraph::new(
            FixtureSource {
                roads: vec![road(true, 50.0, &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)])],
            },
            mode,
        )
    }

    #[test]
    fn test_edge_reverse_involution() {
        let e = Edge::real(FeatureId(3), true, 7, junction(0.0, 0.0), junction(1.0, 0.0));
        let r = e.reversed();
        assert_eq!(r.start_junction(), e.end_junction());
        assert_eq!(r.end_junction(), e.start_junction());
        assert!(!r.is_forward());
        assert_eq!(r.is_part_of_real(), e.is_part_of_real());
        assert_eq!(r.reversed(), e);
    }

    #[test]
    fn test_outgoing_edges_of_interior_junction() {
        let graph = straight_road_graph(Mode::ObeyOnewayTag);
        let edges = graph.outgoing_edges(&junction(1.0, 0.0));
        assert_eq!(edges.len(), 2);
        let forward = edges.iter().find(|e| e.is_forward()).unwrap();
        assert_eq!(forward.segment_index(), 1);
        assert_eq!(forward.end_junction(), junction(2.0, 0.0));
        let backward = edges.iter().find(|e| !e.is_forward()).unwrap();
        assert_eq!(backward.segment_index(), 0);
        assert_eq!(backward.end_junction(), junction(0.0, 0.0));
    }

    #[test]
    fn test_one_outgoing_forward_edge_per_segment() {
        let graph = straight_road_graph(Mode::ObeyOnewayTag);
        for i in 0..2u32 {
            let start = junction(i as f64, 0.0);
            let edges = graph.outgoing_edges(&start);
            let matching: Vec<_> = edges
                .iter()
                .filter(|e| e.is_forward() && e.segment_index() == i)
                .collect();
            assert_eq!(matching.len(), 1, "segment {i}");
        }
    }

    #[test]
    fn test_oneway_obeyed_and_ignored() {
        // F = (0,0) -> (1,0), one-way forward.
        let source = FixtureSource {
            roads: vec![road(false, 50.0, &[(0.0, 0.0), (1.0, 0.0)])],
        };
        let graph = RoadGraph::new(source, Mode::ObeyOnewayTag);
        let start = junction(0.0, 0.0);
        assert_eq!(graph.outgoing_edges(&start).len(), 1);
        assert!(graph.ingoing_edges(&start).is_empty());

        let source = FixtureSource {
            roads: vec![road(false, 50.0, &[(0.0, 0.0), (1.0, 0.0)])],
        };
        let graph = RoadGraph::new(source, Mode::IgnoreOnewayTag);
        assert_eq!(graph.outgoing_edges(&start).len(), 1);
        assert_eq!(graph.ingoing_edges(&start).len(), 1);
    }

    #[test]
    fn test_ingoing_mirrors_outgoing() {
        let graph = straight_road_graph(Mode::ObeyOnewayTag);
        let edges = graph.ingoing_edges(&junction(1.0, 0.0));
        assert_eq!(edges.len(), 2);
        for e in &edges {
            assert_eq!(e.end_junction(), junction(1.0, 0.0));
        }
        let along = edges.iter().find(|e| e.is_forward()).unwrap();
        assert_eq!(along.start_junction(), junction(0.0, 0.0));
        assert_eq!(along.segment_index(), 0);
    }

    #[test]
    fn test_fake_overlay_split_and_reset() {
        let mut graph = straight_road_graph(Mode::ObeyOnewayTag);
        let endpoint = junction(0.5, 0.1);
        let vicinity = graph.find_closest_edges(&Point::new(0.5, 0.1), 1);
        assert_eq!(vicinity.len(), 1);
        assert_eq!(vicinity[0].1, junction(0.5, 0.0));

        graph.add_fake_edges(&endpoint, &vicinity);
        let fake_out = graph.fake_outgoing_edges(&endpoint);
        assert!(fake_out.iter().any(|e| {
            e.is_fake()
                && e.is_part_of_real()
                && e.start_junction() == endpoint
                && e.end_junction() == junction(0.5, 0.0)
        }));

        // The projection is wired to both halves of the split segment.
        let from_projection = graph.fake_outgoing_edges(&junction(0.5, 0.0));
        assert!(from_projection
            .iter()
            .any(|e| e.end_junction() == junction(0.0, 0.0)));
        assert!(from_projection
            .iter()
            .any(|e| e.end_junction() == junction(1.0, 0.0)));

        // Union is disjoint: the regular view is unchanged.
        let regular = graph.regular_outgoing_edges(&endpoint);
        assert!(regular.is_empty());
        let all = graph.outgoing_edges(&endpoint);
        assert_eq!(all.len(), fake_out.len());

        graph.reset_fakes();
        assert!(graph.fake_outgoing_edges(&endpoint).is_empty());
        assert!(graph.fake_ingoing_edges(&endpoint).is_empty());
        assert!(graph.fake_outgoing_edges(&junction(0.5, 0.0)).is_empty());
    }

    #[test]
    fn test_add_fake_edges_is_additive() {
        let mut graph = straight_road_graph(Mode::ObeyOnewayTag);
        let first = junction(0.5, 0.1);
        let second = junction(1.5, 0.1);
        let v1 = graph.find_closest_edges(first.point(), 1);
        graph.add_fake_edges(&first, &v1);
        let before = graph.fake_outgoing_edges(&first).len();
        let v2 = graph.find_closest_edges(second.point(), 1);
        graph.add_fake_edges(&second, &v2);
        assert_eq!(graph.fake_outgoing_edges(&first).len(), before);
        assert!(!graph.fake_outgoing_edges(&second).is_empty());
    }

    #[test]
    fn test_closest_edges_sorted_by_distance() {
        let source = FixtureSource {
            roads: vec![
                road(true, 50.0, &[(0.0, 0.0), (2.0, 0.0)]),
                road(true, 50.0, &[(0.0, 1.0), (2.0, 1.0)]),
            ],
        };
        let graph = RoadGraph::new(source, Mode::ObeyOnewayTag);
        let hits = graph.find_closest_edges(&Point::new(1.0, 0.2), 2);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].0.feature_id(), FeatureId(0));
        assert_eq!(hits[1].0.feature_id(), FeatureId(1));
    }

    #[test]
    fn test_projection_altitude_interpolated() {
        let a = Junction::new(Point::new(0.0, 0.0), 100);
        let b = Junction::new(Point::new(10.0, 0.0), 200);
        let mid = interpolate_altitude(&a, &b, &Point::new(5.0, 0.0));
        assert_eq!(mid, 150);

        let unknown = Junction::new(Point::new(10.0, 0.0), ALTITUDE_UNKNOWN);
        assert_eq!(
            interpolate_altitude(&a, &unknown, &Point::new(5.0, 0.0)),
            ALTITUDE_UNKNOWN
        );
    }

    #[test]
    fn test_junction_conversions() {
        let junctions = vec![
            Junction::new(Point::new(0.0, 0.0), 10),
            Junction::new(Point::new(1.0, 0.0), 20),
        ];
        assert_eq!(
            junctions_to_points(&junctions),
            vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]
        );
        assert_eq!(junctions_to_altitudes(&junctions), vec![10, 20]);
    }

    #[test]
    fn test_same_road_segment_and_direction() {
        let e = Edge::real(FeatureId(1), true, 4, junction(0.0, 0.0), junction(1.0, 0.0));
        let same = Edge::real(FeatureId(1), true, 4, junction(0.1, 0.0), junction(0.9, 0.0));
        assert!(e.same_road_segment_and_direction(&same));
        assert!(!e.same_road_segment_and_direction(&e.reversed()));
    }

    #[test]
    fn test_type_queries() {
        let graph = straight_road_graph(Mode::ObeyOnewayTag);
        let real = Edge::real(
            FeatureId(0),
            true,
            0,
            junction(0.0, 0.0),
            junction(1.0, 0.0),
        );
        assert_eq!(graph.edge_types(&real), vec!["highway=residential"]);
        let fake = Edge::fake(junction(0.0, 0.0), junction(0.5, 0.5), true);
        assert!(graph.edge_types(&fake).is_empty());
        assert_eq!(
            graph.junction_types(&junction(1.0, 0.0)),
            vec!["highway=residential"]
        );
        assert!(graph.junction_types(&junction(9.0, 9.0)).is_empty());
    }

    #[test]
    fn test_fake_edge_speed_is_graph_max() {
        let graph = straight_road_graph(Mode::ObeyOnewayTag);
        let fake = Edge::fake(junction(0.0, 0.0), junction(0.5, 0.5), true);
        assert_eq!(graph.edge_speed_kmph(&fake), graph.max_speed_kmph());
        let real = Edge::real(
            FeatureId(0),
            true,
            0,
            junction(0.0, 0.0),
            junction(1.0, 0.0),
        );
        assert_eq!(graph.edge_speed_kmph(&real), 50.0);
    }
}
