//! Tile features: the raw map objects the routing index is built from.

use crate::geom::Point;
use serde::{Deserialize, Serialize};

/// Altitude in metres above sea level.
pub type Altitude = i16;

/// Marker for "altitude unknown".
pub const ALTITUDE_UNKNOWN: Altitude = i16::MIN;

/// Altitude assumed when a source carries no elevation data.
pub const ALTITUDE_DEFAULT: Altitude = 0;

/// Identifier of a feature inside one tile's feature table.
///
/// The invalid value marks fake edges; everything else indexes the table.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct FeatureId(pub u32);

impl FeatureId {
    pub const INVALID: FeatureId = FeatureId(u32::MAX);

    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID
    }
}

/// One map feature: a tagged polyline with optional per-vertex altitudes.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Feature {
    tags: Vec<(String, String)>,
    points: Vec<Point>,
    altitudes: Vec<Altitude>,
}

impl Feature {
    pub fn new(tags: Vec<(String, String)>, points: Vec<Point>) -> Self {
        Feature {
            tags,
            points,
            altitudes: Vec::new(),
        }
    }

    pub fn with_altitudes(mut self, altitudes: Vec<Altitude>) -> Self {
        self.altitudes = altitudes;
        self
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn tags(&self) -> &[(String, String)] {
        &self.tags
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn point(&self, i: usize) -> Point {
        self.points[i]
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Altitude of vertex `i`, or [`ALTITUDE_UNKNOWN`] when not surveyed.
    pub fn altitude(&self, i: usize) -> Altitude {
        self.altitudes.get(i).copied().unwrap_or(ALTITUDE_UNKNOWN)
    }
}

/// The tile's feature table. Iteration order is feature-id order and is the
/// deterministic order every build pass sees.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FeatureTable {
    features: Vec<Feature>,
}

impl FeatureTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, feature: Feature) -> FeatureId {
        let id = FeatureId(self.features.len() as u32);
        self.features.push(feature);
        id
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn get(&self, id: FeatureId) -> Option<&Feature> {
        if !id.is_valid() {
            return None;
        }
        self.features.get(id.0 as usize)
    }

    pub fn for_each(&self, mut f: impl FnMut(&Feature, FeatureId)) {
        for (i, feature) in self.features.iter().enumerate() {
            f(feature, FeatureId(i as u32));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highway(kind: &str) -> Vec<(String, String)> {
        vec![("highway".to_string(), kind.to_string())]
    }

    #[test]
    fn test_invalid_feature_id() {
        assert!(!FeatureId::INVALID.is_valid());
        assert!(FeatureId(0).is_valid());
    }

    #[test]
    fn test_altitude_fallback() {
        let plain = Feature::new(highway("residential"), vec![Point::new(0.0, 0.0)]);
        assert_eq!(plain.altitude(0), ALTITUDE_UNKNOWN);

        let surveyed = Feature::new(
            highway("residential"),
            vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)],
        )
        .with_altitudes(vec![120, 125]);
        assert_eq!(surveyed.altitude(1), 125);
    }

    #[test]
    fn test_table_iteration_order() {
        let mut table = FeatureTable::new();
        let a = table.push(Feature::new(highway("primary"), vec![]));
        let b = table.push(Feature::new(highway("residential"), vec![]));
        assert_eq!((a, b), (FeatureId(0), FeatureId(1)));

        let mut seen = Vec::new();
        table.for_each(|_, id| seen.push(id));
        assert_eq!(seen, vec![a, b]);
    }
}
