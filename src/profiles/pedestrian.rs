//! Pedestrian profile: highway-tag semantics for walking.

use super::{is_denied, VehicleModel};
use crate::features::Feature;

pub struct PedestrianModel;

impl PedestrianModel {
    pub fn for_country(_country: &str) -> Option<PedestrianModel> {
        Some(PedestrianModel)
    }

    fn base_speed_kmph(highway: &str) -> Option<f64> {
        let speed = match highway {
            "footway" | "pedestrian" | "steps" => 5.0,
            "path" | "cycleway" => 4.5,
            "living_street" | "residential" | "unclassified" => 5.0,
            "service" | "track" => 4.5,
            "tertiary" | "secondary" | "primary" => 4.5,
            _ => return None,
        };
        Some(speed)
    }
}

impl VehicleModel for PedestrianModel {
    fn is_road(&self, feature: &Feature) -> bool {
        let Some(highway) = feature.tag("highway") else {
            return false;
        };
        if Self::base_speed_kmph(highway).is_none() {
            return false;
        }
        !(is_denied(feature.tag("foot")) || is_denied(feature.tag("access")))
    }

    fn is_one_way(&self, _feature: &Feature) -> bool {
        // One-way restrictions do not apply on foot.
        false
    }

    fn speed_kmph(&self, feature: &Feature) -> f64 {
        feature
            .tag("highway")
            .and_then(Self::base_speed_kmph)
            .unwrap_or(0.0)
    }

    fn max_speed_kmph(&self) -> f64 {
        5.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;

    fn feature(tags: &[(&str, &str)]) -> Feature {
        Feature::new(
            tags.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)],
        )
    }

    #[test]
    fn test_motorway_is_not_walkable() {
        let model = PedestrianModel::for_country("belgium").unwrap();
        assert!(!model.is_road(&feature(&[("highway", "motorway")])));
        assert!(model.is_road(&feature(&[("highway", "footway")])));
    }

    #[test]
    fn test_oneway_ignored_on_foot() {
        let model = PedestrianModel::for_country("belgium").unwrap();
        assert!(!model.is_one_way(&feature(&[
            ("highway", "residential"),
            ("oneway", "yes")
        ])));
    }

    #[test]
    fn test_foot_access_denied() {
        let model = PedestrianModel::for_country("belgium").unwrap();
        assert!(!model.is_road(&feature(&[("highway", "path"), ("foot", "no")])));
    }
}
