//! Bicycle profile: highway-tag semantics for cycle routing.

use super::{is_denied, VehicleModel};
use crate::features::Feature;

pub struct BicycleModel {
    footways_allowed: bool,
}

impl BicycleModel {
    /// Country-specialised model. Some countries open footways to cyclists
    /// by default.
    pub fn for_country(country: &str) -> Option<BicycleModel> {
        let footways_allowed = matches!(country, "netherlands" | "denmark" | "belgium");
        Some(BicycleModel { footways_allowed })
    }

    fn base_speed_kmph(&self, highway: &str) -> Option<f64> {
        let speed = match highway {
            "cycleway" => 20.0,
            "path" => 12.0,
            "track" => 12.0,
            "footway" | "pedestrian" => {
                if self.footways_allowed {
                    10.0
                } else {
                    return None;
                }
            }
            "living_street" => 15.0,
            "residential" | "service" => 15.0,
            "unclassified" | "tertiary" | "tertiary_link" => 18.0,
            "secondary" | "secondary_link" => 18.0,
            "primary" | "primary_link" => 18.0,
            _ => return None,
        };
        Some(speed)
    }
}

impl VehicleModel for BicycleModel {
    fn is_road(&self, feature: &Feature) -> bool {
        let Some(highway) = feature.tag("highway") else {
            return false;
        };
        if self.base_speed_kmph(highway).is_none() {
            return false;
        }
        !(is_denied(feature.tag("bicycle")) || is_denied(feature.tag("access")))
    }

    fn is_one_way(&self, feature: &Feature) -> bool {
        // A contraflow exemption lifts the restriction for cyclists.
        if feature.tag("oneway:bicycle") == Some("no")
            || feature.tag("cycleway") == Some("opposite")
        {
            return false;
        }
        matches!(
            feature.tag("oneway"),
            Some("yes") | Some("1") | Some("true") | Some("-1") | Some("reverse")
        ) || feature.tag("junction") == Some("roundabout")
    }

    fn speed_kmph(&self, feature: &Feature) -> f64 {
        feature
            .tag("highway")
            .and_then(|h| self.base_speed_kmph(h))
            .unwrap_or(0.0)
    }

    fn max_speed_kmph(&self) -> f64 {
        20.0
    }
}
