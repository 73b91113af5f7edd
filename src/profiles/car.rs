//! Car profile: highway-tag semantics for automobile routing.

use super::{is_denied, parse_maxspeed, VehicleModel};
use crate::features::Feature;

pub struct CarModel {
    living_street_speed: f64,
}

impl CarModel {
    /// Country-specialised model. Shared-space street speeds differ across
    /// legislations; the default matches most of Europe.
    pub fn for_country(country: &str) -> Option<CarModel> {
        let living_street_speed = match country {
            "germany" | "austria" | "switzerland" => 7.0,
            _ => 10.0,
        };
        Some(CarModel {
            living_street_speed,
        })
    }

    fn base_speed_kmph(&self, highway: &str) -> Option<f64> {
        let speed = match highway {
            "motorway" => 110.0,
            "motorway_link" => 60.0,
            "trunk" => 90.0,
            "trunk_link" => 50.0,
            "primary" => 70.0,
            "primary_link" => 40.0,
            "secondary" => 60.0,
            "secondary_link" => 40.0,
            "tertiary" => 50.0,
            "tertiary_link" => 30.0,
            "unclassified" => 50.0,
            "residential" => 30.0,
            "service" => 20.0,
            "living_street" => self.living_street_speed,
            _ => return None,
        };
        Some(speed)
    }
}

impl VehicleModel for CarModel {
    fn is_road(&self, feature: &Feature) -> bool {
        let Some(highway) = feature.tag("highway") else {
            return false;
        };
        if self.base_speed_kmph(highway).is_none() {
            return false;
        }
        !(is_denied(feature.tag("motor_vehicle"))
            || is_denied(feature.tag("vehicle"))
            || is_denied(feature.tag("access")))
    }

    fn is_one_way(&self, feature: &Feature) -> bool {
        if let Some(oneway) = feature.tag("oneway") {
            if matches!(oneway, "yes" | "1" | "true" | "-1" | "reverse") {
                return true;
            }
            if oneway == "no" {
                return false;
            }
        }
        if feature.tag("junction") == Some("roundabout") {
            return true;
        }
        // Motorways are one-way unless explicitly tagged otherwise.
        matches!(
            feature.tag("highway"),
            Some("motorway") | Some("motorway_link")
        )
    }

    fn speed_kmph(&self, feature: &Feature) -> f64 {
        if let Some(speed) = feature.tag("maxspeed").and_then(parse_maxspeed) {
            return speed.min(self.max_speed_kmph());
        }
        feature
            .tag("highway")
            .and_then(|h| self.base_speed_kmph(h))
            .unwrap_or(0.0)
    }

    fn max_speed_kmph(&self) -> f64 {
        110.0
    }
}
