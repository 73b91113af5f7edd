//! Vehicle profiles: tag semantics deciding which features are roads, which
//! are one-way, and how fast each vehicle type travels on them.
//!
//! All three profiles share one road topology; a feature's [`VehicleMask`]
//! says which of them may traverse it.

pub mod bicycle;
pub mod car;
pub mod pedestrian;

pub use bicycle::BicycleModel;
pub use car::CarModel;
pub use pedestrian::PedestrianModel;

use crate::features::Feature;
use atlas_common::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// The vehicle types sharing one road topology.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VehicleType {
    Pedestrian,
    Bicycle,
    Car,
}

impl VehicleType {
    pub const ALL: [VehicleType; 3] =
        [VehicleType::Pedestrian, VehicleType::Bicycle, VehicleType::Car];

    pub fn mask(self) -> VehicleMask {
        match self {
            VehicleType::Pedestrian => PEDESTRIAN_MASK,
            VehicleType::Bicycle => BICYCLE_MASK,
            VehicleType::Car => CAR_MASK,
        }
    }

    pub fn index(self) -> usize {
        match self {
            VehicleType::Pedestrian => 0,
            VehicleType::Bicycle => 1,
            VehicleType::Car => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            VehicleType::Pedestrian => "pedestrian",
            VehicleType::Bicycle => "bicycle",
            VehicleType::Car => "car",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bitset over the vehicle types.
pub type VehicleMask = u8;

pub const PEDESTRIAN_MASK: VehicleMask = 1;
pub const BICYCLE_MASK: VehicleMask = 1 << 1;
pub const CAR_MASK: VehicleMask = 1 << 2;

/// Tag semantics of one vehicle type, specialised per country.
pub trait VehicleModel: Send + Sync {
    /// Whether this vehicle type may traverse the feature at all.
    fn is_road(&self, feature: &Feature) -> bool;

    /// Whether the feature restricts this vehicle type to one direction.
    fn is_one_way(&self, feature: &Feature) -> bool;

    /// Travel speed on this feature, km/h.
    fn speed_kmph(&self, feature: &Feature) -> f64;

    /// Fastest speed this vehicle type ever reaches, km/h.
    fn max_speed_kmph(&self) -> f64;
}

/// Builds the country-specialised model for one vehicle type.
pub fn model_for_country(
    vehicle: VehicleType,
    country: &str,
) -> Result<Arc<dyn VehicleModel>> {
    let model: Option<Arc<dyn VehicleModel>> = match vehicle {
        VehicleType::Pedestrian => {
            PedestrianModel::for_country(country).map(|m| Arc::new(m) as _)
        }
        VehicleType::Bicycle => BicycleModel::for_country(country).map(|m| Arc::new(m) as _),
        VehicleType::Car => CarModel::for_country(country).map(|m| Arc::new(m) as _),
    };
    model.ok_or_else(|| Error::MissingModel {
        vehicle: vehicle.name().to_string(),
        country: country.to_string(),
    })
}

/// Classifies features against all three country-specialised models at once.
///
/// Construction resolves every model up front and fails before any I/O if
/// one is missing. The builder is stateless afterwards and safe to share
/// across threads.
pub struct MaskBuilder {
    models: [Arc<dyn VehicleModel>; 3],
}

impl MaskBuilder {
    pub fn new(country: &str) -> Result<Self> {
        Ok(MaskBuilder {
            models: [
                model_for_country(VehicleType::Pedestrian, country)?,
                model_for_country(VehicleType::Bicycle, country)?,
                model_for_country(VehicleType::Car, country)?,
            ],
        })
    }

    /// Bit set per vehicle type that classifies the feature as a road.
    pub fn road_mask(&self, feature: &Feature) -> VehicleMask {
        self.mask_with(feature, |model, f| model.is_road(f))
    }

    /// Bit set per vehicle type for which the feature is one-way.
    pub fn one_way_mask(&self, feature: &Feature) -> VehicleMask {
        self.mask_with(feature, |model, f| model.is_one_way(f))
    }

    pub fn model(&self, vehicle: VehicleType) -> &Arc<dyn VehicleModel> {
        &self.models[vehicle.index()]
    }

    pub fn max_speed_kmph(&self, vehicle: VehicleType) -> f64 {
        self.models[vehicle.index()].max_speed_kmph()
    }

    fn mask_with(
        &self,
        feature: &Feature,
        pred: impl Fn(&dyn VehicleModel, &Feature) -> bool,
    ) -> VehicleMask {
        let mut mask = 0;
        for vehicle in VehicleType::ALL {
            if pred(self.models[vehicle.index()].as_ref(), feature) {
                mask |= vehicle.mask();
            }
        }
        mask
    }
}

/// Check whether an access tag value denies entry outright.
pub(crate) fn is_denied(value: Option<&str>) -> bool {
    matches!(value, Some("no") | Some("private"))
}

/// Parse a `maxspeed`-style tag value in km/h.
pub(crate) fn parse_maxspeed(value: &str) -> Option<f64> {
    let digits = value.trim().trim_end_matches("km/h").trim();
    digits.parse::<f64>().ok().filter(|v| *v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;

    fn residential() -> Feature {
        Feature::new(
            vec![("highway".to_string(), "residential".to_string())],
            vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)],
        )
    }

    fn footway() -> Feature {
        Feature::new(
            vec![("highway".to_string(), "footway".to_string())],
            vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)],
        )
    }

    #[test]
    fn test_residential_carries_all_vehicles() {
        let masks = MaskBuilder::new("belgium").unwrap();
        assert_eq!(
            masks.road_mask(&residential()),
            PEDESTRIAN_MASK | BICYCLE_MASK | CAR_MASK
        );
    }

    #[test]
    fn test_footway_excludes_cars() {
        let masks = MaskBuilder::new("belgium").unwrap();
        let mask = masks.road_mask(&footway());
        assert_ne!(mask & PEDESTRIAN_MASK, 0);
        assert_eq!(mask & CAR_MASK, 0);
    }

    #[test]
    fn test_one_way_mask_skips_pedestrians() {
        let masks = MaskBuilder::new("belgium").unwrap();
        let feature = Feature::new(
            vec![
                ("highway".to_string(), "residential".to_string()),
                ("oneway".to_string(), "yes".to_string()),
            ],
            residential().points().to_vec(),
        );
        let mask = masks.one_way_mask(&feature);
        assert_eq!(mask & PEDESTRIAN_MASK, 0);
        assert_ne!(mask & CAR_MASK, 0);
    }

    #[test]
    fn test_parse_maxspeed() {
        assert_eq!(parse_maxspeed("50"), Some(50.0));
        assert_eq!(parse_maxspeed("30 km/h"), Some(30.0));
        assert_eq!(parse_maxspeed("walk"), None);
    }
}
