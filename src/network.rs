//! Bridges a tile's feature table and one vehicle profile into the road
//! graph's data supply.

use crate::features::{FeatureId, FeatureTable};
use crate::geom::Point;
use crate::profiles::VehicleModel;
use crate::road_graph::{Junction, RoadInfo, RoadSource};
use crate::spatial::RoadSpatialIndex;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Immutable per-profile view of a tile, shareable across routing requests.
/// Holds the feature table, the vehicle model and the spatial indexes; road
/// infos are derived on demand and cached.
pub struct RoadNetwork {
    features: Arc<FeatureTable>,
    model: Arc<dyn VehicleModel>,
    spatial: RoadSpatialIndex,
    info_cache: RwLock<HashMap<u32, Arc<RoadInfo>>>,
}

impl RoadNetwork {
    pub fn new(features: Arc<FeatureTable>, model: Arc<dyn VehicleModel>) -> Self {
        let spatial = RoadSpatialIndex::build(&features, model.as_ref());
        RoadNetwork {
            features,
            model,
            spatial,
            info_cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn features(&self) -> &Arc<FeatureTable> {
        &self.features
    }

    fn info(&self, feature_id: FeatureId) -> Option<Arc<RoadInfo>> {
        {
            let cache = self
                .info_cache
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Some(info) = cache.get(&feature_id.0) {
                return Some(info.clone());
            }
        }
        let feature = self.features.get(feature_id)?;
        if !self.model.is_road(feature) {
            return None;
        }
        let junctions = (0..feature.point_count())
            .map(|i| Junction::new(feature.point(i), feature.altitude(i)));
        let info = Arc::new(RoadInfo::new(
            !self.model.is_one_way(feature),
            self.model.speed_kmph(feature),
            junctions,
        ));
        let mut cache = self
            .info_cache
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        cache.insert(feature_id.0, info.clone());
        Some(info)
    }
}

impl RoadSource for RoadNetwork {
    fn road_info(&self, feature_id: FeatureId) -> Option<RoadInfo> {
        self.info(feature_id).map(|info| (*info).clone())
    }

    fn speed_kmph(&self, feature_id: FeatureId) -> Option<f64> {
        let feature = self.features.get(feature_id)?;
        if !self.model.is_road(feature) {
            return None;
        }
        Some(self.model.speed_kmph(feature))
    }

    fn max_speed_kmph(&self) -> f64 {
        self.model.max_speed_kmph()
    }

    fn feature_types(&self, feature_id: FeatureId) -> Vec<String> {
        let Some(feature) = self.features.get(feature_id) else {
            return Vec::new();
        };
        feature
            .tags()
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect()
    }

    fn for_each_road_at(&self, point: &Point, f: &mut dyn FnMut(FeatureId, &RoadInfo)) {
        for feature_id in self.spatial.features_at(point) {
            if let Some(info) = self.info(feature_id) {
                f(feature_id, &info);
            }
        }
    }

    fn closest_segments(&self, point: &Point, count: usize) -> Vec<(FeatureId, u32)> {
        self.spatial.closest_segments(point, count)
    }

    fn clear_state(&self) {
        self.info_cache
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}
