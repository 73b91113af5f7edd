//! Builds the tile's `routing` section: per-feature vehicle masks plus the
//! joint table of coincident feature vertices.

use crate::features::{Feature, FeatureId};
use crate::formats::{self, SectionWriter, TileContainer};
use crate::geom::{self, POINT_COORD_BITS};
use crate::index_graph::{Joint, RoadPoint};
use crate::profiles::{MaskBuilder, VehicleMask};
use anyhow::{Context, Result};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

/// Accumulates vehicle masks and location-keyed joints over one feature
/// pass. Two vertices coalesce iff their quantised location keys match; the
/// grid is the sole coalescence criterion, no epsilon on top.
#[derive(Default)]
pub struct RoutingCollector {
    masks: BTreeMap<u32, VehicleMask>,
    joints_by_key: HashMap<u64, Joint>,
}

impl RoutingCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process(&mut self, feature: &Feature, id: FeatureId, masks: &MaskBuilder) {
        let mask = masks.road_mask(feature);
        if mask == 0 {
            return;
        }
        self.masks.insert(id.0, mask);
        for i in 0..feature.point_count() {
            let key = geom::location_key(&feature.point(i), POINT_COORD_BITS);
            self.joints_by_key
                .entry(key)
                .or_default()
                .add(RoadPoint::new(id.0, i as u32));
        }
    }

    /// The joint table: only locations where two or more road points meet.
    /// Singleton locations are not routing nodes and are dropped. The
    /// output order is deterministic regardless of hash iteration.
    pub fn joints(&self) -> Vec<Joint> {
        let mut joints: Vec<Joint> = self
            .joints_by_key
            .values()
            .filter(|joint| joint.len() >= 2)
            .cloned()
            .collect();
        joints.sort_by_key(|joint| joint.points().first().copied());
        joints
    }

    /// Masks of every road feature, including those with no surviving
    /// joints: such features stay routable through cross-tile transitions.
    pub fn masks(&self) -> &BTreeMap<u32, VehicleMask> {
        &self.masks
    }
}

/// Builds the `routing` section of `tile_file`. Returns false on failure;
/// the tile is only rewritten on success.
pub fn build_routing_index(tile_file: &Path, country: &str) -> bool {
    println!("Building routing index for {}", tile_file.display());
    match try_build(tile_file, country) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("ERROR: building routing section: {e:#}");
            false
        }
    }
}

fn try_build(tile_file: &Path, country: &str) -> Result<()> {
    let mut container = TileContainer::open(tile_file)
        .with_context(|| format!("opening tile {}", tile_file.display()))?;
    let features = formats::features::read(&container)?;
    let masks = MaskBuilder::new(country)?;

    let mut collector = RoutingCollector::new();
    features.for_each(|feature, id| collector.process(feature, id, &masks));
    let joints = collector.joints();

    let mut writer = SectionWriter::new();
    formats::routing::write(&mut writer, &joints, collector.masks());
    let section_size = writer.pos();
    container.write_section(formats::ROUTING_SECTION, writer.into_bytes());
    container.commit()?;

    let num_points: usize = joints.iter().map(Joint::len).sum();
    let num_roads = joints
        .iter()
        .flat_map(|joint| joint.points())
        .map(|point| point.feature_id)
        .collect::<BTreeSet<_>>()
        .len();
    println!(
        "Routing section created: {section_size} bytes, {num_roads} roads, {} joints, {num_points} points",
        joints.len()
    );
    Ok(())
}
