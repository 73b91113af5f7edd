//! Build-time pass over one tile: detect border crossings, classify them
//! per vehicle type, and precompute enter→exit leap weights.

use super::{CrossMwmConnector, CrossMwmConnectors, Transition, NO_ROUTE};
use crate::borders;
use crate::dijkstra::propagate_wave;
use crate::estimator::EdgeEstimator;
use crate::features::FeatureTable;
use crate::formats::{self, SectionWriter, TileContainer};
use crate::index_graph::{GeometryLoader, IndexGraph, Segment};
use crate::profiles::{self, MaskBuilder, VehicleType};
use anyhow::{Context, Result};
use geo::Polygon;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Scans every road feature against the border polygons and records a
/// transition wherever consecutive vertices fall on opposite sides.
pub fn calc_transitions(
    regions: &[Polygon<f64>],
    features: &FeatureTable,
    masks: &MaskBuilder,
    connectors: &mut CrossMwmConnectors,
) -> Vec<Transition> {
    let mut transitions = Vec::new();
    features.for_each(|feature, id| {
        let road_mask = masks.road_mask(feature);
        if road_mask == 0 {
            return;
        }
        if feature.point_count() == 0 {
            return;
        }
        let mut prev_inside = borders::regions_contain(regions, &feature.point(0));
        for i in 1..feature.point_count() {
            let curr_inside = borders::regions_contain(regions, &feature.point(i));
            if curr_inside == prev_inside {
                continue;
            }
            let one_way_mask = masks.one_way_mask(feature);
            let back = feature.point(i - 1);
            let front = feature.point(i);
            let (point_inside, point_outside) = if curr_inside {
                (front, back)
            } else {
                (back, front)
            };
            let transition = Transition {
                feature_id: id.0,
                segment_idx: (i - 1) as u32,
                road_mask,
                one_way_mask,
                forward_is_enter: curr_inside,
                point_inside,
                point_outside,
            };
            for vehicle in VehicleType::ALL {
                connectors
                    .get_mut(vehicle)
                    .add_transition(&transition, vehicle.mask());
            }
            transitions.push(transition);
            prev_inside = curr_inside;
        }
    });
    transitions
}

/// Precomputes the enter→exit weight table of one connector: one Dijkstra
/// wave per enter over the in-tile index graph, then a lookup fill with
/// [`NO_ROUTE`] for unreachable pairs.
pub fn fill_weights(connector: &mut CrossMwmConnector, graph: &IndexGraph) {
    let mut weights: BTreeMap<Segment, BTreeMap<Segment, f64>> = BTreeMap::new();
    let mut distances = BTreeMap::new();
    let num_enters = connector.enters().len();
    for i in 0..num_enters {
        if i % 10 == 0 && i != 0 {
            println!("Building leaps: {i}/{num_enters} waves passed");
        }
        let enter = connector.enter(i);
        propagate_wave(graph, enter, |_| false, &mut distances);
        for exit in connector.exits() {
            if let Some(&weight) = distances.get(exit) {
                weights.entry(enter).or_default().insert(*exit, weight);
            }
        }
    }

    connector.fill_weights(|enter, exit| {
        weights
            .get(enter)
            .and_then(|row| row.get(exit))
            .copied()
            .unwrap_or(NO_ROUTE)
    });
}

/// Builds the `cross_mwm` section of `tile_file`, with leap weights
/// precomputed for `leap_profiles`. Returns false on failure; the tile is
/// only rewritten on success.
pub fn build_cross_mwm_section(
    path: &Path,
    tile_file: &Path,
    country: &str,
    leap_profiles: &[VehicleType],
) -> bool {
    println!("Building cross mwm section for {country}");
    match try_build(path, tile_file, country, leap_profiles) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("ERROR: building cross_mwm section for {country}: {e:#}");
            false
        }
    }
}

fn try_build(
    path: &Path,
    tile_file: &Path,
    country: &str,
    leap_profiles: &[VehicleType],
) -> Result<()> {
    let timer = Instant::now();

    let mut container = TileContainer::open(tile_file)
        .with_context(|| format!("opening tile {}", tile_file.display()))?;
    let features = Arc::new(formats::features::read(&container)?);
    let border_path = borders::border_file(path, country);
    let regions = borders::load_borders(&border_path)
        .with_context(|| format!("loading borders from {}", border_path.display()))?;
    let masks = MaskBuilder::new(country)?;

    let mut connectors = CrossMwmConnectors::default();
    let transitions = calc_transitions(&regions, &features, &masks, &mut connectors);
    println!(
        "Transitions finished, transitions: {}, elapsed: {:.2}s",
        transitions.len(),
        timer.elapsed().as_secs_f64()
    );
    for vehicle in VehicleType::ALL {
        let connector = connectors.get(vehicle);
        println!(
            "{vehicle} model: enters: {}, exits: {}",
            connector.enters().len(),
            connector.exits().len()
        );
    }

    let leap_timer = Instant::now();
    let (joints, _masks) = formats::routing::read(container.section(formats::ROUTING_SECTION)?)?;
    for &vehicle in leap_profiles {
        // Geometry and weights depend on the vehicle model, so each profile
        // gets its own in-tile graph.
        let model = profiles::model_for_country(vehicle, country)?;
        let estimator = EdgeEstimator::with_max_speed(model.max_speed_kmph());
        let loader = GeometryLoader::new(features.clone(), model);
        let mut graph = IndexGraph::new(loader, estimator);
        graph.import(joints.clone());
        fill_weights(connectors.get_mut(vehicle), &graph);
    }
    println!(
        "Leaps finished, elapsed: {:.2}s",
        leap_timer.elapsed().as_secs_f64()
    );

    let mut writer = SectionWriter::new();
    formats::cross_mwm::write(
        &mut writer,
        &transitions,
        &connectors,
        container.coding_params(),
    );
    let section_size = writer.pos();
    container.write_section(formats::CROSS_MWM_SECTION, writer.into_bytes());
    container.commit()?;
    println!("Cross mwm section generated, size: {section_size} bytes");
    Ok(())
}
