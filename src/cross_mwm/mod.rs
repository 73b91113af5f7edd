//! Cross-tile connectivity: border transitions, per-vehicle enter/exit
//! lists, and the precomputed leap-weight table that lets online routing
//! skip in-tile search.

pub mod builder;

use crate::geom::Point;
use crate::index_graph::Segment;
use crate::profiles::{VehicleMask, VehicleType};

/// Weight marking an (enter, exit) pair with no in-tile path. Real weights
/// are finite and non-negative.
pub const NO_ROUTE: f64 = f64::INFINITY;

/// One directed border crossing of one feature segment.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub feature_id: u32,
    pub segment_idx: u32,
    pub road_mask: VehicleMask,
    pub one_way_mask: VehicleMask,
    /// True when travelling the segment forward enters this tile.
    pub forward_is_enter: bool,
    pub point_inside: Point,
    pub point_outside: Point,
}

/// Enter/exit segment lists of one vehicle type, with the leap-weight
/// table once [`fill_weights`] has run.
///
/// [`fill_weights`]: CrossMwmConnector::fill_weights
#[derive(Debug, Default)]
pub struct CrossMwmConnector {
    enters: Vec<Segment>,
    exits: Vec<Segment>,
    // enters.len() * exits.len() entries, row per enter; empty until filled
    weights: Vec<f64>,
}

impl CrossMwmConnector {
    /// Registers a transition whose road mask covers `mask`. An enter
    /// segment is oriented into the tile; a bidirectional crossing also
    /// contributes its backward segment to the opposite list.
    pub fn add_transition(&mut self, transition: &Transition, mask: VehicleMask) {
        if transition.road_mask & mask == 0 {
            return;
        }
        let one_way = transition.one_way_mask & mask != 0;
        let forward = Segment::new(transition.feature_id, transition.segment_idx, true);
        if transition.forward_is_enter {
            self.enters.push(forward);
        } else {
            self.exits.push(forward);
        }
        if !one_way {
            let backward = Segment::new(transition.feature_id, transition.segment_idx, false);
            if transition.forward_is_enter {
                self.exits.push(backward);
            } else {
                self.enters.push(backward);
            }
        }
    }

    pub fn enters(&self) -> &[Segment] {
        &self.enters
    }

    pub fn exits(&self) -> &[Segment] {
        &self.exits
    }

    pub fn enter(&self, i: usize) -> Segment {
        self.enters[i]
    }

    pub fn has_weights(&self) -> bool {
        !self.weights.is_empty()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Fills the weight table from a lookup over (enter, exit) pairs.
    pub fn fill_weights(&mut self, mut lookup: impl FnMut(&Segment, &Segment) -> f64) {
        let mut weights = Vec::with_capacity(self.enters.len() * self.exits.len());
        for enter in &self.enters {
            for exit in &self.exits {
                weights.push(lookup(enter, exit));
            }
        }
        self.weights = weights;
    }

    /// Leap weight from enter `i` to exit `j`, [`NO_ROUTE`] when the table
    /// is unfilled or the pair is unreachable.
    pub fn weight(&self, enter_idx: usize, exit_idx: usize) -> f64 {
        if self.exits.is_empty() {
            return NO_ROUTE;
        }
        self.weights
            .get(enter_idx * self.exits.len() + exit_idx)
            .copied()
            .unwrap_or(NO_ROUTE)
    }

    /// Reinstalls deserialised state.
    pub(crate) fn restore(&mut self, enters: Vec<Segment>, exits: Vec<Segment>, weights: Vec<f64>) {
        self.enters = enters;
        self.exits = exits;
        self.weights = weights;
    }
}

/// One connector per vehicle type.
#[derive(Debug, Default)]
pub struct CrossMwmConnectors {
    connectors: [CrossMwmConnector; 3],
}

impl CrossMwmConnectors {
    pub fn get(&self, vehicle: VehicleType) -> &CrossMwmConnector {
        &self.connectors[vehicle.index()]
    }

    pub fn get_mut(&mut self, vehicle: VehicleType) -> &mut CrossMwmConnector {
        &mut self.connectors[vehicle.index()]
    }
}
