//! Atlas-Route: routing core for offline map tiles
//!
//! Build pipeline, per tile:
//! - Features: tagged polylines with altitudes, stored in the tile container
//! - Routing section: per-feature vehicle masks + joints of coincident
//!   vertices (location-key quantisation is the sole coalescence criterion)
//! - Cross-mwm section: border transitions, per-vehicle enter/exit lists,
//!   and precomputed enter→exit leap weights (one Dijkstra wave per enter
//!   over the in-tile index graph)
//!
//! Query side: `RoadGraph` exposes a tile as junctions and directed edges
//! under one vehicle profile, with a per-request fake-edge overlay that
//! attaches routing endpoints to the real network.
//!
//! Key principle: the joint table is the single source of truth for in-tile
//! connectivity. The road graph, the wave propagation and the leap builder
//! all derive their topology from it plus the feature geometry.

pub mod borders;
pub mod builder;
pub mod cross_mwm;
pub mod dijkstra;
pub mod estimator;
pub mod features;
pub mod formats;
pub mod geom;
pub mod index_graph;
pub mod network;
pub mod profiles;
pub mod road_graph;
pub mod spatial;

pub use builder::build_routing_index;
pub use cross_mwm::builder::build_cross_mwm_section;
pub use features::{Feature, FeatureId, FeatureTable};
pub use geom::Point;
pub use network::RoadNetwork;
pub use profiles::{MaskBuilder, VehicleMask, VehicleType};
pub use road_graph::{Edge, Junction, Mode, RoadGraph, RoadInfo};
