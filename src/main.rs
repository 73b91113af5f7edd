use anyhow::Result;
use atlas_route::formats::{self, TileContainer};
use atlas_route::profiles::VehicleType;
use atlas_route::{build_cross_mwm_section, build_routing_index};
use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "atlas-route")]
#[command(about = "Build routing and cross-tile sections for map tiles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the routing and cross_mwm sections of one or more tiles
    Build {
        /// Data directory containing <country>.mwm tiles and borders/
        path: PathBuf,
        /// Countries to build
        #[arg(required = true)]
        countries: Vec<String>,
        /// Vehicle profiles to precompute leap weights for
        #[arg(long, value_enum, default_value = "car")]
        leap_profiles: Vec<ProfileArg>,
    },
    /// Print section statistics for a built tile
    Info {
        /// Tile file
        tile: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum ProfileArg {
    Pedestrian,
    Bicycle,
    Car,
}

impl From<ProfileArg> for VehicleType {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Pedestrian => VehicleType::Pedestrian,
            ProfileArg::Bicycle => VehicleType::Bicycle,
            ProfileArg::Car => VehicleType::Car,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            path,
            countries,
            leap_profiles,
        } => {
            let profiles: Vec<VehicleType> =
                leap_profiles.into_iter().map(VehicleType::from).collect();
            let start = Instant::now();

            // Tiles build in parallel; each tile's pipeline is sequential.
            let failed: Vec<&String> = countries
                .par_iter()
                .filter(|country| {
                    let tile = path.join(format!("{country}.mwm"));
                    let ok = build_routing_index(&tile, country)
                        && build_cross_mwm_section(&path, &tile, country, &profiles);
                    !ok
                })
                .collect();

            println!(
                "\nBuilt {}/{} tiles in {:.2}s",
                countries.len() - failed.len(),
                countries.len(),
                start.elapsed().as_secs_f64()
            );
            if !failed.is_empty() {
                anyhow::bail!(
                    "failed tiles: {}",
                    failed
                        .iter()
                        .map(|c| c.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }
            Ok(())
        }
        Commands::Info { tile } => {
            let container = TileContainer::open(&tile)?;
            println!("Tile: {}", tile.display());
            println!("Coord bits: {}", container.coding_params().coord_bits);
            for (tag, size) in container.section_sizes() {
                println!("  {tag}: {size} bytes");
            }

            if container.has_section(formats::ROUTING_SECTION) {
                let (joints, masks) =
                    formats::routing::read(container.section(formats::ROUTING_SECTION)?)?;
                let points: usize = joints.iter().map(|j| j.len()).sum();
                println!(
                    "Routing: {} joints, {points} points, {} masked features",
                    joints.len(),
                    masks.len()
                );
            }

            if container.has_section(formats::CROSS_MWM_SECTION) {
                let (transitions, connectors) =
                    formats::cross_mwm::read(container.section(formats::CROSS_MWM_SECTION)?)?;
                println!("Cross mwm: {} transitions", transitions.len());
                for vehicle in VehicleType::ALL {
                    let connector = connectors.get(vehicle);
                    println!(
                        "  {vehicle}: {} enters, {} exits, weights: {}",
                        connector.enters().len(),
                        connector.exits().len(),
                        if connector.has_weights() { "yes" } else { "no" }
                    );
                }
            }
            Ok(())
        }
    }
}
