//! Border polygons in the Osmosis `.poly` format.

use crate::geom::Point;
use atlas_common::{Error, Result};
use geo::{Contains, Coord, LineString, Polygon};
use std::fs;
use std::path::{Path, PathBuf};

pub const BORDERS_DIR: &str = "borders";
pub const BORDERS_EXTENSION: &str = ".poly";

/// Path of the border polygon file for `country` under `path`.
pub fn border_file(path: &Path, country: &str) -> PathBuf {
    path.join(BORDERS_DIR)
        .join(format!("{country}{BORDERS_EXTENSION}"))
}

/// Loads the border polygons of one country.
pub fn load_borders(file: &Path) -> Result<Vec<Polygon<f64>>> {
    let text = fs::read_to_string(file)?;
    parse_poly(&text)
}

/// Parses an Osmosis polygon file: a name line, then ring sections each
/// terminated by END, then a final END. Rings prefixed with `!` subtract
/// from the preceding outer ring.
pub fn parse_poly(text: &str) -> Result<Vec<Polygon<f64>>> {
    let mut lines = text.lines();
    let _name = lines
        .next()
        .ok_or_else(|| Error::FormatError("empty .poly file".to_string()))?;

    let mut polygons: Vec<Polygon<f64>> = Vec::new();
    while let Some(header) = lines.next() {
        let header = header.trim();
        if header == "END" {
            break;
        }
        if header.is_empty() {
            continue;
        }
        let hole = header.starts_with('!');

        let mut ring: Vec<Coord<f64>> = Vec::new();
        for line in lines.by_ref() {
            let line = line.trim();
            if line == "END" {
                break;
            }
            let mut tokens = line.split_whitespace();
            let x = parse_coord_token(tokens.next(), header)?;
            let y = parse_coord_token(tokens.next(), header)?;
            ring.push(Coord { x, y });
        }
        if ring.len() < 3 {
            return Err(Error::FormatError(format!(
                "degenerate ring '{header}' in .poly file"
            )));
        }

        let ring = LineString::from(ring);
        if hole {
            match polygons.last_mut() {
                Some(polygon) => polygon.interiors_push(ring),
                None => {
                    return Err(Error::FormatError(
                        "hole ring before any outer ring in .poly file".to_string(),
                    ))
                }
            }
        } else {
            polygons.push(Polygon::new(ring, Vec::new()));
        }
    }

    if polygons.is_empty() {
        return Err(Error::FormatError("no rings in .poly file".to_string()));
    }
    Ok(polygons)
}

fn parse_coord_token(token: Option<&str>, ring: &str) -> Result<f64> {
    token
        .and_then(|t| t.parse::<f64>().ok())
        .ok_or_else(|| Error::FormatError(format!("bad coordinate in .poly ring '{ring}'")))
}

/// True when any region contains the point.
pub fn regions_contain(regions: &[Polygon<f64>], point: &Point) -> bool {
    let p = geo::Point::new(point.x, point.y);
    regions.iter().any(|region| region.contains(&p))
}
