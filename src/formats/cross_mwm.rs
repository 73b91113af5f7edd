//! `cross_mwm` section: border transitions and per-vehicle connectors.
//!
//! Layout (little-endian):
//!
//! ```text
//! magic:       u32 = 0x41584D57  // "AXMW"
//! version:     u16 = 1
//! reserved:    u16 = 0
//! coord_bits:  u32               // coding params echo
//! transition_count: u32
//! per transition:
//!   feature_id u32, segment_idx u32,
//!   road_mask u8, one_way_mask u8, flags u8 (bit0 = forward_is_enter),
//!   point_inside (u32, u32), point_outside (u32, u32)   // packed
//! per vehicle type (pedestrian, bicycle, car):
//!   enter_count u32, per enter: feature_id u32, segment_idx u32, forward u8
//!   exit_count u32,  per exit:  the same
//!   weight_count u32             // 0 or enter_count * exit_count
//!   per weight: f64 bits         // NO_ROUTE for unreachable pairs
//! footer:      payload_crc64 u64
//! ```

use super::{crc, CodingParams, SectionReader, SectionWriter};
use crate::cross_mwm::{CrossMwmConnectors, Transition};
use crate::geom::{pack_point, unpack_point};
use crate::index_graph::Segment;
use crate::profiles::VehicleType;
use atlas_common::{Error, Result};

const MAGIC: u32 = 0x41584D57; // "AXMW"
const VERSION: u16 = 1;

pub fn write(
    writer: &mut SectionWriter,
    transitions: &[Transition],
    connectors: &CrossMwmConnectors,
    coding: CodingParams,
) {
    let mut body = SectionWriter::new();
    body.write_u32(MAGIC);
    body.write_u16(VERSION);
    body.write_u16(0);
    body.write_u32(coding.coord_bits);

    body.write_u32(transitions.len() as u32);
    for t in transitions {
        body.write_u32(t.feature_id);
        body.write_u32(t.segment_idx);
        body.write_u8(t.road_mask);
        body.write_u8(t.one_way_mask);
        body.write_u8(t.forward_is_enter as u8);
        let (ix, iy) = pack_point(&t.point_inside, coding.coord_bits);
        let (ox, oy) = pack_point(&t.point_outside, coding.coord_bits);
        body.write_u32(ix);
        body.write_u32(iy);
        body.write_u32(ox);
        body.write_u32(oy);
    }

    for vehicle in VehicleType::ALL {
        let connector = connectors.get(vehicle);
        write_segments(&mut body, connector.enters());
        write_segments(&mut body, connector.exits());
        let weights = connector.weights();
        body.write_u32(weights.len() as u32);
        for &w in weights {
            body.write_f64(w);
        }
    }

    let payload_crc = crc::checksum(body.as_bytes());
    writer.write_bytes(body.as_bytes());
    writer.write_u64(payload_crc);
}

fn write_segments(body: &mut SectionWriter, segments: &[Segment]) {
    body.write_u32(segments.len() as u32);
    for segment in segments {
        body.write_u32(segment.feature_id);
        body.write_u32(segment.segment_idx);
        body.write_u8(segment.forward as u8);
    }
}

/// Inverse of [`write`].
pub fn read(bytes: &[u8]) -> Result<(Vec<Transition>, CrossMwmConnectors)> {
    if bytes.len() < 8 {
        return Err(Error::FormatError(
            "cross_mwm section too short".to_string(),
        ));
    }
    let (payload, footer) = bytes.split_at(bytes.len() - 8);
    let mut stored = [0u8; 8];
    stored.copy_from_slice(footer);
    if u64::from_le_bytes(stored) != crc::checksum(payload) {
        return Err(Error::FormatError(
            "cross_mwm section CRC mismatch".to_string(),
        ));
    }

    let mut reader = SectionReader::new(payload);
    if reader.read_u32()? != MAGIC {
        return Err(Error::FormatError(
            "bad cross_mwm section magic".to_string(),
        ));
    }
    let version = reader.read_u16()?;
    if version != VERSION {
        return Err(Error::FormatError(format!(
            "unsupported cross_mwm section version {version}"
        )));
    }
    let _reserved = reader.read_u16()?;
    let coord_bits = reader.read_u32()?;

    let transition_count = reader.read_u32()?;
    let mut transitions = Vec::with_capacity(transition_count as usize);
    for _ in 0..transition_count {
        let feature_id = reader.read_u32()?;
        let segment_idx = reader.read_u32()?;
        let road_mask = reader.read_u8()?;
        let one_way_mask = reader.read_u8()?;
        let forward_is_enter = reader.read_u8()? != 0;
        let ix = reader.read_u32()?;
        let iy = reader.read_u32()?;
        let ox = reader.read_u32()?;
        let oy = reader.read_u32()?;
        transitions.push(Transition {
            feature_id,
            segment_idx,
            road_mask,
            one_way_mask,
            forward_is_enter,
            point_inside: unpack_point(ix, iy, coord_bits),
            point_outside: unpack_point(ox, oy, coord_bits),
        });
    }

    let mut connectors = CrossMwmConnectors::default();
    for vehicle in VehicleType::ALL {
        let enters = read_segments(&mut reader)?;
        let exits = read_segments(&mut reader)?;
        let weight_count = reader.read_u32()? as usize;
        if weight_count != 0 && weight_count != enters.len() * exits.len() {
            return Err(Error::FormatError(format!(
                "cross_mwm weight table for {vehicle} has {weight_count} entries, expected {}",
                enters.len() * exits.len()
            )));
        }
        let mut weights = Vec::with_capacity(weight_count);
        for _ in 0..weight_count {
            weights.push(reader.read_f64()?);
        }
        connectors
            .get_mut(vehicle)
            .restore(enters, exits, weights);
    }

    Ok((transitions, connectors))
}

fn read_segments(reader: &mut SectionReader) -> Result<Vec<Segment>> {
    let count = reader.read_u32()?;
    let mut segments = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let feature_id = reader.read_u32()?;
        let segment_idx = reader.read_u32()?;
        let forward = reader.read_u8()? != 0;
        segments.push(Segment::new(feature_id, segment_idx, forward));
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cross_mwm::NO_ROUTE;
    use crate::geom::Point;
    use crate::profiles::{CAR_MASK, PEDESTRIAN_MASK};

    #[test]
    fn test_roundtrip() {
        // One-way for pedestrians only, so the car connector gets both an
        // enter and an exit and its weight table is non-empty.
        let transitions = vec![Transition {
            feature_id: 4,
            segment_idx: 2,
            road_mask: CAR_MASK | PEDESTRIAN_MASK,
            one_way_mask: PEDESTRIAN_MASK,
            forward_is_enter: true,
            point_inside: Point::new(0.5, 0.9),
            point_outside: Point::new(0.5, 1.1),
        }];

        let mut connectors = CrossMwmConnectors::default();
        for t in &transitions {
            for vehicle in VehicleType::ALL {
                connectors.get_mut(vehicle).add_transition(t, vehicle.mask());
            }
        }
        connectors
            .get_mut(VehicleType::Car)
            .fill_weights(|_, _| NO_ROUTE);

        let mut writer = SectionWriter::new();
        write(
            &mut writer,
            &transitions,
            &connectors,
            CodingParams::default(),
        );
        let bytes = writer.into_bytes();

        let (read_transitions, read_connectors) = read(&bytes).unwrap();
        assert_eq!(read_transitions.len(), 1);
        let t = &read_transitions[0];
        assert_eq!(t.feature_id, 4);
        assert_eq!(t.segment_idx, 2);
        assert!(t.forward_is_enter);
        // Points survive up to quantisation resolution.
        assert!(t.point_inside.almost_equal(&Point::new(0.5, 0.9)));
        assert!(t.point_outside.almost_equal(&Point::new(0.5, 1.1)));

        let car = read_connectors.get(VehicleType::Car);
        assert_eq!(car.enters(), connectors.get(VehicleType::Car).enters());
        assert_eq!(car.exits(), connectors.get(VehicleType::Car).exits());
        assert!(car.has_weights());
        let pedestrian = read_connectors.get(VehicleType::Pedestrian);
        assert!(!pedestrian.has_weights());
        assert_eq!(pedestrian.enters().len(), 1);
    }

    #[test]
    fn test_corruption_detected() {
        let mut writer = SectionWriter::new();
        write(
            &mut writer,
            &[],
            &CrossMwmConnectors::default(),
            CodingParams::default(),
        );
        let mut bytes = writer.into_bytes();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x10;
        assert!(read(&bytes).is_err());
    }
}
