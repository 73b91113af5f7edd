//! `routing` section: the joint table and the per-feature vehicle masks.
//!
//! Layout (little-endian):
//!
//! ```text
//! magic:       u32 = 0x41525447  // "ARTG"
//! version:     u16 = 1
//! reserved:    u16 = 0
//! joint_count: u32
//! per joint:
//!   point_count: u32
//!   per point:   feature_id u32, point_id u32
//! mask_count:  u32
//! per mask:    feature_id u32, mask u8    // ascending feature id
//! footer:      payload_crc64 u64
//! ```

use super::{crc, SectionReader, SectionWriter};
use crate::index_graph::{Joint, RoadPoint};
use crate::profiles::VehicleMask;
use atlas_common::{Error, Result};
use std::collections::BTreeMap;

const MAGIC: u32 = 0x41525447; // "ARTG"
const VERSION: u16 = 1;

/// Serialises the joint table and the vehicle-mask table.
pub fn write(
    writer: &mut SectionWriter,
    joints: &[Joint],
    masks: &BTreeMap<u32, VehicleMask>,
) {
    let mut body = SectionWriter::new();
    body.write_u32(MAGIC);
    body.write_u16(VERSION);
    body.write_u16(0);
    body.write_u32(joints.len() as u32);
    for joint in joints {
        body.write_u32(joint.len() as u32);
        for point in joint.points() {
            body.write_u32(point.feature_id);
            body.write_u32(point.point_id);
        }
    }
    body.write_u32(masks.len() as u32);
    for (&feature_id, &mask) in masks {
        body.write_u32(feature_id);
        body.write_u8(mask);
    }

    let payload_crc = crc::checksum(body.as_bytes());
    writer.write_bytes(body.as_bytes());
    writer.write_u64(payload_crc);
}

/// Inverse of [`write`].
pub fn read(bytes: &[u8]) -> Result<(Vec<Joint>, BTreeMap<u32, VehicleMask>)> {
    if bytes.len() < 8 {
        return Err(Error::FormatError("routing section too short".to_string()));
    }
    let (payload, footer) = bytes.split_at(bytes.len() - 8);
    let mut stored = [0u8; 8];
    stored.copy_from_slice(footer);
    let stored_crc = u64::from_le_bytes(stored);
    if stored_crc != crc::checksum(payload) {
        return Err(Error::FormatError(
            "routing section CRC mismatch".to_string(),
        ));
    }

    let mut reader = SectionReader::new(payload);
    if reader.read_u32()? != MAGIC {
        return Err(Error::FormatError("bad routing section magic".to_string()));
    }
    let version = reader.read_u16()?;
    if version != VERSION {
        return Err(Error::FormatError(format!(
            "unsupported routing section version {version}"
        )));
    }
    let _reserved = reader.read_u16()?;

    let joint_count = reader.read_u32()?;
    let mut joints = Vec::with_capacity(joint_count as usize);
    for _ in 0..joint_count {
        let point_count = reader.read_u32()?;
        let mut joint = Joint::default();
        for _ in 0..point_count {
            let feature_id = reader.read_u32()?;
            let point_id = reader.read_u32()?;
            joint.add(RoadPoint::new(feature_id, point_id));
        }
        joints.push(joint);
    }

    let mask_count = reader.read_u32()?;
    let mut masks = BTreeMap::new();
    for _ in 0..mask_count {
        let feature_id = reader.read_u32()?;
        let mask = reader.read_u8()?;
        masks.insert(feature_id, mask);
    }

    Ok((joints, masks))
}
