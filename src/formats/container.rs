//! The tile container: a key-addressable archive of named byte sections.
//!
//! File layout (little-endian):
//!
//! ```text
//! magic:         u32 = 0x41544C53  // "ATLS"
//! version:       u16 = 1
//! reserved:      u16 = 0
//! coord_bits:    u32               // coding params for point packing
//! section_count: u32
//! per section:
//!   tag_len:     u16
//!   tag:         [tag_len]u8       // UTF-8
//!   payload_len: u64
//!   payload:     [payload_len]u8
//! footer:
//!   file_crc64:  u64               // over everything before the footer
//! ```
//!
//! Sections are staged in memory; `commit` writes the whole archive in one
//! pass, so a failed build never leaves a half-written tile behind.

use super::crc;
use super::{SectionReader, SectionWriter};
use crate::geom::POINT_COORD_BITS;
use atlas_common::{Error, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const MAGIC: u32 = 0x41544C53; // "ATLS"
const VERSION: u16 = 1;

/// Coordinate packing parameters, carried by the container header and
/// passed through to the section serialisers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodingParams {
    pub coord_bits: u32,
}

impl Default for CodingParams {
    fn default() -> Self {
        CodingParams {
            coord_bits: POINT_COORD_BITS,
        }
    }
}

pub struct TileContainer {
    path: PathBuf,
    coding: CodingParams,
    sections: BTreeMap<String, Vec<u8>>,
}

impl TileContainer {
    /// Starts an empty container that will be written to `path` on commit.
    pub fn create(path: &Path) -> Self {
        TileContainer {
            path: path.to_path_buf(),
            coding: CodingParams::default(),
            sections: BTreeMap::new(),
        }
    }

    /// Opens an existing container, loading every section.
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        if bytes.len() < 8 {
            return Err(Error::FormatError(format!(
                "tile container {} too short",
                path.display()
            )));
        }
        let (payload, footer) = bytes.split_at(bytes.len() - 8);
        let mut stored = [0u8; 8];
        stored.copy_from_slice(footer);
        let stored_crc = u64::from_le_bytes(stored);
        let computed_crc = crc::checksum(payload);
        if stored_crc != computed_crc {
            return Err(Error::FormatError(format!(
                "tile container CRC mismatch: expected {stored_crc:016x}, got {computed_crc:016x}"
            )));
        }

        let mut reader = SectionReader::new(payload);
        if reader.read_u32()? != MAGIC {
            return Err(Error::FormatError("bad tile container magic".to_string()));
        }
        let version = reader.read_u16()?;
        if version != VERSION {
            return Err(Error::FormatError(format!(
                "unsupported tile container version {version}"
            )));
        }
        let _reserved = reader.read_u16()?;
        let coord_bits = reader.read_u32()?;
        let section_count = reader.read_u32()?;

        let mut sections = BTreeMap::new();
        for _ in 0..section_count {
            let tag_len = reader.read_u16()? as usize;
            let tag = String::from_utf8(reader.read_bytes(tag_len)?.to_vec())
                .map_err(|_| Error::FormatError("non-UTF-8 section tag".to_string()))?;
            let payload_len = reader.read_u64()? as usize;
            let payload = reader.read_bytes(payload_len)?.to_vec();
            sections.insert(tag, payload);
        }

        Ok(TileContainer {
            path: path.to_path_buf(),
            coding: CodingParams { coord_bits },
            sections,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn coding_params(&self) -> CodingParams {
        self.coding
    }

    pub fn has_section(&self, tag: &str) -> bool {
        self.sections.contains_key(tag)
    }

    pub fn section(&self, tag: &str) -> Result<&[u8]> {
        self.sections
            .get(tag)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::SectionNotFound(tag.to_string()))
    }

    /// Stages a section, replacing any previous payload under the tag.
    pub fn write_section(&mut self, tag: &str, payload: Vec<u8>) {
        self.sections.insert(tag.to_string(), payload);
    }

    /// Tags and sizes of all staged sections.
    pub fn section_sizes(&self) -> Vec<(String, usize)> {
        self.sections
            .iter()
            .map(|(tag, payload)| (tag.clone(), payload.len()))
            .collect()
    }

    /// Writes the whole archive to disk.
    pub fn commit(&self) -> Result<()> {
        let mut writer = SectionWriter::new();
        writer.write_u32(MAGIC);
        writer.write_u16(VERSION);
        writer.write_u16(0);
        writer.write_u32(self.coding.coord_bits);
        writer.write_u32(self.sections.len() as u32);
        for (tag, payload) in &self.sections {
            writer.write_u16(tag.len() as u16);
            writer.write_bytes(tag.as_bytes());
            writer.write_u64(payload.len() as u64);
            writer.write_bytes(payload);
        }
        let file_crc = crc::checksum(writer.as_bytes());
        writer.write_u64(file_crc);
        fs::write(&self.path, writer.into_bytes())?;
        Ok(())
    }
}
