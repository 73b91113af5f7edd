//! `features` section: the tile's feature table, serde + bincode encoded.

use super::{TileContainer, FEATURES_SECTION};
use crate::features::FeatureTable;
use atlas_common::{Error, Result};

pub fn write(container: &mut TileContainer, features: &FeatureTable) -> Result<()> {
    let bytes = bincode::serialize(features)
        .map_err(|e| Error::FormatError(format!("encoding feature table: {e}")))?;
    container.write_section(FEATURES_SECTION, bytes);
    Ok(())
}

pub fn read(container: &TileContainer) -> Result<FeatureTable> {
    let bytes = container.section(FEATURES_SECTION)?;
    bincode::deserialize(bytes)
        .map_err(|e| Error::FormatError(format!("decoding feature table: {e}")))
}
