//! Texture layer table decoding.

use std::io::{Read, Seek, SeekFrom};

use bitflags::bitflags;

use crate::chunk::header::{TerrainChunkHeader, expect_tag};
use crate::chunk::ChunkTag;
use crate::error::{ChunkError, Result};
use crate::io::ReadLittleEndian;

/// Hard format limit on texture layers per chunk.
pub const MAX_LAYERS: usize = 4;

bitflags! {
    /// Per-layer flag word from the layer table.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LayerFlags: u32 {
        /// Texture animation direction, three bits.
        const ANIM_ROTATION = 0x07;
        /// Texture animation speed, three bits.
        const ANIM_SPEED = 0x38;
        /// Texture animation is active for this layer.
        const ANIM_ENABLED = 0x40;
        /// Layer brightness is doubled at render time.
        const OVERBRIGHT = 0x80;
        /// Layer blends through the alpha map.
        const USE_ALPHA_MAP = 0x100;
        /// Alpha map data is run-length compressed.
        const ALPHA_COMPRESSED = 0x200;
        /// Layer samples the skybox cube map.
        const REFLECTION = 0x400;
    }
}

/// One 16-byte layer record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerDescriptor {
    /// Index into the tile's texture name list.
    pub texture_id: u32,
    pub flags: LayerFlags,
    /// Byte offset of this layer's alpha map inside the alpha sub-chunk.
    pub alpha_offset: u32,
    /// Ground effect doodad set, unused here.
    pub effect_id: u32,
}

/// The decoded layer table plus the per-slot shader flags.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayerTable {
    pub layers: Vec<LayerDescriptor>,
    /// One slot per layer, 1 when the layer animates, always 4 entries so
    /// the shader can bind every slot unconditionally.
    pub texture_flags: [i32; MAX_LAYERS],
}

/// Decodes the layer table at `base + header.layer_offset`.
pub(super) fn read_layers<R: Read + Seek>(
    reader: &mut R,
    base: u64,
    header: &TerrainChunkHeader,
) -> Result<LayerTable> {
    if header.layer_count as usize > MAX_LAYERS {
        return Err(ChunkError::TooManyLayers(header.layer_count));
    }

    reader.seek(SeekFrom::Start(base + u64::from(header.layer_offset)))?;
    expect_tag(reader, ChunkTag::MCLY)?;

    let mut table = LayerTable::default();
    for slot in 0..header.layer_count as usize {
        let layer = LayerDescriptor {
            texture_id: reader.read_u32_le()?,
            flags: LayerFlags::from_bits_retain(reader.read_u32_le()?),
            alpha_offset: reader.read_u32_le()?,
            effect_id: reader.read_u32_le()?,
        };
        if layer.flags.contains(LayerFlags::ANIM_ENABLED) {
            table.texture_flags[slot] = 1;
        }
        table.layers.push(layer);
    }

    Ok(table)
}
