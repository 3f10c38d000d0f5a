//! Index entry and fixed 128-byte chunk header.

use std::io::{Read, Seek};

use glam::Vec3;

use crate::chunk::ChunkTag;
use crate::error::{ChunkError, Result};
use crate::io::ReadLittleEndian;
use crate::metrics::{MID_POINT, TILE_SIZE};

/// Location and total size of one chunk, as recorded by the tile index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkIndexEntry {
    /// Absolute byte offset of the chunk's signature.
    pub offset: u32,
    /// Total size of the chunk including the 8-byte signature+size prefix.
    pub size: u32,
}

/// The fixed header that follows the chunk's signature+size prefix.
///
/// Sub-chunk offsets are relative to the chunk base, i.e. the start of the
/// signature, not the start of the header.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TerrainChunkHeader {
    pub flags: u32,
    /// Chunk column within the tile (0..16).
    pub index_x: u32,
    /// Chunk row within the tile (0..16).
    pub index_y: u32,
    /// Number of texture layers, at most 4.
    pub layer_count: u32,
    /// Number of doodad reference indices in the reference sub-chunk.
    pub doodad_ref_count: u32,
    pub height_offset: u32,
    pub normal_offset: u32,
    pub layer_offset: u32,
    pub refs_offset: u32,
    pub alpha_offset: u32,
    pub alpha_size: u32,
    pub shadow_offset: u32,
    pub shadow_size: u32,
    pub area_id: u32,
    pub map_obj_ref_count: u32,
    /// Hole mask over the 4×4 hole grid, widened from the on-disk u32.
    pub holes: u64,
    pub sound_emitter_offset: u32,
    pub sound_emitter_count: u32,
    pub liquid_offset: u32,
    pub liquid_size: u32,
    /// World-space position of the chunk origin, already transformed out of
    /// the file's axis convention.
    pub position: Vec3,
}

impl TerrainChunkHeader {
    /// Reads the 128-byte header record from the current stream position.
    ///
    /// The stored position swaps the horizontal axes relative to engine
    /// world space; both are remapped here via
    /// `32 * TILE_SIZE - stored - MID_POINT`.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let flags = reader.read_u32_le()?;
        let index_x = reader.read_u32_le()?;
        let index_y = reader.read_u32_le()?;
        let layer_count = reader.read_u32_le()?;
        let doodad_ref_count = reader.read_u32_le()?;
        let height_offset = reader.read_u32_le()?;
        let normal_offset = reader.read_u32_le()?;
        let layer_offset = reader.read_u32_le()?;
        let refs_offset = reader.read_u32_le()?;
        let alpha_offset = reader.read_u32_le()?;
        let alpha_size = reader.read_u32_le()?;
        let shadow_offset = reader.read_u32_le()?;
        let shadow_size = reader.read_u32_le()?;
        let area_id = reader.read_u32_le()?;
        let map_obj_ref_count = reader.read_u32_le()?;
        let holes = u64::from(reader.read_u32_le()?);

        // Low-resolution texture map and unknown words, carried in the
        // record but unused here.
        let _low_quality_map = [reader.read_u16_le()?, reader.read_u16_le()?];
        let _unknown = [
            reader.read_u32_le()?,
            reader.read_u32_le()?,
            reader.read_u32_le()?,
        ];
        let _predicted_texture = reader.read_u32_le()?;
        let _effect_doodad_count = reader.read_u32_le()?;

        let sound_emitter_offset = reader.read_u32_le()?;
        let sound_emitter_count = reader.read_u32_le()?;
        let liquid_offset = reader.read_u32_le()?;
        let liquid_size = reader.read_u32_le()?;

        let stored_x = reader.read_f32_le()?;
        let stored_y = reader.read_f32_le()?;
        let stored_z = reader.read_f32_le()?;

        let _vertex_color_offset = reader.read_u32_le()?;
        let _vertex_lighting_offset = reader.read_u32_le()?;
        let _padding = reader.read_u32_le()?;

        let position = Vec3::new(
            32.0 * TILE_SIZE - stored_y - MID_POINT,
            32.0 * TILE_SIZE - stored_x - MID_POINT,
            stored_z,
        );

        Ok(Self {
            flags,
            index_x,
            index_y,
            layer_count,
            doodad_ref_count,
            height_offset,
            normal_offset,
            layer_offset,
            refs_offset,
            alpha_offset,
            alpha_size,
            shadow_offset,
            shadow_size,
            area_id,
            map_obj_ref_count,
            holes,
            sound_emitter_offset,
            sound_emitter_count,
            liquid_offset,
            liquid_size,
            position,
        })
    }
}

/// Reads a reversed 4-byte signature plus its u32 size prefix, failing with
/// [`ChunkError::SignatureMismatch`] when the tag is not the expected one.
pub(crate) fn expect_tag<R: Read + Seek>(reader: &mut R, expected: ChunkTag) -> Result<u32> {
    let offset = reader.stream_position()?;
    let found = ChunkTag::read_reversed(reader)?;
    if found != expected {
        return Err(ChunkError::SignatureMismatch {
            expected,
            found,
            offset,
        });
    }
    reader.read_u32_le()
}
