//! Normal sub-chunk decoding.

use std::io::{Read, Seek, SeekFrom};

use glam::Vec3;

use crate::chunk::header::{TerrainChunkHeader, expect_tag};
use crate::chunk::ChunkTag;
use crate::error::Result;
use crate::io::ReadLittleEndian;
use crate::vertex::TerrainVertex;

/// Decodes 145 signed-byte normal triplets into the vertex array.
///
/// The horizontal components are negated to match the world-position axis
/// remap; division is by 127 so ±127 maps to ±1.0.
pub(super) fn apply_normals<R: Read + Seek>(
    reader: &mut R,
    base: u64,
    header: &TerrainChunkHeader,
    vertices: &mut [TerrainVertex],
) -> Result<()> {
    reader.seek(SeekFrom::Start(base + u64::from(header.normal_offset)))?;
    expect_tag(reader, ChunkTag::MCNR)?;

    for vertex in vertices.iter_mut() {
        let nx = -(f32::from(reader.read_i8()?) / 127.0);
        let ny = -(f32::from(reader.read_i8()?) / 127.0);
        let nz = f32::from(reader.read_i8()?) / 127.0;
        vertex.normal = Vec3::new(nx, ny, nz);
    }

    Ok(())
}
