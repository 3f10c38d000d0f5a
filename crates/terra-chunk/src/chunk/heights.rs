//! Height sub-chunk decoding.

use std::io::{Read, Seek, SeekFrom};

use glam::Vec3;

use crate::chunk::header::{TerrainChunkHeader, expect_tag};
use crate::chunk::ChunkTag;
use crate::error::Result;
use crate::grid::{ALPHA_COORDS, ROW_COUNT, TEX_COORDS, VERTEX_COUNT, row_len};
use crate::io::ReadLittleEndian;
use crate::metrics::{CHUNK_SIZE, UNIT_SIZE};
use crate::vertex::{Aabb, TerrainVertex};

/// Decodes the 145 height samples into world-space vertices.
///
/// Heights are stored relative to the chunk origin; the grid walks 17 rows
/// alternating 9 and 8 columns, inner rows shifted half a unit. The bounding
/// box spans the chunk footprint horizontally and the observed height range
/// vertically.
pub(super) fn read_vertices<R: Read + Seek>(
    reader: &mut R,
    base: u64,
    header: &TerrainChunkHeader,
) -> Result<(Vec<TerrainVertex>, Aabb)> {
    reader.seek(SeekFrom::Start(base + u64::from(header.height_offset)))?;
    expect_tag(reader, ChunkTag::MCVT)?;

    let mut vertices = Vec::with_capacity(VERTEX_COUNT);
    let mut min_z = f32::MAX;
    let mut max_z = f32::MIN;

    let mut counter = 0;
    for row in 0..ROW_COUNT {
        for col in 0..row_len(row) {
            let z = reader.read_f32_le()? + header.position.z;
            let y = row as f32 * UNIT_SIZE * 0.5 + header.position.y;
            let mut x = col as f32 * UNIT_SIZE + header.position.x;
            if row % 2 != 0 {
                x += 0.5 * UNIT_SIZE;
            }

            min_z = min_z.min(z);
            max_z = max_z.max(z);

            vertices.push(TerrainVertex {
                position: Vec3::new(x, y, z),
                normal: Vec3::ZERO,
                tex_coord: TEX_COORDS[counter].into(),
                alpha_coord: ALPHA_COORDS[counter].into(),
            });
            counter += 1;
        }
    }

    let bounds = Aabb {
        min: Vec3::new(header.position.x, header.position.y, min_z),
        max: Vec3::new(
            header.position.x + CHUNK_SIZE,
            header.position.y + CHUNK_SIZE,
            max_z,
        ),
    };

    Ok((vertices, bounds))
}
