//! Doodad reference sub-chunk decoding.

use std::io::{Read, Seek, SeekFrom};

use crate::chunk::header::{TerrainChunkHeader, expect_tag};
use crate::chunk::ChunkTag;
use crate::error::Result;
use crate::io::ReadLittleEndian;

/// Reads the doodad reference indices at `base + header.refs_offset`.
pub(super) fn read_doodad_refs<R: Read + Seek>(
    reader: &mut R,
    base: u64,
    header: &TerrainChunkHeader,
) -> Result<Vec<u32>> {
    reader.seek(SeekFrom::Start(base + u64::from(header.refs_offset)))?;
    expect_tag(reader, ChunkTag::MCRF)?;

    let mut refs = Vec::with_capacity(header.doodad_ref_count as usize);
    for _ in 0..header.doodad_ref_count {
        refs.push(reader.read_u32_le()?);
    }
    Ok(refs)
}
