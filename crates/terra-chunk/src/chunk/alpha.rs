//! Blend-map composition.
//!
//! The renderer samples one 64×64 RGBA texture per chunk: channels 0..3
//! carry the expanded alpha maps of layers 1..4 and channel 3 doubles as
//! the hole mask written in the first pass. Layer 0 has no alpha map; it is
//! the base layer everything else blends over.

use std::io::{Read, Seek, SeekFrom};

use log::trace;

use crate::chunk::header::TerrainChunkHeader;
use crate::chunk::layers::LayerTable;
use crate::error::Result;
use crate::metrics::{HOLE_LEN, HOLE_SIZE};

/// Edge length of the blend map in texels.
pub const BLEND_MAP_DIM: usize = 64;

/// Byte length of the composited RGBA blend map.
pub const BLEND_MAP_BYTES: usize = BLEND_MAP_DIM * BLEND_MAP_DIM * 4;

/// Bytes of one packed per-layer alpha map (two 4-bit texels per byte).
const PACKED_ALPHA_BYTES: usize = BLEND_MAP_DIM * BLEND_MAP_DIM / 2;

/// 1 where terrain exists, 0 where the hole mask removes it.
///
/// The mask is a 4×4 grid over the chunk; bit `step_x * 4 + step_y` covers
/// the cell at that step.
fn hole_factor(holes: u64, step_x: u32, step_y: u32) -> u8 {
    let bit = 1u64 << (step_x * 4 + step_y);
    u8::from(holes & bit == 0)
}

/// Expands one packed 4-bit texel to 8 bits. Exact: 255 = 17 × 15, so
/// every nibble maps to `17 * nibble` with no rounding.
fn expand_nibble(nibble: u8) -> u8 {
    (255 * u32::from(nibble) / 15) as u8
}

/// Builds the composited blend map.
///
/// Pass 1 rasterizes the hole mask into channel 3 (0xFF solid, 0x00 hole).
/// Pass 2 expands the packed alpha map of each layer past the first into
/// channel `layer - 1`, scaled by a hole factor.
///
/// Pass 2 derives its hole-factor X coordinate from the layer loop index,
/// not the texel column, so one factor pair applies to a whole layer. The
/// original renderer shipped with this behavior and existing content was
/// authored against it, so it is kept verbatim.
pub(super) fn compose_blend_map<R: Read + Seek>(
    reader: &mut R,
    base: u64,
    header: &TerrainChunkHeader,
    layers: &LayerTable,
) -> Result<Vec<u8>> {
    let mut rgba = vec![0u8; BLEND_MAP_BYTES];

    for i in 0..BLEND_MAP_DIM {
        for j in 0..BLEND_MAP_DIM {
            let x = i as f32 * HOLE_SIZE;
            let y = j as f32 * HOLE_SIZE;
            let step_x = (x / HOLE_LEN).floor() as u32;
            let step_y = (y / HOLE_LEN).floor() as u32;

            let factor = hole_factor(header.holes, step_x, step_y);
            rgba[(i * BLEND_MAP_DIM + j) * 4 + 3] = 0xFF * factor;
        }
    }

    for layer_idx in 1..layers.layers.len() {
        let alpha_base = base + u64::from(header.alpha_offset) + 8;
        reader.seek(SeekFrom::Start(
            alpha_base + u64::from(layers.layers[layer_idx].alpha_offset),
        ))?;

        let mut packed = [0u8; PACKED_ALPHA_BYTES];
        reader.read_exact(&mut packed)?;
        trace!("expanding alpha map for layer {layer_idx}");

        let channel = layer_idx - 1;
        let mut texel = 0usize;
        for row in 0..BLEND_MAP_DIM {
            for pair in 0..BLEND_MAP_DIM / 2 {
                let mut x = layer_idx as f32 * HOLE_SIZE * 2.0;
                let y = row as f32 * HOLE_SIZE;
                let step_y = (y / HOLE_LEN).floor() as u32;

                let step_x = (x / HOLE_LEN).floor() as u32;
                let factor = hole_factor(header.holes, step_x, step_y);
                x += HOLE_SIZE;
                let step_x = (x / HOLE_LEN).floor() as u32;
                let factor2 = hole_factor(header.holes, step_x, step_y);

                let byte = packed[row * (BLEND_MAP_DIM / 2) + pair];
                rgba[texel * 4 + channel] = expand_nibble(byte & 0x0F) * factor;
                texel += 1;
                rgba[texel * 4 + channel] = expand_nibble(byte >> 4) * factor2;
                texel += 1;
            }
        }
    }

    Ok(rgba)
}
