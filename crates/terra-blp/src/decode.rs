//! Mip chain decoding to RGBA8.

use std::borrow::Cow;

use log::{debug, warn};
use texpresso::Format as BcFormat;

use crate::error::{Result, TextureError};
use crate::header::{BlpHeader, MIP_SLOTS, TextureFormat};
use crate::reader::ByteCursor;

/// One decoded mip level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MipLevel {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8, `width * height * 4` bytes.
    pub rgba: Vec<u8>,
}

/// A fully decoded texture: RGBA8 mips in dense order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedTexture {
    pub width: u32,
    pub height: u32,
    /// Source pixel format the container carried.
    pub format: TextureFormat,
    pub mips: Vec<MipLevel>,
}

/// Decodes a whole BLP2 container.
///
/// Slots are visited in header order; empty slots are skipped and do not
/// consume an output level, so a populated slot after a gap still lands on
/// the next dense level and takes that level's dimensions. Payloads shorter
/// than the level needs are zero-padded before expansion.
pub fn decode(data: &[u8]) -> Result<DecodedTexture> {
    let header = BlpHeader::parse(&mut ByteCursor::new(data))?;
    let format = header.format()?;
    debug!(
        "decoding {}x{} {:?} container, {} mip levels",
        header.width,
        header.height,
        format,
        header.mip_count()
    );

    let mut mips = Vec::with_capacity(header.mip_count());
    for slot in 0..MIP_SLOTS {
        if !header.mip_present(slot) {
            continue;
        }

        let (offset, size) = (header.offsets[slot], header.sizes[slot]);
        let end = offset
            .checked_add(size)
            .map(|end| end as usize)
            .filter(|&end| end <= data.len())
            .ok_or(TextureError::OutOfBounds {
                level: slot,
                offset,
                size,
                len: data.len(),
            })?;
        let payload = &data[offset as usize..end];

        let (width, height) = header.mip_dimensions(mips.len());
        let rgba = match format {
            TextureFormat::RawArgb => expand_bgra(payload, width, height),
            TextureFormat::Dxt1 => expand_blocks(payload, width, height, BcFormat::Bc1),
            TextureFormat::Dxt3 => expand_blocks(payload, width, height, BcFormat::Bc2),
            TextureFormat::Dxt5 => expand_blocks(payload, width, height, BcFormat::Bc3),
        };
        mips.push(MipLevel {
            width,
            height,
            rgba,
        });
    }

    Ok(DecodedTexture {
        width: header.width,
        height: header.height,
        format,
        mips,
    })
}

/// Raw path: the container stores BGRA; swap to RGBA.
fn expand_bgra(payload: &[u8], width: u32, height: u32) -> Vec<u8> {
    // Header parsing caps each edge at 65535, so usize math cannot wrap.
    let needed = width as usize * height as usize * 4;
    let padded = pad_payload(payload, needed, width, height);

    let mut rgba = Vec::with_capacity(needed);
    for pixel in padded.chunks_exact(4) {
        rgba.extend_from_slice(&[pixel[2], pixel[1], pixel[0], pixel[3]]);
    }
    rgba
}

/// Compressed path: hand the block data to the BC decompressor.
fn expand_blocks(payload: &[u8], width: u32, height: u32, format: BcFormat) -> Vec<u8> {
    let needed = format.compressed_size(width as usize, height as usize);
    let padded = pad_payload(payload, needed, width, height);

    let mut rgba = vec![0u8; width as usize * height as usize * 4];
    format.decompress(&padded, width as usize, height as usize, &mut rgba);
    rgba
}

fn pad_payload<'a>(payload: &'a [u8], needed: usize, width: u32, height: u32) -> Cow<'a, [u8]> {
    if payload.len() >= needed {
        Cow::Borrowed(&payload[..needed])
    } else {
        warn!(
            "{}x{} mip payload is {} bytes short, zero-padding",
            width,
            height,
            needed - payload.len()
        );
        let mut padded = vec![0u8; needed];
        padded[..payload.len()].copy_from_slice(payload);
        Cow::Owned(padded)
    }
}
