//! BLP2 container header.

use crate::error::{Result, TextureError};
use crate::reader::ByteCursor;

/// Container magic, first four bytes of every BLP2 file.
pub const BLP_MAGIC: [u8; 4] = *b"BLP2";

/// Number of mip offset/size slots in the header.
pub const MIP_SLOTS: usize = 16;

/// Largest edge length a BLP2 container can declare.
pub const MAX_DIMENSION: u32 = 65535;

/// The pixel formats this decoder produces RGBA from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    /// BC1: 8-byte blocks, 1-bit alpha.
    Dxt1,
    /// BC2: 16-byte blocks, explicit 4-bit alpha.
    Dxt3,
    /// BC3: 16-byte blocks, interpolated alpha.
    Dxt5,
    /// Uncompressed 32-bit ARGB, stored BGRA byte order.
    RawArgb,
}

impl TextureFormat {
    /// Bytes per 4×4 block for the compressed formats.
    pub fn block_bytes(self) -> Option<usize> {
        match self {
            TextureFormat::Dxt1 => Some(8),
            TextureFormat::Dxt3 | TextureFormat::Dxt5 => Some(16),
            TextureFormat::RawArgb => None,
        }
    }

    /// Source-data bytes per row at `width`, for direct-upload consumers:
    /// block bytes × blocks per row when compressed, `4 × width` when raw.
    pub fn row_pitch(self, width: u32) -> u32 {
        match self.block_bytes() {
            Some(block) => width.div_ceil(4).max(1) * block as u32,
            None => width * 4,
        }
    }
}

/// The fixed 148-byte header of a BLP2 container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlpHeader {
    pub compression: u8,
    pub alpha_depth: u8,
    pub alpha_encoding: u8,
    pub has_mips: u8,
    pub width: u32,
    pub height: u32,
    /// Absolute byte offsets of the mip payloads; 0 marks an empty slot.
    pub offsets: [u32; MIP_SLOTS],
    /// Byte sizes of the mip payloads; 0 marks an empty slot.
    pub sizes: [u32; MIP_SLOTS],
}

impl BlpHeader {
    /// Parses the header, verifying the magic, that the declared
    /// dimensions fall inside the format's range, and that at least one
    /// mip slot is populated. The version word after the magic is ignored.
    pub fn parse(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let magic = cursor.take(4)?;
        if magic != BLP_MAGIC {
            return Err(TextureError::WrongMagic([
                magic[0], magic[1], magic[2], magic[3],
            ]));
        }
        cursor.skip(4)?;

        let compression = cursor.read_u8()?;
        let alpha_depth = cursor.read_u8()?;
        let alpha_encoding = cursor.read_u8()?;
        let has_mips = cursor.read_u8()?;
        let width = cursor.read_u32_le()?;
        let height = cursor.read_u32_le()?;
        if !(1..=MAX_DIMENSION).contains(&width) || !(1..=MAX_DIMENSION).contains(&height) {
            return Err(TextureError::InvalidDimensions { width, height });
        }

        let mut offsets = [0u32; MIP_SLOTS];
        for slot in &mut offsets {
            *slot = cursor.read_u32_le()?;
        }
        let mut sizes = [0u32; MIP_SLOTS];
        for slot in &mut sizes {
            *slot = cursor.read_u32_le()?;
        }

        let header = Self {
            compression,
            alpha_depth,
            alpha_encoding,
            has_mips,
            width,
            height,
            offsets,
            sizes,
        };
        if header.mip_count() == 0 {
            return Err(TextureError::NoMipLevels);
        }
        Ok(header)
    }

    /// Resolves the pixel format from the compression and alpha-encoding
    /// pair. Palette and JPEG compression are not decoded here.
    pub fn format(&self) -> Result<TextureFormat> {
        match (self.compression, self.alpha_encoding) {
            (2, 0) => Ok(TextureFormat::Dxt1),
            (2, 1) => Ok(TextureFormat::Dxt3),
            (2, 7) => Ok(TextureFormat::Dxt5),
            (3, _) => Ok(TextureFormat::RawArgb),
            _ => Err(TextureError::Unsupported {
                compression: self.compression,
                alpha_encoding: self.alpha_encoding,
            }),
        }
    }

    /// A slot holds a mip only when both its offset and size are non-zero.
    pub fn mip_present(&self, slot: usize) -> bool {
        self.offsets[slot] != 0 && self.sizes[slot] != 0
    }

    /// Number of populated mip slots.
    pub fn mip_count(&self) -> usize {
        (0..MIP_SLOTS).filter(|&slot| self.mip_present(slot)).count()
    }

    /// Pixel dimensions of dense output level `level`, clamped at 1×1.
    pub fn mip_dimensions(&self, level: usize) -> (u32, u32) {
        ((self.width >> level).max(1), (self.height >> level).max(1))
    }
}
