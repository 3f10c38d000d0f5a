//! BLP2 texture container decoding and the shared texture cache.
//!
//! BLP2 is the game's texture container: a fixed header, sixteen mip slots,
//! and payloads in DXT1/3/5 or uncompressed ARGB. This crate decodes a
//! container to dense RGBA8 mips, falls back to the `image` crate for
//! foreign containers, and provides [`TextureCache`], the reference-counted
//! store that uploads each texture once and disposes it on the render
//! thread when the last handle drops.
//!
//! ## Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("textures/tileset/grass.blp")?;
//! let texture = terra_blp::load_texture(&bytes)?;
//! println!("{}x{}, {} mips", texture.width, texture.height, texture.mips.len());
//! # Ok(())
//! # }
//! ```

mod cache;
mod decode;
mod error;
mod header;
mod reader;

pub use cache::{NativeTextureId, Resolver, TextureCache, TextureGpu, TextureHandle};
pub use decode::{DecodedTexture, MipLevel, decode};
pub use error::{Result, TextureError};
pub use header::{BLP_MAGIC, BlpHeader, MAX_DIMENSION, MIP_SLOTS, TextureFormat};

/// What kind of container a byte payload holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// A BLP2 container, decoded natively.
    Blp,
    /// Anything else; handed to the fallback decoder.
    Foreign,
}

/// Classifies a payload by its leading magic.
pub fn classify(data: &[u8]) -> ContainerKind {
    if data.len() >= 4 && data[..4] == BLP_MAGIC {
        ContainerKind::Blp
    } else {
        ContainerKind::Foreign
    }
}

/// Decodes a texture payload of either kind to RGBA8.
///
/// BLP containers go through the native decoder; everything else is tried
/// with the `image` crate and yields a single-mip texture. A payload neither
/// decoder understands is an unsupported-format error.
pub fn load_texture(data: &[u8]) -> Result<DecodedTexture> {
    match classify(data) {
        ContainerKind::Blp => decode(data),
        ContainerKind::Foreign => {
            let decoded = image::load_from_memory(data)?.to_rgba8();
            let (width, height) = decoded.dimensions();
            Ok(DecodedTexture {
                width,
                height,
                format: TextureFormat::RawArgb,
                mips: vec![MipLevel {
                    width,
                    height,
                    rgba: decoded.into_raw(),
                }],
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_keys_on_the_magic() {
        assert_eq!(classify(b"BLP2\x01\x00\x00\x00"), ContainerKind::Blp);
        assert_eq!(classify(b"BLP1"), ContainerKind::Foreign);
        assert_eq!(classify(b"\x89PNG"), ContainerKind::Foreign);
        assert_eq!(classify(b"BL"), ContainerKind::Foreign);
    }

    #[test]
    fn undecodable_foreign_payload_is_an_error() {
        let err = load_texture(&[0u8; 32]).unwrap_err();
        assert!(matches!(err, TextureError::ForeignDecode(_)));
    }
}
