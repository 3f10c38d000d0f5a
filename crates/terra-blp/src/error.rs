//! Error types for texture decoding and caching.

use thiserror::Error;

/// Result type alias using [`TextureError`] as the error type.
pub type Result<T> = std::result::Result<T, TextureError>;

/// Errors that can occur while loading a texture.
#[derive(Error, Debug)]
pub enum TextureError {
    /// Resolving the texture name to bytes failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The container magic is not "BLP2".
    #[error("wrong container magic: {0:?}")]
    WrongMagic([u8; 4]),

    /// The compression/alpha-encoding pair names no decodable format.
    #[error("unsupported format: compression {compression}, alpha encoding {alpha_encoding}")]
    Unsupported {
        compression: u8,
        alpha_encoding: u8,
    },

    /// The header declares dimensions outside the format's range.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Every mip slot is empty.
    #[error("texture has no mip levels")]
    NoMipLevels,

    /// A mip slot points outside the container.
    #[error("mip slot {level}: range {offset}+{size} exceeds {len} container bytes")]
    OutOfBounds {
        level: usize,
        offset: u32,
        size: u32,
        len: usize,
    },

    /// The container ended inside the header.
    #[error("unexpected end of container data")]
    UnexpectedEof,

    /// A non-BLP container that the fallback decoder could not read either.
    #[error("unsupported foreign container: {0}")]
    ForeignDecode(#[from] image::ImageError),
}
