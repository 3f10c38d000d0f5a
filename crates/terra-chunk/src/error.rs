//! Error types for terrain chunk decoding.
//!
//! Decoding is all-or-nothing: the first failure aborts the whole pre-load
//! and no partially populated chunk is ever returned.

use thiserror::Error;

use crate::chunk::ChunkTag;

/// Result type alias using [`ChunkError`] as the error type.
pub type Result<T> = std::result::Result<T, ChunkError>;

/// Errors that can occur while decoding a terrain chunk.
#[derive(Error, Debug)]
pub enum ChunkError {
    /// Underlying byte source failed, e.g. a truncated archive.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A 4-byte signature check failed.
    #[error("signature mismatch: expected {expected}, found {found} at offset {offset}")]
    SignatureMismatch {
        /// The tag the decoder was looking for.
        expected: ChunkTag,
        /// The tag actually present in the stream.
        found: ChunkTag,
        /// Byte offset of the failed check.
        offset: u64,
    },

    /// The size recorded at the chunk's own prefix disagrees with the size
    /// the index entry declared for it.
    #[error("size mismatch: chunk declares {declared} + 8 bytes, index entry has {indexed}")]
    SizeMismatch {
        /// Size field read from the chunk's signature+size prefix.
        declared: u32,
        /// Total size according to the index entry.
        indexed: u32,
    },

    /// The header claims more texture layers than the format allows.
    #[error("layer count {0} exceeds the 4-layer limit")]
    TooManyLayers(u32),
}
