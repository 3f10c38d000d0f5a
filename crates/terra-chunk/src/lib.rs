//! Decoder for terrain tile chunks.
//!
//! A map tile is a 16×16 grid of terrain chunks. Each chunk carries a
//! 145-vertex height grid, up to four texture layers blended through a
//! shared 64×64 alpha map, a hole mask, and references to the doodads
//! standing on it. This crate decodes one chunk at a time from any
//! `Read + Seek` source and drives its GPU lifetime through backend-neutral
//! traits, so it links against no graphics API.
//!
//! ## Example
//!
//! ```no_run
//! use std::fs::File;
//! use terra_chunk::{ChunkIndexEntry, TerrainChunk};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut file = File::open("Azeroth_32_48.tile")?;
//! let entry = ChunkIndexEntry { offset: 0x54, size: 0x1A70 };
//! let chunk = TerrainChunk::preload(&mut file, &entry)?;
//! println!("chunk bounds: {:?}", chunk.bounds());
//! # Ok(())
//! # }
//! ```

pub mod chunk;
pub mod error;
pub mod grid;
pub mod io;
pub mod metrics;
pub mod render;
pub mod vertex;

pub use chunk::{
    BLEND_MAP_BYTES, BLEND_MAP_DIM, ChunkIndexEntry, ChunkTag, LayerDescriptor, LayerFlags,
    LayerTable, MAX_LAYERS, TerrainChunk, TerrainChunkHeader,
};
pub use error::{ChunkError, Result};
pub use render::{ChunkGpu, DoodadSpawner, InstanceId, MeshId, TerrainShader, TextureId};
pub use vertex::{Aabb, TerrainVertex};
