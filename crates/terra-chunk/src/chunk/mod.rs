//! Terrain chunk decoding and lifetime.
//!
//! A chunk is pre-loaded in one shot from its index entry: header, heights,
//! layers, blend map, normals and doodad references, in that order. Decoding
//! is all-or-nothing. GPU work happens later, on first render, through the
//! collaborator traits in [`crate::render`].

use std::fmt;
use std::io::{Read, Seek, SeekFrom};

use log::debug;

use crate::error::{ChunkError, Result};
use crate::grid::INDICES;
use crate::render::{ChunkGpu, DoodadSpawner, InstanceId, MeshId, TerrainShader, TextureId};
use crate::vertex::{Aabb, TerrainVertex};

mod alpha;
mod header;
mod heights;
mod layers;
mod normals;
mod refs;

pub use alpha::{BLEND_MAP_BYTES, BLEND_MAP_DIM};
pub use header::{ChunkIndexEntry, TerrainChunkHeader};
pub use layers::{LayerDescriptor, LayerFlags, LayerTable, MAX_LAYERS};

/// A 4-byte chunk signature. Stored reversed on disk: the bytes of "MCNK"
/// appear as "KNCM" in the file.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkTag(pub [u8; 4]);

impl ChunkTag {
    /// Terrain chunk container.
    pub const MCNK: Self = Self(*b"MCNK");
    /// Height sub-chunk.
    pub const MCVT: Self = Self(*b"MCVT");
    /// Normal sub-chunk.
    pub const MCNR: Self = Self(*b"MCNR");
    /// Texture layer sub-chunk.
    pub const MCLY: Self = Self(*b"MCLY");
    /// Doodad reference sub-chunk.
    pub const MCRF: Self = Self(*b"MCRF");

    /// Reads 4 bytes and reverses them into canonical tag order.
    pub fn read_reversed<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let mut raw = [0u8; 4];
        reader.read_exact(&mut raw)?;
        raw.reverse();
        Ok(Self(raw))
    }
}

impl fmt::Display for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{}", byte.escape_ascii())?;
        }
        Ok(())
    }
}

impl fmt::Debug for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkTag(\"{self}\")")
    }
}

/// One decoded terrain chunk plus its GPU-side state.
#[derive(Debug)]
pub struct TerrainChunk {
    header: TerrainChunkHeader,
    vertices: Vec<TerrainVertex>,
    bounds: Aabb,
    layers: LayerTable,
    blend_map: Vec<u8>,
    doodad_refs: Vec<u32>,
    mesh: Option<MeshId>,
    blend_texture: Option<TextureId>,
    doodads: Vec<InstanceId>,
}

impl TerrainChunk {
    /// Decodes a chunk from `reader` at the location the index entry names.
    ///
    /// Fails if the signature is wrong, if the chunk's own size prefix
    /// disagrees with the index entry, or if any sub-decoder fails; no
    /// partially populated chunk is ever returned.
    pub fn preload<R: Read + Seek>(reader: &mut R, entry: &ChunkIndexEntry) -> Result<Self> {
        let base = u64::from(entry.offset);
        reader.seek(SeekFrom::Start(base))?;

        let declared = header::expect_tag(reader, ChunkTag::MCNK)?;
        if declared.checked_add(8) != Some(entry.size) {
            return Err(ChunkError::SizeMismatch {
                declared,
                indexed: entry.size,
            });
        }

        let header = TerrainChunkHeader::read(reader)?;
        let (mut vertices, bounds) = heights::read_vertices(reader, base, &header)?;
        let layers = layers::read_layers(reader, base, &header)?;
        let blend_map = alpha::compose_blend_map(reader, base, &header, &layers)?;
        normals::apply_normals(reader, base, &header, &mut vertices)?;
        let doodad_refs = refs::read_doodad_refs(reader, base, &header)?;

        debug!(
            "chunk {}x{} loaded: {} layers, {} doodad refs",
            header.index_x,
            header.index_y,
            header.layer_count,
            doodad_refs.len()
        );

        Ok(Self {
            header,
            vertices,
            bounds,
            layers,
            blend_map,
            doodad_refs,
            mesh: None,
            blend_texture: None,
            doodads: Vec::new(),
        })
    }

    /// Draws the chunk through the renderer seams.
    ///
    /// A chunk without layers never touches the GPU. Mesh and blend texture
    /// are uploaded lazily on first call; the collected doodad references
    /// are handed to the spawner exactly once. `textures` maps a layer's
    /// texture id to the texture the tile loaded for it.
    pub fn render(
        &mut self,
        gpu: &mut dyn ChunkGpu,
        shader: &mut dyn TerrainShader,
        spawner: &mut dyn DoodadSpawner,
        textures: &mut dyn FnMut(u32) -> TextureId,
    ) {
        if self.header.layer_count == 0 {
            return;
        }

        let mesh = *self
            .mesh
            .get_or_insert_with(|| gpu.upload_mesh(&self.vertices, &INDICES));
        let blend = *self
            .blend_texture
            .get_or_insert_with(|| gpu.upload_blend_texture(&self.blend_map));

        for doodad in self.doodad_refs.drain(..) {
            if let Some(instance) = spawner.spawn(doodad) {
                self.doodads.push(instance);
            }
        }

        shader.set_technique(self.header.layer_count - 1);
        shader.set_texture("alphaTexture", blend);
        for (slot, &flag) in self.layers.texture_flags.iter().enumerate() {
            shader.set_scalar(&format!("textureFlags{slot}"), flag);
        }
        for (slot, layer) in self.layers.layers.iter().enumerate() {
            shader.set_texture(&format!("blendTexture{slot}"), textures(layer.texture_id));
        }

        shader.draw(&mut || gpu.draw_mesh(mesh));
    }

    /// Releases GPU resources and drops decoded storage.
    ///
    /// Disposal happens at most once per resource; a chunk that was never
    /// rendered has nothing to dispose. Safe to call repeatedly.
    pub fn unload(&mut self, gpu: &mut dyn ChunkGpu) {
        if let Some(mesh) = self.mesh.take() {
            gpu.dispose_mesh(mesh);
        }
        if let Some(texture) = self.blend_texture.take() {
            gpu.dispose_texture(texture);
        }

        self.layers.layers.clear();
        self.blend_map.clear();
        self.doodad_refs.clear();
    }

    /// The decoded 128-byte header.
    pub fn header(&self) -> &TerrainChunkHeader {
        &self.header
    }

    /// World-space bounding box for caller-side culling.
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// The 145 decoded vertices in grid row order.
    pub fn vertices(&self) -> &[TerrainVertex] {
        &self.vertices
    }

    /// The decoded layer table.
    pub fn layers(&self) -> &LayerTable {
        &self.layers
    }

    /// The composited 64×64 RGBA blend map.
    pub fn blend_map(&self) -> &[u8] {
        &self.blend_map
    }

    /// Doodad references not yet handed to a spawner.
    pub fn doodad_refs(&self) -> &[u32] {
        &self.doodad_refs
    }

    /// Instances spawned from this chunk's references.
    pub fn doodad_instances(&self) -> &[InstanceId] {
        &self.doodads
    }
}
