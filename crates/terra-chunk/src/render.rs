//! Renderer-facing seams.
//!
//! Chunk decoding never talks to a graphics API directly. Instead the
//! renderer hands in implementations of the traits below and gets back
//! opaque ids for everything it uploaded, so the decode path stays free of
//! any particular backend.

use crate::vertex::TerrainVertex;

/// Opaque handle to an uploaded chunk mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(pub u64);

/// Opaque handle to an uploaded texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// Opaque handle to a spawned doodad instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(pub u64);

/// Graphics backend operations a chunk needs over its lifetime.
pub trait ChunkGpu {
    /// Upload the chunk mesh; indices come from [`crate::grid::INDICES`].
    fn upload_mesh(&mut self, vertices: &[TerrainVertex], indices: &[u16]) -> MeshId;

    /// Upload the composited 64×64 RGBA blend texture.
    fn upload_blend_texture(&mut self, rgba: &[u8]) -> TextureId;

    /// Release a mesh uploaded earlier.
    fn dispose_mesh(&mut self, mesh: MeshId);

    /// Release a texture uploaded earlier.
    fn dispose_texture(&mut self, texture: TextureId);

    /// Issue the draw call for an uploaded mesh.
    fn draw_mesh(&mut self, mesh: MeshId);
}

/// The terrain shader a chunk binds its state into before drawing.
pub trait TerrainShader {
    /// Select the shader technique; terrain uses `layer_count - 1`.
    fn set_technique(&mut self, technique: u32);

    /// Bind a texture under a shader-declared name.
    fn set_texture(&mut self, name: &str, texture: TextureId);

    /// Set an integer shader constant under a shader-declared name.
    fn set_scalar(&mut self, name: &str, value: i32);

    /// Run `draw` with the bound state active.
    fn draw(&mut self, draw: &mut dyn FnMut());
}

/// Receives the doodad references collected during pre-load.
pub trait DoodadSpawner {
    /// Instantiate the doodad behind `doodad_ref`, if it resolves.
    fn spawn(&mut self, doodad_ref: u32) -> Option<InstanceId>;
}
