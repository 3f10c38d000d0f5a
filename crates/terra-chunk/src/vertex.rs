//! Vertex and bounding-volume types shared with the renderer.

use glam::{Vec2, Vec3};

/// One terrain vertex in engine world space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TerrainVertex {
    /// World-space position.
    pub position: Vec3,
    /// Unit normal, decoded from signed bytes.
    pub normal: Vec3,
    /// Detail-texture coordinate (tiles 8× per chunk).
    pub tex_coord: Vec2,
    /// Blend-map coordinate (spans the chunk once).
    pub alpha_coord: Vec2,
}

/// Axis-aligned bounding box of a decoded chunk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// True when `point` lies inside or on the box.
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}
