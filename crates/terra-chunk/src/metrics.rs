//! World-space metrics of the terrain grid.
//!
//! All values derive from the edge length of one map tile. A tile is a
//! 16×16 grid of chunks; a chunk is an 8×8 grid of quads with one extra
//! vertex at each quad center.

/// Edge length of one map tile in world units.
pub const TILE_SIZE: f32 = 533.333_33;

/// Distance from the world origin to the map center along each axis.
pub const MID_POINT: f32 = 32.0 * TILE_SIZE / 2.0;

/// Edge length of one terrain chunk.
pub const CHUNK_SIZE: f32 = TILE_SIZE / 16.0;

/// Horizontal spacing between neighbouring outer-row vertices.
pub const UNIT_SIZE: f32 = CHUNK_SIZE / 8.0;

/// Edge length covered by one alpha-map texel.
pub const HOLE_SIZE: f32 = CHUNK_SIZE / 64.0;

/// Edge length of one cell of the 4×4 hole grid.
pub const HOLE_LEN: f32 = CHUNK_SIZE / 4.0;
