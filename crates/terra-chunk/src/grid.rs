//! Static data of the terrain vertex grid.
//!
//! Every chunk shares the same topology: 17 vertex rows alternating between
//! 9 outer and 8 inner columns, 145 vertices total. Inner rows sit half a
//! unit to the right, forming the interlocking diamond pattern. Because the
//! topology never varies, the UV tables and the triangle index buffer are
//! format constants computed once at compile time.

/// Number of vertices in one chunk.
pub const VERTEX_COUNT: usize = 145;

/// Number of vertex rows (9-wide and 8-wide rows interleaved).
pub const ROW_COUNT: usize = 17;

/// Number of triangle indices in the shared index buffer.
pub const INDEX_COUNT: usize = 768;

/// Width of a vertex row: 9 for even (outer) rows, 8 for odd (inner) rows.
pub const fn row_len(row: usize) -> usize {
    if row % 2 == 0 { 9 } else { 8 }
}

/// Detail-texture UVs per vertex; the texture tiles once per quad, so the
/// coordinates run 0..8 across the chunk.
pub static TEX_COORDS: [[f32; 2]; VERTEX_COUNT] = build_uvs(1.0);

/// Blend-map UVs per vertex; the 64×64 alpha texture spans the chunk once.
pub static ALPHA_COORDS: [[f32; 2]; VERTEX_COUNT] = build_uvs(1.0 / 8.0);

/// Triangle list over the 145-vertex grid: four triangles fanned around the
/// center vertex of each of the 64 quads. Shared by every chunk; never
/// re-derived per chunk.
pub static INDICES: [u16; INDEX_COUNT] = build_indices();

const fn build_uvs(scale: f32) -> [[f32; 2]; VERTEX_COUNT] {
    let mut uvs = [[0.0; 2]; VERTEX_COUNT];
    let mut counter = 0;
    let mut row = 0;
    while row < ROW_COUNT {
        let mut col = 0;
        while col < row_len(row) {
            let offset = if row % 2 != 0 { 0.5 } else { 0.0 };
            uvs[counter] = [
                (col as f32 + offset) * scale,
                row as f32 * 0.5 * scale,
            ];
            counter += 1;
            col += 1;
        }
        row += 1;
    }
    uvs
}

const fn build_indices() -> [u16; INDEX_COUNT] {
    let mut indices = [0u16; INDEX_COUNT];
    let mut n = 0;
    let mut row = 0;
    while row < 8 {
        let mut col = 0;
        while col < 8 {
            let top_left = (row * 17 + col) as u16;
            let top_right = top_left + 1;
            let center = (row * 17 + 9 + col) as u16;
            let bottom_left = ((row + 1) * 17 + col) as u16;
            let bottom_right = bottom_left + 1;

            let triangles = [
                [center, top_left, top_right],
                [center, top_right, bottom_right],
                [center, bottom_right, bottom_left],
                [center, bottom_left, top_left],
            ];
            let mut t = 0;
            while t < 4 {
                indices[n] = triangles[t][0];
                indices[n + 1] = triangles[t][1];
                indices[n + 2] = triangles[t][2];
                n += 3;
                t += 1;
            }
            col += 1;
        }
        row += 1;
    }
    indices
}
