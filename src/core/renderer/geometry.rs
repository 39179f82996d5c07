//! Fixed geometry for the textured fan: one center vertex, four corners,
//! and four triangles fanning out from the center.

/// Vertex positions, `(x, y, z)` per vertex.
pub const POSITION_VERTICES: [f32; 15] = [
    0.0, 0.0, 0.0, // V0, center
    1.0, 1.0, 0.0, // V1
    -1.0, 1.0, 0.0, // V2
    -1.0, -1.0, 0.0, // V3
    1.0, -1.0, 0.0, // V4
];

/// Texture coordinates, `(s, t)` per vertex.
pub const TEXTURE_COORDS: [f32; 10] = [
    0.5, 0.5, // V0, center of the image
    1.0, 0.0, // V1
    0.0, 0.0, // V2
    0.0, 1.0, // V3
    1.0, 1.0, // V4
];

/// Draw order: four triangles sharing the center vertex.
pub const FAN_INDICES: [u16; 12] = [
    0, 1, 2, //
    0, 2, 3, //
    0, 3, 4, //
    0, 4, 1, //
];

/// Components per position attribute.
pub const POSITION_COMPONENTS: i32 = 3;
/// Components per texture-coordinate attribute.
pub const TEXCOORD_COMPONENTS: i32 = 2;
