//! Compiled-in geometry for the two rendered shapes.
//!
//! Every shape is a flat, non-indexed triangle list stored as three parallel
//! arrays (positions, normals, texture coordinates). Corners shared between faces
//! are duplicated so each face can carry its own flat normal.

/// Number of floats per position and normal.
pub const COMPONENTS_3D: usize = 3;
/// Number of floats per texture coordinate.
pub const COMPONENTS_UV: usize = 2;

/// The shapes known to the demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Cube,
    Tetrahedron,
}

impl MeshKind {
    /// All mesh kinds, in draw order.
    pub const ALL: [MeshKind; 2] = [MeshKind::Cube, MeshKind::Tetrahedron];

    /// Returns the static vertex data for this shape.
    pub fn data(self) -> &'static MeshData {
        match self {
            MeshKind::Cube => &CUBE,
            MeshKind::Tetrahedron => &TETRAHEDRON,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MeshKind::Cube => "cube",
            MeshKind::Tetrahedron => "tetrahedron",
        }
    }
}

/// Vertex attribute set of a triangle-list mesh.
#[derive(Debug)]
pub struct MeshData {
    positions: &'static [f32],
    normals: &'static [f32],
    uvs: &'static [f32],
}

impl MeshData {
    /// Vertex positions, three floats per vertex.
    pub fn positions(&self) -> &'static [f32] {
        self.positions
    }

    /// Per-vertex normals, three floats per vertex.
    pub fn normals(&self) -> &'static [f32] {
        self.normals
    }

    /// Texture coordinates, two floats per vertex.
    pub fn uvs(&self) -> &'static [f32] {
        self.uvs
    }

    /// Number of vertices to draw.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / COMPONENTS_3D
    }

    pub fn triangle_count(&self) -> usize {
        self.vertex_count() / 3
    }
}

//          0        3
//       7        4 <-- top-right-near
// bottom
// left
// far ---> 1        2
//       6        5
//
// Half extent 0.25, faces wound counter-clockwise seen from outside.
#[rustfmt::skip]
const CUBE_POSITIONS: [f32; 108] = [
    // back
     0.25, -0.25, -0.25,
    -0.25, -0.25, -0.25,
    -0.25,  0.25, -0.25,
    -0.25,  0.25, -0.25,
     0.25,  0.25, -0.25,
     0.25, -0.25, -0.25,
    // front
    -0.25, -0.25,  0.25,
     0.25, -0.25,  0.25,
     0.25,  0.25,  0.25,
     0.25,  0.25,  0.25,
    -0.25,  0.25,  0.25,
    -0.25, -0.25,  0.25,
    // left
    -0.25, -0.25, -0.25,
    -0.25, -0.25,  0.25,
    -0.25,  0.25,  0.25,
    -0.25,  0.25,  0.25,
    -0.25,  0.25, -0.25,
    -0.25, -0.25, -0.25,
    // right
     0.25, -0.25,  0.25,
     0.25, -0.25, -0.25,
     0.25,  0.25, -0.25,
     0.25,  0.25, -0.25,
     0.25,  0.25,  0.25,
     0.25, -0.25,  0.25,
    // bottom
    -0.25, -0.25, -0.25,
     0.25, -0.25, -0.25,
     0.25, -0.25,  0.25,
     0.25, -0.25,  0.25,
    -0.25, -0.25,  0.25,
    -0.25, -0.25, -0.25,
    // top
    -0.25,  0.25,  0.25,
     0.25,  0.25,  0.25,
     0.25,  0.25, -0.25,
     0.25,  0.25, -0.25,
    -0.25,  0.25, -0.25,
    -0.25,  0.25,  0.25,
];

#[rustfmt::skip]
const CUBE_NORMALS: [f32; 108] = [
    // back
     0.0,  0.0, -1.0,
     0.0,  0.0, -1.0,
     0.0,  0.0, -1.0,
     0.0,  0.0, -1.0,
     0.0,  0.0, -1.0,
     0.0,  0.0, -1.0,
    // front
     0.0,  0.0,  1.0,
     0.0,  0.0,  1.0,
     0.0,  0.0,  1.0,
     0.0,  0.0,  1.0,
     0.0,  0.0,  1.0,
     0.0,  0.0,  1.0,
    // left
    -1.0,  0.0,  0.0,
    -1.0,  0.0,  0.0,
    -1.0,  0.0,  0.0,
    -1.0,  0.0,  0.0,
    -1.0,  0.0,  0.0,
    -1.0,  0.0,  0.0,
    // right
     1.0,  0.0,  0.0,
     1.0,  0.0,  0.0,
     1.0,  0.0,  0.0,
     1.0,  0.0,  0.0,
     1.0,  0.0,  0.0,
     1.0,  0.0,  0.0,
    // bottom
     0.0, -1.0,  0.0,
     0.0, -1.0,  0.0,
     0.0, -1.0,  0.0,
     0.0, -1.0,  0.0,
     0.0, -1.0,  0.0,
     0.0, -1.0,  0.0,
    // top
     0.0,  1.0,  0.0,
     0.0,  1.0,  0.0,
     0.0,  1.0,  0.0,
     0.0,  1.0,  0.0,
     0.0,  1.0,  0.0,
     0.0,  1.0,  0.0,
];

#[rustfmt::skip]
const CUBE_UVS: [f32; 72] = [
    // back
     0.0,  0.0,
     1.0,  0.0,
     1.0,  1.0,
     1.0,  1.0,
     0.0,  1.0,
     0.0,  0.0,
    // front
     0.0,  0.0,
     1.0,  0.0,
     1.0,  1.0,
     1.0,  1.0,
     0.0,  1.0,
     0.0,  0.0,
    // left
     0.0,  0.0,
     1.0,  0.0,
     1.0,  1.0,
     1.0,  1.0,
     0.0,  1.0,
     0.0,  0.0,
    // right
     0.0,  0.0,
     1.0,  0.0,
     1.0,  1.0,
     1.0,  1.0,
     0.0,  1.0,
     0.0,  0.0,
    // bottom
     0.0,  0.0,
     1.0,  0.0,
     1.0,  1.0,
     1.0,  1.0,
     0.0,  1.0,
     0.0,  0.0,
    // top
     0.0,  0.0,
     1.0,  0.0,
     1.0,  1.0,
     1.0,  1.0,
     0.0,  1.0,
     0.0,  0.0,
];

// Uses corners 1, 3, 5 and 7 of the cube above. Face normals are left unnormalized,
// the vertex shader normalizes them.
#[rustfmt::skip]
const TETRAHEDRON_POSITIONS: [f32; 36] = [
    -0.25, -0.25, -0.25,
    -0.25,  0.25,  0.25,
     0.25, -0.25,  0.25,

    -0.25,  0.25,  0.25,
     0.25, -0.25,  0.25,
     0.25,  0.25, -0.25,

    -0.25,  0.25,  0.25,
     0.25,  0.25, -0.25,
    -0.25, -0.25, -0.25,

     0.25,  0.25, -0.25,
    -0.25, -0.25, -0.25,
     0.25, -0.25,  0.25,
];

#[rustfmt::skip]
const TETRAHEDRON_NORMALS: [f32; 36] = [
    -1.0, -1.0,  1.0,
    -1.0, -1.0,  1.0,
    -1.0, -1.0,  1.0,

     1.0,  1.0,  1.0,
     1.0,  1.0,  1.0,
     1.0,  1.0,  1.0,

    -1.0,  1.0, -1.0,
    -1.0,  1.0, -1.0,
    -1.0,  1.0, -1.0,

     1.0, -1.0, -1.0,
     1.0, -1.0, -1.0,
     1.0, -1.0, -1.0,
];

#[rustfmt::skip]
const TETRAHEDRON_UVS: [f32; 24] = [
    0.0, 0.0,
    1.0, 0.0,
    0.5, 1.0,

    0.0, 0.0,
    1.0, 0.0,
    0.5, 1.0,

    0.0, 0.0,
    1.0, 0.0,
    0.5, 1.0,

    0.0, 0.0,
    1.0, 0.0,
    0.5, 1.0,
];

static CUBE: MeshData = MeshData {
    positions: &CUBE_POSITIONS,
    normals: &CUBE_NORMALS,
    uvs: &CUBE_UVS,
};

static TETRAHEDRON: MeshData = MeshData {
    positions: &TETRAHEDRON_POSITIONS,
    normals: &TETRAHEDRON_NORMALS,
    uvs: &TETRAHEDRON_UVS,
};

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn vec3_at(data: &[f32], index: usize) -> Vec3 {
        Vec3::from_slice(&data[index * 3..index * 3 + 3])
    }

    #[test]
    fn test_vertex_counts() {
        let cube = MeshKind::Cube.data();
        assert_eq!(cube.positions().len(), 108);
        assert_eq!(cube.vertex_count(), 36);
        assert_eq!(cube.triangle_count(), 12);

        let tetrahedron = MeshKind::Tetrahedron.data();
        assert_eq!(tetrahedron.positions().len(), 36);
        assert_eq!(tetrahedron.vertex_count(), 12);
        assert_eq!(tetrahedron.triangle_count(), 4);
    }

    #[test]
    fn test_attribute_arrays_are_parallel() {
        for kind in MeshKind::ALL {
            let data = kind.data();
            let count = data.vertex_count();
            assert_eq!(data.positions().len(), count * COMPONENTS_3D, "{}", kind.name());
            assert_eq!(data.normals().len(), count * COMPONENTS_3D, "{}", kind.name());
            assert_eq!(data.uvs().len(), count * COMPONENTS_UV, "{}", kind.name());
            assert_eq!(count % 3, 0);
        }
    }

    #[test]
    fn test_cube_winding_matches_normals() {
        let cube = MeshKind::Cube.data();
        for tri in 0..cube.triangle_count() {
            let a = vec3_at(cube.positions(), tri * 3);
            let b = vec3_at(cube.positions(), tri * 3 + 1);
            let c = vec3_at(cube.positions(), tri * 3 + 2);
            let face = (b - a).cross(c - a).normalize();
            for v in 0..3 {
                let normal = vec3_at(cube.normals(), tri * 3 + v);
                assert!(face.abs_diff_eq(normal, 1e-6), "triangle {tri}");
            }
        }
    }

    #[test]
    fn test_normals_point_outwards() {
        for kind in MeshKind::ALL {
            let data = kind.data();
            for tri in 0..data.triangle_count() {
                let centroid = (vec3_at(data.positions(), tri * 3)
                    + vec3_at(data.positions(), tri * 3 + 1)
                    + vec3_at(data.positions(), tri * 3 + 2))
                    / 3.0;
                let normal = vec3_at(data.normals(), tri * 3);
                assert!(centroid.dot(normal) > 0.0, "{} triangle {tri}", kind.name());
            }
        }
    }

    #[test]
    fn test_uvs_in_unit_range() {
        for kind in MeshKind::ALL {
            assert!(kind.data().uvs().iter().all(|uv| (0.0..=1.0).contains(uv)));
        }
    }
}
