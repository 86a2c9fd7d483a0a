use glam::Vec3;

/// Triangulated surface where every three consecutive vertices form a triangle.
///
/// No index buffer is involved: a corner shared by several triangles appears
/// once per triangle so each copy can carry per-triangle metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseMesh {
    positions: Vec<Vec3>,
}

impl BaseMesh {
    /// Wraps an already triangulated position list.
    ///
    /// # Panics
    ///
    /// Panics when the vertex count is not a multiple of three.
    pub fn new(positions: Vec<Vec3>) -> Self {
        assert!(
            positions.len() % 3 == 0,
            "triangulated mesh requires a multiple of 3 vertices, got {}",
            positions.len()
        );
        Self { positions }
    }

    /// Builds a mesh from a flat `x, y, z, x, y, z, ...` float buffer.
    ///
    /// # Panics
    ///
    /// Panics when the buffer does not hold whole triangles (length % 9 != 0).
    pub fn from_flat(buffer: &[f32]) -> Self {
        assert!(
            buffer.len() % 9 == 0,
            "flat position buffer must hold whole triangles (9 floats each), got {} floats",
            buffer.len()
        );
        let positions = buffer
            .chunks_exact(3)
            .map(|xyz| Vec3::new(xyz[0], xyz[1], xyz[2]))
            .collect();
        Self { positions }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Iterates triangles as `[v0, v1, v2]` corner triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.positions
            .chunks_exact(3)
            .map(|corners| [corners[0], corners[1], corners[2]])
    }

    /// Returns the positions as a flat float buffer.
    pub fn to_flat(&self) -> Vec<f32> {
        self.positions.iter().flat_map(|v| v.to_array()).collect()
    }

    /// Returns a copy with every position multiplied by `factor`.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            positions: self.positions.iter().map(|v| *v * factor).collect(),
        }
    }
}
