use glam::Vec3;

use crate::base::BaseMesh;

pub const DEFAULT_RADIUS: f32 = 1.0;
/// One subdivision step: 20 faces become 80 triangles.
pub const DEFAULT_DETAIL: u32 = 1;

const PHI: f32 = 1.618_034;

#[rustfmt::skip]
const CORNERS: [[f32; 3]; 12] = [
    [-1.0, PHI, 0.0], [1.0, PHI, 0.0], [-1.0, -PHI, 0.0], [1.0, -PHI, 0.0],
    [0.0, -1.0, PHI], [0.0, 1.0, PHI], [0.0, -1.0, -PHI], [0.0, 1.0, -PHI],
    [PHI, 0.0, -1.0], [PHI, 0.0, 1.0], [-PHI, 0.0, -1.0], [-PHI, 0.0, 1.0],
];

#[rustfmt::skip]
const FACES: [[usize; 3]; 20] = [
    [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
    [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
    [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
    [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
];

/// Generates a non-indexed icosphere of the given radius.
///
/// Each icosahedron face is split into `(detail + 1)^2` triangles along a
/// barycentric grid and every vertex is pushed out onto the sphere.
pub fn icosahedron(radius: f32, detail: u32) -> BaseMesh {
    let cols = detail as usize + 1;
    let mut positions = Vec::with_capacity(FACES.len() * cols * cols * 3);

    for face in FACES {
        let [a, b, c] = face.map(|index| Vec3::from_array(CORNERS[index]));
        subdivide_face(a, b, c, cols, &mut positions);
    }

    for position in &mut positions {
        *position = position.normalize() * radius;
    }

    tracing::debug!(
        radius,
        detail,
        vertices = positions.len(),
        "generated icosahedron base mesh"
    );
    BaseMesh::new(positions)
}

fn subdivide_face(a: Vec3, b: Vec3, c: Vec3, cols: usize, out: &mut Vec<Vec3>) {
    // grid[i][j]: row i walks from edge ab towards c, j walks across the row
    let mut grid: Vec<Vec<Vec3>> = Vec::with_capacity(cols + 1);
    for i in 0..=cols {
        let t = i as f32 / cols as f32;
        let row_start = a.lerp(c, t);
        let row_end = b.lerp(c, t);
        let rows = cols - i;
        let row = (0..=rows)
            .map(|j| {
                if rows == 0 {
                    row_start
                } else {
                    row_start.lerp(row_end, j as f32 / rows as f32)
                }
            })
            .collect();
        grid.push(row);
    }

    for i in 0..cols {
        for j in 0..2 * (cols - i) - 1 {
            let k = j / 2;
            if j % 2 == 0 {
                out.extend([grid[i][k + 1], grid[i + 1][k], grid[i][k]]);
            } else {
                out.extend([grid[i][k + 1], grid[i + 1][k + 1], grid[i + 1][k]]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_zero_is_the_plain_icosahedron() {
        let mesh = icosahedron(1.0, 0);
        assert_eq!(mesh.triangle_count(), 20);
        assert_eq!(mesh.vertex_count(), 60);
    }

    #[test]
    fn default_detail_has_eighty_triangles() {
        let mesh = icosahedron(DEFAULT_RADIUS, DEFAULT_DETAIL);
        assert_eq!(mesh.triangle_count(), 80);
        assert_eq!(mesh.vertex_count(), 240);
    }

    #[test]
    fn triangle_count_grows_quadratically() {
        for detail in 0..4 {
            let cols = detail as usize + 1;
            assert_eq!(icosahedron(1.0, detail).triangle_count(), 20 * cols * cols);
        }
    }

    #[test]
    fn vertices_lie_on_the_sphere() {
        let mesh = icosahedron(2.5, 2);
        for position in mesh.positions() {
            assert!((position.length() - 2.5).abs() < 1e-5);
        }
    }

    #[test]
    fn triangles_are_not_degenerate() {
        let mesh = icosahedron(1.0, 1);
        for [a, b, c] in mesh.triangles() {
            let area = (b - a).cross(c - a).length() * 0.5;
            assert!(area > 1e-3, "degenerate triangle {a} {b} {c}");
        }
    }

    #[test]
    fn winding_faces_outwards() {
        let mesh = icosahedron(1.0, 1);
        for [a, b, c] in mesh.triangles() {
            let normal = (b - a).cross(c - a);
            let center = (a + b + c) / 3.0;
            assert!(normal.dot(center) > 0.0);
        }
    }
}
