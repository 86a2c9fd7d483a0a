use glam::Vec3;

/// Barycentric tag for the first, second and third corner of a triangle.
pub const BARY_TAGS: [[f32; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// Per-vertex attributes derived from a triangulated position list.
///
/// Both buffers are index-aligned with the source positions.
#[derive(Debug, Clone, PartialEq)]
pub struct FacetAttributes {
    bary_coords: Vec<[f32; 3]>,
    centers: Vec<[f32; 3]>,
}

impl FacetAttributes {
    /// Corner tags consumed by the shader as `aBaryCoord`.
    pub fn bary_coords(&self) -> &[[f32; 3]] {
        &self.bary_coords
    }

    /// Triangle centroids consumed by the shader as `aCenter`.
    pub fn centers(&self) -> &[[f32; 3]] {
        &self.centers
    }

    pub fn len(&self) -> usize {
        self.bary_coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bary_coords.is_empty()
    }

    pub fn bary_flat(&self) -> Vec<f32> {
        self.bary_coords.iter().flatten().copied().collect()
    }

    pub fn centers_flat(&self) -> Vec<f32> {
        self.centers.iter().flatten().copied().collect()
    }
}

/// Derives barycentric tags and broadcast centroids for every vertex.
///
/// The tag is topological: corner `i` of its triangle gets `BARY_TAGS[i % 3]`
/// and the rasterizer interpolates it into a true barycentric coordinate.
///
/// # Panics
///
/// Panics when `positions.len()` is not a multiple of three.
pub fn build(positions: &[Vec3]) -> FacetAttributes {
    assert!(
        positions.len() % 3 == 0,
        "facet attributes require whole triangles, got {} vertices",
        positions.len()
    );

    let mut bary_coords = Vec::with_capacity(positions.len());
    let mut centers = Vec::with_capacity(positions.len());

    for corners in positions.chunks_exact(3) {
        let center = ((corners[0] + corners[1] + corners[2]) / 3.0).to_array();
        for tag in BARY_TAGS {
            bary_coords.push(tag);
            centers.push(center);
        }
    }

    FacetAttributes {
        bary_coords,
        centers,
    }
}

/// Same as [`build`] for a flat `x, y, z, ...` buffer.
///
/// # Panics
///
/// Panics when the buffer length is not a multiple of nine.
pub fn build_flat(buffer: &[f32]) -> FacetAttributes {
    assert!(
        buffer.len() % 9 == 0,
        "facet attributes require whole triangles, got {} floats",
        buffer.len()
    );
    let positions: Vec<Vec3> = buffer
        .chunks_exact(3)
        .map(|xyz| Vec3::new(xyz[0], xyz[1], xyz[2]))
        .collect();
    build(&positions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn twelve_triangles() -> Vec<Vec3> {
        (0..36)
            .map(|i| {
                let f = i as f32;
                Vec3::new(f * 0.5 - 3.0, (f * 1.3).sin(), f * f * 0.01)
            })
            .collect()
    }

    fn close(a: [f32; 3], b: Vec3) -> bool {
        (Vec3::from_array(a) - b).abs().max_element() < 1e-5
    }

    #[test]
    fn outputs_match_vertex_count() {
        let positions = twelve_triangles();
        let attributes = build(&positions);
        assert_eq!(attributes.len(), 36);
        assert_eq!(attributes.bary_coords().len(), 36);
        assert_eq!(attributes.centers().len(), 36);
    }

    #[test]
    fn first_triangle_centroid_is_broadcast() {
        let positions = twelve_triangles();
        let attributes = build(&positions);
        let expected = (positions[0] + positions[1] + positions[2]) / 3.0;
        for slot in 0..3 {
            assert!(close(attributes.centers()[slot], expected));
        }
    }

    #[test]
    fn every_triangle_shares_its_mean() {
        let positions = twelve_triangles();
        let attributes = build(&positions);
        for t in 0..12 {
            let expected = (positions[3 * t] + positions[3 * t + 1] + positions[3 * t + 2]) / 3.0;
            let centers = &attributes.centers()[3 * t..3 * t + 3];
            assert_eq!(centers[0], centers[1]);
            assert_eq!(centers[1], centers[2]);
            assert!(close(centers[0], expected), "triangle {t}");
        }
    }

    #[test]
    fn bary_tag_follows_corner_index() {
        let attributes = build(&twelve_triangles());
        for (i, tag) in attributes.bary_coords().iter().enumerate() {
            assert_eq!(*tag, BARY_TAGS[i % 3], "vertex {i}");
        }
        assert_eq!(attributes.bary_coords()[4], [0.0, 1.0, 0.0]);
        assert_eq!(attributes.bary_coords()[8], [0.0, 0.0, 1.0]);
    }

    #[test]
    fn flat_buffer_matches_vector_input() {
        let positions = twelve_triangles();
        let flat: Vec<f32> = positions.iter().flat_map(|v| v.to_array()).collect();
        assert_eq!(build_flat(&flat), build(&positions));
        assert_eq!(build_flat(&flat).centers_flat().len(), flat.len());
    }

    #[test]
    fn empty_input_yields_empty_attributes() {
        let attributes = build(&[]);
        assert!(attributes.is_empty());
    }

    #[test]
    #[should_panic(expected = "whole triangles")]
    fn partial_triangle_is_a_programming_error() {
        build(&[Vec3::ZERO; 4]);
    }
}
