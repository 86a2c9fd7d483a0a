use std::sync::Arc;

use crate::attributes::{self, FacetAttributes};
use crate::base::BaseMesh;
use crate::icosahedron::icosahedron;
use crate::sink::{AttributeSink, ATTR_BARY_COORD, ATTR_CENTER, ATTR_POSITION};
use crate::vertex::FacetVertex;

/// Base mesh paired with the facet attributes derived from it.
///
/// Attributes are built once and shared by reference with every outline
/// shell cloned through [`FacetMesh::shell`].
#[derive(Debug, Clone)]
pub struct FacetMesh {
    base: BaseMesh,
    attributes: Arc<FacetAttributes>,
}

impl FacetMesh {
    pub fn new(base: BaseMesh) -> Self {
        let attributes = Arc::new(attributes::build(base.positions()));
        tracing::debug!(
            vertices = base.vertex_count(),
            triangles = base.triangle_count(),
            "built facet attributes"
        );
        Self { base, attributes }
    }

    /// Subdivided icosahedron with attributes attached.
    pub fn icosphere(radius: f32, detail: u32) -> Self {
        Self::new(icosahedron(radius, detail))
    }

    pub fn base(&self) -> &BaseMesh {
        &self.base
    }

    pub fn attributes(&self) -> &FacetAttributes {
        &self.attributes
    }

    pub fn shares_attributes_with(&self, other: &FacetMesh) -> bool {
        Arc::ptr_eq(&self.attributes, &other.attributes)
    }

    /// Scaled copy used as the outline/backing shell.
    ///
    /// The shell reuses this mesh's attribute buffers untouched, so its
    /// centroids still refer to the unscaled triangles.
    pub fn shell(&self, scale: f32) -> Self {
        Self {
            base: self.base.scaled(scale),
            attributes: Arc::clone(&self.attributes),
        }
    }

    /// Pushes position, `aBaryCoord` and `aCenter` buffers into `sink`.
    pub fn attach<S: AttributeSink + ?Sized>(&self, sink: &mut S) {
        sink.set_attribute(ATTR_POSITION, 3, &self.base.to_flat());
        sink.set_attribute(ATTR_BARY_COORD, 3, &self.attributes.bary_flat());
        sink.set_attribute(ATTR_CENTER, 3, &self.attributes.centers_flat());
    }

    pub fn interleaved(&self) -> Vec<FacetVertex> {
        self.base
            .positions()
            .iter()
            .zip(self.attributes.bary_coords())
            .zip(self.attributes.centers())
            .map(|((position, bary_coord), center)| FacetVertex {
                position: position.to_array(),
                bary_coord: *bary_coord,
                center: *center,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::AttributeTable;

    #[test]
    fn attach_writes_three_aligned_buffers() {
        let mesh = FacetMesh::icosphere(1.0, 1);
        let mut table = AttributeTable::new();
        mesh.attach(&mut table);

        assert_eq!(table.len(), 3);
        for name in [ATTR_POSITION, ATTR_BARY_COORD, ATTR_CENTER] {
            let buffer = table.get(name).expect(name);
            assert_eq!(buffer.item_size, 3);
            assert_eq!(buffer.count(), 240, "{name}");
        }
        assert_eq!(
            table.get(ATTR_BARY_COORD).and_then(|b| b.item(2)),
            Some(&[0.0, 0.0, 1.0][..])
        );
    }

    #[test]
    fn shell_shares_attributes_and_scales_positions() {
        let mesh = FacetMesh::icosphere(1.0, 1);
        let shell = mesh.shell(1.02);

        assert!(shell.shares_attributes_with(&mesh));
        assert_eq!(shell.attributes(), mesh.attributes());
        for (inner, outer) in mesh.base().positions().iter().zip(shell.base().positions()) {
            assert!((outer.length() - inner.length() * 1.02).abs() < 1e-5);
        }
    }

    #[test]
    fn separately_built_meshes_do_not_share() {
        let a = FacetMesh::icosphere(1.0, 0);
        let b = FacetMesh::icosphere(1.0, 0);
        assert!(!a.shares_attributes_with(&b));
    }

    #[test]
    fn interleaved_vertices_follow_source_order() {
        let mesh = FacetMesh::icosphere(1.0, 0);
        let vertices = mesh.interleaved();
        assert_eq!(vertices.len(), mesh.base().vertex_count());
        assert_eq!(vertices[3].position, mesh.base().positions()[3].to_array());
        assert_eq!(vertices[3].bary_coord, [1.0, 0.0, 0.0]);
        assert_eq!(vertices[5].center, mesh.attributes().centers()[3]);
    }
}
