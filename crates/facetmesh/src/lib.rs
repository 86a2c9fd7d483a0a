//! Procedural geometry for the faceted solid.
//!
//! The shader draws crisp facet borders without a wireframe pass by reading
//! two extra per-vertex attributes next to the position buffer:
//!
//! ```text
//!   icosahedron(radius, detail)
//!          │ BaseMesh (non-indexed, 3 vertices per triangle)
//!          ▼
//!   FacetMesh::new ──▶ attributes::build() ──▶ aBaryCoord / aCenter
//!          │
//!          ├─▶ attach(&mut impl AttributeSink)   named float buffers
//!          ├─▶ interleaved()                      Pod vertices for upload
//!          └─▶ shell(scale)                       outline copy, shared attributes
//! ```
//!
//! Triangles never share vertices, so every corner can carry its own
//! barycentric tag and the centroid of the triangle it belongs to.

mod attributes;
mod base;
mod icosahedron;
mod mesh;
mod sink;
mod vertex;

pub use attributes::{build, build_flat, FacetAttributes, BARY_TAGS};
pub use base::BaseMesh;
pub use icosahedron::{icosahedron, DEFAULT_DETAIL, DEFAULT_RADIUS};
pub use mesh::FacetMesh;
pub use sink::{
    AttributeBuffer, AttributeSink, AttributeTable, ATTR_BARY_COORD, ATTR_CENTER, ATTR_POSITION,
};
pub use vertex::{FacetVertex, VertexAttribute, FACET_VERTEX_LAYOUT};
