use bytemuck::{Pod, Zeroable};

use crate::sink::{ATTR_BARY_COORD, ATTR_CENTER, ATTR_POSITION};

/// Interleaved vertex record uploaded as a single vertex buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FacetVertex {
    pub position: [f32; 3],
    pub bary_coord: [f32; 3],
    pub center: [f32; 3],
}

/// Placement of one attribute inside [`FacetVertex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub name: &'static str,
    pub shader_location: u32,
    pub offset: u64,
    pub components: u32,
}

const FLOAT3: u64 = std::mem::size_of::<[f32; 3]>() as u64;

pub const FACET_VERTEX_LAYOUT: [VertexAttribute; 3] = [
    VertexAttribute {
        name: ATTR_POSITION,
        shader_location: 0,
        offset: 0,
        components: 3,
    },
    VertexAttribute {
        name: ATTR_BARY_COORD,
        shader_location: 1,
        offset: FLOAT3,
        components: 3,
    },
    VertexAttribute {
        name: ATTR_CENTER,
        shader_location: 2,
        offset: FLOAT3 * 2,
        components: 3,
    },
];

impl FacetVertex {
    pub const STRIDE: u64 = std::mem::size_of::<FacetVertex>() as u64;
}
