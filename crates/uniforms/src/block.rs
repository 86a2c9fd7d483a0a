use bytemuck::{Pod, Zeroable};

use crate::values::{names, UniformValueSet};

/// std140 mirror of the facet shader's uniform block.
///
/// Texture handles are bound separately and have no slot here.
#[repr(C, align(16))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacetUniforms {
    pub rotation: [f32; 4],
    pub resolution: [f32; 2],
    pub uv_scale: [f32; 2],
    pub mouse: [f32; 2],
    pub time: f32,
    pub edge_thickness: f32,
    pub edge_intensity: f32,
    pub border_blur: f32,
    pub border_intensity: f32,
    pub refraction_ratio: f32,
    pub refraction_offset: f32,
    pub border_alpha_factor: f32,
    pub random_offset_factor: f32,
    pub random_speed: f32,
    pub distort_factor: f32,
    pub kind: i32,
    pub padding: [f32; 2],
}

unsafe impl Zeroable for FacetUniforms {}
unsafe impl Pod for FacetUniforms {}

impl Default for FacetUniforms {
    fn default() -> Self {
        Self {
            rotation: [0.0, 0.0, 0.0, 1.0],
            uv_scale: [1.0, 1.0],
            ..Self::zeroed()
        }
    }
}

impl FacetUniforms {
    /// Packs a uniform set; missing entries keep their defaults.
    pub fn from_values(values: &UniformValueSet) -> Self {
        let mut block = Self::default();
        let float = |name: &str, slot: &mut f32| {
            if let Some(value) = values.float(name) {
                *slot = value;
            }
        };
        float(names::TIME, &mut block.time);
        float(names::EDGE_THICKNESS, &mut block.edge_thickness);
        float(names::EDGE_INTENSITY, &mut block.edge_intensity);
        float(names::BORDER_BLUR, &mut block.border_blur);
        float(names::BORDER_INTENSITY, &mut block.border_intensity);
        float(names::REFRACTION_RATIO, &mut block.refraction_ratio);
        float(names::REFRACTION_OFFSET, &mut block.refraction_offset);
        float(names::BORDER_ALPHA_FACTOR, &mut block.border_alpha_factor);
        float(names::RANDOM_OFFSET_FACTOR, &mut block.random_offset_factor);
        float(names::RANDOM_SPEED, &mut block.random_speed);
        float(names::DISTORT_FACTOR, &mut block.distort_factor);

        if let Some(rotation) = values.vec4(names::ROTATION) {
            block.rotation = rotation;
        }
        if let Some(resolution) = values.vec2(names::RESOLUTION) {
            block.resolution = resolution;
        }
        if let Some(uv_scale) = values.vec2(names::UV_SCALE) {
            block.uv_scale = uv_scale;
        }
        if let Some(mouse) = values.vec2(names::MOUSE) {
            block.mouse = mouse;
        }
        if let Some(kind) = values.int(names::TYPE) {
            block.kind = kind;
        }
        block
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
