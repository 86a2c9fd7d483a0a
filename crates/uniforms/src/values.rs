use std::collections::BTreeMap;

use serde::Serialize;

/// Uniform names expected by the facet shaders. These must match exactly.
pub mod names {
    pub const TIME: &str = "uTime";
    pub const EDGE_THICKNESS: &str = "uEdgeThickness";
    pub const EDGE_INTENSITY: &str = "uEdgeIntensity";
    pub const BORDER_BLUR: &str = "uBorderBlur";
    pub const BORDER_INTENSITY: &str = "uBorderIntensity";
    pub const REFRACTION_RATIO: &str = "uRefractionRatio";
    pub const REFRACTION_OFFSET: &str = "uRefractionOffset";
    pub const BORDER_ALPHA_FACTOR: &str = "uBorderAlphaFactor";
    pub const RANDOM_OFFSET_FACTOR: &str = "uRandomOffsetFactor";
    pub const RANDOM_SPEED: &str = "uRandomSpeed";
    pub const DISTORT_FACTOR: &str = "uDistortFactor";
    pub const TYPE: &str = "uType";
    pub const MOUSE: &str = "uMouse";
    pub const ROTATION: &str = "uRotation";
    pub const UV_SCALE: &str = "uUvScale";
    pub const RESOLUTION: &str = "uResolution";
    pub const TEXTURE: &str = "uTexture";
}

/// Opaque texture id owned by the rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TextureHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Vec2([f32; 2]),
    Vec4([f32; 4]),
    Texture(TextureHandle),
}

/// Uniform values for one frame, keyed by shader uniform name.
///
/// Every write overwrites; nothing accumulates between frames.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UniformValueSet {
    values: BTreeMap<&'static str, UniformValue>,
}

impl UniformValueSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &'static str, value: UniformValue) {
        self.values.insert(name, value);
    }

    pub fn set_float(&mut self, name: &'static str, value: f32) {
        self.set(name, UniformValue::Float(value));
    }

    pub fn remove(&mut self, name: &str) -> Option<UniformValue> {
        self.values.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<UniformValue> {
        self.values.get(name).copied()
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        match self.get(name)? {
            UniformValue::Float(value) => Some(value),
            _ => None,
        }
    }

    pub fn int(&self, name: &str) -> Option<i32> {
        match self.get(name)? {
            UniformValue::Int(value) => Some(value),
            _ => None,
        }
    }

    pub fn vec2(&self, name: &str) -> Option<[f32; 2]> {
        match self.get(name)? {
            UniformValue::Vec2(value) => Some(value),
            _ => None,
        }
    }

    pub fn vec4(&self, name: &str) -> Option<[f32; 4]> {
        match self.get(name)? {
            UniformValue::Vec4(value) => Some(value),
            _ => None,
        }
    }

    pub fn texture(&self, name: &str) -> Option<TextureHandle> {
        match self.get(name)? {
            UniformValue::Texture(handle) => Some(handle),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, UniformValue)> + '_ {
        self.values.iter().map(|(name, value)| (*name, *value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_getters_reject_other_variants() {
        let mut set = UniformValueSet::new();
        set.set_float(names::TIME, 1.5);
        set.set(names::MOUSE, UniformValue::Vec2([0.1, 0.2]));
        assert_eq!(set.float(names::TIME), Some(1.5));
        assert_eq!(set.vec2(names::TIME), None);
        assert_eq!(set.vec2(names::MOUSE), Some([0.1, 0.2]));
        assert_eq!(set.float("uMissing"), None);
    }

    #[test]
    fn writes_overwrite_in_place() {
        let mut set = UniformValueSet::new();
        set.set_float(names::DISTORT_FACTOR, 0.1);
        set.set_float(names::DISTORT_FACTOR, 0.05);
        assert_eq!(set.len(), 1);
        assert_eq!(set.float(names::DISTORT_FACTOR), Some(0.05));
    }
}
