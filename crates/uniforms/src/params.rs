use serde::Serialize;

use crate::values::names;

/// Named tunable knobs exposed to the parameter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Knob {
    EdgeThickness,
    EdgeIntensity,
    BorderBlur,
    BorderIntensity,
    BorderAlpha,
    RefractionRatio,
    RefractionOffset,
    RotationSpeed,
    RandomSpeed,
    RandomOffsetFactor,
    BloomIntensity,
    BloomThreshold,
    BloomSmoothing,
}

impl Knob {
    pub const COUNT: usize = 13;

    pub const ALL: [Knob; Self::COUNT] = [
        Knob::EdgeThickness,
        Knob::EdgeIntensity,
        Knob::BorderBlur,
        Knob::BorderIntensity,
        Knob::BorderAlpha,
        Knob::RefractionRatio,
        Knob::RefractionOffset,
        Knob::RotationSpeed,
        Knob::RandomSpeed,
        Knob::RandomOffsetFactor,
        Knob::BloomIntensity,
        Knob::BloomThreshold,
        Knob::BloomSmoothing,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Knob::EdgeThickness => "edge_thickness",
            Knob::EdgeIntensity => "edge_intensity",
            Knob::BorderBlur => "border_blur",
            Knob::BorderIntensity => "border_intensity",
            Knob::BorderAlpha => "border_alpha",
            Knob::RefractionRatio => "refraction_ratio",
            Knob::RefractionOffset => "refraction_offset",
            Knob::RotationSpeed => "rotation_speed",
            Knob::RandomSpeed => "random_speed",
            Knob::RandomOffsetFactor => "random_offset_factor",
            Knob::BloomIntensity => "bloom_intensity",
            Knob::BloomThreshold => "bloom_threshold",
            Knob::BloomSmoothing => "bloom_smoothing",
        }
    }

    pub fn from_name(name: &str) -> Option<Knob> {
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|knob| knob.name() == normalized)
    }

    /// Shader uniform fed by this knob; bloom knobs feed post-processing instead.
    pub fn uniform(self) -> Option<&'static str> {
        match self {
            Knob::EdgeThickness => Some(names::EDGE_THICKNESS),
            Knob::EdgeIntensity => Some(names::EDGE_INTENSITY),
            Knob::BorderBlur => Some(names::BORDER_BLUR),
            Knob::BorderIntensity => Some(names::BORDER_INTENSITY),
            Knob::BorderAlpha => Some(names::BORDER_ALPHA_FACTOR),
            Knob::RefractionRatio => Some(names::REFRACTION_RATIO),
            Knob::RefractionOffset => Some(names::REFRACTION_OFFSET),
            Knob::RandomSpeed => Some(names::RANDOM_SPEED),
            Knob::RandomOffsetFactor => Some(names::RANDOM_OFFSET_FACTOR),
            Knob::RotationSpeed
            | Knob::BloomIntensity
            | Knob::BloomThreshold
            | Knob::BloomSmoothing => None,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Knob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Snapshot of every knob value for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Parameters {
    pub edge_thickness: f32,
    pub edge_intensity: f32,
    pub border_blur: f32,
    pub border_intensity: f32,
    pub border_alpha: f32,
    pub refraction_ratio: f32,
    pub refraction_offset: f32,
    pub rotation_speed: f32,
    pub random_speed: f32,
    pub random_offset_factor: f32,
    pub bloom: BloomValues,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            edge_thickness: 5.0,
            edge_intensity: 1.8,
            border_blur: 2.4,
            border_intensity: 1.0,
            border_alpha: 0.06,
            refraction_ratio: 1.0 / 2.4,
            refraction_offset: 0.3,
            rotation_speed: 0.2,
            random_speed: 1.0,
            random_offset_factor: 0.15,
            bloom: BloomValues::default(),
        }
    }
}

impl Parameters {
    pub fn get(&self, knob: Knob) -> f32 {
        match knob {
            Knob::EdgeThickness => self.edge_thickness,
            Knob::EdgeIntensity => self.edge_intensity,
            Knob::BorderBlur => self.border_blur,
            Knob::BorderIntensity => self.border_intensity,
            Knob::BorderAlpha => self.border_alpha,
            Knob::RefractionRatio => self.refraction_ratio,
            Knob::RefractionOffset => self.refraction_offset,
            Knob::RotationSpeed => self.rotation_speed,
            Knob::RandomSpeed => self.random_speed,
            Knob::RandomOffsetFactor => self.random_offset_factor,
            Knob::BloomIntensity => self.bloom.intensity,
            Knob::BloomThreshold => self.bloom.luminance_threshold,
            Knob::BloomSmoothing => self.bloom.luminance_smoothing,
        }
    }

    pub fn set(&mut self, knob: Knob, value: f32) {
        let slot = match knob {
            Knob::EdgeThickness => &mut self.edge_thickness,
            Knob::EdgeIntensity => &mut self.edge_intensity,
            Knob::BorderBlur => &mut self.border_blur,
            Knob::BorderIntensity => &mut self.border_intensity,
            Knob::BorderAlpha => &mut self.border_alpha,
            Knob::RefractionRatio => &mut self.refraction_ratio,
            Knob::RefractionOffset => &mut self.refraction_offset,
            Knob::RotationSpeed => &mut self.rotation_speed,
            Knob::RandomSpeed => &mut self.random_speed,
            Knob::RandomOffsetFactor => &mut self.random_offset_factor,
            Knob::BloomIntensity => &mut self.bloom.intensity,
            Knob::BloomThreshold => &mut self.bloom.luminance_threshold,
            Knob::BloomSmoothing => &mut self.bloom.luminance_smoothing,
        };
        *slot = value;
    }
}

/// The three numbers handed to the bloom pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BloomValues {
    pub intensity: f32,
    pub luminance_threshold: f32,
    pub luminance_smoothing: f32,
}

impl Default for BloomValues {
    fn default() -> Self {
        Self {
            intensity: 1.0,
            luminance_threshold: 0.3,
            luminance_smoothing: 0.6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knob_names_round_trip() {
        for knob in Knob::ALL {
            assert_eq!(Knob::from_name(knob.name()), Some(knob));
        }
        assert_eq!(Knob::from_name("Rotation-Speed"), Some(Knob::RotationSpeed));
        assert_eq!(Knob::from_name("spin"), None);
    }

    #[test]
    fn knob_indices_are_dense() {
        for (position, knob) in Knob::ALL.into_iter().enumerate() {
            assert_eq!(knob.index(), position);
        }
    }

    #[test]
    fn get_reads_what_set_wrote() {
        let mut params = Parameters::default();
        for (offset, knob) in Knob::ALL.into_iter().enumerate() {
            params.set(knob, offset as f32 + 0.5);
        }
        for (offset, knob) in Knob::ALL.into_iter().enumerate() {
            assert_eq!(params.get(knob), offset as f32 + 0.5);
        }
    }

    #[test]
    fn bloom_knobs_do_not_map_to_shader_uniforms() {
        assert_eq!(Knob::BloomIntensity.uniform(), None);
        assert_eq!(Knob::BorderAlpha.uniform(), Some("uBorderAlphaFactor"));
    }
}
