use uniforms::Knob;

/// Panel folder a knob is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Folder {
    Main,
    Bloom,
}

impl Folder {
    pub fn name(self) -> &'static str {
        match self {
            Folder::Main => "mainSettings",
            Folder::Bloom => "bloomSettings",
        }
    }
}

/// Slider metadata for one knob.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnobSpec {
    pub knob: Knob,
    pub folder: Folder,
    pub min: f32,
    pub max: f32,
    pub step: Option<f32>,
}

impl KnobSpec {
    pub fn contains(&self, value: f32) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

const fn spec(knob: Knob, folder: Folder, min: f32, max: f32, step: Option<f32>) -> KnobSpec {
    KnobSpec {
        knob,
        folder,
        min,
        max,
        step,
    }
}

/// Panel order, matching the order knobs are added to their folders.
pub static KNOB_SPECS: [KnobSpec; Knob::COUNT] = [
    spec(Knob::BorderBlur, Folder::Main, 1.0, 10.0, None),
    spec(Knob::BorderIntensity, Folder::Main, 0.0, 10.0, None),
    spec(Knob::BorderAlpha, Folder::Main, 0.0, 1.0, None),
    spec(Knob::RefractionRatio, Folder::Main, 0.0, 1.0, None),
    spec(Knob::RefractionOffset, Folder::Main, 0.0, 1.0, None),
    spec(Knob::RotationSpeed, Folder::Main, 0.0, 1.0, None),
    spec(Knob::RandomSpeed, Folder::Main, 0.0, 10.0, Some(0.01)),
    spec(Knob::RandomOffsetFactor, Folder::Main, 0.0, 1.0, Some(0.01)),
    spec(Knob::EdgeThickness, Folder::Main, 0.0, 20.0, Some(0.1)),
    spec(Knob::EdgeIntensity, Folder::Main, 0.0, 10.0, Some(0.1)),
    spec(Knob::BloomIntensity, Folder::Bloom, 0.0, 3.0, Some(0.01)),
    spec(Knob::BloomThreshold, Folder::Bloom, 0.0, 1.0, Some(0.01)),
    spec(Knob::BloomSmoothing, Folder::Bloom, 0.0, 1.0, Some(0.01)),
];

pub fn knob_spec(knob: Knob) -> Option<&'static KnobSpec> {
    KNOB_SPECS.iter().find(|spec| spec.knob == knob)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uniforms::Parameters;

    #[test]
    fn every_knob_has_exactly_one_spec() {
        for knob in Knob::ALL {
            let count = KNOB_SPECS.iter().filter(|spec| spec.knob == knob).count();
            assert_eq!(count, 1, "{knob}");
        }
    }

    #[test]
    fn defaults_sit_inside_panel_ranges() {
        let defaults = Parameters::default();
        for spec in KNOB_SPECS {
            assert!(spec.contains(defaults.get(spec.knob)), "{}", spec.knob);
        }
    }

    #[test]
    fn bloom_knobs_live_in_the_bloom_folder() {
        let threshold = knob_spec(Knob::BloomThreshold).expect("threshold spec");
        assert_eq!(threshold.folder, Folder::Bloom);
        let blur = knob_spec(Knob::BorderBlur).expect("blur spec");
        assert_eq!(blur.folder.name(), "mainSettings");
        assert!(!blur.contains(0.5));
        assert!(!blur.contains(f32::NAN));
    }
}
