//! Settings file for the facet renderer.
//!
//! A single TOML document carries the knob values, the bloom numbers, the
//! camera, the base mesh shape, the driver feature switches and an optional
//! background image. Everything has a default, so an empty file is valid.

mod knobs;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use uniforms::{
    BloomValues, CameraParams, DriverOptions, Knob, Parameters, RotationMode, SurfaceKind,
};

pub use knobs::{knob_spec, Folder, KnobSpec, KNOB_SPECS};

pub const SETTINGS_VERSION: u32 = 1;

/// Finest icosphere subdivision accepted from settings or flags.
pub const MAX_DETAIL: u32 = 6;

/// Slowest simulated frame rate; keeps the frame interval representable.
pub const MIN_FPS: f32 = 0.1;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("unknown knob '{0}'")]
    UnknownKnob(String),
    #[error("{knob} = {value} is outside the panel range {min}..={max}")]
    OutOfRange {
        knob: Knob,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("invalid settings: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationSetting {
    #[default]
    Accumulated,
    Elapsed,
}

impl From<RotationSetting> for RotationMode {
    fn from(setting: RotationSetting) -> Self {
        match setting {
            RotationSetting::Accumulated => RotationMode::Accumulated,
            RotationSetting::Elapsed => RotationMode::Elapsed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub version: u32,
    pub main: MainSettings,
    pub bloom: BloomSettings,
    pub camera: CameraSettings,
    pub mesh: MeshSettings,
    pub driver: DriverSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<BackgroundSettings>,
    pub simulation: SimulationSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MainSettings {
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
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BloomSettings {
    pub intensity: f32,
    pub luminance_threshold: f32,
    pub luminance_smoothing: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub near: f32,
    pub far: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MeshSettings {
    pub radius: f32,
    pub detail: u32,
    /// Scale of the outline shell; no shell when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell_scale: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DriverSettings {
    pub rotation: RotationSetting,
    pub pointer_distortion: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BackgroundSettings {
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub fps: f32,
    #[serde(
        deserialize_with = "deserialize_duration",
        serialize_with = "serialize_duration"
    )]
    pub duration: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            main: MainSettings::default(),
            bloom: BloomSettings::default(),
            camera: CameraSettings::default(),
            mesh: MeshSettings::default(),
            driver: DriverSettings::default(),
            background: None,
            simulation: SimulationSettings::default(),
        }
    }
}

impl Default for MainSettings {
    fn default() -> Self {
        let p = Parameters::default();
        Self {
            edge_thickness: p.edge_thickness,
            edge_intensity: p.edge_intensity,
            border_blur: p.border_blur,
            border_intensity: p.border_intensity,
            border_alpha: p.border_alpha,
            refraction_ratio: p.refraction_ratio,
            refraction_offset: p.refraction_offset,
            rotation_speed: p.rotation_speed,
            random_speed: p.random_speed,
            random_offset_factor: p.random_offset_factor,
        }
    }
}

impl Default for BloomSettings {
    fn default() -> Self {
        let bloom = BloomValues::default();
        Self {
            intensity: bloom.intensity,
            luminance_threshold: bloom.luminance_threshold,
            luminance_smoothing: bloom.luminance_smoothing,
        }
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        let camera = CameraParams::default();
        Self {
            fov: camera.fov_y_degrees,
            position: camera.position.to_array(),
            target: camera.target.to_array(),
            near: camera.near,
            far: camera.far,
        }
    }
}

impl Default for MeshSettings {
    fn default() -> Self {
        Self {
            radius: 1.0,
            detail: 1,
            shell_scale: None,
        }
    }
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            rotation: RotationSetting::default(),
            pointer_distortion: true,
        }
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            fps: 60.0,
            duration: Duration::from_secs(1),
        }
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    struct Visitor;
    impl<'de> de::Visitor<'de> for Visitor {
        type Value = Duration;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a duration as number of seconds or human-readable string")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            humantime::parse_duration(v)
                .map_err(|err| E::custom(format!("invalid duration '{v}': {err}")))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v < 0 {
                return Err(E::custom("duration must be non-negative"));
            }
            Ok(Duration::from_secs(v as u64))
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Duration::from_secs(v))
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Duration::try_from_secs_f64(v)
                .map_err(|err| E::custom(format!("invalid duration {v}: {err}")))
        }
    }

    deserializer.deserialize_any(Visitor)
}

fn serialize_duration<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&humantime::format_duration(*duration).to_string())
}

impl Settings {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let raw: Settings = toml::from_str(input)?;
        raw.validate()?;
        tracing::debug!(
            rotation = ?raw.driver.rotation,
            background = raw.background.is_some(),
            "loaded facet settings"
        );
        Ok(raw)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Knob values as seen by the uniform driver.
    pub fn parameters(&self) -> Parameters {
        let main = &self.main;
        Parameters {
            edge_thickness: main.edge_thickness,
            edge_intensity: main.edge_intensity,
            border_blur: main.border_blur,
            border_intensity: main.border_intensity,
            border_alpha: main.border_alpha,
            refraction_ratio: main.refraction_ratio,
            refraction_offset: main.refraction_offset,
            rotation_speed: main.rotation_speed,
            random_speed: main.random_speed,
            random_offset_factor: main.random_offset_factor,
            bloom: BloomValues {
                intensity: self.bloom.intensity,
                luminance_threshold: self.bloom.luminance_threshold,
                luminance_smoothing: self.bloom.luminance_smoothing,
            },
        }
    }

    /// Sets a knob by name, enforcing its panel range.
    pub fn set_knob(&mut self, name: &str, value: f32) -> Result<Knob, ConfigError> {
        let knob = Knob::from_name(name).ok_or_else(|| ConfigError::UnknownKnob(name.into()))?;
        check_range(knob, value)?;
        let slot = match knob {
            Knob::EdgeThickness => &mut self.main.edge_thickness,
            Knob::EdgeIntensity => &mut self.main.edge_intensity,
            Knob::BorderBlur => &mut self.main.border_blur,
            Knob::BorderIntensity => &mut self.main.border_intensity,
            Knob::BorderAlpha => &mut self.main.border_alpha,
            Knob::RefractionRatio => &mut self.main.refraction_ratio,
            Knob::RefractionOffset => &mut self.main.refraction_offset,
            Knob::RotationSpeed => &mut self.main.rotation_speed,
            Knob::RandomSpeed => &mut self.main.random_speed,
            Knob::RandomOffsetFactor => &mut self.main.random_offset_factor,
            Knob::BloomIntensity => &mut self.bloom.intensity,
            Knob::BloomThreshold => &mut self.bloom.luminance_threshold,
            Knob::BloomSmoothing => &mut self.bloom.luminance_smoothing,
        };
        *slot = value;
        Ok(knob)
    }

    pub fn camera_params(&self) -> CameraParams {
        CameraParams {
            fov_y_degrees: self.camera.fov,
            aspect: 1.0,
            position: self.camera.position.into(),
            target: self.camera.target.into(),
            near: self.camera.near,
            far: self.camera.far,
        }
    }

    /// Driver switches for the solid; the background aspect is filled in by
    /// whoever loads the image.
    pub fn driver_options(&self) -> DriverOptions {
        DriverOptions {
            rotation: self.driver.rotation.into(),
            pointer_distortion: self.driver.pointer_distortion,
            background_aspect: None,
            background_texture: None,
            kind: SurfaceKind::Solid,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != SETTINGS_VERSION {
            return Err(ConfigError::Invalid(format!(
                "unsupported settings version {}; expected {SETTINGS_VERSION}",
                self.version
            )));
        }

        let parameters = self.parameters();
        for knob in Knob::ALL {
            check_range(knob, parameters.get(knob))?;
        }

        let camera = &self.camera;
        if !(camera.fov > 0.0 && camera.fov < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "camera.fov must be between 0 and 180 degrees, got {}",
                camera.fov
            )));
        }
        if !(camera.near > 0.0 && camera.far > camera.near) {
            return Err(ConfigError::Invalid(
                "camera clip planes must satisfy 0 < near < far".into(),
            ));
        }
        if camera.position == camera.target {
            return Err(ConfigError::Invalid(
                "camera.position must differ from camera.target".into(),
            ));
        }

        if !(self.mesh.radius > 0.0 && self.mesh.radius.is_finite()) {
            return Err(ConfigError::Invalid("mesh.radius must be > 0".into()));
        }
        if self.mesh.detail > MAX_DETAIL {
            return Err(ConfigError::Invalid(format!(
                "mesh.detail {} is too fine; expected 0..={MAX_DETAIL}",
                self.mesh.detail
            )));
        }
        if let Some(scale) = self.mesh.shell_scale {
            if !(scale > 0.0 && scale.is_finite()) {
                return Err(ConfigError::Invalid("mesh.shell_scale must be > 0".into()));
            }
        }

        if let Some(background) = &self.background {
            if background.path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid(
                    "background.path may not be empty".into(),
                ));
            }
        }

        if !(self.simulation.fps >= MIN_FPS && self.simulation.fps.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "simulation.fps must be at least {MIN_FPS}"
            )));
        }

        Ok(())
    }
}

fn check_range(knob: Knob, value: f32) -> Result<(), ConfigError> {
    let Some(spec) = knob_spec(knob) else {
        return Ok(());
    };
    if spec.contains(value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            knob,
            value,
            min: spec.min,
            max: spec.max,
        })
    }
}
