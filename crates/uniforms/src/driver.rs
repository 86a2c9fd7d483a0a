use glam::{Quat, Vec2, Vec3};

use crate::camera::{cover_scale, CameraParams, Resolution, Viewport};
use crate::clock::FrameTime;
use crate::params::{BloomValues, Parameters};
use crate::shared::{Pointer, PointerCell, SharedParameters};
use crate::values::{names, TextureHandle, UniformValue, UniformValueSet};

/// Upper bound of the pointer-driven distortion, reached near the center.
pub const DISTORTION_MAX: f32 = 0.2;
/// Fraction of the remaining gap closed by the smoothed distortion per frame.
pub const DISTORTION_SMOOTHING: f32 = 0.05;

/// Pointer distance (world units) at which distortion starts to fall off.
const DISTORTION_NEAR: f32 = 0.5;
/// Pointer distance at which distortion reaches zero.
const DISTORTION_FAR: f32 = 1.5;

/// Linearly remaps `x` from `[a1, a2]` onto `[b1, b2]` without clamping.
pub fn map_linear(x: f32, a1: f32, a2: f32, b1: f32, b2: f32) -> f32 {
    b1 + (x - a1) * (b2 - b1) / (a2 - a1)
}

fn pointer_offset(pointer: Pointer, viewport: Viewport) -> Vec2 {
    Vec2::new(
        (pointer.x - 0.5) * viewport.width,
        -(pointer.y - 0.5) * viewport.height,
    )
}

/// Distortion the smoothed value is pulled towards this frame.
///
/// Always within `[0, DISTORTION_MAX]`; `None` for a degenerate viewport or
/// non-finite pointer.
pub fn distortion_target(pointer: Pointer, viewport: Viewport) -> Option<f32> {
    if viewport.is_degenerate() {
        return None;
    }
    let distance = pointer_offset(pointer, viewport).length();
    if !distance.is_finite() {
        return None;
    }
    let target = map_linear(
        distance,
        DISTORTION_NEAR,
        DISTORTION_FAR,
        DISTORTION_MAX,
        0.0,
    );
    Some(target.clamp(0.0, DISTORTION_MAX))
}

/// Continuous animation state carried from frame to frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    accumulated_angle: f32,
    smoothed_distortion: f32,
    uv_scale: Vec2,
    pointer_offset: Vec2,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            accumulated_angle: 0.0,
            smoothed_distortion: 0.0,
            uv_scale: Vec2::ONE,
            pointer_offset: Vec2::ZERO,
        }
    }
}

impl AnimationState {
    /// Rotation angle in radians integrated from `delta * rotation_speed`.
    pub fn accumulated_angle(&self) -> f32 {
        self.accumulated_angle
    }

    pub fn smoothed_distortion(&self) -> f32 {
        self.smoothed_distortion
    }

    /// Last valid background cover scale.
    pub fn uv_scale(&self) -> Vec2 {
        self.uv_scale
    }

    /// Last valid pointer position in viewport space.
    pub fn pointer_offset(&self) -> Vec2 {
        self.pointer_offset
    }
}

/// Which angle drives the solid's orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationMode {
    /// Integrate `delta * speed`; speed changes never snap the orientation.
    #[default]
    Accumulated,
    /// Use `elapsed * speed` directly.
    Elapsed,
}

/// Which of the two facet surfaces the uniform set is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceKind {
    #[default]
    Solid,
    /// Slightly scaled backing shell drawn behind the solid.
    Outline,
}

impl SurfaceKind {
    pub fn code(self) -> i32 {
        match self {
            SurfaceKind::Solid => 0,
            SurfaceKind::Outline => 1,
        }
    }
}

/// Feature switches that distinguish the application variants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverOptions {
    pub rotation: RotationMode,
    pub pointer_distortion: bool,
    /// Width over height of the background image, when one is bound.
    pub background_aspect: Option<f32>,
    pub background_texture: Option<TextureHandle>,
    pub kind: SurfaceKind,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            rotation: RotationMode::default(),
            pointer_distortion: true,
            background_aspect: None,
            background_texture: None,
            kind: SurfaceKind::default(),
        }
    }
}

/// Everything the render loop knows about the frame being drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    pub elapsed: f32,
    pub delta: f32,
    pub viewport: Viewport,
    pub camera: CameraParams,
    pub resolution: Resolution,
}

impl FrameInput {
    /// Derives camera aspect and viewport from the surface size.
    pub fn from_surface(time: FrameTime, camera: CameraParams, resolution: Resolution) -> Self {
        let camera = camera.with_aspect(resolution.aspect().unwrap_or(0.0));
        Self {
            elapsed: time.elapsed,
            delta: time.delta,
            viewport: Viewport::from_camera(&camera),
            camera,
            resolution,
        }
    }
}

/// Owns the animation state and rewrites the uniform set once per frame.
#[derive(Debug, Clone)]
pub struct UniformDriver {
    options: DriverOptions,
    state: AnimationState,
    rotation: Quat,
    bloom: BloomValues,
    values: UniformValueSet,
}

impl UniformDriver {
    pub fn new(options: DriverOptions) -> Self {
        Self {
            options,
            state: AnimationState::default(),
            rotation: Quat::IDENTITY,
            bloom: BloomValues::default(),
            values: UniformValueSet::new(),
        }
    }

    pub fn options(&self) -> &DriverOptions {
        &self.options
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Orientation of the whole solid after the latest update.
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn bloom(&self) -> BloomValues {
        self.bloom
    }

    pub fn values(&self) -> &UniformValueSet {
        &self.values
    }

    /// Reads the shared pointer and parameter cells, then runs [`Self::update`].
    pub fn update_shared(
        &mut self,
        input: &FrameInput,
        pointer: &PointerCell,
        parameters: &SharedParameters,
    ) -> &UniformValueSet {
        let parameters = parameters.load();
        self.update(input, pointer.load(), &parameters)
    }

    /// Advances the animation by one frame and regenerates every uniform.
    pub fn update(
        &mut self,
        input: &FrameInput,
        pointer: Pointer,
        parameters: &Parameters,
    ) -> &UniformValueSet {
        self.integrate_rotation(input, parameters.rotation_speed);
        if self.options.pointer_distortion {
            self.smooth_distortion(pointer, input.viewport);
        }
        self.refresh_uv_scale(&input.camera);
        self.bloom = parameters.bloom;
        self.emit(input, parameters);

        tracing::trace!(
            angle = self.state.accumulated_angle,
            distortion = self.state.smoothed_distortion,
            "uniform driver step"
        );
        &self.values
    }

    fn integrate_rotation(&mut self, input: &FrameInput, speed: f32) {
        let step = input.delta * speed;
        if step.is_finite() {
            self.state.accumulated_angle += step;
        } else {
            tracing::trace!(delta = input.delta, speed, "skipping non-finite rotation step");
        }

        let angle = match self.options.rotation {
            RotationMode::Accumulated => self.state.accumulated_angle,
            RotationMode::Elapsed => input.elapsed * speed,
        };
        if angle.is_finite() {
            let axis = Vec3::new(angle.cos(), angle.sin(), 1.0).normalize();
            self.rotation = Quat::from_axis_angle(axis, angle);
        }
    }

    fn smooth_distortion(&mut self, pointer: Pointer, viewport: Viewport) {
        let Some(target) = distortion_target(pointer, viewport) else {
            if viewport.is_degenerate() {
                tracing::trace!(
                    width = viewport.width,
                    height = viewport.height,
                    "degenerate viewport; keeping previous distortion"
                );
            } else {
                tracing::trace!(
                    x = pointer.x,
                    y = pointer.y,
                    "non-finite pointer; keeping previous distortion"
                );
            }
            return;
        };
        self.state.pointer_offset = pointer_offset(pointer, viewport);
        self.state.smoothed_distortion +=
            (target - self.state.smoothed_distortion) * DISTORTION_SMOOTHING;
    }

    fn refresh_uv_scale(&mut self, camera: &CameraParams) {
        let Some(image_aspect) = self.options.background_aspect else {
            self.state.uv_scale = Vec2::ONE;
            return;
        };
        match cover_scale(image_aspect, camera.aspect) {
            Some(scale) => self.state.uv_scale = scale,
            None => tracing::trace!(
                image_aspect,
                view_aspect = camera.aspect,
                "degenerate aspect; keeping previous uv scale"
            ),
        }
    }

    fn emit(&mut self, input: &FrameInput, parameters: &Parameters) {
        let values = &mut self.values;
        values.set_float(names::TIME, input.elapsed);
        values.set_float(names::EDGE_THICKNESS, parameters.edge_thickness);
        values.set_float(names::EDGE_INTENSITY, parameters.edge_intensity);
        values.set_float(names::BORDER_BLUR, parameters.border_blur);
        values.set_float(names::BORDER_INTENSITY, parameters.border_intensity);
        values.set_float(names::REFRACTION_RATIO, parameters.refraction_ratio);
        values.set_float(names::REFRACTION_OFFSET, parameters.refraction_offset);
        values.set_float(names::BORDER_ALPHA_FACTOR, parameters.border_alpha);
        values.set_float(names::RANDOM_OFFSET_FACTOR, parameters.random_offset_factor);
        values.set_float(names::RANDOM_SPEED, parameters.random_speed);
        values.set_float(names::DISTORT_FACTOR, self.state.smoothed_distortion);
        values.set(names::TYPE, UniformValue::Int(self.options.kind.code()));
        values.set(
            names::MOUSE,
            UniformValue::Vec2(self.state.pointer_offset.to_array()),
        );
        values.set(names::ROTATION, UniformValue::Vec4(self.rotation.to_array()));
        values.set(names::UV_SCALE, UniformValue::Vec2(self.state.uv_scale.to_array()));
        values.set(
            names::RESOLUTION,
            UniformValue::Vec2(input.resolution.as_vec2().to_array()),
        );
        match self.options.background_texture {
            Some(handle) => values.set(names::TEXTURE, UniformValue::Texture(handle)),
            None => {
                values.remove(names::TEXTURE);
            }
        }
    }
}

impl Default for UniformDriver {
    fn default() -> Self {
        Self::new(DriverOptions::default())
    }
}
