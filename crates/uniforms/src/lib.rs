//! Per-frame animation and uniform driver for the faceted solid shader.
//!
//! The render loop owns the clock, the pointer listener and the parameter
//! panel. Once per frame it hands their current values to
//! [`UniformDriver::update`], which integrates the rotation, smooths the
//! pointer-driven distortion and rewrites the whole uniform set:
//!
//! ```text
//!   FrameClock ──▶ FrameInput ─┐
//!   PointerCell ──▶ Pointer ───┼─▶ UniformDriver::update() ─▶ UniformValueSet
//!   SharedParameters ──────────┘          │                    │
//!                                         │                    └─▶ FacetUniforms (std140)
//!                                         └─▶ Quat rotation, BloomValues
//! ```
//!
//! - `params` names the tunable knobs and their defaults.
//! - `shared` holds the lock-free cells written by input/panel collaborators.
//! - `camera` derives world-space viewport extents and background cover scale.
//! - `clock` produces elapsed/delta pairs from wall-clock or fixed steps.
//! - `driver` owns the animation state and the per-frame recompute.
//! - `values` is the named uniform map, `block` its GPU layout.

mod block;
mod camera;
mod clock;
mod driver;
mod params;
mod shared;
mod values;

pub use block::FacetUniforms;
pub use camera::{cover_scale, CameraParams, Resolution, Viewport};
pub use clock::{
    clock_for_mode, BoxedFrameClock, ClockMode, FixedStepClock, FrameClock, FrameTime, SystemClock,
};
pub use driver::{
    distortion_target, map_linear, AnimationState, DriverOptions, FrameInput, RotationMode,
    SurfaceKind, UniformDriver, DISTORTION_MAX, DISTORTION_SMOOTHING,
};
pub use params::{BloomValues, Knob, Parameters};
pub use shared::{AtomicF32, Pointer, PointerBounds, PointerCell, SharedParameters};
pub use values::{names, TextureHandle, UniformValue, UniformValueSet};
