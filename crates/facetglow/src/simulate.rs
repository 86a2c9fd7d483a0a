use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tuning::MIN_FPS;
use uniforms::{
    clock_for_mode, BloomValues, ClockMode, DriverOptions, FrameInput, Pointer, PointerCell,
    Resolution, SharedParameters, SurfaceKind, UniformDriver, UniformValueSet,
};

use crate::background::{Background, BACKGROUND_TEXTURE};
use crate::cli::SimulateArgs;
use crate::paths::AppPaths;
use crate::settings::load_settings;

#[derive(Debug, Serialize)]
struct FrameRecord<'a> {
    frame: u64,
    elapsed: f32,
    delta: f32,
    angle: f32,
    distortion: f32,
    bloom: BloomValues,
    uniforms: &'a UniformValueSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    outline: Option<&'a UniformValueSet>,
}

fn frames_for(duration: Duration, fps: f32) -> u64 {
    ((duration.as_secs_f64() * f64::from(fps)).round() as u64).max(1)
}

pub fn run_simulate(args: SimulateArgs, paths: &AppPaths) -> Result<()> {
    let mut settings = load_settings(args.config.as_deref(), paths)?;
    for (name, value) in &args.overrides {
        settings
            .set_knob(name, *value)
            .with_context(|| format!("invalid override --set {name}={value}"))?;
    }

    let fps = args.fps.unwrap_or(settings.simulation.fps);
    if !(fps >= MIN_FPS && fps.is_finite()) {
        bail!("fps must be at least {MIN_FPS}, got {fps}");
    }
    if args.every == 0 {
        bail!("--every must be at least 1");
    }
    let frames = match (args.frames, args.duration) {
        (Some(frames), _) => frames,
        (None, Some(duration)) => frames_for(duration, fps),
        (None, None) => frames_for(settings.simulation.duration, fps),
    };

    let background_path = args
        .background
        .clone()
        .or_else(|| settings.background.as_ref().map(|b| b.path.clone()));
    let background = background_path
        .as_deref()
        .map(Background::probe)
        .transpose()?;

    let mut options = settings.driver_options();
    if let Some(background) = background {
        options.background_aspect = Some(background.aspect());
        options.background_texture = Some(BACKGROUND_TEXTURE);
    }
    let mut solid = UniformDriver::new(options);
    let mut outline = args.outline.then(|| {
        UniformDriver::new(DriverOptions {
            kind: SurfaceKind::Outline,
            ..options
        })
    });

    let pointer = PointerCell::new(Pointer::new(args.pointer.0, args.pointer.1));
    let parameters = SharedParameters::new(settings.parameters());
    let camera = settings.camera_params();
    let resolution = Resolution::new(args.size.0, args.size.1);
    let mode = if args.realtime {
        ClockMode::Realtime
    } else {
        ClockMode::FixedStep { fps }
    };
    let mut clock = clock_for_mode(mode);
    let frame_interval = if args.realtime {
        Some(
            Duration::try_from_secs_f32(1.0 / fps)
                .with_context(|| format!("frame interval for {fps} fps is out of range"))?,
        )
    } else {
        None
    };

    tracing::info!(
        detail = settings.mesh.detail,
        outline = args.outline,
        frames,
        fps,
        ?mode,
        "starting simulation"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for index in 0..frames {
        let time = clock.tick();
        let input = FrameInput::from_surface(time, camera, resolution);
        solid.update_shared(&input, &pointer, &parameters);
        if let Some(driver) = outline.as_mut() {
            driver.update_shared(&input, &pointer, &parameters);
        }

        let last = index + 1 == frames;
        if index % args.every == 0 || last {
            let record = FrameRecord {
                frame: time.frame,
                elapsed: time.elapsed,
                delta: time.delta,
                angle: solid.state().accumulated_angle(),
                distortion: solid.state().smoothed_distortion(),
                bloom: solid.bloom(),
                uniforms: solid.values(),
                outline: outline.as_ref().map(UniformDriver::values),
            };
            serde_json::to_writer(&mut out, &record).context("failed to write frame JSON")?;
            writeln!(out)?;
        }

        if let (Some(interval), false) = (frame_interval, last) {
            thread::sleep(interval);
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_count_rounds_and_never_hits_zero() {
        assert_eq!(frames_for(Duration::from_secs(1), 60.0), 60);
        assert_eq!(frames_for(Duration::from_millis(2500), 30.0), 75);
        assert_eq!(frames_for(Duration::ZERO, 60.0), 1);
    }
}
