use std::time::Instant;

/// Timing values handed to the per-frame step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the clock started.
    pub elapsed: f32,
    /// Seconds since the previous frame.
    pub delta: f32,
    /// Monotonic frame counter, starting at 0.
    pub frame: u64,
}

/// Abstraction over where frame timing originates from.
pub trait FrameClock: Send {
    /// Restarts the clock at frame 0.
    fn reset(&mut self);
    /// Produces timing for the next frame.
    fn tick(&mut self) -> FrameTime;
}

/// Clock backed by the system monotonic clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
    last: Instant,
    frame: u64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        let now = Instant::now();
        Self {
            origin: now,
            last: now,
            frame: 0,
        }
    }
}

impl FrameClock for SystemClock {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let sample = FrameTime {
            elapsed: now.duration_since(self.origin).as_secs_f32(),
            delta: now.duration_since(self.last).as_secs_f32(),
            frame: self.frame,
        };
        self.last = now;
        self.frame = self.frame.saturating_add(1);
        sample
    }
}

/// Deterministic clock advancing by a fixed step every tick.
#[derive(Debug, Clone, Copy)]
pub struct FixedStepClock {
    step: f32,
    frame: u64,
}

impl FixedStepClock {
    pub fn new(step: f32) -> Self {
        Self {
            step: step.max(0.0),
            frame: 0,
        }
    }

    pub fn from_fps(fps: f32) -> Self {
        if fps > 0.0 && fps.is_finite() {
            Self::new(1.0 / fps)
        } else {
            Self::new(0.0)
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }
}

impl FrameClock for FixedStepClock {
    fn reset(&mut self) {
        self.frame = 0;
    }

    fn tick(&mut self) -> FrameTime {
        self.frame = self.frame.saturating_add(1);
        FrameTime {
            elapsed: self.frame as f32 * self.step,
            delta: self.step,
            frame: self.frame - 1,
        }
    }
}

/// How frame timing should be produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClockMode {
    /// Follow wall-clock time.
    Realtime,
    /// Advance by `1 / fps` seconds per frame regardless of wall-clock time.
    FixedStep { fps: f32 },
}

pub type BoxedFrameClock = Box<dyn FrameClock + Send>;

pub fn clock_for_mode(mode: ClockMode) -> BoxedFrameClock {
    match mode {
        ClockMode::Realtime => Box::new(SystemClock::new()),
        ClockMode::FixedStep { fps } => Box::new(FixedStepClock::from_fps(fps)),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn fixed_step_accumulates_elapsed_time() {
        let mut clock = FixedStepClock::from_fps(60.0);
        let mut last = clock.tick();
        assert_eq!(last.frame, 0);
        for _ in 1..60 {
            last = clock.tick();
        }
        assert_eq!(last.frame, 59);
        assert!((last.elapsed - 1.0).abs() < 1e-5);
        assert!((last.delta - 1.0 / 60.0).abs() < 1e-7);
    }

    #[test]
    fn fixed_step_reset_restarts_frames() {
        let mut clock = FixedStepClock::new(0.5);
        clock.tick();
        clock.tick();
        clock.reset();
        let sample = clock.tick();
        assert_eq!(sample.frame, 0);
        assert_eq!(sample.elapsed, 0.5);
    }

    #[test]
    fn invalid_fps_freezes_time() {
        let mut clock = FixedStepClock::from_fps(0.0);
        assert_eq!(clock.tick().elapsed, 0.0);
        assert_eq!(clock.step(), 0.0);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let mut clock = SystemClock::new();
        let first = clock.tick();
        std::thread::sleep(Duration::from_millis(2));
        let second = clock.tick();
        assert!(second.elapsed >= first.elapsed);
        assert!(second.delta > 0.0);
        assert_eq!(second.frame, 1);
    }

    #[test]
    fn mode_selects_clock() {
        let mut clock = clock_for_mode(ClockMode::FixedStep { fps: 4.0 });
        assert_eq!(clock.tick().delta, 0.25);
    }
}
