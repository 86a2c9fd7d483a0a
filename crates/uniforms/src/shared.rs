//! Lock-free cells shared between input/panel writers and the frame reader.
//!
//! Readers may observe a mix of old and new fields from a concurrent write.
//! Values are cosmetic, so a one-frame-stale or torn read is acceptable.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::params::{Knob, Parameters};

/// `f32` stored as its bit pattern in an `AtomicU32`.
#[derive(Debug, Default)]
pub struct AtomicF32(AtomicU32);

impl AtomicF32 {
    pub fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    pub fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    pub fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// Normalized pointer position, `(0, 0)` top-left to `(1, 1)` bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
}

impl Pointer {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn center() -> Self {
        Self { x: 0.5, y: 0.5 }
    }

    /// Normalizes a client-space position against the element bounds.
    ///
    /// Returns `None` while the element has no area.
    pub fn from_client(client_x: f32, client_y: f32, bounds: PointerBounds) -> Option<Self> {
        if !(bounds.width > 0.0 && bounds.height > 0.0) {
            return None;
        }
        Some(Self {
            x: (client_x - bounds.left) / bounds.width,
            y: (client_y - bounds.top) / bounds.height,
        })
    }
}

/// Bounding box of the element receiving pointer events, in client pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerBounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// Pointer cell written by pointer-move handlers.
#[derive(Debug, Default)]
pub struct PointerCell {
    x: AtomicF32,
    y: AtomicF32,
}

impl PointerCell {
    pub fn new(initial: Pointer) -> Self {
        Self {
            x: AtomicF32::new(initial.x),
            y: AtomicF32::new(initial.y),
        }
    }

    pub fn store(&self, pointer: Pointer) {
        self.x.store(pointer.x);
        self.y.store(pointer.y);
    }

    /// Records a pointer-move event; zero-area bounds leave the cell untouched.
    pub fn pointer_moved(&self, client_x: f32, client_y: f32, bounds: PointerBounds) {
        if let Some(pointer) = Pointer::from_client(client_x, client_y, bounds) {
            self.store(pointer);
        }
    }

    pub fn load(&self) -> Pointer {
        Pointer {
            x: self.x.load(),
            y: self.y.load(),
        }
    }
}

/// Live knob values, mutated by the panel and read every frame.
#[derive(Debug)]
pub struct SharedParameters {
    slots: [AtomicF32; Knob::COUNT],
}

impl SharedParameters {
    pub fn new(initial: Parameters) -> Self {
        Self {
            slots: std::array::from_fn(|index| AtomicF32::new(initial.get(Knob::ALL[index]))),
        }
    }

    pub fn get(&self, knob: Knob) -> f32 {
        self.slots[knob.index()].load()
    }

    pub fn set(&self, knob: Knob, value: f32) {
        self.slots[knob.index()].store(value);
    }

    pub fn store(&self, parameters: &Parameters) {
        for knob in Knob::ALL {
            self.set(knob, parameters.get(knob));
        }
    }

    pub fn load(&self) -> Parameters {
        let mut parameters = Parameters::default();
        for knob in Knob::ALL {
            parameters.set(knob, self.get(knob));
        }
        parameters
    }
}

impl Default for SharedParameters {
    fn default() -> Self {
        Self::new(Parameters::default())
    }
}
