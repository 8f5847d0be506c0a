//! # One-Pole Delay-Time Smoother
//!
//! In plain delay mode the Rate knob sets the delay time directly. If the
//! read head jumped every time the knob moved, the output would click. So
//! the target delay time is passed through a one-pole lowpass first, and
//! the read head glides towards its new position instead.
//!
//! ## The Smoother Equation
//!
//! ```text
//! y[n] = y[n-1] - c * (y[n-1] - x[n])
//! ```
//!
//! Where:
//! - `x[n]` is the target (the raw delay time from the knob)
//! - `y[n-1]` is the previous smoothed value (the smoother's only memory)
//! - `c` is the smoothing coefficient, `0 < c <= 1`
//!
//! Rearranged, this is the same one-pole lowpass used for filtering:
//! `y[n] = c * x[n] + (1 - c) * y[n-1]`. Each sample closes a fraction `c`
//! of the remaining gap, so after `n` samples the gap has shrunk to
//! `(1 - c)^n` of what it was.
//!
//! ## Per-Sample Coefficient
//!
//! The coefficient is applied once per sample and is *not* scaled by the
//! sample rate. With the default `c = 0.0001` the glide takes about
//! 10 000 samples to close 63% of the gap: ~0.21 s at 48 kHz, ~0.10 s at
//! 96 kHz.

/// Default per-sample coefficient for the delay-time glide.
pub const DEFAULT_DELAY_SMOOTHING: f32 = 0.0001;

/// A one-pole exponential smoother.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OnePoleSmoother {
    /// The fraction of the remaining distance covered each sample.
    coefficient: f32,

    /// The current smoothed value.
    value: f32,
}

impl OnePoleSmoother {
    /// Create a smoother at 0.0 with the given per-sample coefficient.
    pub fn new(coefficient: f32) -> Self {
        Self {
            coefficient,
            value: 0.0,
        }
    }

    /// Jump straight to `value`, skipping the glide.
    pub fn reset(&mut self, value: f32) {
        self.value = value;
    }

    /// Move one sample closer to `target` and return the new value.
    pub fn next(&mut self, target: f32) -> f32 {
        self.value -= self.coefficient * (self.value - target);
        self.value
    }

    /// The current smoothed value, without advancing.
    pub fn value(&self) -> f32 {
        self.value
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────
