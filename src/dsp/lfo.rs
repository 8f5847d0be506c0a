//! # LFO (Low-Frequency Oscillator)
//!
//! Chorus and flanger are both "a delay whose time keeps moving". The
//! thing that moves it is a sine LFO running at a few Hz.
//!
//! ## Phase Accumulator
//!
//! Rather than tracking time, the LFO tracks its *phase*: how far through
//! the current cycle it is, as a number in `[0, 1)`. Each sample the phase
//! grows by `rate / sample_rate` and wraps back by 1.0 when it completes a
//! cycle. At 1 Hz and 48 kHz that is 1/48000 per sample, so the phase
//! returns to where it started after exactly 48000 samples.
//!
//! ```text
//! phase  0.0 ──► 0.25 ──► 0.5 ──► 0.75 ──► 1.0 = 0.0
//! sin    0.0      1.0     0.0     -1.0     0.0
//! ```
//!
//! ## From LFO Value To Delay Time
//!
//! The sine swings over `[-1, 1]` (less when scaled by depth). A
//! [`DelayRange`] maps that swing linearly onto a window of delay times:
//! -1 becomes the shortest delay and +1 the longest.

use std::f32::consts::TAU;

/// Wrap a phase that has gone past the end of the cycle back into `[0, 1)`.
///
/// Callers only ever add less than one full cycle at a time, so a single
/// subtraction is enough.
#[inline]
pub fn wrap_phase(phase: f32) -> f32 {
    if phase >= 1.0 {
        phase - 1.0
    } else {
        phase
    }
}

/// The sine LFO's output at `phase` (in cycles).
#[inline]
pub fn sine(phase: f32) -> f32 {
    (TAU * phase).sin()
}

/// A single continuously running LFO phase.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LfoPhase {
    phase: f32,
}

impl LfoPhase {
    pub fn new() -> Self {
        Self { phase: 0.0 }
    }

    /// Current phase in `[0, 1)`.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// The phase shifted by `offset` cycles, wrapped into `[0, 1)`.
    pub fn offset(&self, offset: f32) -> f32 {
        wrap_phase(self.phase + offset)
    }

    /// Step forward by one sample at `rate_hz`.
    pub fn advance(&mut self, rate_hz: f32, sample_rate: f32) {
        self.phase = wrap_phase(self.phase + rate_hz / sample_rate);
    }
}

/// A window of delay times (in seconds) that an LFO sweeps across.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayRange {
    pub min_seconds: f32,
    pub max_seconds: f32,
}

impl DelayRange {
    /// Short, subtle sweep: 1 ms to 5 ms.
    pub const CHORUS: Self = Self {
        min_seconds: 0.001,
        max_seconds: 0.005,
    };

    /// Longer, deeper sweep: 5 ms to 30 ms.
    pub const FLANGER: Self = Self {
        min_seconds: 0.005,
        max_seconds: 0.030,
    };

    /// Map an LFO value in `[-1, 1]` linearly onto this range.
    #[inline]
    pub fn map(&self, lfo: f32) -> f32 {
        let unipolar = (lfo + 1.0) * 0.5;
        self.min_seconds + unipolar * (self.max_seconds - self.min_seconds)
    }
}
