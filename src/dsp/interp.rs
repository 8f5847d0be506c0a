//! # Linear Interpolation
//!
//! A delay line only stores samples at whole-number positions, but a
//! modulated delay time almost never lands on one. Linear interpolation
//! blends the two neighboring slots to approximate the value "between"
//! them:
//!
//! ```text
//! result = (1 - frac) * a + frac * b
//! ```
//!
//! `frac = 0.0` gives exactly `a`, `frac = 1.0` gives exactly `b`.

/// Blend `a` and `b` by `frac` (expected in `[0, 1)`).
#[inline]
pub fn lerp(a: f32, b: f32, frac: f32) -> f32 {
    (1.0 - frac) * a + frac * b
}
