//! # DSP (Digital Signal Processing) Primitives
//!
//! This module contains the building blocks of the delay/chorus/flanger
//! engine:
//!
//! - **`delay_line`**: A ring buffer per channel plus the write head they
//!   share. The heart of every time-based effect.
//!
//! - **`interp`**: Linear interpolation, for reading between two stored
//!   samples when the delay time is fractional.
//!
//! - **`lfo`**: The sine LFO phase accumulator and the mapping from LFO
//!   value to chorus/flanger delay time.
//!
//! - **`smoother`**: A one-pole glide that keeps delay-time changes from
//!   clicking in plain delay mode.
//!
//! - **`engine`**: Ties it all together: mode routing, feedback, and the
//!   dry/wet mix.

pub mod delay_line;
pub mod engine;
pub mod interp;
pub mod lfo;
pub mod smoother;
