//! Configuration-time errors.
//!
//! The engine can only fail while it is being (re)configured. Once
//! `configure()` has succeeded, every call to `process()` is infallible:
//! there is nothing on the audio path that could return an error.

/// Why a call to [`ModDelayEngine::configure`](crate::dsp::engine::ModDelayEngine::configure)
/// was refused.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// The sample rate is not a positive, finite number, or it is so low
    /// that the delay buffer would hold zero samples.
    #[error("invalid sample rate {0} Hz: the delay buffer would be empty")]
    InvalidSampleRate(f32),

    /// The configured maximum delay time is not a positive, finite number.
    #[error("invalid maximum delay time {0} s: must be positive")]
    InvalidMaxDelay(f32),

    /// The delay-time smoothing coefficient is outside `(0, 1]`.
    #[error("invalid delay smoothing coefficient {0}: must be in (0, 1]")]
    InvalidSmoothing(f32),
}
