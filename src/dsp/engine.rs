//! # The Modulated Delay Engine
//!
//! One engine, three effects. All of them are "write the input into a ring
//! buffer, read it back from somewhere behind the write head". What
//! changes between them is *where* the read head sits:
//!
//! | Mode    | Read head                                   | Typical delay   |
//! |---------|---------------------------------------------|-----------------|
//! | Delay   | fixed, set by the Rate knob (smoothed)      | 10 ms to 2 s    |
//! | Chorus  | swept by a sine LFO                         | 1 ms to 5 ms    |
//! | Flanger | swept by a sine LFO                         | 5 ms to 30 ms   |
//!
//! ## Per-Sample Order Of Operations
//!
//! ```text
//! 1. write  input + feedback (from the PREVIOUS sample) at the write head
//! 2. advance the write head
//! 3. read   the wet sample pair (mode router: delay or LFO-modulated)
//! 4. store  wet * feedback, to be written on the NEXT sample
//! 5. mix    dry * (1 - mix) + wet * mix
//! ```
//!
//! The feedback written in step 1 always comes from the previous sample's
//! wet output, so the loop is exactly one sample deep and never feeds on
//! itself within a single tick.
//!
//! Because the read happens after the head has advanced, a read head
//! `D` samples behind the write head returns the sample written `D - 1`
//! ticks ago.

use std::num::NonZeroUsize;

use nih_plug::prelude::Enum;
use nih_plug::{nih_debug_assert, nih_debug_assert_eq, nih_debug_assert_failure, nih_log};

use super::delay_line::{DelayLine, WriteHead};
use super::lfo::{sine, DelayRange, LfoPhase};
use super::smoother::{OnePoleSmoother, DEFAULT_DELAY_SMOOTHING};
use crate::error::EngineError;

/// Default maximum delay time, which sets the ring buffer length.
pub const DEFAULT_MAX_DELAY_SECONDS: f32 = 2.0;

/// Which effect the engine produces.
///
/// The variant order is the parameter's stored index: Delay = 0,
/// Chorus = 1, Flanger = 2.
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectType {
    #[id = "delay"]
    Delay,
    #[id = "chorus"]
    Chorus,
    #[id = "flanger"]
    Flanger,
}

impl EffectType {
    /// The delay window the LFO sweeps, or `None` for the static delay.
    pub fn modulation_range(self) -> Option<DelayRange> {
        match self {
            EffectType::Delay => None,
            EffectType::Chorus => Some(DelayRange::CHORUS),
            EffectType::Flanger => Some(DelayRange::FLANGER),
        }
    }
}

/// A snapshot of every control, taken once per block.
///
/// Values are expected to already be inside their ranges; the engine
/// does not clamp them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectParams {
    /// 0.0 = dry only, 1.0 = wet only.
    pub dry_wet: f32,
    /// How much of the wet signal is fed back, `[0, 0.98]`.
    pub feedback: f32,
    /// LFO depth for chorus/flanger, `[0, 1]`.
    pub depth: f32,
    /// `[0.1, 20]`. LFO rate in Hz for chorus/flanger; in delay mode the
    /// delay time in tenths of a second.
    pub rate: f32,
    /// Right-channel LFO phase offset in cycles, `[0, 1]`.
    pub phase_offset: f32,
    pub effect_type: EffectType,
}

impl Default for EffectParams {
    fn default() -> Self {
        Self {
            dry_wet: 0.5,
            feedback: 0.5,
            depth: 0.5,
            rate: 10.0,
            phase_offset: 0.0,
            effect_type: EffectType::Delay,
        }
    }
}

/// A left/right pair, returned by value from every per-sample step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StereoSample {
    pub left: f32,
    pub right: f32,
}

impl StereoSample {
    pub const fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }

    /// Both channels multiplied by `gain`.
    #[inline]
    pub fn scale(self, gain: f32) -> Self {
        Self::new(self.left * gain, self.right * gain)
    }

    /// Linear crossfade from `self` (dry) to `wet`.
    #[inline]
    pub fn mix(self, wet: Self, amount: f32) -> Self {
        Self::new(
            self.left * (1.0 - amount) + wet.left * amount,
            self.right * (1.0 - amount) + wet.right * amount,
        )
    }
}

/// Fixed engine settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Longest delay the ring buffer can hold, in seconds.
    pub max_delay_seconds: f32,
    /// Per-sample coefficient of the delay-time glide in delay mode.
    pub delay_smoothing: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_delay_seconds: DEFAULT_MAX_DELAY_SECONDS,
            delay_smoothing: DEFAULT_DELAY_SMOOTHING,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.max_delay_seconds.is_finite() && self.max_delay_seconds > 0.0) {
            return Err(EngineError::InvalidMaxDelay(self.max_delay_seconds));
        }
        if !(self.delay_smoothing > 0.0 && self.delay_smoothing <= 1.0) {
            return Err(EngineError::InvalidSmoothing(self.delay_smoothing));
        }
        Ok(())
    }
}

/// Stereo delay/chorus/flanger.
///
/// All state survives between `process()` calls. Only
/// [`configure`](Self::configure) and [`clear`](Self::clear) reset it.
pub struct ModDelayEngine {
    config: EngineConfig,

    /// Set by `configure()`. Converts seconds to samples.
    sample_rate: f32,

    /// Largest block the host promised to send.
    max_block_size: usize,

    left: DelayLine,
    right: DelayLine,

    /// Shared by both channels: they are always written at the same slot.
    write_head: WriteHead,

    /// Drives chorus/flanger. Only advances while a modulated mode is
    /// selected, and is never reset after construction.
    lfo: LfoPhase,

    /// Smoothed delay time in seconds, used by delay mode only.
    delay_time: OnePoleSmoother,

    /// Last sample's wet output times feedback, added to the next write.
    feedback: StereoSample,
}

impl Default for ModDelayEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ModDelayEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// An unconfigured engine. Nothing is allocated until
    /// [`configure`](Self::configure) is called.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            sample_rate: 0.0,
            max_block_size: 0,
            left: DelayLine::new(),
            right: DelayLine::new(),
            write_head: WriteHead::new(NonZeroUsize::MIN),
            lfo: LfoPhase::new(),
            delay_time: OnePoleSmoother::new(config.delay_smoothing),
            feedback: StereoSample::default(),
        }
    }

    /// (Re)allocate both ring buffers for `sample_rate` and reset the
    /// write head, feedback carry and delay-time smoother.
    ///
    /// This is the only place the engine allocates. On error nothing is
    /// changed, so a previously configured engine keeps working.
    pub fn configure(
        &mut self,
        sample_rate: f32,
        max_block_size: usize,
        params: &EffectParams,
    ) -> Result<(), EngineError> {
        self.config.validate()?;
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(EngineError::InvalidSampleRate(sample_rate));
        }

        // 2 s at 48 kHz = 96000 samples, ~375 KB per channel.
        let len = (sample_rate * self.config.max_delay_seconds).floor() as usize;
        let len = NonZeroUsize::new(len).ok_or(EngineError::InvalidSampleRate(sample_rate))?;

        self.sample_rate = sample_rate;
        self.max_block_size = max_block_size;
        self.left.resize(len);
        self.right.resize(len);
        self.write_head = WriteHead::new(len);
        self.feedback = StereoSample::default();
        self.delay_time = OnePoleSmoother::new(self.config.delay_smoothing);
        self.delay_time.reset(target_delay_seconds(params.rate));

        nih_log!(
            "Configured at {} Hz: {} samples per channel, blocks up to {} samples",
            sample_rate,
            len,
            max_block_size
        );
        nih_log!("Parameters: {:?}", params);

        Ok(())
    }

    /// Silence the buffers and reset the write head, feedback and
    /// smoother, keeping the current allocation. The LFO keeps running.
    pub fn clear(&mut self, params: &EffectParams) {
        let Some(len) = NonZeroUsize::new(self.left.len()) else {
            return;
        };

        self.left.clear();
        self.right.clear();
        self.write_head = WriteHead::new(len);
        self.feedback = StereoSample::default();
        self.delay_time.reset(target_delay_seconds(params.rate));
    }

    /// `true` once `configure()` has succeeded.
    pub fn is_configured(&self) -> bool {
        !self.left.is_empty()
    }

    /// Current sample rate, 0.0 until configured.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Samples held by each channel's ring buffer.
    pub fn buffer_len(&self) -> usize {
        self.left.len()
    }

    /// Process one block in place.
    ///
    /// `left` and `right` are overwritten with the output. The same
    /// `params` apply to every sample of the block.
    pub fn process(&mut self, left: &mut [f32], right: &mut [f32], params: &EffectParams) {
        if !self.is_configured() {
            nih_debug_assert_failure!("process() called before a successful configure()");
            return;
        }
        nih_debug_assert_eq!(left.len(), right.len());
        nih_debug_assert!(
            left.len() <= self.max_block_size,
            "block of {} samples exceeds the configured maximum of {}",
            left.len(),
            self.max_block_size
        );

        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let output = self.process_frame(StereoSample::new(*l, *r), params);
            *l = output.left;
            *r = output.right;
        }
    }

    /// How many samples of output may still follow the end of the input.
    ///
    /// Each repeat is `feedback` times quieter than the last, so it takes
    /// `log(0.001) / log(feedback)` repeats to decay by 60 dB.
    pub fn tail_samples(&self, params: &EffectParams) -> u32 {
        let delay_seconds = match params.effect_type.modulation_range() {
            None => self.delay_time.value(),
            Some(range) => range.max_seconds,
        };
        let delay_samples = delay_seconds * self.sample_rate;

        if params.feedback > 0.001 {
            let repeats = -3.0 / params.feedback.log10(); // log10(0.001) = -3
            (repeats * delay_samples) as u32
        } else {
            delay_samples as u32
        }
    }

    fn process_frame(&mut self, input: StereoSample, params: &EffectParams) -> StereoSample {
        self.left
            .write(&self.write_head, input.left + self.feedback.left);
        self.right
            .write(&self.write_head, input.right + self.feedback.right);
        self.write_head.advance();

        // Re-evaluated every sample. Switching modes mid-block takes
        // effect immediately and can click.
        let wet = match params.effect_type.modulation_range() {
            None => self.delayed(params),
            Some(range) => self.modulated(params, range),
        };

        self.feedback = wet.scale(params.feedback);

        input.mix(wet, params.dry_wet)
    }

    /// Plain delay: both channels read from the same smoothed position.
    fn delayed(&mut self, params: &EffectParams) -> StereoSample {
        let seconds = self.delay_time.next(target_delay_seconds(params.rate));
        let position = self.write_head.read_position(seconds * self.sample_rate);

        StereoSample::new(
            self.left.read_interpolated(position),
            self.right.read_interpolated(position),
        )
    }

    /// Chorus/flanger: each channel reads from its own LFO-swept position.
    fn modulated(&mut self, params: &EffectParams, range: DelayRange) -> StereoSample {
        let delays = self.modulation_delays(params, range);
        self.lfo.advance(params.rate, self.sample_rate);

        StereoSample::new(
            self.left
                .read_interpolated(self.write_head.read_position(delays.left)),
            self.right
                .read_interpolated(self.write_head.read_position(delays.right)),
        )
    }

    /// Per-channel delay in samples at the current LFO phase. The right
    /// channel runs `phase_offset` cycles ahead of the left.
    fn modulation_delays(&self, params: &EffectParams, range: DelayRange) -> StereoSample {
        let lfo_left = sine(self.lfo.phase()) * params.depth;
        let lfo_right = sine(self.lfo.offset(params.phase_offset)) * params.depth;

        StereoSample::new(
            range.map(lfo_left) * self.sample_rate,
            range.map(lfo_right) * self.sample_rate,
        )
    }
}

/// In delay mode the Rate knob is the delay time in tenths of a second.
#[inline]
fn target_delay_seconds(rate: f32) -> f32 {
    rate / 10.0
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────
