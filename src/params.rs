//! # Plugin Parameters
//!
//! Parameters are the knobs the user sees in the DAW. Each one has:
//!
//! - A **unique string ID** (`#[id = "..."]`) that the host uses to
//!   save and recall presets. Once published, never change these IDs
//!   or existing presets will break.
//! - A **human-readable name** shown in the DAW's UI.
//! - A **range** and a **default value**.
//!
//! ## No Host-Side Smoothing
//!
//! Unlike most plugins, none of these parameters carry a nih-plug
//! smoother. The engine reads one snapshot per block and does its own
//! smoothing where it matters (the delay time in plain delay mode).

use nih_plug::prelude::*;

use crate::dsp::engine::{EffectParams, EffectType};

/// All user-facing parameters for Loveless Mod Delay.
#[derive(Params)]
pub struct ModDelayParams {
    /// **Dry/Wet** — balance between the original and the effect.
    ///
    /// 0% = only the input, 100% = only the delayed signal.
    #[id = "DryWet"]
    pub dry_wet: FloatParam,

    /// **Feedback** — how much of the delayed signal goes round again.
    ///
    /// Capped at 98%: at 100% the repeats would never decay.
    #[id = "Feedback"]
    pub feedback: FloatParam,

    /// **Depth** — how far the LFO sweeps the delay time in chorus and
    /// flanger modes. Ignored in delay mode.
    #[id = "Depth"]
    pub depth: FloatParam,

    /// **Rate** — LFO speed in Hz for chorus/flanger. In delay mode it
    /// sets the delay time instead: Rate / 10 seconds (0.01 s to 2 s).
    #[id = "Rate"]
    pub rate: FloatParam,

    /// **Phase Offset** — how far ahead the right channel's LFO runs, in
    /// cycles. 0.25 = a quarter cycle, for a wide stereo sweep.
    #[id = "PhaseOffset"]
    pub phase_offset: FloatParam,

    /// **Type** — Delay, Chorus or Flanger.
    #[id = "Type"]
    pub effect_type: EnumParam<EffectType>,
}

impl Default for ModDelayParams {
    fn default() -> Self {
        let defaults = EffectParams::default();

        Self {
            dry_wet: FloatParam::new(
                "Dry Wet",
                defaults.dry_wet,
                FloatRange::Linear { min: 0.0, max: 1.0 },
            )
            .with_unit("%")
            .with_value_to_string(formatters::v2s_f32_percentage(1))
            .with_string_to_value(formatters::s2v_f32_percentage()),

            feedback: FloatParam::new(
                "Feedback",
                defaults.feedback,
                FloatRange::Linear {
                    min: 0.0,
                    max: 0.98, // Capped below 1.0 for stability
                },
            )
            .with_unit("%")
            .with_value_to_string(formatters::v2s_f32_percentage(1))
            .with_string_to_value(formatters::s2v_f32_percentage()),

            depth: FloatParam::new(
                "Depth",
                defaults.depth,
                FloatRange::Linear { min: 0.0, max: 1.0 },
            )
            .with_unit("%")
            .with_value_to_string(formatters::v2s_f32_percentage(1))
            .with_string_to_value(formatters::s2v_f32_percentage()),

            rate: FloatParam::new(
                "Rate",
                defaults.rate,
                FloatRange::Linear {
                    min: 0.1,
                    max: 20.0,
                },
            )
            .with_unit(" Hz")
            .with_value_to_string(formatters::v2s_f32_rounded(2)),

            phase_offset: FloatParam::new(
                "Phase Offset",
                defaults.phase_offset,
                FloatRange::Linear { min: 0.0, max: 1.0 },
            )
            .with_value_to_string(formatters::v2s_f32_rounded(2)),

            effect_type: EnumParam::new("Type", defaults.effect_type),
        }
    }
}

impl ModDelayParams {
    /// Read every parameter once. Called at the start of each block so
    /// the engine sees one consistent set of values for the whole block.
    pub fn snapshot(&self) -> EffectParams {
        EffectParams {
            dry_wet: self.dry_wet.value(),
            feedback: self.feedback.value(),
            depth: self.depth.value(),
            rate: self.rate.value(),
            phase_offset: self.phase_offset.value(),
            effect_type: self.effect_type.value(),
        }
    }
}
