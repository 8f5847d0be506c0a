//! # Loveless Mod Delay — A VST3/CLAP Delay, Chorus and Flanger
//!
//! A three-in-one modulated delay plugin built with
//! [nih-plug](https://github.com/robbert-vdh/nih-plug). One ring buffer per
//! channel, one shared write head, and a mode switch that decides where
//! the read head sits: fixed (delay) or swept by a sine LFO (chorus,
//! flanger).
//!
//! ## Signal Flow
//!
//! ```text
//! Input ──┬────────────────────────────────────────── × (1 - mix) ───┐
//!         │                                                          │
//!         │    ┌────────────────────────────────────────────┐        │
//!         │    │              FEEDBACK LOOP                 │        │
//!         │    │                                            │        │
//!         └──►(+)──► [Ring Buffer] ──► [Read Head] ──┬──► × feedback │
//!              ▲                        ▲            │     (1 sample │
//!              │                        │            │      later)   │
//!              │            Delay: smoothed Rate/10  │               │
//!              │            Chorus/Flanger: sine LFO │               │
//!              └─────────────────────────────────────│───────────────┘
//!                                                    │               │
//!                                                    └── × mix ────►(+)──► Output
//! ```
//!
//! The host-facing pieces live here and in [`params`]; everything that
//! touches audio lives in [`dsp`].

pub mod dsp;
pub mod error;
pub mod params;

use std::num::NonZeroU32;
use std::sync::Arc;

use dsp::engine::ModDelayEngine;
use nih_plug::prelude::*;
use params::ModDelayParams;

/// The plugin: shared parameters plus the audio-thread engine.
///
/// Parameters (`ModDelayParams`) are shared with the host via `Arc` and can
/// be read from any thread. The engine is owned exclusively by the audio
/// thread and only touched from `initialize()`, `reset()` and `process()`.
struct LovelessModDelay {
    params: Arc<ModDelayParams>,
    engine: ModDelayEngine,
}

impl Default for LovelessModDelay {
    fn default() -> Self {
        Self {
            params: Arc::new(ModDelayParams::default()),
            // Unconfigured: buffers are allocated in initialize() once the
            // host tells us the sample rate.
            engine: ModDelayEngine::new(),
        }
    }
}

impl Plugin for LovelessModDelay {
    const NAME: &'static str = "Loveless Mod Delay";
    const VENDOR: &'static str = "Loveless Audio";
    const URL: &'static str = "";
    const EMAIL: &'static str = "steve.loveless@gmail.com";
    const VERSION: &'static str = env!("CARGO_PKG_VERSION");

    // Stereo only. Chorus and flanger spread the two channels apart, and
    // the engine always processes a left/right pair.
    const AUDIO_IO_LAYOUTS: &'static [AudioIOLayout] = &[AudioIOLayout {
        main_input_channels: NonZeroU32::new(2),
        main_output_channels: NonZeroU32::new(2),
        aux_input_ports: &[],
        aux_output_ports: &[],
        names: PortNames::const_default(),
    }];

    const MIDI_INPUT: MidiConfig = MidiConfig::None;

    // The engine reads one parameter snapshot per block, so there is no
    // point asking the host to split blocks at automation points.
    const SAMPLE_ACCURATE_AUTOMATION: bool = false;

    type SysExMessage = ();
    type BackgroundTask = ();

    fn params(&self) -> Arc<dyn Params> {
        self.params.clone()
    }

    /// Called when the plugin is first loaded, or when the sample rate or
    /// maximum block size changes. This is the only place the delay
    /// buffers are allocated.
    ///
    /// Returning `false` tells the host this configuration can't be used.
    fn initialize(
        &mut self,
        _audio_io_layout: &AudioIOLayout,
        buffer_config: &BufferConfig,
        _context: &mut impl InitContext<Self>,
    ) -> bool {
        let snapshot = self.params.snapshot();

        match self.engine.configure(
            buffer_config.sample_rate,
            buffer_config.max_buffer_size as usize,
            &snapshot,
        ) {
            Ok(()) => true,
            Err(err) => {
                nih_error!("Could not configure the delay engine: {err}");
                false
            }
        }
    }

    /// Called when playback stops or the plugin is re-activated.
    ///
    /// Clears the buffers so stale echoes don't bleed into the next
    /// playback. The allocation is kept; nothing here may allocate.
    fn reset(&mut self) {
        self.engine.clear(&self.params.snapshot());
    }

    /// Process one block.
    ///
    /// The parameters are read once, up front, and the same snapshot is
    /// used for every sample of the block. The nih-plug wrappers enable
    /// flush-to-zero around this call, so feedback tails decaying towards
    /// silence never turn into slow denormal arithmetic.
    fn process(
        &mut self,
        buffer: &mut Buffer,
        _aux: &mut AuxiliaryBuffers,
        _context: &mut impl ProcessContext<Self>,
    ) -> ProcessStatus {
        let snapshot = self.params.snapshot();

        let [left, right] = buffer.as_slice() else {
            return ProcessStatus::Normal;
        };
        self.engine.process(left, right, &snapshot);

        // Tell the host how long the effect keeps ringing after the input
        // goes silent, so the repeats aren't cut off.
        ProcessStatus::Tail(self.engine.tail_samples(&snapshot))
    }
}

// ─────────────────────────────────────────────────────────────────────
// Plugin format trait implementations
// ─────────────────────────────────────────────────────────────────────

impl ClapPlugin for LovelessModDelay {
    const CLAP_ID: &'static str = "com.loveless-audio.loveless-mod-delay";
    const CLAP_DESCRIPTION: Option<&'static str> =
        Some("A delay, chorus and flanger sharing one modulated delay line");
    const CLAP_MANUAL_URL: Option<&'static str> = None;
    const CLAP_SUPPORT_URL: Option<&'static str> = None;
    const CLAP_FEATURES: &'static [ClapFeature] = &[
        ClapFeature::AudioEffect,
        ClapFeature::Stereo,
        ClapFeature::Delay,
        ClapFeature::Chorus,
        ClapFeature::Flanger,
    ];
}

impl Vst3Plugin for LovelessModDelay {
    // `*b"..."` turns a 16-character ASCII literal into a `[u8; 16]`.
    const VST3_CLASS_ID: [u8; 16] = *b"LvlssModDelay001";

    const VST3_SUBCATEGORIES: &'static [Vst3SubCategory] = &[
        Vst3SubCategory::Fx,
        Vst3SubCategory::Delay,
        Vst3SubCategory::Modulation,
    ];
}

nih_export_clap!(LovelessModDelay);
nih_export_vst3!(LovelessModDelay);
