//! Sound cues
//!
//! The simulation emits [`Cue`]s; a [`CueSink`] turns them into sound. On the
//! web that is a tiny Web Audio synth, elsewhere a log line. Failures are
//! swallowed: audio never affects gameplay.

use crate::sim::state::Cue;

/// Anything that can consume fire-and-forget cues
pub trait CueSink {
    fn play(&mut self, cue: Cue);
}

/// Collects cues (headless runs, tests)
impl CueSink for Vec<Cue> {
    fn play(&mut self, cue: Cue) {
        self.push(cue);
    }
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
}

/// Gain falloff over the tone's duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Falloff {
    /// Exponential ramp down to 0.01
    Exponential,
    /// Linear ramp down to silence
    Linear,
}

/// One synthesized note
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq: f32,
    /// Exponential pitch sweep target and the time it is reached (seconds)
    pub sweep: Option<(f32, f64)>,
    pub waveform: Waveform,
    /// Seconds
    pub duration: f64,
    /// Peak gain before the settings volume is applied
    pub volume: f32,
    pub falloff: Falloff,
    /// Start offset in seconds
    pub delay: f64,
}

impl Tone {
    const fn blip(freq: f32, waveform: Waveform, duration: f64, volume: f32) -> Self {
        Self {
            freq,
            sweep: None,
            waveform,
            duration,
            volume,
            falloff: Falloff::Exponential,
            delay: 0.0,
        }
    }
}

/// The notes making up each cue
pub fn tones_for(cue: Cue) -> Vec<Tone> {
    match cue {
        Cue::Jump => vec![Tone::blip(400.0, Waveform::Sine, 0.2, 0.1)],
        // Rising whoosh
        Cue::WorldSwitch => vec![Tone {
            sweep: Some((800.0, 0.1)),
            falloff: Falloff::Linear,
            ..Tone::blip(200.0, Waveform::Sawtooth, 0.2, 0.1)
        }],
        Cue::Dash => vec![Tone::blip(800.0, Waveform::Square, 0.15, 0.05)],
        Cue::Hit => vec![Tone::blip(100.0, Waveform::Sawtooth, 0.4, 0.2)],
        Cue::Collect => vec![
            Tone::blip(1200.0, Waveform::Sine, 0.1, 0.05),
            Tone {
                delay: 0.05,
                ..Tone::blip(1600.0, Waveform::Sine, 0.1, 0.05)
            },
        ],
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(not(target_arch = "wasm32"))]
pub use native::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{CueSink, Falloff, Tone, Waveform, tones_for};
    use crate::sim::state::Cue;

    /// Web Audio synth
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx, volume: 0.8 }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Overall gain multiplier (0.0 - 1.0)
        pub fn set_volume(&mut self, volume: f32) {
            self.volume = volume.clamp(0.0, 1.0);
        }

        /// Create an oscillator routed through its own gain node
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        fn play_tone(ctx: &AudioContext, tone: &Tone, volume: f32) {
            let osc_type = match tone.waveform {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
            };
            let Some((osc, gain)) = Self::create_osc(ctx, tone.freq, osc_type) else {
                return;
            };
            let t = ctx.current_time() + tone.delay;
            let end = t + tone.duration;

            osc.frequency().set_value_at_time(tone.freq, t).ok();
            if let Some((target, at)) = tone.sweep {
                osc.frequency()
                    .exponential_ramp_to_value_at_time(target, t + at)
                    .ok();
            }

            gain.gain().set_value_at_time(tone.volume * volume, t).ok();
            match tone.falloff {
                Falloff::Exponential => {
                    gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok();
                }
                Falloff::Linear => {
                    gain.gain().linear_ramp_to_value_at_time(0.0, end).ok();
                }
            }

            osc.start_with_when(t).ok();
            osc.stop_with_when(end).ok();
        }
    }

    impl CueSink for AudioManager {
        fn play(&mut self, cue: Cue) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            for tone in tones_for(cue) {
                Self::play_tone(ctx, &tone, self.volume);
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::{CueSink, tones_for};
    use crate::sim::state::Cue;

    /// Silent stand-in; logs what would have played
    #[derive(Debug, Default)]
    pub struct AudioManager {
        volume: f32,
        played: u64,
    }

    impl AudioManager {
        pub fn new() -> Self {
            Self {
                volume: 0.8,
                played: 0,
            }
        }

        pub fn resume(&self) {}

        pub fn set_volume(&mut self, volume: f32) {
            self.volume = volume.clamp(0.0, 1.0);
        }

        /// Number of cues received
        pub fn played(&self) -> u64 {
            self.played
        }
    }

    impl CueSink for AudioManager {
        fn play(&mut self, cue: Cue) {
            self.played += 1;
            if self.volume > 0.0 {
                let tones = tones_for(cue);
                log::debug!("Cue {:?} ({} tone(s), {:.0} Hz)", cue, tones.len(), tones[0].freq);
            }
        }
    }
}
