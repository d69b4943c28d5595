use shared::error::EffectError;
use shared::lifecycle::SoundCue;
use wasm_bindgen::JsValue;
use web_sys::{AudioContext, AudioContextState, OscillatorType};

// (frequency Hz, start offset s, length s)
const SPIN_START_NOTES: &[(f32, f64, f64)] = &[(440.0, 0.0, 0.06), (660.0, 0.07, 0.06)];
const REVEAL_NOTES: &[(f32, f64, f64)] = &[
    (523.25, 0.0, 0.12),
    (659.25, 0.12, 0.12),
    (783.99, 0.24, 0.12),
    (1046.5, 0.36, 0.3),
];
const VOLUME: f32 = 0.12;

/// Synthesized sound cues. The audio context is created on first use (browsers
/// only allow it after a user gesture) and closed when this is dropped.
#[derive(Default)]
pub struct AudioCues {
    context: Option<AudioContext>,
}

impl AudioCues {
    pub fn play(&mut self, cue: SoundCue) -> Result<(), EffectError> {
        let notes = match cue {
            SoundCue::SpinStart => SPIN_START_NOTES,
            SoundCue::Reveal => REVEAL_NOTES,
        };
        let ctx = self.context()?;
        let now = ctx.current_time();

        for &(frequency, offset, length) in notes {
            let start = now + offset;
            let gain = ctx.create_gain().map_err(playback)?;
            gain.gain().set_value_at_time(VOLUME, start).map_err(playback)?;
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, start + length)
                .map_err(playback)?;
            gain.connect_with_audio_node(&ctx.destination()).map_err(playback)?;

            let osc = ctx.create_oscillator().map_err(playback)?;
            osc.set_type(OscillatorType::Triangle);
            osc.frequency().set_value(frequency);
            osc.connect_with_audio_node(&gain).map_err(playback)?;
            osc.start_with_when(start).map_err(playback)?;
            osc.stop_with_when(start + length).map_err(playback)?;
        }
        Ok(())
    }

    fn context(&mut self) -> Result<&AudioContext, EffectError> {
        if self.context.is_none() {
            let ctx = AudioContext::new()
                .map_err(|e| EffectError::Unavailable(format!("{:?}", e)))?;
            self.context = Some(ctx);
        }
        let ctx = self
            .context
            .as_ref()
            .ok_or_else(|| EffectError::Unavailable("no audio context".into()))?;
        if ctx.state() == AudioContextState::Suspended {
            // resolves asynchronously; notes scheduled now still play once it runs
            let _ = ctx.resume();
        }
        Ok(ctx)
    }
}

impl Drop for AudioCues {
    fn drop(&mut self) {
        if let Some(ctx) = self.context.take() {
            let _ = ctx.close();
        }
    }
}

fn playback(err: JsValue) -> EffectError {
    EffectError::Playback(format!("{:?}", err))
}
