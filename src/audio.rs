//! Audio system using Web Audio API
//!
//! Pad tones and outcome jingles are synthesized; no sound files needed.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::Color;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// A pad lights up (playback or player press)
    Pad(Color),
    /// Wrong move, round will replay
    WrongMove,
    /// Strict-mode loss
    GameOver,
    /// Final level cleared
    Victory,
}

/// Master gain applied to every effect
const VOLUME: f32 = 0.8;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx }
    }

    /// Play a sound effect; `duration_ms` is how long a pad tone rings
    pub fn play(&self, effect: SoundEffect, duration_ms: u64) {
        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let vol = VOLUME;
        let secs = duration_ms as f64 / 1000.0;
        match effect {
            SoundEffect::Pad(color) => self.play_tone(ctx, vol, color.tone_hz(), secs),
            SoundEffect::WrongMove => self.play_buzz(ctx, vol, 0.4),
            SoundEffect::GameOver => self.play_buzz(ctx, vol, 1.0),
            SoundEffect::Victory => self.play_victory(ctx, vol),
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
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

    /// Pad tone - held for the flash, short release
    fn play_tone(&self, ctx: &AudioContext, vol: f32, freq: f32, secs: f64) {
        let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.5, t).ok();
        gain.gain().set_value_at_time(vol * 0.5, t + secs).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + secs + 0.05)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + secs + 0.06).ok();
    }

    /// Low square buzz (the classic Simon error tone)
    fn play_buzz(&self, ctx: &AudioContext, vol: f32, secs: f64) {
        let Some((osc, gain)) = self.create_osc(ctx, 42.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + secs)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + secs + 0.02).ok();
    }

    /// Victory - all four pad tones rising
    fn play_victory(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        let order = [Color::Blue, Color::Yellow, Color::Red, Color::Green];

        for (i, color) in order.iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, color.tone_hz(), OscillatorType::Triangle)
            else {
                continue;
            };
            let start = t + i as f64 * 0.12;
            gain.gain().set_value_at_time(0.0, t).ok();
            gain.gain().set_value_at_time(vol * 0.4, start).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, start + 0.3)
                .ok();

            osc.start_with_when(start).ok();
            osc.stop_with_when(start + 0.35).ok();
        }
    }
}
