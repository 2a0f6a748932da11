//! Audio feedback using Web Audio API
//!
//! Procedurally generated cues - no external files needed. The event-to-cue
//! mapping is platform independent; playback exists only on wasm.

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::{GameEvent, StarKind};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Normal star caught
    Collect,
    /// Big star caught
    BigCollect,
    /// Session started
    Start,
    /// Time ran out
    GameOver,
}

impl SoundEffect {
    /// The cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::StarCollected {
                kind: StarKind::Normal,
                ..
            } => Some(SoundEffect::Collect),
            GameEvent::StarCollected {
                kind: StarKind::Big, ..
            } => Some(SoundEffect::BigCollect),
            GameEvent::SessionStarted { .. } => Some(SoundEffect::Start),
            GameEvent::SessionEnded { .. } => Some(SoundEffect::GameOver),
            _ => None,
        }
    }
}

/// Audio manager for the game
#[cfg(target_arch = "wasm32")]
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

#[cfg(target_arch = "wasm32")]
impl AudioManager {
    pub fn new(volume: f32) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Play the cue for each event that has one
    pub fn play_events(&self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Collect => self.play_arpeggio(ctx, vol, &[600.0, 900.0], 0.06),
            SoundEffect::BigCollect => {
                self.play_arpeggio(ctx, vol, &[600.0, 800.0, 1000.0, 1200.0], 0.07)
            }
            SoundEffect::Start => self.play_arpeggio(ctx, vol, &[400.0, 500.0, 600.0], 0.1),
            SoundEffect::GameOver => self.play_game_over(ctx, vol),
        }
    }

    // === Sound generators ===

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

    /// Rising chime, one short note per frequency
    fn play_arpeggio(&self, ctx: &AudioContext, vol: f32, freqs: &[f32], spacing: f64) {
        for (i, freq) in freqs.iter().enumerate() {
            let delay = i as f64 * spacing;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.2).ok();
            }
        }
    }

    /// Game over - sad descending
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
            let delay = i as f64 * 0.2;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.4).ok();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catches_and_session_edges_have_cues() {
        let collect = GameEvent::StarCollected {
            id: 1,
            kind: StarKind::Normal,
            points: 10,
        };
        let big = GameEvent::StarCollected {
            id: 2,
            kind: StarKind::Big,
            points: 50,
        };
        assert_eq!(SoundEffect::for_event(&collect), Some(SoundEffect::Collect));
        assert_eq!(SoundEffect::for_event(&big), Some(SoundEffect::BigCollect));
        assert_eq!(
            SoundEffect::for_event(&GameEvent::SessionEnded { final_score: 0 }),
            Some(SoundEffect::GameOver)
        );
    }

    #[test]
    fn test_misses_are_silent() {
        assert_eq!(SoundEffect::for_event(&GameEvent::StarMissed { id: 3 }), None);
        assert_eq!(SoundEffect::for_event(&GameEvent::StarRemoved { id: 3 }), None);
    }
}
