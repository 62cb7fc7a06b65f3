//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! The engine never waits on audio: cues are picked from its events and
//! played fire-and-forget.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Piece dropped onto the grid
    Place,
    /// Lines completed
    Clear,
    /// No moves left
    GameOver,
    /// Button press
    Click,
}

impl SoundEffect {
    /// Cue for an engine event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Placed { .. } => Some(SoundEffect::Place),
            GameEvent::LinesCleared { .. } => Some(SoundEffect::Clear),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::ClearResolved { .. } | GameEvent::TrayRefilled => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web_audio::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web_audio {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundEffect;
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_volume(),
            }
        }

        /// Pick up changed volume or mute settings
        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_volume();
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
                SoundEffect::Place => self.play_place(ctx, vol),
                SoundEffect::Clear => self.play_clear(ctx, vol),
                SoundEffect::GameOver => self.play_game_over(ctx, vol),
                SoundEffect::Click => self.play_click(ctx, vol),
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

        /// Place - quick upward chirp
        fn play_place(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            osc.frequency().set_value_at_time(220.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(440.0, t + 0.1)
                .ok();
            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }

        /// Clear - C major arpeggio
        fn play_clear(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [523.25, 659.25, 783.99].iter().enumerate() {
                let delay = i as f64 * 0.08;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.2, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.2).ok();
                }
            }
        }

        /// Game over - sad descending, each note sagging an octave
        fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
            for (freq, delay, duration) in [(392.0, 0.0, 0.3), (349.23, 0.2, 0.3), (293.66, 0.4, 0.5)] {
                if let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sawtooth) {
                    let t = ctx.current_time() + delay;
                    osc.frequency().set_value_at_time(freq, t).ok();
                    osc.frequency()
                        .exponential_ramp_to_value_at_time(freq * 0.5, t + duration)
                        .ok();
                    gain.gain().set_value_at_time(vol * 0.15, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + duration)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + duration).ok();
                }
            }
        }

        /// Click - short square blip
        fn play_click(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 800.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.1, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.05)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.05).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Position, ShapeKind};

    #[test]
    fn test_event_cues() {
        let placed = GameEvent::Placed {
            slot: 0,
            shape: ShapeKind::Single,
            cells: vec![Position::new(0, 0)],
            points: 1,
        };
        assert_eq!(SoundEffect::for_event(&placed), Some(SoundEffect::Place));

        let cleared = GameEvent::LinesCleared {
            rows: vec![0],
            cols: vec![],
            bonus: 10,
        };
        assert_eq!(SoundEffect::for_event(&cleared), Some(SoundEffect::Clear));
        assert_eq!(
            SoundEffect::for_event(&GameEvent::GameOver { score: 3 }),
            Some(SoundEffect::GameOver)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::TrayRefilled), None);
        assert_eq!(SoundEffect::for_event(&GameEvent::ClearResolved { cells: 8 }), None);
    }
}
