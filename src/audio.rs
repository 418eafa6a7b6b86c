//! Sound cues for simulation events
//!
//! The simulation raises `GameEvent`s; hosts map them to cues here and hand
//! them to an `AudioSink`. On the web the sink is `AudioManager`, which
//! synthesizes every cue with Web Audio oscillators (no sound files).

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Avatar flapped
    Flap,
    /// Crash into an obstacle, the ground or the ceiling
    Hit,
    /// Obstacle passed
    Score,
    /// Finished run beat the best score
    HighScore,
}

impl SoundEffect {
    /// Cue for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Flap => Some(SoundEffect::Flap),
            GameEvent::Hit { .. } => Some(SoundEffect::Hit),
            GameEvent::Scored { .. } => Some(SoundEffect::Score),
            GameEvent::NewHighScore { .. } => Some(SoundEffect::HighScore),
            GameEvent::Restarted => None,
        }
    }
}

/// Anything that can play a cue. Must never block or fail loudly.
pub trait AudioSink {
    fn play(&self, effect: SoundEffect);
}

/// Silent sink (headless runs, or no audio backend)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&self, _effect: SoundEffect) {}
}

/// Play the cue for each event, in order
pub fn play_events<S: AudioSink + ?Sized>(sink: &S, events: &[GameEvent]) {
    for effect in events.iter().filter_map(SoundEffect::for_event) {
        sink.play(effect);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::Cell;

    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundEffect};
    use crate::settings::Settings;

    /// Web Audio backend
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
        /// Held silent while the page is in the background
        suspended: Cell<bool>,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Fails outside a secure context; the game runs silently then
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_volume(),
                suspended: Cell::new(false),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if self.suspended.get() {
                return;
            }
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Re-read volume and mute from settings
        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_volume();
        }

        /// Silence output without touching settings (window blur)
        pub fn set_suspended(&self, suspended: bool) {
            self.suspended.set(suspended);
            let Some(ctx) = &self.ctx else { return };
            if suspended {
                let _ = ctx.suspend();
            } else {
                let _ = ctx.resume();
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

        /// Flap - short upward chirp
        fn play_flap(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency().set_value_at_time(300.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(700.0, t + 0.08)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }

        /// Hit - thud with a short crunch on top
        fn play_hit(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = self.create_osc(ctx, 160.0, OscillatorType::Sine) {
                gain.gain().set_value_at_time(vol * 0.6, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.frequency().set_value_at_time(160.0, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(40.0, t + 0.3)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.35).ok();
            }

            if let Some((osc, gain)) = self.create_osc(ctx, 900.0, OscillatorType::Square) {
                gain.gain().set_value_at_time(vol * 0.15, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.1).ok();
            }
        }

        /// Score - two-note ding
        fn play_score(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [880.0, 1320.0].iter().enumerate() {
                let delay = i as f64 * 0.07;
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

        /// High score - celebratory arpeggio
        fn play_high_score(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [500.0, 600.0, 700.0, 800.0, 1000.0].iter().enumerate() {
                let delay = 0.4 + i as f64 * 0.08;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.25, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.3).ok();
                }
            }
        }
    }

    impl AudioSink for AudioManager {
        fn play(&self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 || self.suspended.get() {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Flap => self.play_flap(ctx, vol),
                SoundEffect::Hit => self.play_hit(ctx, vol),
                SoundEffect::Score => self.play_score(ctx, vol),
                SoundEffect::HighScore => self.play_high_score(ctx, vol),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::sim::Collision;

    #[derive(Default)]
    struct Recorder {
        played: RefCell<Vec<SoundEffect>>,
    }

    impl AudioSink for Recorder {
        fn play(&self, effect: SoundEffect) {
            self.played.borrow_mut().push(effect);
        }
    }

    #[test]
    fn test_event_cues() {
        assert_eq!(SoundEffect::for_event(&GameEvent::Flap), Some(SoundEffect::Flap));
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Hit {
                cause: Collision::Ground
            }),
            Some(SoundEffect::Hit)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::Restarted), None);
    }

    #[test]
    fn test_play_events_in_order() {
        let sink = Recorder::default();
        let events = [
            GameEvent::Scored {
                obstacle_id: 3,
                score: 5,
            },
            GameEvent::Hit {
                cause: Collision::Obstacle { id: 4 },
            },
            GameEvent::NewHighScore { score: 5 },
            GameEvent::Restarted,
        ];
        play_events(&sink, &events);
        assert_eq!(
            *sink.played.borrow(),
            vec![SoundEffect::Score, SoundEffect::Hit, SoundEffect::HighScore]
        );

        // Null sink swallows everything
        play_events(&NullAudio, &events);
    }
}
