//! Host-side session glue
//!
//! Both hosts drive the same loop: feed input, tick, then hand the drained
//! events to audio and persistence. The headless runner plays whole rounds
//! on a manual clock, which is also how the native binary exercises the
//! game without a window.

use crate::audio::{AudioSink, play_events};
use crate::consts::HEADLESS_FRAME_MS;
use crate::highscores::HighScoreStore;
use crate::platform::{Clock, ManualClock};
use crate::sim::{Collision, GameEvent, GameState, TickInput, Trigger, tick};
use crate::tuning::{Tuning, TuningError};

/// Forward one tick's events to the collaborators
///
/// Audio gets every cue in order; a new record is persisted immediately.
pub fn dispatch_events<A, S>(events: &[GameEvent], audio: &A, store: &mut S)
where
    A: AudioSink + ?Sized,
    S: HighScoreStore + ?Sized,
{
    play_events(audio, events);
    for event in events {
        if let GameEvent::NewHighScore { score } = event {
            store.save_high_score(*score);
        }
    }
}

/// Headless run parameters
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    pub seed: u64,
    pub rounds: u32,
    /// Safety cap per round; a round that survives this long ends the session
    pub max_ticks: u64,
    pub autopilot: bool,
    /// Clock step per tick (milliseconds)
    pub frame_ms: f64,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            rounds: 5,
            max_ticks: 60 * 60 * 10,
            autopilot: true,
            frame_ms: HEADLESS_FRAME_MS,
        }
    }
}

/// Outcome of one headless round
#[derive(Debug, Clone, PartialEq)]
pub struct RoundResult {
    pub round: u32,
    pub score: u32,
    pub ticks: u64,
    /// `None` if the round hit the tick cap
    pub cause: Option<Collision>,
    pub new_record: bool,
}

/// Play rounds back to back, restarting after each crash
pub fn run_headless<A, S>(
    tuning: Tuning,
    config: &HeadlessConfig,
    audio: &A,
    store: &mut S,
) -> Result<Vec<RoundResult>, TuningError>
where
    A: AudioSink + ?Sized,
    S: HighScoreStore + ?Sized,
{
    let clock = ManualClock::new(0.0);
    let mut state = GameState::new(tuning, config.seed, store.load_high_score(), clock.now_ms())?;
    let input = TickInput {
        activate: false,
        autopilot: config.autopilot,
    };

    let mut results = Vec::with_capacity(config.rounds as usize);
    for round in 0..config.rounds {
        if state.is_game_over() {
            state.fire(Trigger::Activate, clock.now_ms());
            let events = state.drain_events();
            dispatch_events(&events, audio, store);
        }

        let mut cause = None;
        let mut new_record = false;
        let mut ticks = 0;
        while !state.is_game_over() && ticks < config.max_ticks {
            let now = clock.advance(config.frame_ms);
            tick(&mut state, &input, now);
            ticks += 1;

            let events = state.drain_events();
            for event in &events {
                match event {
                    GameEvent::Hit { cause: c } => cause = Some(*c),
                    GameEvent::NewHighScore { .. } => new_record = true,
                    _ => {}
                }
            }
            dispatch_events(&events, audio, store);
        }

        let result = RoundResult {
            round,
            score: state.score.score(),
            ticks,
            cause,
            new_record,
        };
        log::info!(
            "Round {}: score {} in {} ticks ({:?})",
            round + 1,
            result.score,
            result.ticks,
            result.cause
        );
        results.push(result);

        if cause.is_none() {
            log::warn!("Round {} reached the tick cap, stopping", round + 1);
            break;
        }
    }

    Ok(results)
}
