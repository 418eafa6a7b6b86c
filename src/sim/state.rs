//! Game state and core simulation types
//!
//! One `GameState` is the whole simulation: it owns the avatar, the
//! obstacles, the spawner and its seeded RNG, the score tracker and the
//! phase. Hosts hold it by value inside their own context object.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::collision::{Collision, WorldBounds};
use super::machine::{Action, Trigger, transition};
use super::obstacle::{ObstacleParams, ObstacleSet};
use super::score::ScoreTracker;
use super::snapshot::{AvatarView, ObstacleView, RenderSnapshot};
use super::spawner::ObstacleSpawner;
use crate::tuning::{Tuning, TuningError};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Crashed; frozen until the next activate input
    GameOver,
}

/// Side-effect requests produced during a tick
///
/// Hosts drain these after every tick and forward them to audio and
/// persistence. The simulation never waits on the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The avatar flapped
    Flap,
    /// The run ended
    Hit { cause: Collision },
    /// An obstacle was passed
    Scored { obstacle_id: u32, score: u32 },
    /// The finished run beat the best score; persist it
    NewHighScore { score: u32 },
    /// A new run started after a game over
    Restarted,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Validated constants for this session
    pub tuning: Tuning,
    /// Seed the obstacle RNG started from
    pub seed: u64,
    rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    pub avatar: Avatar,
    /// Live obstacles (creation order)
    pub obstacles: ObstacleSet,
    pub spawner: ObstacleSpawner,
    pub score: ScoreTracker,
    pub bounds: WorldBounds,
    /// Simulated ticks in the current run
    pub time_ticks: u64,
    /// Number of runs finished this session
    pub runs_finished: u32,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Build a session and start the first run
    ///
    /// `high_score` is whatever the persistence layer loaded; `now_ms` is the
    /// host clock reading the spawn timer starts from.
    pub fn new(tuning: Tuning, seed: u64, high_score: u32, now_ms: f64) -> Result<Self, TuningError> {
        tuning.validate()?;
        let params = ObstacleParams::from_tuning(&tuning)?;

        let mut state = Self {
            avatar: Avatar::new(&tuning),
            bounds: WorldBounds::from_tuning(&tuning),
            spawner: ObstacleSpawner::new(params, tuning.spawn_interval_ms, now_ms),
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            obstacles: ObstacleSet::new(),
            score: ScoreTracker::new(high_score),
            time_ticks: 0,
            runs_finished: 0,
            events: Vec::new(),
        };

        // Every run opens with one obstacle already on its way
        state.spawner.spawn_now(&mut state.rng, &mut state.obstacles);

        log::info!("Game started (seed {}, best {})", seed, high_score);
        Ok(state)
    }

    /// Run a trigger through the transition table and apply its action
    pub fn fire(&mut self, trigger: Trigger, now_ms: f64) -> Action {
        let (next, action) = transition(self.phase, trigger);
        self.phase = next;
        match action {
            Action::Flap => {
                self.avatar.flap();
                self.events.push(GameEvent::Flap);
            }
            Action::EndGame(cause) => self.end_game(cause),
            Action::Reset => self.reset(now_ms),
            Action::Ignore => {}
        }
        action
    }

    fn end_game(&mut self, cause: Collision) {
        self.runs_finished += 1;
        self.events.push(GameEvent::Hit { cause });
        log::info!(
            "Game over ({:?}) with score {} after {} ticks",
            cause,
            self.score.score(),
            self.time_ticks
        );
        if let Some(record) = self.score.record_game_end() {
            log::info!("New high score: {}", record);
            self.events.push(GameEvent::NewHighScore { score: record });
        }
    }

    /// Start a fresh run, keeping the best score and the RNG stream
    fn reset(&mut self, now_ms: f64) {
        self.avatar = Avatar::new(&self.tuning);
        self.obstacles.clear();
        self.score.reset();
        self.time_ticks = 0;
        self.spawner.reseed(now_ms);
        self.spawner.spawn_now(&mut self.rng, &mut self.obstacles);
        self.events.push(GameEvent::Restarted);
        log::info!("Run restarted");
    }

    /// One spawn-timer check against the state's own RNG
    pub(crate) fn maybe_spawn(&mut self, now_ms: f64) -> Option<u32> {
        self.spawner
            .maybe_spawn(now_ms, &mut self.rng, &mut self.obstacles)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take every event raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for the rendering collaborator
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            avatar: AvatarView {
                x: self.avatar.pos.x,
                y: self.avatar.pos.y,
                width: self.avatar.size.x,
                height: self.avatar.size.y,
            },
            obstacles: self
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    x: o.x,
                    width: o.width,
                    top_height: o.top_height,
                    bottom_y: o.bottom_y,
                })
                .collect(),
            score: self.score.score(),
            high_score: self.score.high_score(),
            game_over: self.is_game_over(),
            playfield_width: self.tuning.playfield_width,
            playfield_height: self.tuning.playfield_height,
            ground_top: self.bounds.ground_top(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_has_one_obstacle() {
        let state = GameState::new(Tuning::default(), 1, 0, 0.0).unwrap();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles.as_slice()[0].x, 1080.0);
        assert_eq!(state.score.score(), 0);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_invalid_tuning_is_rejected() {
        let tuning = Tuning {
            gap_size: 5000.0,
            ..Default::default()
        };
        assert!(GameState::new(tuning, 1, 0, 0.0).is_err());
    }

    #[test]
    fn test_activate_flaps_while_playing() {
        let mut state = GameState::new(Tuning::default(), 1, 0, 0.0).unwrap();
        assert_eq!(state.fire(Trigger::Activate, 10.0), Action::Flap);
        assert_eq!(state.avatar.velocity, -13.0);
        assert_eq!(state.drain_events(), vec![GameEvent::Flap]);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_collision_then_reset() {
        let mut state = GameState::new(Tuning::default(), 1, 5, 0.0).unwrap();
        state.avatar.pos.y = 900.0;
        state.obstacles.as_mut_slice()[0].x = -50.0;

        let action = state.fire(Trigger::Collided(Collision::Ceiling), 100.0);
        assert_eq!(action, Action::EndGame(Collision::Ceiling));
        assert!(state.is_game_over());
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Hit {
                cause: Collision::Ceiling
            }]
        );

        // A second collision while crashed changes nothing
        assert_eq!(state.fire(Trigger::Collided(Collision::Ground), 120.0), Action::Ignore);
        assert!(state.events.is_empty());
        assert_eq!(state.runs_finished, 1);

        assert_eq!(state.fire(Trigger::Activate, 5000.0), Action::Reset);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.avatar.pos.y, 400.0);
        assert_eq!(state.avatar.velocity, 0.0);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles.as_slice()[0].x, 1080.0);
        assert_eq!(state.spawner.last_spawn_ms, 5000.0);
        assert_eq!(state.score.high_score(), 5);
        assert_eq!(state.drain_events(), vec![GameEvent::Restarted]);
    }

    #[test]
    fn test_record_emits_new_high_score() {
        let mut state = GameState::new(Tuning::default(), 1, 0, 0.0).unwrap();
        state.obstacles.as_mut_slice()[0].x = 0.0;
        state.score.update(200.0, state.obstacles.as_mut_slice(), &mut state.events);
        state.fire(Trigger::Collided(Collision::Ground), 10.0);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::NewHighScore { score: 1 }));
        assert_eq!(state.score.high_score(), 1);
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let state = GameState::new(Tuning::default(), 9, 12, 0.0).unwrap();
        let snap = state.snapshot();
        assert_eq!(snap.avatar.x, 200.0);
        assert_eq!(snap.avatar.height, 60.0);
        assert_eq!(snap.obstacles.len(), 1);
        assert!((snap.obstacles[0].bottom_y - snap.obstacles[0].top_height - 300.0).abs() < 1e-3);
        assert_eq!(snap.high_score, 12);
        assert!(!snap.game_over);
        assert_eq!(snap.ground_top, 1820.0);
    }
}
