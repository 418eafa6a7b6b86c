//! Gapwing - a gravity-driven gate runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, obstacles, collisions, scoring, game state)
//! - `renderer`: WebGPU rendering of simulation snapshots
//! - `platform`: Browser/native platform abstraction (clock, input, storage)
//! - `highscores`: Best-score persistence contract
//! - `tuning`: Data-driven game balance
//! - `audio`: Cue playback for simulation events
//! - `session`: Event dispatch and the headless round runner

pub mod audio;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::{HighScoreStore, MemoryHighScores, parse_high_score};
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
///
/// Gameplay values here are only the defaults behind [`Tuning::default`];
/// the simulation always reads them through a `Tuning`.
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const PLAYFIELD_WIDTH: f32 = 1080.0;
    pub const PLAYFIELD_HEIGHT: f32 = 1920.0;
    /// Height of the ground strip at the bottom of the playfield (pixels)
    pub const GROUND_HEIGHT: f32 = 100.0;

    /// Avatar defaults (pixels)
    pub const AVATAR_X: f32 = 200.0;
    pub const AVATAR_START_Y: f32 = 400.0;
    pub const AVATAR_WIDTH: f32 = 60.0;
    pub const AVATAR_HEIGHT: f32 = 60.0;

    /// Downward acceleration (pixels/tick²)
    pub const GRAVITY: f32 = 0.45;
    /// Velocity a flap sets (pixels/tick, negative is up)
    pub const LIFT: f32 = -13.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 100.0;
    pub const OBSTACLE_GAP: f32 = 300.0;
    /// Leftward scroll speed (pixels/tick)
    pub const OBSTACLE_SPEED: f32 = 4.0;
    pub const OBSTACLE_MIN_TOP_MARGIN: f32 = 100.0;
    pub const OBSTACLE_MIN_BOTTOM_MARGIN: f32 = 100.0;

    /// Time between obstacle spawns (milliseconds)
    pub const SPAWN_INTERVAL_MS: f64 = 1800.0;

    /// Presses closer together than this count as one (milliseconds)
    pub const INPUT_DEBOUNCE_MS: f64 = 60.0;

    /// Frame step used by the headless runner (60 Hz, milliseconds)
    pub const HEADLESS_FRAME_MS: f64 = 1000.0 / 60.0;
}
