//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. Units:
//! - distances and sizes: pixels (playfield space, y grows downward)
//! - speeds and velocities: pixels/tick
//! - accelerations: pixels/tick²
//! - durations: milliseconds of wall-clock time
//!
//! Tunings are loaded from JSON with per-field defaults and validated before
//! a game is built, so a degenerate configuration fails at startup instead of
//! in the middle of a tick.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::obstacle::{ObstacleError, ObstacleParams};

/// Reasons a tuning is rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("lift must point upward (negative), got {0}")]
    LiftNotUpward(f32),

    #[error("avatar spawn area ({top}..{bottom}) is outside the open sky (0..{ground_top})")]
    AvatarOutsidePlayfield { top: f32, bottom: f32, ground_top: f32 },

    #[error("avatar x {x} is outside the playfield width {width}")]
    AvatarOffscreen { x: f32, width: f32 },

    #[error(transparent)]
    Obstacle(#[from] ObstacleError),

    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
}

/// Gameplay constants for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Playfield width (pixels)
    pub playfield_width: f32,
    /// Playfield height (pixels)
    pub playfield_height: f32,
    /// Ground strip height at the bottom of the playfield (pixels)
    pub ground_height: f32,

    /// Fixed horizontal position of the avatar's left edge (pixels)
    pub avatar_x: f32,
    /// Avatar top edge at (re)start (pixels)
    pub avatar_start_y: f32,
    pub avatar_width: f32,
    pub avatar_height: f32,
    /// Downward acceleration (pixels/tick²)
    pub gravity: f32,
    /// Velocity set by a flap (pixels/tick, negative is up)
    pub lift: f32,

    pub obstacle_width: f32,
    /// Vertical opening between the top and bottom barriers (pixels)
    pub gap_size: f32,
    /// Smallest allowed top-barrier height (pixels)
    pub min_top_margin: f32,
    /// Smallest allowed distance from the gap's bottom edge to the playfield bottom (pixels)
    pub min_bottom_margin: f32,
    /// Leftward obstacle speed (pixels/tick)
    pub obstacle_speed: f32,
    /// Wall-clock time between spawns (milliseconds)
    pub spawn_interval_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            ground_height: GROUND_HEIGHT,

            avatar_x: AVATAR_X,
            avatar_start_y: AVATAR_START_Y,
            avatar_width: AVATAR_WIDTH,
            avatar_height: AVATAR_HEIGHT,
            gravity: GRAVITY,
            lift: LIFT,

            obstacle_width: OBSTACLE_WIDTH,
            gap_size: OBSTACLE_GAP,
            min_top_margin: OBSTACLE_MIN_TOP_MARGIN,
            min_bottom_margin: OBSTACLE_MIN_BOTTOM_MARGIN,
            obstacle_speed: OBSTACLE_SPEED,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
        }
    }
}

fn finite(field: &'static str, value: f64) -> Result<f64, TuningError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TuningError::NotFinite { field })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), TuningError> {
    if finite(field, value)? > 0.0 {
        Ok(())
    } else {
        Err(TuningError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), TuningError> {
    if finite(field, value)? >= 0.0 {
        Ok(())
    } else {
        Err(TuningError::Negative { field, value })
    }
}

impl Tuning {
    /// Parse a tuning from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Top edge of the ground strip (pixels)
    #[inline]
    pub fn ground_top(&self) -> f32 {
        self.playfield_height - self.ground_height
    }

    /// Check every field, then the derived geometry
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("playfield_width", self.playfield_width as f64)?;
        positive("playfield_height", self.playfield_height as f64)?;
        non_negative("ground_height", self.ground_height as f64)?;

        finite("avatar_x", self.avatar_x as f64)?;
        finite("avatar_start_y", self.avatar_start_y as f64)?;
        positive("avatar_width", self.avatar_width as f64)?;
        positive("avatar_height", self.avatar_height as f64)?;
        positive("gravity", self.gravity as f64)?;
        if finite("lift", self.lift as f64)? >= 0.0 {
            return Err(TuningError::LiftNotUpward(self.lift));
        }

        positive("obstacle_width", self.obstacle_width as f64)?;
        positive("obstacle_speed", self.obstacle_speed as f64)?;
        positive("spawn_interval_ms", self.spawn_interval_ms)?;

        if self.avatar_x < 0.0 || self.avatar_x + self.avatar_width > self.playfield_width {
            return Err(TuningError::AvatarOffscreen {
                x: self.avatar_x,
                width: self.playfield_width,
            });
        }

        let top = self.avatar_start_y;
        let bottom = self.avatar_start_y + self.avatar_height;
        if top < 0.0 || bottom > self.ground_top() {
            return Err(TuningError::AvatarOutsidePlayfield {
                top,
                bottom,
                ground_top: self.ground_top(),
            });
        }

        // Gap size and margins are checked by the obstacle generator itself
        ObstacleParams::from_tuning(self)?;
        Ok(())
    }
}
