//! Demo-mode pilot
//!
//! Steers for the next gap the avatar has not yet cleared: flap whenever the
//! avatar is falling and its bottom edge would sink past the gap's bottom
//! edge (less a small margin) on the next tick.

use super::obstacle::Obstacle;
use super::state::{GamePhase, GameState};

/// Fraction of the avatar height kept clear above the gap's bottom edge
const AIM_MARGIN_FRACTION: f32 = 1.0 / 3.0;

/// Where to hold the avatar when no obstacle is ahead, as a fraction of the open sky
const IDLE_HEIGHT_FRACTION: f32 = 0.6;

/// First obstacle whose right edge the avatar has not passed yet
pub fn next_gap(state: &GameState) -> Option<&Obstacle> {
    let x = state.avatar.x();
    state.obstacles.iter().find(|o| o.right() >= x)
}

/// Whether the pilot would flap this tick
pub fn wants_flap(state: &GameState) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }

    let avatar = &state.avatar;
    if avatar.velocity < 0.0 {
        return false;
    }

    let floor = match next_gap(state) {
        Some(obstacle) => obstacle.bottom_y - avatar.size.y * AIM_MARGIN_FRACTION,
        None => state.bounds.ground_top() * IDLE_HEIGHT_FRACTION,
    };
    let next_bottom = avatar.y() + avatar.size.y + avatar.velocity + avatar.gravity;
    next_bottom > floor
}
