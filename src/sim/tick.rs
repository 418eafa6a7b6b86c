//! Per-frame simulation tick
//!
//! Core game loop that advances the simulation by one step. Motion is per
//! tick; spawning reads the wall-clock time the host passes in.

use super::autopilot;
use super::collision::detect_collision;
use super::machine::Trigger;
use super::state::{GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Debounced activate press (flap while playing, restart after a crash)
    pub activate: bool,
    /// Idle/demo mode - the autopilot flaps
    pub autopilot: bool,
}

/// Advance the game state by one tick
///
/// Order while playing: input, avatar, obstacles, prune, spawn, collision,
/// score. A game-over state only reacts to input.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) {
    let activate = input.activate || (input.autopilot && autopilot::wants_flap(state));
    if activate {
        state.fire(Trigger::Activate, now_ms);
    }

    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;

    state.avatar.advance();
    state.obstacles.advance_all();
    state.obstacles.prune_offscreen();
    state.maybe_spawn(now_ms);

    if let Some(cause) = detect_collision(&state.avatar, state.obstacles.as_slice(), &state.bounds) {
        // The best score is settled here; a gate passed on this same tick
        // still counts for the finished run
        state.fire(Trigger::Collided(cause), now_ms);
    }

    let avatar_x = state.avatar.x();
    state
        .score
        .update(avatar_x, state.obstacles.as_mut_slice(), &mut state.events);
}
