//! Game phase transition table
//!
//! The single "activate" input means flap while playing and restart after a
//! crash. Routing it through this table keeps that overload in one place and
//! lets tests drive transitions without any input device.

use serde::{Deserialize, Serialize};

use super::collision::Collision;
use super::state::GamePhase;

/// Something that can move the game between phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trigger {
    /// Pointer press, touch start or key
    Activate,
    /// Collision detection reported a hit
    Collided(Collision),
}

/// Side effect attached to a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Flap,
    EndGame(Collision),
    Reset,
    Ignore,
}

/// Look up the next phase and the action to run
pub const fn transition(phase: GamePhase, trigger: Trigger) -> (GamePhase, Action) {
    match (phase, trigger) {
        (GamePhase::Playing, Trigger::Activate) => (GamePhase::Playing, Action::Flap),
        (GamePhase::Playing, Trigger::Collided(cause)) => (GamePhase::GameOver, Action::EndGame(cause)),
        (GamePhase::GameOver, Trigger::Activate) => (GamePhase::Playing, Action::Reset),
        (GamePhase::GameOver, Trigger::Collided(_)) => (GamePhase::GameOver, Action::Ignore),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table() {
        assert_eq!(
            transition(GamePhase::Playing, Trigger::Activate),
            (GamePhase::Playing, Action::Flap)
        );
        assert_eq!(
            transition(GamePhase::Playing, Trigger::Collided(Collision::Ground)),
            (GamePhase::GameOver, Action::EndGame(Collision::Ground))
        );
        assert_eq!(
            transition(GamePhase::GameOver, Trigger::Activate),
            (GamePhase::Playing, Action::Reset)
        );
        assert_eq!(
            transition(GamePhase::GameOver, Trigger::Collided(Collision::Ceiling)),
            (GamePhase::GameOver, Action::Ignore)
        );
    }
}
