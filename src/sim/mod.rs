//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only from the host-supplied clock reading
//! - Seeded RNG only
//! - Stable iteration order (obstacle creation order)
//! - No rendering, audio or storage calls; side effects leave as `GameEvent`s

pub mod autopilot;
pub mod avatar;
pub mod collision;
pub mod machine;
pub mod obstacle;
pub mod score;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use avatar::Avatar;
pub use collision::{Collision, Rect, WorldBounds, detect_collision, is_colliding};
pub use machine::{Action, Trigger, transition};
pub use obstacle::{Obstacle, ObstacleError, ObstacleParams, ObstacleSet};
pub use score::ScoreTracker;
pub use snapshot::{AvatarView, ObstacleView, RenderSnapshot};
pub use spawner::ObstacleSpawner;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
