//! Read-only per-tick view for renderers

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AvatarView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObstacleView {
    pub id: u32,
    pub x: f32,
    pub width: f32,
    pub top_height: f32,
    pub bottom_y: f32,
}

/// Everything a renderer needs to draw one frame
///
/// Built by [`GameState::snapshot`](super::GameState::snapshot); nothing a
/// renderer does with it can feed back into the simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub avatar: AvatarView,
    pub obstacles: Vec<ObstacleView>,
    pub score: u32,
    pub high_score: u32,
    pub game_over: bool,
    pub playfield_width: f32,
    pub playfield_height: f32,
    /// Top edge of the ground strip
    pub ground_top: f32,
}
