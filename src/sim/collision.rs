//! Collision detection for axis-aligned boxes
//!
//! Everything here is a pure function of the avatar box, the obstacles and
//! the world bounds. Checks short-circuit on the first hit: ground and
//! ceiling first, then obstacles in creation order.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::obstacle::Obstacle;
use crate::tuning::Tuning;

/// Axis-aligned rectangle (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Open-interval overlap on the x axis
    #[inline]
    pub fn overlaps_x(&self, left: f32, right: f32) -> bool {
        self.max.x > left && self.min.x < right
    }
}

/// What the avatar ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    /// Bottom edge sank into the ground strip
    Ground,
    /// Top edge left the top of the playfield
    Ceiling,
    /// Hit a barrier of the obstacle with this id
    Obstacle { id: u32 },
}

/// Vertical extent of the open sky
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub height: f32,
    pub ground_height: f32,
}

impl WorldBounds {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            height: tuning.playfield_height,
            ground_height: tuning.ground_height,
        }
    }

    #[inline]
    pub fn ground_top(&self) -> f32 {
        self.height - self.ground_height
    }
}

/// Check the avatar box against the ground and the ceiling
pub fn bounds_collision(avatar: &Rect, bounds: &WorldBounds) -> Option<Collision> {
    if avatar.max.y > bounds.ground_top() {
        Some(Collision::Ground)
    } else if avatar.min.y < 0.0 {
        Some(Collision::Ceiling)
    } else {
        None
    }
}

/// Overlapping an obstacle horizontally while outside its gap
pub fn obstacle_collision(avatar: &Rect, obstacle: &Obstacle) -> bool {
    avatar.overlaps_x(obstacle.x, obstacle.right())
        && (avatar.min.y < obstacle.top_height || avatar.max.y > obstacle.bottom_y)
}

/// Full per-tick check; first match wins
pub fn detect_collision(
    avatar: &Avatar,
    obstacles: &[Obstacle],
    bounds: &WorldBounds,
) -> Option<Collision> {
    let rect = avatar.rect();
    if let Some(hit) = bounds_collision(&rect, bounds) {
        return Some(hit);
    }
    obstacles
        .iter()
        .find(|o| obstacle_collision(&rect, o))
        .map(|o| Collision::Obstacle { id: o.id })
}

/// Boolean form of [`detect_collision`]
#[inline]
pub fn is_colliding(avatar: &Avatar, obstacles: &[Obstacle], bounds: &WorldBounds) -> bool {
    detect_collision(avatar, obstacles, bounds).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> WorldBounds {
        WorldBounds::from_tuning(&Tuning::default())
    }

    fn avatar_at(y: f32) -> Avatar {
        let mut avatar = Avatar::new(&Tuning::default());
        avatar.pos.y = y;
        avatar
    }

    /// Gap 500..800, spanning x 180..280 so it overlaps the avatar (200..260)
    fn overlapping_obstacle() -> Obstacle {
        Obstacle::new(7, 180.0, 100.0, 500.0, 300.0, 4.0)
    }

    #[test]
    fn test_inside_gap_is_safe() {
        let obstacles = [overlapping_obstacle()];
        for y in [500.0, 600.0, 740.0] {
            assert_eq!(detect_collision(&avatar_at(y), &obstacles, &bounds()), None, "y = {}", y);
        }
    }

    #[test]
    fn test_outside_gap_hits() {
        let obstacles = [overlapping_obstacle()];
        assert_eq!(
            detect_collision(&avatar_at(499.0), &obstacles, &bounds()),
            Some(Collision::Obstacle { id: 7 })
        );
        assert_eq!(
            detect_collision(&avatar_at(741.0), &obstacles, &bounds()),
            Some(Collision::Obstacle { id: 7 })
        );
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let avatar = avatar_at(100.0);
        // Obstacle right edge exactly at the avatar's left edge
        let behind = Obstacle::new(1, 100.0, 100.0, 500.0, 300.0, 4.0);
        // Obstacle left edge exactly at the avatar's right edge
        let ahead = Obstacle::new(2, 260.0, 100.0, 500.0, 300.0, 4.0);
        assert!(!is_colliding(&avatar, &[behind, ahead], &bounds()));
    }

    #[test]
    fn test_ground_and_ceiling() {
        let obstacles: [Obstacle; 0] = [];
        // Bottom edge at 1820 touches but does not exceed the ground top
        assert_eq!(detect_collision(&avatar_at(1760.0), &obstacles, &bounds()), None);
        assert_eq!(
            detect_collision(&avatar_at(1760.5), &obstacles, &bounds()),
            Some(Collision::Ground)
        );
        assert_eq!(detect_collision(&avatar_at(0.0), &obstacles, &bounds()), None);
        assert_eq!(
            detect_collision(&avatar_at(-0.5), &obstacles, &bounds()),
            Some(Collision::Ceiling)
        );
    }

    #[test]
    fn test_first_match_wins() {
        // Avatar in the ground and overlapping two obstacles
        let obstacles = [
            Obstacle::new(3, 150.0, 100.0, 100.0, 300.0, 4.0),
            Obstacle::new(4, 190.0, 100.0, 100.0, 300.0, 4.0),
        ];
        assert_eq!(
            detect_collision(&avatar_at(1800.0), &obstacles, &bounds()),
            Some(Collision::Ground)
        );
        assert_eq!(
            detect_collision(&avatar_at(1000.0), &obstacles, &bounds()),
            Some(Collision::Obstacle { id: 3 })
        );
    }

    #[test]
    fn test_rect_helpers() {
        let rect = Rect::from_pos_size(Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0));
        assert_eq!(rect.width(), 30.0);
        assert_eq!(rect.height(), 40.0);
        assert!(rect.overlaps_x(39.0, 50.0));
        assert!(!rect.overlaps_x(40.0, 50.0));
    }
}
