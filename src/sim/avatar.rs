//! The player-controlled avatar
//!
//! Motion is integrated once per tick with no clamping: leaving the open sky
//! is reported by collision detection, never corrected here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::tuning::Tuning;

/// The falling/flapping avatar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    /// Top-left corner (x never changes after spawn)
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
    /// Vertical velocity (pixels/tick, positive is down)
    pub velocity: f32,
    /// Added to velocity every tick (pixels/tick²)
    pub gravity: f32,
    /// Velocity set by a flap (pixels/tick)
    pub lift: f32,
}

impl Avatar {
    /// Spawn at the tuning's start position, at rest
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.avatar_x, tuning.avatar_start_y),
            size: Vec2::new(tuning.avatar_width, tuning.avatar_height),
            velocity: 0.0,
            gravity: tuning.gravity,
            lift: tuning.lift,
        }
    }

    /// Overwrite velocity with the lift impulse
    #[inline]
    pub fn flap(&mut self) {
        self.velocity = self.lift;
    }

    /// Apply gravity, then move by the new velocity
    #[inline]
    pub fn advance(&mut self) {
        self.velocity += self.gravity;
        self.pos.y += self.velocity;
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pos.y
    }

    /// Bounding box for collision checks
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn avatar_at(y: f32, gravity: f32) -> Avatar {
        let tuning = Tuning {
            gravity,
            ..Default::default()
        };
        let mut avatar = Avatar::new(&tuning);
        avatar.pos.y = y;
        avatar
    }

    #[test]
    fn test_spawns_at_rest() {
        let avatar = Avatar::new(&Tuning::default());
        assert_eq!(avatar.pos, Vec2::new(200.0, 400.0));
        assert_eq!(avatar.size, Vec2::new(60.0, 60.0));
        assert_eq!(avatar.velocity, 0.0);
    }

    #[test]
    fn test_ten_ticks_free_fall() {
        let mut avatar = avatar_at(0.0, 0.45);
        for _ in 0..10 {
            avatar.advance();
        }
        // Velocities 0.45, 0.90 .. 4.50 sum to 0.45 * 55
        assert!((avatar.y() - 24.75).abs() < 1e-4, "y = {}", avatar.y());
        assert!((avatar.velocity - 4.5).abs() < 1e-5);
        assert_eq!(avatar.x(), 200.0);
    }

    #[test]
    fn test_flap_overwrites_velocity() {
        let mut avatar = avatar_at(500.0, 0.45);
        for _ in 0..20 {
            avatar.advance();
        }
        assert!(avatar.velocity > 0.0);

        avatar.flap();
        assert_eq!(avatar.velocity, avatar.lift);

        // A second flap does not stack
        avatar.flap();
        assert_eq!(avatar.velocity, -13.0);

        avatar.advance();
        assert!((avatar.velocity - (-13.0 + 0.45)).abs() < 1e-6);
    }

    #[test]
    fn test_no_clamping() {
        let mut avatar = avatar_at(5.0, 0.45);
        avatar.flap();
        avatar.advance();
        assert!(avatar.y() < 0.0);
    }

    proptest! {
        #[test]
        fn prop_motion_law(
            y in -1000.0f32..3000.0,
            velocity in -50.0f32..50.0,
            gravity in 0.01f32..2.0,
        ) {
            let mut avatar = avatar_at(y, gravity);
            avatar.velocity = velocity;
            let expected_velocity = velocity + gravity;
            let expected_y = y + expected_velocity;

            avatar.advance();
            prop_assert_eq!(avatar.velocity, expected_velocity);
            prop_assert_eq!(avatar.y(), expected_y);
            prop_assert_eq!(avatar.x(), 200.0);
        }
    }
}
