//! Gated obstacles
//!
//! An obstacle is a top barrier and a bottom barrier with a passable gap
//! between them. Obstacles enter at the right edge, scroll left at a
//! constant speed and are pruned once fully past the left edge.

use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tuning::Tuning;

/// Obstacle generation failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ObstacleError {
    /// The top-height range `[low, high]` has no values
    #[error("no room for the gap: top height range {low}..={high} is empty")]
    EmptyGapRange { low: f32, high: f32 },

    #[error("gap size must be greater than zero, got {0}")]
    NonPositiveGap(f32),

    #[error("gap margins must be finite and non-negative (top {top}, bottom {bottom})")]
    BadMargin { top: f32, bottom: f32 },
}

/// A scrolling pair of barriers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge (pixels, decreases every tick)
    pub x: f32,
    pub width: f32,
    /// Bottom edge of the top barrier
    pub top_height: f32,
    /// Top edge of the bottom barrier (`top_height + gap`)
    pub bottom_y: f32,
    /// Leftward speed (pixels/tick)
    pub speed: f32,
    /// Set once the avatar has passed this obstacle; never cleared
    pub scored: bool,
}

impl Obstacle {
    pub fn new(id: u32, x: f32, width: f32, top_height: f32, gap: f32, speed: f32) -> Self {
        Self {
            id,
            x,
            width,
            top_height,
            bottom_y: top_height + gap,
            speed,
            scored: false,
        }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.x -= self.speed;
    }

    /// Right edge is left of the playfield
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.x + self.width < 0.0
    }

    /// The avatar's left edge is past this obstacle's right edge
    #[inline]
    pub fn has_been_passed(&self, avatar_x: f32) -> bool {
        avatar_x > self.x + self.width
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Validated obstacle generation parameters
///
/// Construction fails fast when the playfield cannot fit the gap inside its
/// margins; once built, generation cannot fail.
#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleParams {
    /// Where new obstacles enter (the playfield's right edge)
    pub spawn_x: f32,
    pub width: f32,
    pub gap: f32,
    pub speed: f32,
    top_min: f32,
    top_max: f32,
}

impl ObstacleParams {
    pub fn new(
        playfield_width: f32,
        playfield_height: f32,
        width: f32,
        gap: f32,
        min_top_margin: f32,
        min_bottom_margin: f32,
        speed: f32,
    ) -> Result<Self, ObstacleError> {
        if gap.is_nan() || gap <= 0.0 {
            return Err(ObstacleError::NonPositiveGap(gap));
        }
        let margins_ok = min_top_margin.is_finite()
            && min_bottom_margin.is_finite()
            && min_top_margin >= 0.0
            && min_bottom_margin >= 0.0;
        if !margins_ok {
            return Err(ObstacleError::BadMargin {
                top: min_top_margin,
                bottom: min_bottom_margin,
            });
        }

        let low = min_top_margin;
        let high = playfield_height - gap - min_bottom_margin;
        if high.is_nan() || low > high {
            return Err(ObstacleError::EmptyGapRange { low, high });
        }

        Ok(Self {
            spawn_x: playfield_width,
            width,
            gap,
            speed,
            top_min: low,
            top_max: high,
        })
    }

    pub fn from_tuning(tuning: &Tuning) -> Result<Self, ObstacleError> {
        Self::new(
            tuning.playfield_width,
            tuning.playfield_height,
            tuning.obstacle_width,
            tuning.gap_size,
            tuning.min_top_margin,
            tuning.min_bottom_margin,
            tuning.obstacle_speed,
        )
    }

    /// Allowed values for a new obstacle's top height
    pub fn top_range(&self) -> RangeInclusive<f32> {
        self.top_min..=self.top_max
    }

    /// Build an obstacle at the right edge with a uniformly drawn gap
    pub fn generate<R: Rng + ?Sized>(&self, id: u32, rng: &mut R) -> Obstacle {
        let top_height = rng.random_range(self.top_range());
        Obstacle::new(id, self.spawn_x, self.width, top_height, self.gap, self.speed)
    }
}

/// Live obstacles in creation order
#[derive(Debug, Clone)]
pub struct ObstacleSet {
    items: Vec<Obstacle>,
    next_id: u32,
}

impl Default for ObstacleSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ObstacleSet {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }

    /// Generate one obstacle and append it; returns its id
    pub fn spawn<R: Rng + ?Sized>(&mut self, params: &ObstacleParams, rng: &mut R) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        let obstacle = params.generate(id, rng);
        log::debug!(
            "Spawned obstacle {} (gap {:.1}..{:.1})",
            id,
            obstacle.top_height,
            obstacle.bottom_y
        );
        self.items.push(obstacle);
        id
    }

    pub fn advance_all(&mut self) {
        for obstacle in &mut self.items {
            obstacle.advance();
        }
    }

    /// Drop obstacles that scrolled off the left edge; returns how many
    pub fn prune_offscreen(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|o| !o.is_offscreen());
        let pruned = before - self.items.len();
        if pruned > 0 {
            log::debug!("Pruned {} offscreen obstacle(s)", pruned);
        }
        pruned
    }

    /// Remove every obstacle; ids keep counting up
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Obstacle> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.items
    }

    pub fn as_mut_slice(&mut self) -> &mut [Obstacle] {
        &mut self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a ObstacleSet {
    type Item = &'a Obstacle;
    type IntoIter = std::slice::Iter<'a, Obstacle>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn default_params() -> ObstacleParams {
        ObstacleParams::from_tuning(&Tuning::default()).unwrap()
    }

    #[test]
    fn test_offscreen_after_full_crossing() {
        let width = 1080.0;
        let mut obstacle = Obstacle::new(1, width, 100.0, 500.0, 300.0, 4.0);

        // x + width reaches exactly 0 at (1080 + 100) / 4 = 295 ticks, which
        // is still on screen; the next tick crosses
        let first_offscreen = ((width + obstacle.width) / obstacle.speed).floor() as u32 + 1;
        for tick in 1..first_offscreen {
            obstacle.advance();
            assert!(!obstacle.is_offscreen(), "offscreen early at tick {}", tick);
        }
        obstacle.advance();
        assert!(obstacle.is_offscreen());
        assert_eq!(first_offscreen, 296);
    }

    #[test]
    fn test_has_been_passed_is_strict() {
        let obstacle = Obstacle::new(1, 100.0, 100.0, 500.0, 300.0, 4.0);
        assert!(!obstacle.has_been_passed(200.0));
        assert!(obstacle.has_been_passed(200.5));
        assert!(!obstacle.has_been_passed(150.0));
    }

    #[test]
    fn test_default_top_range() {
        let params = default_params();
        assert_eq!(params.top_range(), 100.0..=1520.0);
        assert_eq!(params.spawn_x, 1080.0);
    }

    #[test]
    fn test_empty_range_fails_fast() {
        let err = ObstacleParams::new(1080.0, 500.0, 100.0, 300.0, 150.0, 100.0, 4.0).unwrap_err();
        assert_eq!(
            err,
            ObstacleError::EmptyGapRange {
                low: 150.0,
                high: 100.0
            }
        );
    }

    #[test]
    fn test_single_value_range_is_allowed() {
        let params = ObstacleParams::new(1080.0, 500.0, 100.0, 300.0, 100.0, 100.0, 4.0).unwrap();
        let mut rng = Pcg32::seed_from_u64(7);
        let obstacle = params.generate(1, &mut rng);
        assert_eq!(obstacle.top_height, 100.0);
        assert_eq!(obstacle.bottom_y, 400.0);
    }

    #[test]
    fn test_rejects_bad_gap_and_margins() {
        assert!(matches!(
            ObstacleParams::new(1080.0, 1920.0, 100.0, 0.0, 100.0, 100.0, 4.0),
            Err(ObstacleError::NonPositiveGap(_))
        ));
        assert!(matches!(
            ObstacleParams::new(1080.0, 1920.0, 100.0, 300.0, -1.0, 100.0, 4.0),
            Err(ObstacleError::BadMargin { .. })
        ));
    }

    #[test]
    fn test_set_keeps_creation_order_and_prunes() {
        let params = default_params();
        let mut rng = Pcg32::seed_from_u64(42);
        let mut set = ObstacleSet::new();
        let a = set.spawn(&params, &mut rng);
        let b = set.spawn(&params, &mut rng);
        assert_eq!((a, b), (1, 2));

        set.as_mut_slice()[0].x = -150.0;
        set.advance_all();
        assert_eq!(set.prune_offscreen(), 1);
        let ids: Vec<u32> = set.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2]);
        assert_eq!(set.as_slice()[0].x, 1076.0);
    }

    #[test]
    fn test_ids_survive_clear() {
        let params = default_params();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut set = ObstacleSet::new();
        set.spawn(&params, &mut rng);
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.spawn(&params, &mut rng), 2);
    }

    proptest! {
        #[test]
        fn prop_gap_inside_playfield(
            seed in any::<u64>(),
            height in 600.0f32..3000.0,
            gap in 50.0f32..400.0,
            top_margin in 1.0f32..100.0,
            bottom_margin in 1.0f32..100.0,
        ) {
            let params = ObstacleParams::new(1080.0, height, 100.0, gap, top_margin, bottom_margin, 4.0)
                .unwrap();
            let mut rng = Pcg32::seed_from_u64(seed);
            for id in 0..16 {
                let obstacle = params.generate(id, &mut rng);
                prop_assert!(obstacle.top_height > 0.0);
                prop_assert!(obstacle.top_height >= top_margin);
                prop_assert_eq!(obstacle.bottom_y, obstacle.top_height + gap);
                prop_assert!(obstacle.bottom_y < height);
                prop_assert!(obstacle.bottom_y <= height - bottom_margin + 1e-3);
            }
        }
    }
}
