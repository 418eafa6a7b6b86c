//! Timed obstacle spawning
//!
//! Spawning runs on wall-clock milliseconds rather than tick counts, so the
//! interval between obstacles does not depend on the frame rate.

use rand::Rng;

use super::obstacle::{ObstacleParams, ObstacleSet};

/// Decides when the next obstacle enters the playfield
#[derive(Debug, Clone)]
pub struct ObstacleSpawner {
    pub params: ObstacleParams,
    /// Minimum time between spawns (milliseconds)
    pub interval_ms: f64,
    /// Clock reading of the most recent spawn or reseed
    pub last_spawn_ms: f64,
}

impl ObstacleSpawner {
    pub fn new(params: ObstacleParams, interval_ms: f64, now_ms: f64) -> Self {
        Self {
            params,
            interval_ms,
            last_spawn_ms: now_ms,
        }
    }

    /// Restart the interval from `now_ms` without spawning
    pub fn reseed(&mut self, now_ms: f64) {
        self.last_spawn_ms = now_ms;
    }

    /// Spawn one obstacle immediately, leaving the timer alone
    pub fn spawn_now<R: Rng + ?Sized>(&self, rng: &mut R, obstacles: &mut ObstacleSet) -> u32 {
        obstacles.spawn(&self.params, rng)
    }

    /// Spawn one obstacle if strictly more than an interval has elapsed
    ///
    /// At most one obstacle per call, however many intervals were missed.
    /// Returns the new obstacle's id.
    pub fn maybe_spawn<R: Rng + ?Sized>(
        &mut self,
        now_ms: f64,
        rng: &mut R,
        obstacles: &mut ObstacleSet,
    ) -> Option<u32> {
        if now_ms - self.last_spawn_ms > self.interval_ms {
            self.last_spawn_ms = now_ms;
            Some(obstacles.spawn(&self.params, rng))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn spawner_at(now_ms: f64) -> ObstacleSpawner {
        let params = ObstacleParams::from_tuning(&Tuning::default()).unwrap();
        ObstacleSpawner::new(params, 1800.0, now_ms)
    }

    #[test]
    fn test_waits_for_strictly_more_than_interval() {
        let mut spawner = spawner_at(1000.0);
        let mut rng = Pcg32::seed_from_u64(3);
        let mut set = ObstacleSet::new();

        assert_eq!(spawner.maybe_spawn(2000.0, &mut rng, &mut set), None);
        assert_eq!(spawner.maybe_spawn(2800.0, &mut rng, &mut set), None);
        assert_eq!(spawner.maybe_spawn(2800.5, &mut rng, &mut set), Some(1));
        assert_eq!(spawner.last_spawn_ms, 2800.5);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_one_spawn_even_after_long_stall() {
        let mut spawner = spawner_at(0.0);
        let mut rng = Pcg32::seed_from_u64(3);
        let mut set = ObstacleSet::new();

        // Ten intervals elapsed, still one obstacle
        assert!(spawner.maybe_spawn(18_001.0, &mut rng, &mut set).is_some());
        assert_eq!(set.len(), 1);
        assert!(spawner.maybe_spawn(18_002.0, &mut rng, &mut set).is_none());
    }

    #[test]
    fn test_spawn_now_ignores_timer() {
        let mut spawner = spawner_at(500.0);
        let mut rng = Pcg32::seed_from_u64(3);
        let mut set = ObstacleSet::new();

        spawner.spawn_now(&mut rng, &mut set);
        assert_eq!(set.len(), 1);
        assert_eq!(spawner.last_spawn_ms, 500.0);

        spawner.reseed(4000.0);
        assert!(spawner.maybe_spawn(5000.0, &mut rng, &mut set).is_none());
        assert_eq!(set.as_slice()[0].x, 1080.0);
    }
}
