//! Score and best-score tracking

use super::obstacle::Obstacle;
use super::state::GameEvent;

/// Current run score plus the session's best
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreTracker {
    score: u32,
    high_score: u32,
}

impl ScoreTracker {
    /// Start a session with the best score loaded from storage
    pub fn new(high_score: u32) -> Self {
        Self {
            score: 0,
            high_score,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Award one point per newly passed obstacle
    ///
    /// Each obstacle's `scored` flag is set on its first award, so calling
    /// this again with the same obstacles never double counts. Returns the
    /// number of points awarded.
    pub fn update(
        &mut self,
        avatar_x: f32,
        obstacles: &mut [Obstacle],
        events: &mut Vec<GameEvent>,
    ) -> u32 {
        let mut awarded = 0;
        for obstacle in obstacles.iter_mut() {
            if !obstacle.scored && obstacle.has_been_passed(avatar_x) {
                obstacle.scored = true;
                self.score += 1;
                awarded += 1;
                events.push(GameEvent::Scored {
                    obstacle_id: obstacle.id,
                    score: self.score,
                });
            }
        }
        awarded
    }

    /// Fold the finished run into the best score
    ///
    /// Returns the new record when the run strictly beat the previous best;
    /// the caller persists it. The best score never decreases.
    pub fn record_game_end(&mut self) -> Option<u32> {
        if self.score > self.high_score {
            self.high_score = self.score;
            Some(self.high_score)
        } else {
            None
        }
    }

    /// Zero the run score, keeping the best
    pub fn reset(&mut self) {
        self.score = 0;
    }
}
