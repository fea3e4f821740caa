//! Obstacle spawner
//!
//! Fixed-cadence accumulator: the first obstacle appears one full interval
//! after the spawner is enabled, never immediately. Disabling drops the
//! partial interval.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::difficulty::oscillation_profile;
use super::obstacle::{ObstacleTrack, Oscillation};
use crate::settings::{ObstacleTuning, SpawnerTuning};

/// Periodic obstacle source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleSpawner {
    tuning: SpawnerTuning,
    obstacle: ObstacleTuning,
    enabled: bool,
    accumulator: f32,
}

impl ObstacleSpawner {
    pub fn new(tuning: SpawnerTuning, obstacle: ObstacleTuning) -> Self {
        assert!(tuning.spawn_rate > 0.0, "spawn rate must be positive");
        assert!(tuning.vertical_gap > 0.0, "vertical gap must be positive");
        assert!(
            tuning.min_height <= tuning.max_height,
            "min height must not exceed max height"
        );
        Self {
            tuning,
            obstacle,
            enabled: false,
            accumulator: 0.0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Start (or restart) the cadence from zero
    pub fn enable(&mut self) {
        self.enabled = true;
        self.accumulator = 0.0;
    }

    /// Stop emitting; the partial interval is discarded
    pub fn disable(&mut self) {
        self.enabled = false;
        self.accumulator = 0.0;
    }

    /// Advance the cadence. Returns true when a spawn is due.
    pub fn update(&mut self, dt: f32) -> bool {
        if !self.enabled {
            return false;
        }
        self.accumulator += dt;
        if self.accumulator >= self.tuning.spawn_rate {
            self.accumulator -= self.tuning.spawn_rate;
            true
        } else {
            false
        }
    }

    /// Build the next obstacle for the current score
    pub fn spawn<R: Rng>(
        &self,
        id: u32,
        score: u32,
        left_edge: f32,
        rng: &mut R,
    ) -> ObstacleTrack {
        let offset = rng.random_range(self.tuning.min_height..=self.tuning.max_height);
        let center = self.tuning.origin + Vec2::new(0.0, offset);
        let track = ObstacleTrack::new(id, center, self.tuning.vertical_gap, &self.obstacle, left_edge);

        let profile = oscillation_profile(score);
        // Certain and impossible outcomes do not consume a draw
        let oscillates = if profile.probability >= 1.0 {
            true
        } else if profile.probability <= 0.0 {
            false
        } else {
            rng.random::<f32>() < profile.probability
        };

        if oscillates {
            track.with_oscillation(Oscillation {
                amplitude: self.obstacle.vertical_amplitude,
                speed: profile.speed,
            })
        } else {
            track
        }
    }
}
