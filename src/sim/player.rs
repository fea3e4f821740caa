//! Player kinematics
//!
//! Semi-implicit Euler under a constant (score-dependent) gravity. Vertical
//! speed is deliberately unbounded: falling faster and faster is what ends
//! most runs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::settings::PhysicsTuning;

/// Jump strength, gravity and tilt applied together
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub strength: f32,
    pub gravity: f32,
    pub tilt: f32,
}

impl PlayerStats {
    pub const fn new(strength: f32, gravity: f32, tilt: f32) -> Self {
        Self {
            strength,
            gravity,
            tilt,
        }
    }
}

/// The player body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsBody {
    pub pos: Vec2,
    /// Vertical velocity (positive is up)
    pub vel_y: f32,
    stats: PlayerStats,
    horizontal_speed: f32,
    half_extents: Vec2,
    sprite_frames: usize,
    frame_period: f32,
    sprite_frame: usize,
    frame_timer: f32,
}

impl PhysicsBody {
    pub fn new(tuning: &PhysicsTuning) -> Self {
        assert!(tuning.frame_period > 0.0, "frame period must be positive");
        Self {
            pos: tuning.spawn,
            vel_y: 0.0,
            stats: Self::baseline(tuning),
            horizontal_speed: tuning.horizontal_speed,
            half_extents: tuning.half_extents,
            sprite_frames: tuning.sprite_frames.max(1),
            frame_period: tuning.frame_period,
            sprite_frame: 0,
            frame_timer: 0.0,
        }
    }

    /// Stats a run starts with
    pub fn baseline(tuning: &PhysicsTuning) -> PlayerStats {
        PlayerStats::new(tuning.strength, tuning.gravity, tuning.tilt)
    }

    /// Back to the spawn point, at rest, with baseline stats
    pub fn reset(&mut self, tuning: &PhysicsTuning) {
        self.pos = tuning.spawn;
        self.vel_y = 0.0;
        self.stats = Self::baseline(tuning);
    }

    /// Set upward velocity to `strength`; repeated calls just reset it
    pub fn jump(&mut self) {
        self.vel_y = self.stats.strength;
    }

    /// Replace all three stats; used from the next tick on
    pub fn update_stats(&mut self, strength: f32, gravity: f32, tilt: f32) {
        self.stats = PlayerStats::new(strength, gravity, tilt);
    }

    pub fn stats(&self) -> PlayerStats {
        self.stats
    }

    /// Integrate one step
    pub fn tick(&mut self, dt: f32) {
        self.vel_y += self.stats.gravity * dt;
        self.pos += Vec2::new(self.horizontal_speed * dt, self.vel_y * dt);

        self.frame_timer += dt;
        while self.frame_timer >= self.frame_period {
            self.frame_timer -= self.frame_period;
            self.sprite_frame = (self.sprite_frame + 1) % self.sprite_frames;
        }
    }

    /// Visual rotation in degrees (nose up while rising)
    pub fn rotation_degrees(&self) -> f32 {
        self.vel_y * self.stats.tilt
    }

    /// Current flap animation frame
    pub fn sprite_frame(&self) -> usize {
        self.sprite_frame
    }

    /// Collision box around the body
    pub fn collider(&self) -> Aabb {
        Aabb::from_center(self.pos, self.half_extents)
    }
}
