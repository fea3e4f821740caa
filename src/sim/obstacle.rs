//! Scrolling gap obstacles
//!
//! A track is a pair of barriers moving left together with a fixed gap
//! between them. Optionally the pair bobs up and down; the bob is an absolute
//! function of the session clock, recomputed every tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, ObstaclePart, Region, RegionId, RegionKind};
use crate::settings::ObstacleTuning;

/// Vertical oscillation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillation {
    pub amplitude: f32,
    /// Angular speed (radians per second of session time)
    pub speed: f32,
}

/// One obstacle instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleTrack {
    pub id: u32,
    /// Center of the gap
    pub pos: Vec2,
    /// Offset of the top barrier's inner edge from `pos.y` (`+gap/2`)
    top_offset: f32,
    /// Offset of the bottom barrier's inner edge from `pos.y` (`-gap/2`)
    bottom_offset: f32,
    /// Scroll speed toward the left
    pub speed: f32,
    /// Oscillation, if this track moves vertically
    pub oscillation: Option<Oscillation>,
    /// Gap center at spawn; oscillation baseline
    origin_y: f32,
    /// Retire once `pos.x` drops below this
    left_edge: f32,
    barrier_width: f32,
    barrier_length: f32,
    scoring_width: f32,
}

impl ObstacleTrack {
    /// Create a track centered at `center`
    ///
    /// `left_edge` is fixed for the track's whole life.
    pub fn new(id: u32, center: Vec2, gap: f32, tuning: &ObstacleTuning, left_edge: f32) -> Self {
        assert!(gap > 0.0, "obstacle gap must be positive, got {gap}");
        let half = gap / 2.0;
        Self {
            id,
            pos: center,
            top_offset: half,
            bottom_offset: -half,
            speed: tuning.speed,
            oscillation: None,
            origin_y: center.y,
            left_edge,
            barrier_width: tuning.barrier_width,
            barrier_length: tuning.barrier_length,
            scoring_width: tuning.scoring_width,
        }
    }

    /// Enable vertical oscillation
    pub fn with_oscillation(mut self, oscillation: Oscillation) -> Self {
        self.oscillation = Some(oscillation);
        self
    }

    pub fn moves_vertically(&self) -> bool {
        self.oscillation.is_some()
    }

    /// Distance between the barriers
    pub fn gap(&self) -> f32 {
        self.top_offset - self.bottom_offset
    }

    /// Inner edge of the top barrier
    pub fn top(&self) -> f32 {
        self.pos.y + self.top_offset
    }

    /// Inner edge of the bottom barrier
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.bottom_offset
    }

    pub fn origin_y(&self) -> f32 {
        self.origin_y
    }

    pub fn left_edge(&self) -> f32 {
        self.left_edge
    }

    /// Advance one step; `clock` is total session play time in seconds.
    ///
    /// Returns true once the track has scrolled past its left edge.
    pub fn tick(&mut self, dt: f32, clock: f32) -> bool {
        self.pos.x -= self.speed * dt;

        if let Some(osc) = self.oscillation {
            self.pos.y = self.origin_y + (clock * osc.speed).sin() * osc.amplitude;
        }

        self.is_off_screen()
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.x < self.left_edge
    }

    /// Collision regions: top barrier, bottom barrier, scoring strip
    pub fn regions(&self) -> [Region; 3] {
        let half_w = self.barrier_width / 2.0;
        let top = self.top();
        let bottom = self.bottom();
        let x = self.pos.x;

        let top_bounds = Aabb::new(
            Vec2::new(x - half_w, top),
            Vec2::new(x + half_w, top + self.barrier_length),
        );
        let bottom_bounds = Aabb::new(
            Vec2::new(x - half_w, bottom - self.barrier_length),
            Vec2::new(x + half_w, bottom),
        );
        let half_s = self.scoring_width / 2.0;
        let gap_bounds = Aabb::new(Vec2::new(x - half_s, bottom), Vec2::new(x + half_s, top));

        [
            Region {
                id: RegionId::Obstacle {
                    id: self.id,
                    part: ObstaclePart::Top,
                },
                kind: RegionKind::Obstacle,
                bounds: top_bounds,
            },
            Region {
                id: RegionId::Obstacle {
                    id: self.id,
                    part: ObstaclePart::Bottom,
                },
                kind: RegionKind::Obstacle,
                bounds: bottom_bounds,
            },
            Region {
                id: RegionId::Obstacle {
                    id: self.id,
                    part: ObstaclePart::Gap,
                },
                kind: RegionKind::Scoring,
                bounds: gap_bounds,
            },
        ]
    }
}
