//! Contact detection and resolution
//!
//! Everything the player can touch is an axis-aligned box tagged with a
//! `RegionKind`. The tracker turns per-tick overlaps into contact-begin events
//! (one per actual contact); the resolver maps each tag to what the session
//! must do about it.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacle::ObstacleTrack;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Strict overlap (touching edges do not count)
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Collision category of a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionKind {
    /// Ends the run
    Obstacle,
    /// Awards a point
    Scoring,
    /// Decorative, ignored
    None,
}

/// Which part of an obstacle a region belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstaclePart {
    Top,
    Bottom,
    Gap,
}

/// Identity of a touchable region, stable across ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionId {
    Obstacle { id: u32, part: ObstaclePart },
    Floor,
    Ceiling,
}

/// A tagged box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub kind: RegionKind,
    pub bounds: Aabb,
}

/// Contact-begin event between the player and a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub region: RegionId,
    pub kind: RegionKind,
}

/// What the session must do for a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    IncreaseScore,
    GameOver,
}

/// Map a region tag to its gameplay effect
pub fn resolve(kind: RegionKind) -> Option<ContactOutcome> {
    match kind {
        RegionKind::Obstacle => Some(ContactOutcome::GameOver),
        RegionKind::Scoring => Some(ContactOutcome::IncreaseScore),
        RegionKind::None => None,
    }
}

/// Horizontal extent used for world bound regions
const BOUND_HALF_WIDTH: f32 = 1.0e6;
/// Thickness of world bound regions
const BOUND_DEPTH: f32 = 1.0e3;

/// Floor and ceiling as Obstacle regions
pub fn world_bounds(floor_y: Option<f32>, ceiling_y: Option<f32>) -> Vec<Region> {
    let mut regions = Vec::with_capacity(2);
    if let Some(y) = floor_y {
        regions.push(Region {
            id: RegionId::Floor,
            kind: RegionKind::Obstacle,
            bounds: Aabb::new(
                Vec2::new(-BOUND_HALF_WIDTH, y - BOUND_DEPTH),
                Vec2::new(BOUND_HALF_WIDTH, y),
            ),
        });
    }
    if let Some(y) = ceiling_y {
        regions.push(Region {
            id: RegionId::Ceiling,
            kind: RegionKind::Obstacle,
            bounds: Aabb::new(
                Vec2::new(-BOUND_HALF_WIDTH, y),
                Vec2::new(BOUND_HALF_WIDTH, y + BOUND_DEPTH),
            ),
        });
    }
    regions
}

/// Remembers which regions the player overlapped last tick
#[derive(Debug, Clone, Default)]
pub struct ContactTracker {
    touching: HashSet<RegionId>,
}

impl ContactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all contacts (new run)
    pub fn clear(&mut self) {
        self.touching.clear();
    }

    /// Overlap the player against every region and return newly begun contacts
    ///
    /// Order: obstacles as given (top, bottom, gap each), then `bounds`.
    pub fn begin_contacts(
        &mut self,
        player: &Aabb,
        obstacles: &[ObstacleTrack],
        bounds: &[Region],
    ) -> Vec<Contact> {
        let mut current = HashSet::with_capacity(self.touching.len() + 1);
        let mut begun = Vec::new();

        let regions = obstacles
            .iter()
            .flat_map(|o| o.regions())
            .chain(bounds.iter().copied());

        for region in regions {
            if !region.bounds.overlaps(player) {
                continue;
            }
            current.insert(region.id);
            if !self.touching.contains(&region.id) {
                begun.push(Contact {
                    region: region.id,
                    kind: region.kind,
                });
            }
        }

        self.touching = current;
        begun
    }
}
