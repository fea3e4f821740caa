//! Shared simulation types: lifecycle phase and outgoing events

use serde::{Deserialize, Serialize};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first run; simulation frozen, "get ready" shown
    #[default]
    Ready,
    /// Active gameplay
    Playing,
    /// Run suspended (app backgrounded, quit dialog open)
    Paused,
    /// Run ended; score finalized
    GameOver,
}

impl GamePhase {
    /// Whether physics, obstacles and the spawner advance this tick
    pub fn is_simulating(self) -> bool {
        self == GamePhase::Playing
    }
}

/// Discrete events for presentation layers (audio, HUD, effects)
///
/// The core never waits on whoever consumes these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A run began
    Started,
    /// Player passed a gap
    Scored { score: u32 },
    /// First record-breaking score of this run
    NewHighScore { score: u32 },
    /// A difficulty band was entered (8, 20 or 30)
    ThresholdCrossed { level: u32 },
    /// Run ended
    GameOver { score: u32, high_score: u32 },
    /// Simulation frozen mid-run
    Paused,
    /// Simulation unfrozen
    Resumed,
    /// A new obstacle entered the track
    ObstacleSpawned { id: u32 },
    /// An obstacle scrolled off screen and was removed
    ObstacleRetired { id: u32 },
}

/// Monotonic entity id source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityIds {
    next_id: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next_id: 1 }
    }
}

impl EntityIds {
    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
