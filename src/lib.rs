//! Maby Quest - a side-scrolling gap-flying arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, session state)
//! - `audio`: Maps game events to sound effect / music commands
//! - `platform`: Presentation capabilities (quit confirmation, info panels)
//! - `persistence`: High score storage
//! - `settings`: Data-driven tuning and preferences

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use highscores::HighScore;
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Player spawn point (world units)
    pub const PLAYER_SPAWN_X: f32 = -0.002;
    pub const PLAYER_SPAWN_Y: f32 = 0.008;

    /// Baseline player stats, restored on every run
    pub const BASE_STRENGTH: f32 = 3.0;
    pub const BASE_GRAVITY: f32 = -4.0;
    pub const BASE_TILT: f32 = 3.5;

    /// Sprite animation period (seconds per frame)
    pub const SPRITE_FRAME_PERIOD: f32 = 0.15;

    /// Distance past the viewport's left edge before an obstacle retires
    pub const RETIRE_MARGIN: f32 = 1.0;
}

/// Fixed-step frame accumulator
///
/// Collects real frame time and hands out whole `SIM_DT` steps, capped at
/// `MAX_SUBSTEPS` per frame.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { accumulator: 0.0 }
    }

    /// Add a frame's elapsed time and return how many fixed steps to run
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        // Long stalls (debugger, backgrounded tab) are clamped
        self.accumulator += frame_dt.clamp(0.0, 0.1);

        let mut steps = 0;
        while self.accumulator >= consts::SIM_DT && steps < consts::MAX_SUBSTEPS {
            self.accumulator -= consts::SIM_DT;
            steps += 1;
        }
        steps
    }
}
