//! Game tuning and preferences
//!
//! Persisted as JSON next to the high score file. Every section falls back to
//! its defaults, so a partial file only overrides what it names.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or saving settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Player body tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Where the player is placed on every run
    pub spawn: Vec2,
    /// Constant forward drift (world units/sec)
    pub horizontal_speed: f32,
    /// Baseline jump impulse
    pub strength: f32,
    /// Baseline gravity (negative pulls down)
    pub gravity: f32,
    /// Degrees of rotation per unit of vertical velocity
    pub tilt: f32,
    /// Collider half-size
    pub half_extents: Vec2,
    /// Number of frames in the flap animation
    pub sprite_frames: usize,
    /// Seconds per animation frame
    pub frame_period: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            spawn: Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
            horizontal_speed: 0.1,
            strength: BASE_STRENGTH,
            gravity: BASE_GRAVITY,
            tilt: BASE_TILT,
            half_extents: Vec2::new(0.35, 0.25),
            sprite_frames: 3,
            frame_period: SPRITE_FRAME_PERIOD,
        }
    }
}

/// Obstacle geometry and motion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleTuning {
    /// Scroll speed toward the player (world units/sec)
    pub speed: f32,
    /// Peak vertical displacement when oscillating
    pub vertical_amplitude: f32,
    /// Barrier width along x
    pub barrier_width: f32,
    /// Barrier length extending away from the gap
    pub barrier_length: f32,
    /// Width of the scoring strip inside the gap
    pub scoring_width: f32,
}

impl Default for ObstacleTuning {
    fn default() -> Self {
        Self {
            speed: 5.0,
            vertical_amplitude: 0.5,
            barrier_width: 1.0,
            barrier_length: 10.0,
            scoring_width: 0.25,
        }
    }
}

/// Spawner cadence and placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerTuning {
    /// Seconds between spawns
    pub spawn_rate: f32,
    /// Lowest random vertical offset
    pub min_height: f32,
    /// Highest random vertical offset
    pub max_height: f32,
    /// Distance between the barriers
    pub vertical_gap: f32,
    /// Spawn point; the random offset is added to `origin.y`
    pub origin: Vec2,
}

impl Default for SpawnerTuning {
    fn default() -> Self {
        Self {
            spawn_rate: 1.0,
            min_height: -1.0,
            max_height: 2.0,
            vertical_gap: 3.0,
            origin: Vec2::new(8.0, 0.0),
        }
    }
}

/// World bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldTuning {
    /// Left visibility edge of the viewport in world units
    pub viewport_left: f32,
    /// Extra distance past the left edge before obstacles retire
    pub retire_margin: f32,
    /// Ground height; touching it ends the run
    pub floor_y: Option<f32>,
    /// Ceiling height; touching it ends the run
    pub ceiling_y: Option<f32>,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            viewport_left: -9.0,
            retire_margin: RETIRE_MARGIN,
            floor_y: Some(-4.5),
            ceiling_y: None,
        }
    }
}

/// Audio preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

/// All game settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub physics: PhysicsTuning,
    pub obstacles: ObstacleTuning,
    pub spawner: SpawnerTuning,
    pub world: WorldTuning,
    pub audio: AudioSettings,
}

impl Settings {
    /// File name used inside the data directory
    pub const FILE_NAME: &'static str = "settings.json";

    /// Reject values the simulation treats as programming errors
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.spawner.vertical_gap <= 0.0 {
            return Err(SettingsError::Invalid {
                field: "spawner.vertical_gap",
                reason: "must be positive",
            });
        }
        if self.spawner.spawn_rate <= 0.0 {
            return Err(SettingsError::Invalid {
                field: "spawner.spawn_rate",
                reason: "must be positive",
            });
        }
        if self.spawner.min_height > self.spawner.max_height {
            return Err(SettingsError::Invalid {
                field: "spawner.min_height",
                reason: "must not exceed max_height",
            });
        }
        if self.physics.sprite_frames == 0 || self.physics.frame_period <= 0.0 {
            return Err(SettingsError::Invalid {
                field: "physics.sprite_frames",
                reason: "animation needs at least one frame and a positive period",
            });
        }
        Ok(())
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings, falling back to defaults when missing or invalid
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
