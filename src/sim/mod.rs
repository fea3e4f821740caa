//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (obstacles by entity ID)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod obstacle;
pub mod player;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Contact, ContactOutcome, ContactTracker, RegionKind, resolve};
pub use difficulty::{OscillationProfile, StatBand, oscillation_profile, stat_band};
pub use obstacle::{ObstacleTrack, Oscillation};
pub use player::{PhysicsBody, PlayerStats};
pub use session::GameSession;
pub use spawner::ObstacleSpawner;
pub use state::{GameEvent, GamePhase};
pub use tick::{TickInput, tick};
