//! Score-driven difficulty
//!
//! Two independent tables keyed on the current score: player stat bands
//! (applied once per run by the session) and obstacle oscillation odds
//! (looked up by the spawner on every spawn). Both are evaluated in ascending
//! score order.

use serde::{Deserialize, Serialize};

use super::player::PlayerStats;

/// Player stat bands, one-shot per run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatBand {
    /// [8, 20)
    Level8,
    /// [20, 30)
    Level20,
    /// [30, ∞)
    Level30,
}

impl StatBand {
    /// All bands, ascending
    pub const ALL: [StatBand; 3] = [StatBand::Level8, StatBand::Level20, StatBand::Level30];

    /// Score at which the band starts
    pub fn level(self) -> u32 {
        match self {
            StatBand::Level8 => 8,
            StatBand::Level20 => 20,
            StatBand::Level30 => 30,
        }
    }

    /// Half-open score range covered by the band
    pub fn contains(self, score: u32) -> bool {
        match self {
            StatBand::Level8 => (8..20).contains(&score),
            StatBand::Level20 => (20..30).contains(&score),
            StatBand::Level30 => score >= 30,
        }
    }

    /// Stats pushed into the player on entering the band
    pub fn stats(self) -> PlayerStats {
        match self {
            StatBand::Level8 => PlayerStats::new(6.0, -10.0, 6.0),
            StatBand::Level20 => PlayerStats::new(7.0, -11.0, 7.0),
            StatBand::Level30 => PlayerStats::new(8.0, -12.0, 8.0),
        }
    }

    fn index(self) -> usize {
        match self {
            StatBand::Level8 => 0,
            StatBand::Level20 => 1,
            StatBand::Level30 => 2,
        }
    }
}

/// Band for a score, if any (scores below 8 keep baseline stats)
pub fn stat_band(score: u32) -> Option<StatBand> {
    StatBand::ALL.into_iter().find(|band| band.contains(score))
}

/// One-shot latches for the stat bands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdFlags {
    reached: [bool; 3],
}

impl ThresholdFlags {
    pub fn clear(&mut self) {
        self.reached = [false; 3];
    }

    pub fn is_reached(&self, band: StatBand) -> bool {
        self.reached[band.index()]
    }

    /// First band (ascending) that contains `score` and has not fired yet.
    /// Latches it before returning.
    pub fn take_crossed(&mut self, score: u32) -> Option<StatBand> {
        let band = StatBand::ALL
            .into_iter()
            .find(|&band| band.contains(score) && !self.is_reached(band))?;
        self.reached[band.index()] = true;
        Some(band)
    }
}

/// Odds and speed of vertical oscillation for a freshly spawned obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OscillationProfile {
    /// Chance (0.0 - 1.0) that the obstacle oscillates
    pub probability: f32,
    /// Angular speed of the oscillation
    pub speed: f32,
}

/// Oscillation table keyed on score
pub fn oscillation_profile(score: u32) -> OscillationProfile {
    let (probability, speed) = match score {
        0..=5 => (0.0, 1.0),
        6..=20 => (0.2, 1.5),
        21..=30 => (0.3, 2.0),
        31..=50 => (0.5, 2.5),
        _ => (1.0, 3.0),
    };
    OscillationProfile { probability, speed }
}
