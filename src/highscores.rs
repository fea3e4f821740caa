//! High score tracking
//!
//! Holds the best score seen across runs plus the per-run "already announced"
//! latch. Storage lives in `persistence`; this type only decides when a save
//! and an announcement are due.

use serde::{Deserialize, Serialize};

/// Outcome of offering a score to the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighScoreUpdate {
    /// Score did not beat the record
    Unchanged,
    /// Record raised; already announced earlier this run
    Raised,
    /// Record raised for the first time this run
    FirstThisRun,
}

impl HighScoreUpdate {
    /// Whether the new record needs persisting
    pub fn raised(self) -> bool {
        !matches!(self, HighScoreUpdate::Unchanged)
    }
}

/// Best score across runs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScore {
    best: u32,
    #[serde(skip)]
    announced: bool,
}

impl HighScore {
    /// Start from a stored record
    pub fn new(best: u32) -> Self {
        Self {
            best,
            announced: false,
        }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Forget the per-run announcement (call on every new run)
    pub fn start_run(&mut self) {
        self.announced = false;
    }

    /// Offer a score; never lowers the record
    pub fn observe(&mut self, score: u32) -> HighScoreUpdate {
        if score <= self.best {
            return HighScoreUpdate::Unchanged;
        }
        self.best = score;
        if self.announced {
            HighScoreUpdate::Raised
        } else {
            self.announced = true;
            HighScoreUpdate::FirstThisRun
        }
    }
}
