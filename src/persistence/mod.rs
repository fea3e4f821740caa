//! High score persistence
//!
//! The simulation only needs two calls: load once at startup and save whenever
//! the high score rises. Storage is an opaque key-value map; the file-backed
//! store writes through a temp file and renames it into place.

mod file;

pub use file::KeyValueFile;

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

/// Key the high score is stored under
pub const HIGH_SCORE_KEY: &str = "HighScore";

/// Errors raised by a high score store
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored data is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no data directory available on this platform")]
    NoDataDir,
}

/// Storage backend for the single persisted high score
pub trait HighScoreStore {
    /// Read the stored high score (0 when nothing is stored yet)
    fn load_high_score(&self) -> Result<u32, PersistenceError>;

    /// Persist a new high score
    fn save_high_score(&mut self, score: u32) -> Result<(), PersistenceError>;
}

#[derive(Debug, Default)]
struct MemoryInner {
    value: u32,
    saves: usize,
}

/// In-memory store
///
/// Clones share the same slot, so a test or headless runner can keep a handle
/// after giving one to the session.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a previously stored high score
    pub fn with_value(value: u32) -> Self {
        let store = Self::new();
        store.inner.borrow_mut().value = value;
        store
    }

    /// Currently stored value
    pub fn value(&self) -> u32 {
        self.inner.borrow().value
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.inner.borrow().saves
    }
}

impl HighScoreStore for MemoryStore {
    fn load_high_score(&self) -> Result<u32, PersistenceError> {
        Ok(self.value())
    }

    fn save_high_score(&mut self, score: u32) -> Result<(), PersistenceError> {
        let mut inner = self.inner.borrow_mut();
        inner.value = score;
        inner.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_shares_slot() {
        let handle = MemoryStore::with_value(4);
        let mut store = handle.clone();
        assert_eq!(store.load_high_score().unwrap(), 4);

        store.save_high_score(9).unwrap();
        assert_eq!(handle.value(), 9);
        assert_eq!(handle.save_count(), 1);
    }
}
