//! JSON key-value file store

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use super::{HIGH_SCORE_KEY, HighScoreStore, PersistenceError};

/// A small JSON object of integer values on disk
#[derive(Debug, Clone)]
pub struct KeyValueFile {
    path: PathBuf,
}

impl KeyValueFile {
    /// File name used inside the data directory
    pub const FILE_NAME: &'static str = "prefs.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Platform data directory for this game (created on first save)
    pub fn data_dir() -> Result<PathBuf, PersistenceError> {
        ProjectDirs::from("com", "MabyQuest", "maby-quest")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(PersistenceError::NoDataDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, i64>, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, values: &BTreeMap<String, i64>) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(values)?;

        // tmp -> rename so a crash never leaves a half-written file
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Read an integer value (None when absent)
    pub fn get(&self, key: &str) -> Result<Option<i64>, PersistenceError> {
        Ok(self.read_all()?.get(key).copied())
    }

    /// Write an integer value, keeping any other keys in the file
    pub fn set(&self, key: &str, value: i64) -> Result<(), PersistenceError> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value);
        self.write_all(&values)
    }
}

impl HighScoreStore for KeyValueFile {
    fn load_high_score(&self) -> Result<u32, PersistenceError> {
        let stored = self.get(HIGH_SCORE_KEY)?.unwrap_or(0);
        // Negative or oversized values are treated as no record
        Ok(u32::try_from(stored).unwrap_or(0))
    }

    fn save_high_score(&mut self, score: u32) -> Result<(), PersistenceError> {
        self.set(HIGH_SCORE_KEY, i64::from(score))?;
        log::info!("High score saved ({})", score);
        Ok(())
    }
}
