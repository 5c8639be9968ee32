//! Persistent JSON storage for high scores and settings
//!
//! Files live in a data directory chosen at startup. Writes go through a
//! temporary file in the same directory and are renamed into place, so a
//! crash never leaves a half-written file behind.

mod high_scores;
mod settings;

pub use high_scores::{HighScore, HighScoreStore, HighScoreTable, MAX_HIGH_SCORES, SaveOutcome};
pub use settings::{
    DEFAULT_DURATION_SECS, DURATION_STEP_SECS, MAX_DURATION_SECS, MIN_DURATION_SECS, Settings,
    SettingsError, SettingsStore, is_allowed_duration,
};

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const HIGH_SCORES_FILE: &str = "high_scores.json";
pub const SETTINGS_FILE: &str = "settings.json";

/// Error type for reading or writing a store
#[derive(Debug)]
pub enum StorageError {
    Io(io::Error),
    Json(serde_json::Error),
    Settings(SettingsError),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Storage I/O error: {e}"),
            Self::Json(e) => write!(f, "Malformed storage file: {e}"),
            Self::Settings(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Settings(e) => Some(e),
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<SettingsError> for StorageError {
    fn from(e: SettingsError) -> Self {
        Self::Settings(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Paths of every store inside one data directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn high_scores(&self) -> HighScoreStore {
        HighScoreStore::new(self.root.join(HIGH_SCORES_FILE))
    }

    #[must_use]
    pub fn settings(&self) -> SettingsStore {
        SettingsStore::new(self.root.join(SETTINGS_FILE))
    }
}

/// Read and parse a JSON file; `Ok(None)` if it does not exist
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StorageError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_str(&content)?))
}

/// Serialize to a temporary file beside `path`, then rename over it
fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StorageError> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut temp_file = NamedTempFile::new_in(parent)?;
    serde_json::to_writer_pretty(&mut temp_file, value)?;
    temp_file.write_all(b"\n")?;
    temp_file.flush()?;
    temp_file.persist(path).map_err(|e| StorageError::Io(e.error))?;
    Ok(())
}
