//! Round timer settings

use super::{StorageError, read_json, write_json_atomic};
use crate::round::RoundKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const MIN_DURATION_SECS: u64 = 30;
pub const MAX_DURATION_SECS: u64 = 300;
pub const DURATION_STEP_SECS: u64 = 30;
pub const DEFAULT_DURATION_SECS: u64 = 30;

/// Error type for rejected settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    InvalidDuration { kind: RoundKind, secs: u64 },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDuration { kind, secs } => write!(
                f,
                "{kind} timer of {secs}s is not allowed (use {MIN_DURATION_SECS}-{MAX_DURATION_SECS}s in steps of {DURATION_STEP_SECS}s)"
            ),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Answer time per round kind, plus the sound toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub letters_secs: u64,
    pub numbers_secs: u64,
    pub conundrum_secs: u64,
    pub sound: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            letters_secs: DEFAULT_DURATION_SECS,
            numbers_secs: DEFAULT_DURATION_SECS,
            conundrum_secs: DEFAULT_DURATION_SECS,
            sound: true,
        }
    }
}

/// Whether `secs` is one of the selectable timer lengths
#[must_use]
pub const fn is_allowed_duration(secs: u64) -> bool {
    secs >= MIN_DURATION_SECS && secs <= MAX_DURATION_SECS && secs % DURATION_STEP_SECS == 0
}

impl Settings {
    #[must_use]
    pub const fn secs_for(&self, kind: RoundKind) -> u64 {
        match kind {
            RoundKind::Letters => self.letters_secs,
            RoundKind::Numbers => self.numbers_secs,
            RoundKind::Conundrum => self.conundrum_secs,
        }
    }

    #[must_use]
    pub const fn duration_for(&self, kind: RoundKind) -> Duration {
        Duration::from_secs(self.secs_for(kind))
    }

    /// Change one round's timer
    ///
    /// # Errors
    /// Returns `SettingsError::InvalidDuration` for a length outside 30 to 300
    /// seconds or not a multiple of 30.
    pub fn set_duration(&mut self, kind: RoundKind, secs: u64) -> Result<(), SettingsError> {
        if !is_allowed_duration(secs) {
            return Err(SettingsError::InvalidDuration { kind, secs });
        }
        match kind {
            RoundKind::Letters => self.letters_secs = secs,
            RoundKind::Numbers => self.numbers_secs = secs,
            RoundKind::Conundrum => self.conundrum_secs = secs,
        }
        Ok(())
    }

    /// Check every timer
    ///
    /// # Errors
    /// Returns the first invalid timer.
    pub fn validate(&self) -> Result<(), SettingsError> {
        for kind in [RoundKind::Letters, RoundKind::Numbers, RoundKind::Conundrum] {
            let secs = self.secs_for(kind);
            if !is_allowed_duration(secs) {
                return Err(SettingsError::InvalidDuration { kind, secs });
            }
        }
        Ok(())
    }
}

/// Settings persisted as a JSON object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the settings; missing, corrupt or invalid files give the defaults
    #[must_use]
    pub fn load(&self) -> Settings {
        let settings = match read_json::<Settings>(&self.path) {
            Ok(settings) => settings.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring settings file");
                return Settings::default();
            }
        };
        if let Err(e) = settings.validate() {
            tracing::warn!(error = %e, "stored settings invalid, using defaults");
            return Settings::default();
        }
        settings
    }

    /// Validate and write the settings
    ///
    /// # Errors
    /// Returns an error if the settings are invalid or cannot be written.
    pub fn save(&self, settings: &Settings) -> Result<(), StorageError> {
        settings.validate()?;
        write_json_atomic(&self.path, settings)?;
        Ok(())
    }
}
