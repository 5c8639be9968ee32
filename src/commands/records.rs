//! High score and settings commands

use crate::round::RoundKind;
use crate::storage::{HighScoreStore, HighScoreTable, Settings, SettingsStore};
use anyhow::{Context, Result};

/// Requested changes to the stored settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub letters_secs: Option<u64>,
    pub numbers_secs: Option<u64>,
    pub conundrum_secs: Option<u64>,
    pub sound: Option<bool>,
}

impl SettingsUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.letters_secs.is_none()
            && self.numbers_secs.is_none()
            && self.conundrum_secs.is_none()
            && self.sound.is_none()
    }
}

/// Apply `update` to the stored settings and save them
///
/// Nothing is written when the update is empty or any timer is invalid.
///
/// # Errors
///
/// Returns an error for a timer outside 30-300 seconds in steps of 30, or if
/// the settings file cannot be written.
pub fn update_settings(store: &SettingsStore, update: SettingsUpdate) -> Result<Settings> {
    let mut settings = store.load();
    if update.is_empty() {
        return Ok(settings);
    }

    let timers = [
        (RoundKind::Letters, update.letters_secs),
        (RoundKind::Numbers, update.numbers_secs),
        (RoundKind::Conundrum, update.conundrum_secs),
    ];
    for (kind, secs) in timers {
        if let Some(secs) = secs {
            settings.set_duration(kind, secs)?;
        }
    }
    if let Some(sound) = update.sound {
        settings.sound = sound;
    }

    store
        .save(&settings)
        .with_context(|| format!("Cannot write {}", store.path().display()))?;
    Ok(settings)
}

/// Load the table, clearing it first when asked
///
/// # Errors
///
/// Returns an error if the high score file cannot be removed.
pub fn high_scores(store: &HighScoreStore, clear: bool) -> Result<HighScoreTable> {
    if clear {
        store
            .clear()
            .with_context(|| format!("Cannot remove {}", store.path().display()))?;
        tracing::info!("high scores cleared");
    }
    Ok(store.load())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_changes_only_given_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));

        let settings = update_settings(
            &store,
            SettingsUpdate {
                numbers_secs: Some(60),
                sound: Some(false),
                ..SettingsUpdate::default()
            },
        )
        .unwrap();

        assert_eq!(settings.numbers_secs, 60);
        assert_eq!(settings.letters_secs, 30);
        assert!(!settings.sound);
        assert_eq!(store.load(), settings);
    }

    #[test]
    fn invalid_update_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));

        let result = update_settings(
            &store,
            SettingsUpdate {
                letters_secs: Some(60),
                conundrum_secs: Some(45),
                ..SettingsUpdate::default()
            },
        );
        assert!(result.is_err());
        assert!(!store.path().exists());
    }

    #[test]
    fn empty_update_is_a_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));
        let settings = update_settings(&store, SettingsUpdate::default()).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(!store.path().exists());
    }

    #[test]
    fn clear_empties_table() {
        let dir = tempfile::tempdir().unwrap();
        let store = HighScoreStore::new(dir.path().join("high_scores.json"));
        store.save(30, 7).unwrap();

        assert_eq!(high_scores(&store, false).unwrap().len(), 1);
        assert!(high_scores(&store, true).unwrap().is_empty());
    }
}
