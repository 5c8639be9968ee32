//! Top-ten high score table

use super::{StorageError, read_json, write_json_atomic};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Entries kept in the table
pub const MAX_HIGH_SCORES: usize = 10;

/// One finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub score: u32,
    pub date: String,
    pub rounds: u32,
}

/// Where a saved score landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    pub is_high_score: bool,
    /// One-based position among all scores, including ones beyond the table
    pub rank: usize,
}

/// Scores sorted from highest to lowest, at most [`MAX_HIGH_SCORES`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighScoreTable {
    entries: Vec<HighScore>,
}

impl HighScoreTable {
    /// Build a table from stored entries, re-sorting and trimming them
    #[must_use]
    pub fn from_entries(mut entries: Vec<HighScore>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[HighScore] {
        &self.entries
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `score` would earn a place in the table
    ///
    /// Any score qualifies while the table has free slots; after that it must
    /// beat the lowest entry.
    ///
    /// # Examples
    /// ```
    /// use countdown::storage::{HighScore, HighScoreTable};
    ///
    /// let entries = (0..10)
    ///     .map(|i| HighScore { score: 40 + i, date: "2024-01-01".into(), rounds: 7 })
    ///     .collect();
    /// let table = HighScoreTable::from_entries(entries);
    /// assert!(!table.is_new_high_score(10));
    /// assert!(table.is_new_high_score(45));
    /// ```
    #[must_use]
    pub fn is_new_high_score(&self, score: u32) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().is_none_or(|lowest| score > lowest.score)
    }

    /// Position `score` would take if inserted now
    ///
    /// Ties go after existing entries with the same score.
    #[must_use]
    pub fn rank_for(&self, score: u32) -> usize {
        self.entries.iter().filter(|e| e.score >= score).count() + 1
    }

    /// Insert a finished game and trim to the top ten
    pub fn insert(&mut self, entry: HighScore) -> SaveOutcome {
        let rank = self.rank_for(entry.score);
        self.entries.insert(rank - 1, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        SaveOutcome {
            is_high_score: rank <= MAX_HIGH_SCORES,
            rank,
        }
    }
}

/// High scores persisted as a JSON array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the table; a missing or unreadable file gives an empty table
    #[must_use]
    pub fn load(&self) -> HighScoreTable {
        match read_json::<Vec<HighScore>>(&self.path) {
            Ok(entries) => HighScoreTable::from_entries(entries.unwrap_or_default()),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring high score file");
                HighScoreTable::default()
            }
        }
    }

    /// Whether `score` would be saved into the table
    #[must_use]
    pub fn is_new_high_score(&self, score: u32) -> bool {
        self.load().is_new_high_score(score)
    }

    /// Record a finished game stamped with today's date
    ///
    /// # Errors
    /// Returns an error if the table cannot be written.
    pub fn save(&self, score: u32, rounds: u32) -> Result<SaveOutcome, StorageError> {
        let date = chrono::Local::now().format("%Y-%m-%d").to_string();
        self.save_entry(HighScore {
            score,
            date,
            rounds,
        })
    }

    /// Record a finished game
    ///
    /// # Errors
    /// Returns an error if the table cannot be written.
    pub fn save_entry(&self, entry: HighScore) -> Result<SaveOutcome, StorageError> {
        let mut table = self.load();
        let outcome = table.insert(entry);
        write_json_atomic(&self.path, table.entries())?;
        tracing::info!(rank = outcome.rank, is_high_score = outcome.is_high_score, "score saved");
        Ok(outcome)
    }

    /// Remove every stored score
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
