//! Word lists for the Letters and Conundrum rounds
//!
//! English and French lists are embedded at build time. A [`Lexicon`] holds
//! both languages in memory for the lifetime of the program; it is built once
//! at startup and never mutated.

mod embedded;
pub mod loader;

pub use embedded::{
    ENGLISH_CONUNDRUMS, ENGLISH_CONUNDRUMS_COUNT, ENGLISH_WORDS, ENGLISH_WORDS_COUNT,
    FRENCH_CONUNDRUMS, FRENCH_CONUNDRUMS_COUNT, FRENCH_WORDS, FRENCH_WORDS_COUNT,
};

use crate::core::Language;
use crate::solver::is_conundrum_answer;
use rustc_hash::FxHashSet;
use std::io;
use std::path::Path;

/// File names used when loading a word directory
pub const WORDS_FILE_EN: &str = "english.txt";
pub const WORDS_FILE_FR: &str = "french.txt";
pub const CONUNDRUMS_FILE_EN: &str = "conundrums_en.txt";
pub const CONUNDRUMS_FILE_FR: &str = "conundrums_fr.txt";

/// The words and conundrum answers of one language
#[derive(Debug, Clone, Default)]
pub struct WordList {
    language: Language,
    members: FxHashSet<String>,
    by_length: Vec<String>,
    conundrums: Vec<String>,
}

impl WordList {
    /// Build a list from raw words and conundrum answers
    ///
    /// Words are trimmed, lowercased and deduplicated keeping first
    /// occurrence. Conundrum answers that are not nine letters of the
    /// language's alphabet are dropped.
    pub fn new<I, S, J, T>(language: Language, words: I, conundrums: J) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        J: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut members = FxHashSet::default();
        let mut ordered = Vec::new();
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if !word.is_empty() && members.insert(word.clone()) {
                ordered.push(word);
            }
        }

        // Stable: equal lengths keep list order
        ordered.sort_by_key(|w| std::cmp::Reverse(w.chars().count()));

        let mut seen = FxHashSet::default();
        let conundrums: Vec<String> = conundrums
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| is_conundrum_answer(w, language) && seen.insert(w.clone()))
            .collect();

        tracing::debug!(
            %language,
            words = ordered.len(),
            conundrums = conundrums.len(),
            "word list built"
        );

        Self {
            language,
            members,
            by_length: ordered,
            conundrums,
        }
    }

    /// Build from the lists compiled into the binary
    #[must_use]
    pub fn embedded(language: Language) -> Self {
        match language {
            Language::English => Self::new(language, ENGLISH_WORDS, ENGLISH_CONUNDRUMS),
            Language::French => Self::new(language, FRENCH_WORDS, FRENCH_CONUNDRUMS),
        }
    }

    #[inline]
    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    /// Exact membership of a lowercase word
    #[inline]
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.members.contains(word)
    }

    /// All words, longest first
    #[inline]
    #[must_use]
    pub fn by_length(&self) -> &[String] {
        &self.by_length
    }

    /// Valid conundrum answers
    #[inline]
    #[must_use]
    pub fn conundrums(&self) -> &[String] {
        &self.conundrums
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_length.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_length.is_empty()
    }
}

/// Word lists for every supported language
#[derive(Debug, Clone)]
pub struct Lexicon {
    english: WordList,
    french: WordList,
}

impl Lexicon {
    #[must_use]
    pub const fn new(english: WordList, french: WordList) -> Self {
        Self { english, french }
    }

    /// Lexicon built from the embedded lists
    #[must_use]
    pub fn embedded() -> Self {
        Self::new(
            WordList::embedded(Language::English),
            WordList::embedded(Language::French),
        )
    }

    /// Load replacement lists from a directory
    ///
    /// Both word files must exist. A missing conundrum file falls back to the
    /// embedded answers for that language.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if a word file cannot be read.
    pub async fn load_dir(dir: &Path) -> io::Result<Self> {
        let english = load_language(dir, Language::English).await?;
        let french = load_language(dir, Language::French).await?;
        Ok(Self::new(english, french))
    }

    /// The list for `language`
    #[inline]
    #[must_use]
    pub const fn words(&self, language: Language) -> &WordList {
        match language {
            Language::English => &self.english,
            Language::French => &self.french,
        }
    }

    /// Exact membership of a lowercase word in the given language
    #[inline]
    #[must_use]
    pub fn contains(&self, word: &str, language: Language) -> bool {
        self.words(language).contains(word)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::embedded()
    }
}

async fn load_language(dir: &Path, language: Language) -> io::Result<WordList> {
    let (words_file, conundrums_file) = match language {
        Language::English => (WORDS_FILE_EN, CONUNDRUMS_FILE_EN),
        Language::French => (WORDS_FILE_FR, CONUNDRUMS_FILE_FR),
    };

    let words = loader::load_from_file_async(dir.join(words_file)).await?;
    let conundrums = match loader::load_from_file_async(dir.join(conundrums_file)).await {
        Ok(list) => list,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!(%language, "no conundrum file, using embedded answers");
            let embedded = match language {
                Language::English => ENGLISH_CONUNDRUMS,
                Language::French => FRENCH_CONUNDRUMS,
            };
            loader::words_from_slice(embedded)
        }
        Err(e) => return Err(e),
    };

    Ok(WordList::new(language, words, conundrums))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn english_count_matches_const() {
        assert_eq!(ENGLISH_WORDS.len(), ENGLISH_WORDS_COUNT);
        assert_eq!(ENGLISH_CONUNDRUMS.len(), ENGLISH_CONUNDRUMS_COUNT);
    }

    #[test]
    fn french_count_matches_const() {
        assert_eq!(FRENCH_WORDS.len(), FRENCH_WORDS_COUNT);
        assert_eq!(FRENCH_CONUNDRUMS.len(), FRENCH_CONUNDRUMS_COUNT);
    }

    #[test]
    fn embedded_entries_are_lowercase() {
        for &word in ENGLISH_WORDS.iter().chain(FRENCH_WORDS) {
            assert_eq!(word, word.to_lowercase(), "Word '{word}' is not lowercase");
        }
    }

    #[test]
    fn embedded_conundrums_are_valid() {
        for &word in ENGLISH_CONUNDRUMS {
            assert!(is_conundrum_answer(word, Language::English), "{word}");
        }
        for &word in FRENCH_CONUNDRUMS {
            assert!(is_conundrum_answer(word, Language::French), "{word}");
        }
    }

    #[test]
    fn embedded_lexicon_has_both_languages() {
        let lexicon = Lexicon::embedded();
        assert!(!lexicon.words(Language::English).is_empty());
        assert!(!lexicon.words(Language::French).is_empty());
        assert!(lexicon.contains("ready", Language::English));
        assert!(!lexicon.contains("zzzzz", Language::English));
    }

    #[test]
    fn word_list_sorted_longest_first_stable() {
        let list = WordList::new(
            Language::English,
            ["cat", "horse", "dog", "mouse", "ox"],
            Vec::<&str>::new(),
        );
        assert_eq!(list.by_length(), ["horse", "mouse", "cat", "dog", "ox"]);
    }

    #[test]
    fn word_list_normalizes_and_dedupes() {
        let list = WordList::new(
            Language::English,
            ["  Ready ", "ready", "", "READY", "dear"],
            Vec::<&str>::new(),
        );
        assert_eq!(list.len(), 2);
        assert!(list.contains("ready"));
        assert!(!list.contains("Ready"));
    }

    #[test]
    fn word_list_drops_invalid_conundrums() {
        let list = WordList::new(
            Language::English,
            Vec::<&str>::new(),
            ["countdown", "short", "pâtissier", "countdown", "abc123xyz"],
        );
        assert_eq!(list.conundrums(), ["countdown"]);

        let french = WordList::new(Language::French, Vec::<&str>::new(), ["pâtissier"]);
        assert_eq!(french.conundrums(), ["pâtissier"]);
    }

    #[tokio::test]
    async fn load_dir_reads_word_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(WORDS_FILE_EN), "apple\nbanana\n").unwrap();
        fs::write(dir.path().join(WORDS_FILE_FR), "pomme\nété\n").unwrap();
        fs::write(dir.path().join(CONUNDRUMS_FILE_EN), "abcdefghi\n").unwrap();

        let lexicon = Lexicon::load_dir(dir.path()).await.unwrap();
        assert!(lexicon.contains("banana", Language::English));
        assert!(lexicon.contains("été", Language::French));
        assert_eq!(lexicon.words(Language::English).conundrums(), ["abcdefghi"]);

        // French conundrums fall back to the embedded answers
        assert_eq!(
            lexicon.words(Language::French).conundrums().len(),
            FRENCH_CONUNDRUMS_COUNT
        );
    }

    #[tokio::test]
    async fn load_dir_requires_word_files() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Lexicon::load_dir(dir.path()).await.is_err());
    }
}
