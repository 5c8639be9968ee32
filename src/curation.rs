//! Dictionary curation
//!
//! Offline cleanup of raw word sources into the lists embedded in the game.
//! Proper nouns are removed with a blacklist built from name lists, a places
//! CSV and a fixed set of provinces, cities, weekdays and months. Frequency
//! lists are validated against full reference dictionaries.

use crate::core::Language;
use crate::solver::CONUNDRUM_LENGTH;
use rustc_hash::FxHashSet;

/// Shortest word kept in a common-word list
pub const MIN_WORD_LENGTH: usize = 3;

/// Most frequent French words considered for conundrums
pub const FRENCH_CONUNDRUM_POOL: usize = 20_000;

/// Size cap of the French common-word list
pub const FRENCH_COMMON_LIMIT: usize = 10_000;

/// Words always blacklisted
pub const MANUAL_BLACKLIST: &[&str] = &[
    "manitoba",
    "ontario",
    "quebec",
    "alberta",
    "saskatchewan",
    "yukon",
    "nunavut",
    "amanda",
    "paris",
    "london",
    "france",
    "germany",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
    "aaa",
    "aa",
    "ambien",
];

/// Lowercase words that must never appear in a curated list
#[derive(Debug, Clone)]
pub struct Blacklist {
    words: FxHashSet<String>,
}

impl Default for Blacklist {
    fn default() -> Self {
        Self {
            words: MANUAL_BLACKLIST.iter().map(|w| (*w).to_string()).collect(),
        }
    }
}

impl Blacklist {
    /// A blacklist holding only the manual entries
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every non-blank line of a name list
    pub fn add_names(&mut self, content: &str) {
        for line in content.lines() {
            self.insert(line);
        }
    }

    /// Add the first column of a CSV, with quotes stripped
    pub fn add_places_csv(&mut self, content: &str) {
        for line in content.lines() {
            if let Some(first) = line.split(',').next() {
                self.insert(&first.replace('"', ""));
            }
        }
    }

    fn insert(&mut self, word: &str) {
        let clean = word.trim().to_lowercase();
        if !clean.is_empty() {
            self.words.insert(clean);
        }
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// A word and its corpus count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyEntry {
    pub word: String,
    pub count: u64,
}

/// Parse `count word` lines, most frequent first
///
/// A line holding a single token is a word with count zero. Lines whose count
/// is not a number are skipped. Equal counts keep file order.
#[must_use]
pub fn parse_frequencies(content: &str) -> Vec<FrequencyEntry> {
    let mut entries: Vec<FrequencyEntry> = content
        .lines()
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            let first = parts.next()?;
            match parts.next() {
                Some(word) => first.parse().ok().map(|count| FrequencyEntry {
                    word: word.to_lowercase(),
                    count,
                }),
                None => Some(FrequencyEntry {
                    word: first.to_lowercase(),
                    count: 0,
                }),
            }
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

/// Reference dictionary with blacklisted words removed
#[must_use]
pub fn clean_reference<I, S>(words: I, blacklist: &Blacklist) -> FxHashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words
        .into_iter()
        .map(|w| w.as_ref().trim().to_string())
        .filter(|w| !w.is_empty() && !blacklist.contains(w))
        .collect()
}

/// Whether a reference accepts a word; an empty reference accepts everything
fn in_reference(reference: &FxHashSet<String>, word: &str) -> bool {
    reference.is_empty() || reference.contains(word)
}

/// English common words: at least three letters, not blacklisted, known to
/// the reference
#[must_use]
pub fn curate_english_common(
    raw: &str,
    blacklist: &Blacklist,
    reference: &FxHashSet<String>,
) -> Vec<String> {
    let words: FxHashSet<String> = raw
        .lines()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| w.chars().count() >= MIN_WORD_LENGTH)
        .filter(|w| !blacklist.contains(w) && in_reference(reference, w))
        .collect();
    sorted(words)
}

/// French common words, taken by frequency until [`FRENCH_COMMON_LIMIT`]
///
/// Words need three letters, no digits, no blacklist entry, and a reference
/// entry when a reference is given.
#[must_use]
pub fn curate_french_common(
    frequencies: &[FrequencyEntry],
    blacklist: &Blacklist,
    reference: &FxHashSet<String>,
) -> Vec<String> {
    let mut words = FxHashSet::default();
    let mut taken = 0;
    for FrequencyEntry { word, .. } in frequencies {
        if word.chars().count() < MIN_WORD_LENGTH
            || blacklist.contains(word)
            || word.chars().any(|c| c.is_ascii_digit())
            || !in_reference(reference, word)
        {
            continue;
        }
        words.insert(word.clone());
        taken += 1;
        if taken >= FRENCH_COMMON_LIMIT {
            break;
        }
    }
    sorted(words)
}

/// Nine-letter French conundrums from the most frequent words
#[must_use]
pub fn french_conundrums(frequencies: &[FrequencyEntry], blacklist: &Blacklist) -> Vec<String> {
    let words: FxHashSet<String> = frequencies
        .iter()
        .take(FRENCH_CONUNDRUM_POOL)
        .map(|entry| entry.word.clone())
        .filter(|w| w.chars().count() == CONUNDRUM_LENGTH)
        .filter(|w| !blacklist.contains(w) && Language::French.is_in_alphabet(w))
        .collect();
    sorted(words)
}

/// Drop blacklisted answers from an existing conundrum list
///
/// The list is hand-maintained, so its order and any repeats are kept.
#[must_use]
pub fn filter_conundrums(answers: &[String], blacklist: &Blacklist) -> Vec<String> {
    answers
        .iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty() && !blacklist.contains(w))
        .collect()
}

/// Raw sources for one curation run
#[derive(Debug, Clone, Default)]
pub struct CurationSources {
    /// Contents of each name list
    pub names: Vec<String>,
    /// Contents of the places CSV
    pub places: Option<String>,
    /// One English word per line, most common first
    pub english_common: String,
    /// `count word` lines
    pub french_frequencies: String,
    pub english_reference: Vec<String>,
    pub french_reference: Vec<String>,
    pub english_conundrums: Vec<String>,
}

/// Every list produced by a curation run
///
/// All lists are sorted except `english_conundrums`, which keeps source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CuratedLists {
    pub english_common: Vec<String>,
    pub french_common: Vec<String>,
    pub english_all: Vec<String>,
    pub french_all: Vec<String>,
    pub english_conundrums: Vec<String>,
    pub french_conundrums: Vec<String>,
}

/// Run the whole pipeline
#[must_use]
pub fn curate(sources: &CurationSources) -> CuratedLists {
    let mut blacklist = Blacklist::new();
    for names in &sources.names {
        blacklist.add_names(names);
    }
    if let Some(places) = &sources.places {
        blacklist.add_places_csv(places);
    }
    tracing::info!(size = blacklist.len(), "blacklist built");

    let english_reference = clean_reference(&sources.english_reference, &blacklist);
    let french_reference = clean_reference(&sources.french_reference, &blacklist);
    if english_reference.is_empty() {
        tracing::warn!("no English reference dictionary, common words are not validated");
    }
    if french_reference.is_empty() {
        tracing::warn!("no French reference dictionary, common words are not validated");
    }

    let frequencies = parse_frequencies(&sources.french_frequencies);
    let lists = CuratedLists {
        english_common: curate_english_common(
            &sources.english_common,
            &blacklist,
            &english_reference,
        ),
        french_common: curate_french_common(&frequencies, &blacklist, &french_reference),
        english_conundrums: filter_conundrums(&sources.english_conundrums, &blacklist),
        french_conundrums: french_conundrums(&frequencies, &blacklist),
        english_all: sorted(english_reference),
        french_all: sorted(french_reference),
    };

    tracing::info!(
        english_common = lists.english_common.len(),
        french_common = lists.french_common.len(),
        english_all = lists.english_all.len(),
        french_all = lists.french_all.len(),
        english_conundrums = lists.english_conundrums.len(),
        french_conundrums = lists.french_conundrums.len(),
        "curation finished"
    );
    lists
}

fn sorted(words: FxHashSet<String>) -> Vec<String> {
    let mut list: Vec<String> = words.into_iter().collect();
    list.sort_unstable();
    list
}
