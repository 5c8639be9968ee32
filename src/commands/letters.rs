//! Letters commands
//!
//! Longest-word search over a rack, word checks against a rack, and bare
//! dictionary lookups.

use crate::core::{LETTER_RACK_SIZE, Language, can_form_word, letters_score};
use crate::dictionary::{Dictionary, RemoteDictionary};
use crate::round::LettersOutcome;
use crate::solver::find_longest_word;
use anyhow::Result;

/// Result of analysing a rack
#[derive(Debug, Clone)]
pub struct LettersReport {
    pub letters: Vec<char>,
    pub language: Language,
    pub longest: Option<String>,
    /// Verdict on a word the user asked about
    pub verdict: Option<LettersOutcome>,
}

/// Result of a dictionary lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub word: String,
    pub language: Language,
    pub local: bool,
    pub valid: bool,
}

/// Parse a rack such as `READYXJQZ` or `r e a d y`
///
/// # Errors
///
/// Returns an error for characters outside A-Z or more than nine letters.
pub fn parse_letters(input: &str) -> Result<Vec<char>> {
    let letters: Vec<char> = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if let Some(bad) = letters.iter().find(|c| !c.is_ascii_uppercase()) {
        anyhow::bail!("'{bad}' is not a letter tile");
    }
    if letters.is_empty() || letters.len() > LETTER_RACK_SIZE {
        anyhow::bail!(
            "A rack holds 1 to {LETTER_RACK_SIZE} letters, got {}",
            letters.len()
        );
    }
    Ok(letters)
}

/// Find the longest word on a rack, and optionally judge a word against it
///
/// # Errors
///
/// Returns an error if the rack cannot be parsed.
pub async fn analyze_letters<R: RemoteDictionary>(
    dictionary: &Dictionary<'_, R>,
    letters: &str,
    word: Option<&str>,
    language: Language,
) -> Result<LettersReport> {
    let letters = parse_letters(letters)?;
    let longest = find_longest_word(dictionary.lexicon(), &letters, language);

    let verdict = match word {
        Some(word) => Some(judge_word(dictionary, word, &letters, language).await),
        None => None,
    };

    Ok(LettersReport {
        letters,
        language,
        longest,
        verdict,
    })
}

/// Judge a word the way a Letters round scores a submission
async fn judge_word<R: RemoteDictionary>(
    dictionary: &Dictionary<'_, R>,
    word: &str,
    letters: &[char],
    language: Language,
) -> LettersOutcome {
    let word = word.trim().to_uppercase();
    if word.is_empty() {
        return LettersOutcome::Empty;
    }
    if !can_form_word(&word, letters) {
        return LettersOutcome::UnavailableLetters { word };
    }
    if dictionary.is_valid_word(&word, language).await {
        let score = letters_score(&word);
        LettersOutcome::Accepted { word, score }
    } else {
        LettersOutcome::NotAWord { word }
    }
}

/// Look up a word locally, then remotely
pub async fn check_word<R: RemoteDictionary>(
    dictionary: &Dictionary<'_, R>,
    word: &str,
    language: Language,
) -> CheckReport {
    let word = word.trim().to_lowercase();
    let local = dictionary.contains_locally(&word, language);
    let valid = local || dictionary.is_valid_word(&word, language).await;
    CheckReport {
        word,
        language,
        local,
        valid,
    }
}
