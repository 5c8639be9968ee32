//! Conundrum puzzles
//!
//! A conundrum is a nine-letter word shown scrambled; the player must find the
//! original word.

use crate::core::Language;
use crate::wordlists::Lexicon;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use std::fmt;

/// Letters in a conundrum answer
pub const CONUNDRUM_LENGTH: usize = 9;

/// Error type for conundrum construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConundrumError {
    WrongLength(usize),
    InvalidLetters(String),
    NoAnswers(Language),
}

impl fmt::Display for ConundrumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength(n) => {
                write!(f, "Conundrum must be {CONUNDRUM_LENGTH} letters, got {n}")
            }
            Self::InvalidLetters(word) => write!(f, "'{word}' contains invalid letters"),
            Self::NoAnswers(lang) => write!(f, "No conundrum answers loaded for '{lang}'"),
        }
    }
}

impl std::error::Error for ConundrumError {}

/// Check whether a lowercase word is a valid conundrum answer
#[must_use]
pub fn is_conundrum_answer(word: &str, language: Language) -> bool {
    word.chars().count() == CONUNDRUM_LENGTH && language.is_in_alphabet(word)
}

/// Shuffle the letters of a word
///
/// Every permutation is equally likely, including the identity.
///
/// # Examples
/// ```
/// use countdown::solver::scramble_word;
///
/// let scrambled = scramble_word("countdown", &mut rand::rng());
/// let mut a: Vec<char> = scrambled.chars().collect();
/// let mut b: Vec<char> = "countdown".chars().collect();
/// a.sort_unstable();
/// b.sort_unstable();
/// assert_eq!(a, b);
/// ```
#[must_use]
pub fn scramble_word<R: Rng + ?Sized>(word: &str, rng: &mut R) -> String {
    let mut chars: Vec<char> = word.chars().collect();
    chars.shuffle(rng);
    chars.into_iter().collect()
}

/// A scrambled nine-letter word and its answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConundrumPuzzle {
    answer: String,
    scrambled: String,
    language: Language,
}

impl ConundrumPuzzle {
    /// Build a puzzle from a known answer
    ///
    /// # Errors
    /// Fails if the answer is not nine letters of the language's alphabet.
    pub fn new<R: Rng + ?Sized>(
        answer: &str,
        language: Language,
        rng: &mut R,
    ) -> Result<Self, ConundrumError> {
        let lower = answer.trim().to_lowercase();
        let len = lower.chars().count();
        if len != CONUNDRUM_LENGTH {
            return Err(ConundrumError::WrongLength(len));
        }
        if !language.is_in_alphabet(&lower) {
            return Err(ConundrumError::InvalidLetters(lower));
        }

        let answer = lower.to_uppercase();
        let scrambled = scramble_word(&answer, rng);
        Ok(Self {
            answer,
            scrambled,
            language,
        })
    }

    /// Pick a random answer from the lexicon and scramble it
    ///
    /// # Errors
    /// Returns `ConundrumError::NoAnswers` if the language has no answers.
    pub fn draw<R: Rng + ?Sized>(
        lexicon: &Lexicon,
        language: Language,
        rng: &mut R,
    ) -> Result<Self, ConundrumError> {
        let answer = lexicon
            .words(language)
            .conundrums()
            .choose(rng)
            .ok_or(ConundrumError::NoAnswers(language))?;
        Self::new(answer, language, rng)
    }

    /// The answer, uppercased
    #[inline]
    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// The scrambled letters, uppercased
    #[inline]
    #[must_use]
    pub fn scrambled(&self) -> &str {
        &self.scrambled
    }

    #[inline]
    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    /// Case-insensitive comparison of a guess with the answer
    #[must_use]
    pub fn is_solved_by(&self, guess: &str) -> bool {
        guess.trim().to_uppercase() == self.answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::WordList;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sorted(s: &str) -> Vec<char> {
        let mut chars: Vec<char> = s.chars().collect();
        chars.sort_unstable();
        chars
    }

    #[test]
    fn scramble_preserves_letters() {
        let mut rng = StdRng::seed_from_u64(11);
        for word in ["countdown", "pâtissier", "aaaaaaaab", ""] {
            let scrambled = scramble_word(word, &mut rng);
            assert_eq!(sorted(&scrambled), sorted(word));
        }
    }

    #[test]
    fn scramble_produces_different_orders() {
        let mut rng = StdRng::seed_from_u64(5);
        let outputs: std::collections::HashSet<String> = (0..20)
            .map(|_| scramble_word("abcdefghi", &mut rng))
            .collect();
        assert!(outputs.len() > 1);
    }

    #[test]
    fn answer_validation() {
        assert!(is_conundrum_answer("countdown", Language::English));
        assert!(!is_conundrum_answer("pâtissier", Language::English));
        assert!(is_conundrum_answer("pâtissier", Language::French));
        assert!(!is_conundrum_answer("short", Language::English));
        assert!(!is_conundrum_answer("count-dow", Language::English));
    }

    #[test]
    fn new_rejects_bad_answers() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            ConundrumPuzzle::new("short", Language::English, &mut rng),
            Err(ConundrumError::WrongLength(5))
        );
        assert_eq!(
            ConundrumPuzzle::new("count1own", Language::English, &mut rng),
            Err(ConundrumError::InvalidLetters("count1own".to_string()))
        );
    }

    #[test]
    fn puzzle_is_uppercase_and_solvable() {
        let mut rng = StdRng::seed_from_u64(2);
        let puzzle = ConundrumPuzzle::new("Countdown", Language::English, &mut rng).unwrap();

        assert_eq!(puzzle.answer(), "COUNTDOWN");
        assert_eq!(sorted(puzzle.scrambled()), sorted("COUNTDOWN"));
        assert!(puzzle.is_solved_by("countdown"));
        assert!(puzzle.is_solved_by("  CountDown "));
        assert!(!puzzle.is_solved_by("countdowns"));
    }

    #[test]
    fn draw_picks_from_lexicon() {
        let mut rng = StdRng::seed_from_u64(3);
        let lexicon = Lexicon::new(
            WordList::new(Language::English, Vec::<&str>::new(), ["adventure"]),
            WordList::default(),
        );

        let puzzle = ConundrumPuzzle::draw(&lexicon, Language::English, &mut rng).unwrap();
        assert_eq!(puzzle.answer(), "ADVENTURE");
        assert_eq!(
            ConundrumPuzzle::draw(&lexicon, Language::French, &mut rng),
            Err(ConundrumError::NoAnswers(Language::French))
        );
    }
}
