//! Letters round rack
//!
//! Nine letters drawn one at a time from frequency-weighted vowel and consonant
//! pools, plus the sub-multiset check used to validate submitted words.

use rand::Rng;
use rustc_hash::FxHashMap;
use std::fmt;

/// Number of letters in a complete rack
pub const LETTER_RACK_SIZE: usize = 9;

/// Minimum number of vowels a complete rack must hold
pub const MIN_VOWELS: usize = 3;

/// Minimum number of consonants a complete rack must hold
pub const MIN_CONSONANTS: usize = 4;

const CONSONANT_POOL: &[u8] = b"BBCCDDDDFFGGGHHJKLLLMMMNNNNNPPQRRRRRRSSSSTTTTTTVWXYZ";
const VOWEL_POOL: &[u8] = b"AAAAAAAAAEEEEEEEEEEEEIIIIIIIIIOOOOOOOOUUUU";

/// Which pool a tile is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Vowel,
    Consonant,
}

/// Error type for invalid rack operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RackError {
    Full,
    VowelQuota,
    ConsonantQuota,
    InvalidLetter(char),
}

impl fmt::Display for RackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "Rack already holds {LETTER_RACK_SIZE} letters"),
            Self::VowelQuota => write!(f, "You need at least {MIN_CONSONANTS} consonants!"),
            Self::ConsonantQuota => write!(f, "You need at least {MIN_VOWELS} vowels!"),
            Self::InvalidLetter(c) => write!(f, "'{c}' is not a letter"),
        }
    }
}

impl std::error::Error for RackError {}

/// Check whether an uppercase letter is a vowel
#[inline]
#[must_use]
pub const fn is_vowel(letter: char) -> bool {
    matches!(letter, 'A' | 'E' | 'I' | 'O' | 'U')
}

/// The letters drawn for one Letters round
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterRack {
    letters: Vec<char>,
    vowels: usize,
    consonants: usize,
}

impl LetterRack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a rack from explicit letters, e.g. from the command line
    ///
    /// Letters are uppercased. The vowel/consonant quota is not enforced here,
    /// only the rack size and that every entry is alphabetic.
    ///
    /// # Errors
    /// Returns `RackError::Full` for more than nine letters and
    /// `RackError::InvalidLetter` for non-alphabetic input.
    ///
    /// # Examples
    /// ```
    /// use countdown::core::LetterRack;
    ///
    /// let rack = LetterRack::from_letters("readyxjqz".chars()).unwrap();
    /// assert!(rack.is_complete());
    /// assert!(rack.can_form("READY"));
    /// ```
    pub fn from_letters(letters: impl IntoIterator<Item = char>) -> Result<Self, RackError> {
        let mut rack = Self::new();
        for letter in letters {
            if !letter.is_alphabetic() {
                return Err(RackError::InvalidLetter(letter));
            }
            if rack.is_complete() {
                return Err(RackError::Full);
            }
            let upper = letter.to_uppercase().next().unwrap_or(letter);
            rack.push(upper);
        }
        Ok(rack)
    }

    /// Draw a random vowel onto the rack
    ///
    /// # Errors
    /// Fails if the rack is full or drawing another vowel would leave no room
    /// for the minimum number of consonants.
    pub fn draw_vowel<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<char, RackError> {
        self.draw(TileKind::Vowel, rng)
    }

    /// Draw a random consonant onto the rack
    ///
    /// # Errors
    /// Fails if the rack is full or drawing another consonant would leave no
    /// room for the minimum number of vowels.
    pub fn draw_consonant<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<char, RackError> {
        self.draw(TileKind::Consonant, rng)
    }

    /// Draw a random tile of the given kind
    ///
    /// # Errors
    /// See [`LetterRack::draw_vowel`] and [`LetterRack::draw_consonant`].
    pub fn draw<R: Rng + ?Sized>(&mut self, kind: TileKind, rng: &mut R) -> Result<char, RackError> {
        if self.is_complete() {
            return Err(RackError::Full);
        }

        let pool = match kind {
            TileKind::Vowel if self.vowels >= LETTER_RACK_SIZE - MIN_CONSONANTS => {
                return Err(RackError::VowelQuota);
            }
            TileKind::Consonant if self.consonants >= LETTER_RACK_SIZE - MIN_VOWELS => {
                return Err(RackError::ConsonantQuota);
            }
            TileKind::Vowel => VOWEL_POOL,
            TileKind::Consonant => CONSONANT_POOL,
        };

        let letter = char::from(pool[rng.random_range(0..pool.len())]);
        self.push(letter);
        Ok(letter)
    }

    fn push(&mut self, letter: char) {
        if is_vowel(letter) {
            self.vowels += 1;
        } else {
            self.consonants += 1;
        }
        self.letters.push(letter);
    }

    #[inline]
    #[must_use]
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.letters.len() >= LETTER_RACK_SIZE
    }

    /// Letters still to be drawn
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        LETTER_RACK_SIZE.saturating_sub(self.letters.len())
    }

    #[inline]
    #[must_use]
    pub const fn vowel_count(&self) -> usize {
        self.vowels
    }

    #[inline]
    #[must_use]
    pub const fn consonant_count(&self) -> usize {
        self.consonants
    }

    /// Check whether `word` can be spelled from this rack
    #[must_use]
    pub fn can_form(&self, word: &str) -> bool {
        can_form_word(word, &self.letters)
    }
}

impl fmt::Display for LetterRack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in &self.letters {
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}

/// Count the uppercased letters of a slice
fn letter_counts(letters: &[char]) -> FxHashMap<char, usize> {
    let mut counts = FxHashMap::default();
    for upper in letters.iter().flat_map(|c| c.to_uppercase()) {
        *counts.entry(upper).or_insert(0) += 1;
    }
    counts
}

/// Check whether `word` is a sub-multiset of `available`
///
/// Comparison is case-insensitive. Each available letter may be used once.
///
/// # Examples
/// ```
/// use countdown::core::can_form_word;
///
/// let letters: Vec<char> = "READYXJQZ".chars().collect();
/// assert!(can_form_word("ready", &letters));
/// assert!(!can_form_word("reader", &letters));
/// ```
#[must_use]
pub fn can_form_word(word: &str, available: &[char]) -> bool {
    let mut counts = letter_counts(available);

    for ch in word.chars().flat_map(char::to_uppercase) {
        match counts.get_mut(&ch) {
            Some(count) if *count > 0 => *count -= 1,
            _ => return false,
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn letters(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn can_form_simple_word() {
        assert!(can_form_word("READY", &letters("READYXJQZ")));
    }

    #[test]
    fn can_form_is_case_insensitive() {
        assert!(can_form_word("ready", &letters("READYXJQZ")));
        assert!(can_form_word("READY", &letters("readyxjqz")));
    }

    #[test]
    fn cannot_reuse_letter() {
        // Only one E available
        assert!(!can_form_word("REED", &letters("READYXJQZ")));
    }

    #[test]
    fn duplicate_letters_available() {
        assert!(can_form_word("REED", &letters("REEDYXJQZ")));
    }

    #[test]
    fn missing_letter_fails() {
        assert!(!can_form_word("BREAD", &letters("READYXJQZ")));
    }

    #[test]
    fn empty_word_is_formable() {
        assert!(can_form_word("", &letters("READYXJQZ")));
    }

    #[test]
    fn matches_count_definition() {
        // can_form iff every letter count in the word fits the rack count
        let rack = letters("AABBCDEEF");
        let words = ["ABBA", "CAFE", "BEEF", "BEEFS", "DECAF", "FACADE", "ABBE", "AAA"];

        for word in words {
            let mut expected = true;
            for c in word.chars() {
                let need = word.chars().filter(|&x| x == c).count();
                let have = rack.iter().filter(|&&x| x == c).count();
                if need > have {
                    expected = false;
                }
            }
            assert_eq!(can_form_word(word, &rack), expected, "word {word}");
        }
    }

    #[test]
    fn from_letters_uppercases() {
        let rack = LetterRack::from_letters("readyxjqz".chars()).unwrap();
        assert_eq!(rack.to_string(), "READYXJQZ");
        // Y counts as a consonant
        assert_eq!(rack.vowel_count(), 2);
        assert_eq!(rack.consonant_count(), 7);
    }

    #[test]
    fn from_letters_rejects_too_many() {
        assert_eq!(
            LetterRack::from_letters("abcdefghij".chars()),
            Err(RackError::Full)
        );
    }

    #[test]
    fn from_letters_rejects_digits() {
        assert_eq!(
            LetterRack::from_letters("abc1".chars()),
            Err(RackError::InvalidLetter('1'))
        );
    }

    #[test]
    fn draws_fill_rack() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut rack = LetterRack::new();

        for _ in 0..4 {
            rack.draw_vowel(&mut rng).unwrap();
        }
        for _ in 0..5 {
            rack.draw_consonant(&mut rng).unwrap();
        }

        assert!(rack.is_complete());
        assert_eq!(rack.remaining(), 0);
        assert!(rack.letters().iter().take(4).all(|&c| is_vowel(c)));
        assert!(rack.letters().iter().skip(4).all(|&c| !is_vowel(c)));
        assert_eq!(rack.draw_vowel(&mut rng), Err(RackError::Full));
    }

    #[test]
    fn consonant_quota_enforced() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut rack = LetterRack::new();

        for _ in 0..6 {
            rack.draw_consonant(&mut rng).unwrap();
        }
        assert_eq!(
            rack.draw_consonant(&mut rng),
            Err(RackError::ConsonantQuota)
        );
        assert!(rack.draw_vowel(&mut rng).is_ok());
    }

    #[test]
    fn vowel_quota_enforced() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut rack = LetterRack::new();

        for _ in 0..5 {
            rack.draw_vowel(&mut rng).unwrap();
        }
        assert_eq!(rack.draw_vowel(&mut rng), Err(RackError::VowelQuota));
        assert!(rack.draw_consonant(&mut rng).is_ok());
    }

    #[test]
    fn pools_only_hold_expected_kinds() {
        assert!(VOWEL_POOL.iter().all(|&b| is_vowel(char::from(b))));
        assert!(CONSONANT_POOL.iter().all(|&b| !is_vowel(char::from(b))));
    }
}
