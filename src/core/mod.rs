//! Core domain types for Countdown
//!
//! Tile racks, languages and scoring rules. Everything here is pure and has no
//! I/O; randomness is always passed in by the caller.

mod language;
mod letters;
mod numbers;
mod score;

pub use language::{Language, LanguageError, strip_accents};
pub use letters::{
    LETTER_RACK_SIZE, LetterRack, MIN_CONSONANTS, MIN_VOWELS, RackError, TileKind, can_form_word,
    is_vowel,
};
pub use numbers::{
    LARGE_NUMBERS, MAX_LARGE, NUMBER_RACK_SIZE, NumberError, NumberRack, SMALL_COPIES, is_large,
};
pub use score::{
    CONUNDRUM_SCORE, NUMBERS_CLOSE_SCORE, NUMBERS_EXACT_SCORE, NUMBERS_NEAR_SCORE, letters_score,
    numbers_score,
};
