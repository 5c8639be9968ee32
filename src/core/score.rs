//! Round scoring rules

/// Points for solving the conundrum
pub const CONUNDRUM_SCORE: u32 = 10;

/// Points for hitting the numbers target exactly
pub const NUMBERS_EXACT_SCORE: u32 = 10;

/// Points for finishing within five of the target
pub const NUMBERS_NEAR_SCORE: u32 = 7;

/// Points for finishing within ten of the target
pub const NUMBERS_CLOSE_SCORE: u32 = 5;

/// Score a Letters round word: one point per letter
#[must_use]
pub fn letters_score(word: &str) -> u32 {
    word.chars().count() as u32
}

/// Score a Numbers round result by its distance from the target
///
/// # Examples
/// ```
/// use countdown::core::numbers_score;
///
/// assert_eq!(numbers_score(952, 952), 10);
/// assert_eq!(numbers_score(952, 947), 7);
/// assert_eq!(numbers_score(952, 962), 5);
/// assert_eq!(numbers_score(952, 900), 0);
/// ```
#[must_use]
pub const fn numbers_score(target: i64, result: i64) -> u32 {
    match target.abs_diff(result) {
        0 => NUMBERS_EXACT_SCORE,
        1..=5 => NUMBERS_NEAR_SCORE,
        6..=10 => NUMBERS_CLOSE_SCORE,
        _ => 0,
    }
}
