//! Conundrum command

use crate::core::Language;
use crate::solver::ConundrumPuzzle;
use crate::wordlists::Lexicon;
use anyhow::{Context, Result};
use rand::Rng;

/// Scramble `answer`, or draw a random answer from the lexicon
///
/// # Errors
///
/// Returns an error if the given answer is not a nine-letter word in the
/// language's alphabet, or the language has no conundrum answers.
pub fn draw_conundrum<R: Rng + ?Sized>(
    lexicon: &Lexicon,
    language: Language,
    answer: Option<&str>,
    rng: &mut R,
) -> Result<ConundrumPuzzle> {
    match answer {
        Some(answer) => ConundrumPuzzle::new(answer, language, rng)
            .with_context(|| format!("Cannot use '{answer}' as a conundrum")),
        None => ConundrumPuzzle::draw(lexicon, language, rng).context("Cannot draw a conundrum"),
    }
}
