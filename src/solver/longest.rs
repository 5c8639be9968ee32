//! Longest word search for the Letters round

use crate::core::{Language, can_form_word};
use crate::wordlists::Lexicon;

/// Find the longest dictionary word that can be spelled from `letters`
///
/// Scans the language's words from longest to shortest and returns the first
/// one the rack can form, uppercased. Among words of equal length the list
/// order decides.
///
/// # Examples
/// ```
/// use countdown::core::Language;
/// use countdown::solver::find_longest_word;
/// use countdown::wordlists::{Lexicon, WordList};
///
/// let english = WordList::new(Language::English, ["dare", "ready", "zebra"], Vec::<&str>::new());
/// let lexicon = Lexicon::new(english, WordList::default());
/// let letters: Vec<char> = "READYXJQZ".chars().collect();
///
/// assert_eq!(
///     find_longest_word(&lexicon, &letters, Language::English).as_deref(),
///     Some("READY")
/// );
/// ```
#[must_use]
pub fn find_longest_word(lexicon: &Lexicon, letters: &[char], language: Language) -> Option<String> {
    lexicon
        .words(language)
        .by_length()
        .iter()
        .find(|word| can_form_word(word, letters))
        .map(|word| word.to_uppercase())
}
