//! Game language
//!
//! Each language carries its own word list, conundrum answers and alphabet.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported dictionary languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    French,
}

/// Error type for unrecognized language codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageError(pub String);

impl fmt::Display for LanguageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown language '{}' (expected 'en' or 'fr')", self.0)
    }
}

impl std::error::Error for LanguageError {}

impl Language {
    pub const ALL: [Self; 2] = [Self::English, Self::French];

    /// Two-letter code used by the remote dictionary endpoint
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::French => "fr",
        }
    }

    /// Check whether a lowercase letter belongs to this language's alphabet
    ///
    /// French additionally accepts the accented Latin-1 range `à`..=`ÿ`.
    #[must_use]
    pub fn is_letter(self, c: char) -> bool {
        match self {
            Self::English => c.is_ascii_lowercase(),
            Self::French => c.is_ascii_lowercase() || (('à'..='ÿ').contains(&c) && c != '÷'),
        }
    }

    /// Check whether every character of a lowercase word is in the alphabet
    #[must_use]
    pub fn is_in_alphabet(self, word: &str) -> bool {
        !word.is_empty() && word.chars().all(|c| self.is_letter(c))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = LanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Self::English),
            "fr" | "french" | "français" | "francais" => Ok(Self::French),
            other => Err(LanguageError(other.to_string())),
        }
    }
}

/// Replace French accented vowels and cedilla with their bare letters
///
/// Only the lowercase forms are mapped; callers lowercase first.
#[must_use]
pub fn strip_accents(word: &str) -> String {
    word.chars()
        .map(|c| match c {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
            'è' | 'é' | 'ê' | 'ë' => 'e',
            'ì' | 'í' | 'î' | 'ï' => 'i',
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
            'ù' | 'ú' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_codes_and_names() {
        assert_eq!("en".parse::<Language>(), Ok(Language::English));
        assert_eq!("FR".parse::<Language>(), Ok(Language::French));
        assert_eq!("French".parse::<Language>(), Ok(Language::French));
        assert!("de".parse::<Language>().is_err());
    }

    #[test]
    fn display_uses_code() {
        assert_eq!(Language::English.to_string(), "en");
        assert_eq!(Language::French.to_string(), "fr");
    }

    #[test]
    fn strip_accents_maps_vowels_and_cedilla() {
        assert_eq!(strip_accents("été"), "ete");
        assert_eq!(strip_accents("garçon"), "garcon");
        assert_eq!(strip_accents("forêt"), "foret");
        assert_eq!(strip_accents("àáâãäå"), "aaaaaa");
        assert_eq!(strip_accents("ìíîïòóôõöùúûü"), "iiiiooooouuuu");
    }

    #[test]
    fn strip_accents_leaves_plain_words() {
        assert_eq!(strip_accents("maison"), "maison");
        assert_eq!(strip_accents(""), "");
    }

    #[test]
    fn french_alphabet_allows_accents() {
        assert!(Language::French.is_in_alphabet("pâtissier"));
        assert!(!Language::English.is_in_alphabet("pâtissier"));
        assert!(Language::English.is_in_alphabet("chocolate"));
    }

    #[test]
    fn alphabet_rejects_digits_and_divide_sign() {
        assert!(!Language::French.is_in_alphabet("abc1"));
        assert!(!Language::French.is_in_alphabet("a÷b"));
        assert!(!Language::English.is_in_alphabet(""));
    }
}
