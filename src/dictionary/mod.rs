//! Dictionary lookup for submitted words
//!
//! Local word lists are consulted first. Only a miss reaches the remote
//! fallback, and any remote failure counts as "not a word".

mod remote;

pub use remote::{
    DEFAULT_BASE_URL, DEFAULT_TIMEOUT, HttpDictionary, LookupError, RemoteDictionary,
    RemoteFallback,
};

use crate::core::{Language, strip_accents};
use crate::wordlists::Lexicon;

/// Word validation over a loaded lexicon with a remote fallback
#[derive(Debug, Clone)]
pub struct Dictionary<'a, R> {
    lexicon: &'a Lexicon,
    remote: R,
}

impl<'a, R: RemoteDictionary> Dictionary<'a, R> {
    #[must_use]
    pub const fn new(lexicon: &'a Lexicon, remote: R) -> Self {
        Self { lexicon, remote }
    }

    #[inline]
    #[must_use]
    pub const fn lexicon(&self) -> &'a Lexicon {
        self.lexicon
    }

    /// Check the local lists only
    ///
    /// French words also match with their accents removed.
    #[must_use]
    pub fn contains_locally(&self, word: &str, language: Language) -> bool {
        let lower = word.trim().to_lowercase();
        if self.lexicon.contains(&lower, language) {
            return true;
        }
        if language == Language::French {
            let bare = strip_accents(&lower);
            return bare != lower && self.lexicon.contains(&bare, language);
        }
        false
    }

    /// Check whether `word` is a real word in `language`
    ///
    /// Never fails: a network error or unexpected response means `false`.
    pub async fn is_valid_word(&self, word: &str, language: Language) -> bool {
        let lower = word.trim().to_lowercase();
        if lower.is_empty() {
            return false;
        }
        if self.contains_locally(&lower, language) {
            return true;
        }

        match self.remote_lookup(&lower, language).await {
            Some(true) => true,
            Some(false) if language == Language::French => {
                let bare = strip_accents(&lower);
                bare != lower && self.remote_lookup(&bare, language).await == Some(true)
            }
            // A failed request ends the lookup
            Some(false) | None => false,
        }
    }

    /// Remote answer for one word; `None` when the request failed
    async fn remote_lookup(&self, word: &str, language: Language) -> Option<bool> {
        match self.remote.lookup(word, language).await {
            Ok(found) => Some(found),
            Err(e) => {
                tracing::debug!(word, %language, error = %e, "remote lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::WordList;
    use std::future::Future;
    use std::sync::Mutex;

    /// Remote that answers from a fixed list and records every query
    #[derive(Default)]
    struct MockRemote {
        known: Vec<&'static str>,
        fail: bool,
        queries: Mutex<Vec<String>>,
    }

    impl MockRemote {
        fn queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    impl RemoteDictionary for &MockRemote {
        fn lookup(
            &self,
            word: &str,
            _language: Language,
        ) -> impl Future<Output = Result<bool, LookupError>> + Send {
            self.queries.lock().unwrap().push(word.to_string());
            let result = if self.fail {
                Err(LookupError::Request("connection refused".to_string()))
            } else {
                Ok(self.known.iter().any(|known| *known == word))
            };
            async move { result }
        }
    }

    fn lexicon() -> Lexicon {
        Lexicon::new(
            WordList::new(Language::English, ["ready", "dear"], Vec::<&str>::new()),
            WordList::new(Language::French, ["ete", "café"], Vec::<&str>::new()),
        )
    }

    #[tokio::test]
    async fn local_hit_skips_remote() {
        let lex = lexicon();
        let remote = MockRemote::default();
        let dict = Dictionary::new(&lex, &remote);

        assert!(dict.is_valid_word("READY", Language::English).await);
        assert!(remote.queries().is_empty());
    }

    #[tokio::test]
    async fn unknown_word_with_failing_remote_is_invalid() {
        let lex = lexicon();
        let remote = MockRemote {
            fail: true,
            ..MockRemote::default()
        };
        let dict = Dictionary::new(&lex, &remote);

        assert!(!dict.is_valid_word("zzzzz", Language::English).await);
        assert_eq!(remote.queries(), ["zzzzz"]);
    }

    #[tokio::test]
    async fn remote_hit_is_valid() {
        let lex = lexicon();
        let remote = MockRemote {
            known: vec!["yard"],
            ..MockRemote::default()
        };
        let dict = Dictionary::new(&lex, &remote);

        assert!(dict.is_valid_word("Yard", Language::English).await);
        assert!(!dict.is_valid_word("yardz", Language::English).await);
    }

    #[tokio::test]
    async fn french_accent_stripped_locally() {
        let lex = lexicon();
        let remote = MockRemote::default();
        let dict = Dictionary::new(&lex, &remote);

        assert!(dict.is_valid_word("été", Language::French).await);
        assert!(dict.contains_locally("ÉTÉ", Language::French));
        assert!(remote.queries().is_empty());
    }

    #[tokio::test]
    async fn accents_not_stripped_for_english() {
        let lex = lexicon();
        let remote = MockRemote::default();
        let dict = Dictionary::new(&lex, &remote);

        assert!(!dict.contains_locally("réady", Language::English));
    }

    #[tokio::test]
    async fn french_remote_tries_accented_then_bare() {
        let lex = lexicon();
        let remote = MockRemote {
            known: vec!["noel"],
            ..MockRemote::default()
        };
        let dict = Dictionary::new(&lex, &remote);

        assert!(dict.is_valid_word("noël", Language::French).await);
        assert_eq!(remote.queries(), ["noël", "noel"]);
    }

    #[tokio::test]
    async fn french_failed_request_skips_bare_form() {
        let lex = lexicon();
        let remote = MockRemote {
            fail: true,
            ..MockRemote::default()
        };
        let dict = Dictionary::new(&lex, &remote);

        assert!(!dict.is_valid_word("noël", Language::French).await);
        assert_eq!(remote.queries(), ["noël"]);
    }

    #[tokio::test]
    async fn french_without_accents_queries_once() {
        let lex = lexicon();
        let remote = MockRemote::default();
        let dict = Dictionary::new(&lex, &remote);

        assert!(!dict.is_valid_word("xyz", Language::French).await);
        assert_eq!(remote.queries(), ["xyz"]);
    }

    #[tokio::test]
    async fn empty_word_is_invalid() {
        let lex = lexicon();
        let remote = MockRemote::default();
        let dict = Dictionary::new(&lex, &remote);

        assert!(!dict.is_valid_word("   ", Language::English).await);
        assert!(remote.queries().is_empty());
    }
}
