//! Remote dictionary fallback
//!
//! Words missing from the local lists are looked up against a public
//! dictionary API. A 2xx response means the word exists.

use crate::core::Language;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use std::fmt;
use std::future::Future;
use std::time::Duration;

/// Public endpoint queried when a word is not in the local lists
pub const DEFAULT_BASE_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries";

/// Request timeout for remote lookups
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Error type for remote lookups
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Remote lookups are turned off
    Disabled,
    /// The request failed before a status was received
    Request(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => write!(f, "Remote dictionary is disabled"),
            Self::Request(msg) => write!(f, "Dictionary request failed: {msg}"),
        }
    }
}

impl std::error::Error for LookupError {}

/// A dictionary consulted when the local word list has no entry
pub trait RemoteDictionary {
    /// Check whether `word` exists in `language`
    ///
    /// `Ok(false)` means the service answered that the word is unknown.
    fn lookup(
        &self,
        word: &str,
        language: Language,
    ) -> impl Future<Output = Result<bool, LookupError>> + Send;
}

/// Lookup against the dictionaryapi.dev HTTP API
#[derive(Debug, Clone)]
pub struct HttpDictionary {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDictionary {
    /// Client for the public endpoint with the default timeout
    ///
    /// # Errors
    /// Fails if the HTTP client cannot be built.
    pub fn new() -> Result<Self, LookupError> {
        Self::with_config(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    /// Client for a custom endpoint and timeout
    ///
    /// # Errors
    /// Fails if the HTTP client cannot be built.
    pub fn with_config(base_url: &str, timeout: Duration) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LookupError::Request(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Request URL for a word
    #[must_use]
    pub fn url(&self, word: &str, language: Language) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            language.code(),
            utf8_percent_encode(word, NON_ALPHANUMERIC)
        )
    }
}

impl RemoteDictionary for HttpDictionary {
    fn lookup(
        &self,
        word: &str,
        language: Language,
    ) -> impl Future<Output = Result<bool, LookupError>> + Send {
        let url = self.url(word, language);
        let client = self.client.clone();

        async move {
            let response = client
                .get(&url)
                .send()
                .await
                .map_err(|e| LookupError::Request(e.to_string()))?;
            let status = response.status();
            tracing::debug!(%url, %status, "remote dictionary response");
            Ok(status.is_success())
        }
    }
}

/// The remote fallback selected at startup
#[derive(Debug, Clone)]
pub enum RemoteFallback {
    Http(HttpDictionary),
    /// Every lookup fails, so only the local lists are consulted
    Disabled,
}

impl RemoteFallback {
    /// HTTP fallback, or disabled when offline or the client cannot be built
    #[must_use]
    pub fn from_offline_flag(offline: bool) -> Self {
        if offline {
            return Self::Disabled;
        }
        match HttpDictionary::new() {
            Ok(http) => Self::Http(http),
            Err(e) => {
                tracing::warn!(error = %e, "remote dictionary unavailable");
                Self::Disabled
            }
        }
    }
}

impl RemoteDictionary for RemoteFallback {
    async fn lookup(&self, word: &str, language: Language) -> Result<bool, LookupError> {
        match self {
            Self::Http(http) => http.lookup(word, language).await,
            Self::Disabled => Err(LookupError::Disabled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_uses_language_code() {
        let http = HttpDictionary::new().unwrap();
        assert_eq!(
            http.url("ready", Language::English),
            "https://api.dictionaryapi.dev/api/v2/entries/en/ready"
        );
    }

    #[test]
    fn url_encodes_accents() {
        let http = HttpDictionary::with_config("http://localhost/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(
            http.url("été", Language::French),
            "http://localhost/fr/%C3%A9t%C3%A9"
        );
    }

    #[tokio::test]
    async fn disabled_fallback_errors() {
        let remote = RemoteFallback::from_offline_flag(true);
        assert_eq!(
            remote.lookup("ready", Language::English).await,
            Err(LookupError::Disabled)
        );
    }
}
