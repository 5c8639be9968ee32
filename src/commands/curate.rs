//! Dictionary curation command
//!
//! Reads raw word sources from disk or over HTTP, runs the curation pipeline
//! and writes the resulting lists where `--words` can load them. The cleaned
//! reference dictionaries become the game dictionaries; the common-word lists
//! are written beside them.

use crate::curation::{CuratedLists, CurationSources, curate};
use crate::wordlists::loader::{parse_word_lines, write_word_file};
use crate::wordlists::{CONUNDRUMS_FILE_EN, CONUNDRUMS_FILE_FR, WORDS_FILE_EN, WORDS_FILE_FR};
use anyhow::{Context, Result};
use std::convert::Infallible;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Common-word lists, written beside the game dictionaries
pub const ENGLISH_COMMON_FILE: &str = "english_common.txt";
pub const FRENCH_COMMON_FILE: &str = "french_common.txt";

/// Per-request limit for downloaded sources
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Upstream lists used by `--download`
pub const UPSTREAM_ENGLISH_COMMON: &str = "https://raw.githubusercontent.com/first20hours/google-10000-english/master/google-10000-english-usa-no-swears.txt";
pub const UPSTREAM_FRENCH_FREQUENCIES: &str =
    "https://raw.githubusercontent.com/nachocab/words-by-frequency/master/french.txt";
pub const UPSTREAM_NAMES: [&str; 3] = [
    "https://raw.githubusercontent.com/dominictarr/random-name/master/first-names.txt",
    "https://raw.githubusercontent.com/arineng/arincli/master/lib/male-first-names.txt",
    "https://raw.githubusercontent.com/arineng/arincli/master/lib/female-first-names.txt",
];
pub const UPSTREAM_PLACES: &str =
    "https://raw.githubusercontent.com/dbouquin/IS_608/master/NanosatDB_munging/countries.csv";

/// Where one raw list comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Url(String),
}

impl FromStr for Source {
    type Err = Infallible;

    /// `http://` and `https://` prefixes select a download, anything else a file
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(Self::Url(s.to_string()))
        } else {
            Ok(Self::File(PathBuf::from(s)))
        }
    }
}

impl From<&Path> for Source {
    fn from(path: &Path) -> Self {
        Self::File(path.to_path_buf())
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Inputs for a curation run; absent sources are treated as empty
#[derive(Debug, Clone, Default)]
pub struct CurationInputs {
    pub names: Vec<Source>,
    pub places: Option<Source>,
    pub english_common: Option<Source>,
    pub french_frequencies: Option<Source>,
    pub english_reference: Option<Source>,
    pub french_reference: Option<Source>,
    pub english_conundrums: Option<Source>,
}

impl CurationInputs {
    /// Fill the unset name, place and frequency sources with the upstream lists
    ///
    /// Reference dictionaries and conundrum answers have no upstream and are
    /// left as given.
    #[must_use]
    pub fn with_upstream_defaults(mut self) -> Self {
        let url = |s: &str| Source::Url(s.to_string());
        if self.names.is_empty() {
            self.names = UPSTREAM_NAMES.iter().map(|s| url(*s)).collect();
        }
        self.places.get_or_insert_with(|| url(UPSTREAM_PLACES));
        self.english_common
            .get_or_insert_with(|| url(UPSTREAM_ENGLISH_COMMON));
        self.french_frequencies
            .get_or_insert_with(|| url(UPSTREAM_FRENCH_FREQUENCIES));
        self
    }
}

/// Number of words written to each file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurationSummary {
    pub out_dir: PathBuf,
    pub files: Vec<(&'static str, usize)>,
}

async fn read_text(client: &reqwest::Client, source: &Source) -> Result<String> {
    match source {
        Source::File(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Cannot read {}", path.display())),
        Source::Url(url) => {
            tracing::info!(%url, "downloading");
            let response = client
                .get(url)
                .send()
                .await
                .and_then(reqwest::Response::error_for_status)
                .with_context(|| format!("Cannot download {url}"))?;
            response
                .text()
                .await
                .with_context(|| format!("Cannot read the body of {url}"))
        }
    }
}

async fn read_optional(client: &reqwest::Client, source: Option<&Source>) -> Result<String> {
    match source {
        Some(source) => read_text(client, source).await,
        None => Ok(String::new()),
    }
}

async fn read_words(client: &reqwest::Client, source: Option<&Source>) -> Result<Vec<String>> {
    Ok(parse_word_lines(&read_optional(client, source).await?))
}

/// Load every configured source
///
/// # Errors
///
/// Returns an error if a file cannot be read or a download fails.
pub async fn load_sources(inputs: &CurationInputs) -> Result<CurationSources> {
    let client = reqwest::Client::builder()
        .timeout(DOWNLOAD_TIMEOUT)
        .build()
        .context("Cannot build the HTTP client")?;

    let mut names = Vec::with_capacity(inputs.names.len());
    for source in &inputs.names {
        names.push(read_text(&client, source).await?);
    }
    let places = match &inputs.places {
        Some(source) => Some(read_text(&client, source).await?),
        None => None,
    };

    Ok(CurationSources {
        names,
        places,
        english_common: read_optional(&client, inputs.english_common.as_ref()).await?,
        french_frequencies: read_optional(&client, inputs.french_frequencies.as_ref()).await?,
        english_reference: read_words(&client, inputs.english_reference.as_ref()).await?,
        french_reference: read_words(&client, inputs.french_reference.as_ref()).await?,
        english_conundrums: read_words(&client, inputs.english_conundrums.as_ref()).await?,
    })
}

/// Write each curated list into `out_dir`
///
/// # Errors
///
/// Returns an error if a file cannot be written.
pub fn write_lists(lists: &CuratedLists, out_dir: &Path) -> Result<CurationSummary> {
    let outputs: [(&'static str, &[String]); 6] = [
        (WORDS_FILE_EN, &lists.english_all),
        (WORDS_FILE_FR, &lists.french_all),
        (ENGLISH_COMMON_FILE, &lists.english_common),
        (FRENCH_COMMON_FILE, &lists.french_common),
        (CONUNDRUMS_FILE_EN, &lists.english_conundrums),
        (CONUNDRUMS_FILE_FR, &lists.french_conundrums),
    ];

    let mut files = Vec::with_capacity(outputs.len());
    for (name, words) in outputs {
        let path = out_dir.join(name);
        write_word_file(&path, words)
            .with_context(|| format!("Cannot write {}", path.display()))?;
        tracing::info!(file = name, words = words.len(), "list written");
        files.push((name, words.len()));
    }

    Ok(CurationSummary {
        out_dir: out_dir.to_path_buf(),
        files,
    })
}

/// Load, curate and write in one step
///
/// # Errors
///
/// Returns an error if a source cannot be read or an output cannot be written.
pub async fn run_curation(inputs: &CurationInputs, out_dir: &Path) -> Result<CurationSummary> {
    let sources = load_sources(inputs).await?;
    let lists = curate(&sources);
    write_lists(&lists, out_dir)
}
