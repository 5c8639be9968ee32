//! Word list loading utilities
//!
//! Word files hold one word per line; blank lines and `#` comments are skipped.

use std::fs;
use std::io;
use std::path::Path;

/// Parse the lines of a word file into lowercase words
#[must_use]
pub fn parse_word_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect()
}

/// Load words from a file
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read or opened.
///
/// # Examples
/// ```no_run
/// use countdown::wordlists::loader::load_from_file;
///
/// let words = load_from_file("data/english.txt").unwrap();
/// println!("Loaded {} words", words.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(parse_word_lines(&content))
}

/// Load words from a file without blocking the runtime
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read or opened.
pub async fn load_from_file_async<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(parse_word_lines(&content))
}

/// Convert an embedded string slice to owned words
#[must_use]
pub fn words_from_slice(slice: &[&str]) -> Vec<String> {
    slice.iter().map(|s| s.to_lowercase()).collect()
}

/// Write words one per line, creating parent directories as needed
///
/// # Errors
///
/// Returns an I/O error if the directory or file cannot be written.
pub fn write_word_file<P: AsRef<Path>>(path: P, words: &[String]) -> io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut content = words.join("\n");
    content.push('\n');
    fs::write(path, content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_skips_blank_and_comment_lines() {
        let words = parse_word_lines("# header\nCrane\n\n  slate  \n#note\nirate\n");
        assert_eq!(words, vec!["crane", "slate", "irate"]);
    }

    #[test]
    fn words_from_slice_lowercases() {
        let words = words_from_slice(&["READY", "été"]);
        assert_eq!(words, vec!["ready", "été"]);
    }

    #[test]
    fn words_from_slice_empty() {
        let input: &[&str] = &[];
        assert!(words_from_slice(input).is_empty());
    }

    #[test]
    fn write_then_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("words.txt");
        let words = vec!["alpha".to_string(), "beta".to_string()];

        write_word_file(&path, &words).unwrap();
        assert_eq!(load_from_file(&path).unwrap(), words);
    }

    #[test]
    fn load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_from_file(dir.path().join("missing.txt")).is_err());
    }

    #[tokio::test]
    async fn async_load_matches_sync() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, "one\ntwo\n").unwrap();

        let words = load_from_file_async(&path).await.unwrap();
        assert_eq!(words, load_from_file(&path).unwrap());
    }
}
