//! URL extraction from scanned text.

use regex::Regex;

use crate::errors::AppError;
use crate::models::pattern::SearchPattern;

/// Trailing characters stripped from every extracted URL.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ')', ';', ']'];

/// Finds URL-like substrings and keeps only those containing one of the
/// configured marker fragments.
///
/// Compiled once per scan and passed down. Duplicates are kept and order is
/// preserved as found in the text; deduplication is the caller's concern.
pub struct UrlExtractor {
    url_re: Regex,
    markers: Vec<String>,
}

impl UrlExtractor {
    pub fn new(patterns: &[SearchPattern]) -> Result<Self, AppError> {
        let url_re = Regex::new(r#"(?i)https?://[^\s"'<>]+"#)?;
        let markers = patterns
            .iter()
            .map(|p| p.literal().to_lowercase())
            .filter(|m| !m.is_empty())
            .collect();
        Ok(Self { url_re, markers })
    }

    /// All marker-containing URLs in `text`, trailing punctuation stripped.
    /// Empty input yields an empty vec, never an error.
    pub fn extract(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        self.url_re
            .find_iter(text)
            .map(|m| m.as_str().trim_end_matches(TRAILING_PUNCTUATION))
            .filter(|url| {
                let lower = url.to_lowercase();
                self.markers.iter().any(|marker| lower.contains(marker))
            })
            .map(str::to_string)
            .collect()
    }
}
