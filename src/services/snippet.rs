//! Bounded, whitespace-normalized context snippets around match locations.

use crate::models::pattern::SearchPattern;

const ELLIPSIS: char = '…';

/// Minimum context on each side of a match, regardless of snippet length.
const MIN_HALF_WINDOW: usize = 20;

/// Collapse all whitespace runs to single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whitespace-collapsed text, cut to `max_len` chars with a trailing
/// ellipsis when it does not fit.
pub fn trim_text(text: &str, max_len: usize) -> String {
    let collapsed = collapse_whitespace(text);
    if collapsed.chars().count() <= max_len {
        return collapsed;
    }
    let mut cut: String = collapsed.chars().take(max_len.saturating_sub(1)).collect();
    cut.push(ELLIPSIS);
    cut
}

/// Snippet centered on the first occurrence of `url` in `text`, falling back
/// to plain truncation when the URL is not found.
pub fn from_url(text: &str, url: &str, max_len: usize) -> String {
    match find_ci(text, url) {
        Some(start) => context_snippet(text, start, url.len(), max_len),
        None => trim_text(text, max_len),
    }
}

/// Snippet centered on the earliest occurrence of any pattern literal
/// (wildcards stripped), falling back to plain truncation when none occurs.
///
/// The in-memory search is ASCII case-insensitive while the engine's LIKE
/// match may not be; rows matched by one and not the other fall back to
/// plain truncation here.
pub fn from_patterns(text: &str, patterns: &[SearchPattern], max_len: usize) -> String {
    let earliest = patterns
        .iter()
        .filter_map(|p| {
            let literal = p.literal();
            if literal.is_empty() {
                None
            } else {
                find_ci(text, &literal)
            }
        })
        .min();
    match earliest {
        Some(start) => context_snippet(text, start, 0, max_len),
        None => trim_text(text, max_len),
    }
}

/// Windowed context around a match at byte offset `start` of length
/// `match_len`: up to `max(20, max_len / 2)` bytes of context on each side,
/// clamped to the text, with an ellipsis on each clamped side.
pub fn context_snippet(text: &str, start: usize, match_len: usize, max_len: usize) -> String {
    let half = (max_len / 2).max(MIN_HALF_WINDOW);
    let mut from = start.saturating_sub(half);
    let mut to = (start + match_len + half).min(text.len());
    while from > 0 && !text.is_char_boundary(from) {
        from -= 1;
    }
    while to < text.len() && !text.is_char_boundary(to) {
        to += 1;
    }

    let window = collapse_whitespace(&text[from..to]);
    let mut out = String::with_capacity(window.len() + 8);
    if from > 0 {
        out.push(ELLIPSIS);
    }
    out.push_str(&window);
    if to < text.len() {
        out.push(ELLIPSIS);
    }
    out
}

/// ASCII case-insensitive substring search returning a byte offset.
fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}
