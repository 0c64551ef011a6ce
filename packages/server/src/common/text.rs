//! Text normalization helpers shared by keyword extraction and excerpt rendering.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref URL_REGEX: Regex = Regex::new(r"https?://\S+").unwrap();

    // ASCII word characters only, so "@josé" leaves the "é" behind like any other symbol
    static ref MENTION_REGEX: Regex = Regex::new(r"@[A-Za-z0-9_]+").unwrap();

    static ref NON_ALPHANUMERIC_REGEX: Regex = Regex::new(r"[^a-zA-Z0-9\s]").unwrap();
}

/// Reduce raw post text to space-separated ASCII alphanumeric words.
///
/// URLs and `@mentions` are removed, `#` markers are dropped (the tag word is
/// kept), every other symbol becomes a space, and whitespace is collapsed.
/// The output is a fixed point: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let without_urls = URL_REGEX.replace_all(text, " ");
    let without_mentions = MENTION_REGEX.replace_all(&without_urls, " ");
    let without_hashes = without_mentions.replace('#', "");
    let alphanumeric = NON_ALPHANUMERIC_REGEX.replace_all(&without_hashes, " ");
    collapse_whitespace(&alphanumeric)
}

/// Collapse whitespace runs to a single space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Shorten `text` to at most `max` characters.
///
/// Cut text ends in `...` unless `max` is too small to hold one.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let head: String = text.chars().take(max - 3).collect();
    format!("{}...", head.trim_end())
}
