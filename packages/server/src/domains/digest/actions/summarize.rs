//! Extractive summarization: keyword frequency, post ranking, rendered text.
//!
//! Output is fully determined by the input posts and their order, so the same
//! batch always yields the same keywords, excerpts and suggested post.

use indexmap::IndexMap;

use crate::common::{collapse_whitespace, normalize, truncate};
use crate::domains::digest::models::{Post, SummaryResult};

/// Model name reported for digests produced without a language model.
pub const EXTRACTIVE_MODEL: &str = "extractive";

pub const MAX_KEYWORDS: usize = 8;
pub const MAX_REPRESENTATIVE_POSTS: usize = 4;
pub const SUGGESTED_POST_MAX_CHARS: usize = 280;

const SUMMARY_EXCERPT_MAX_CHARS: usize = 120;
const POST_EXCERPT_MAX_CHARS: usize = 80;
const POST_KEYWORDS: usize = 4;
const MAX_HASHTAGS: usize = 2;
const MIN_TOKEN_CHARS: usize = 3;
const FALLBACK_POST_BODY: &str = "recent discussion and opinions";

const STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "if", "then", "than", "so", "to", "of", "for", "in",
    "on", "at", "by", "with", "about", "as", "is", "are", "was", "were", "be", "been", "being",
    "it", "its", "this", "that", "these", "those", "i", "you", "he", "she", "they", "we", "me",
    "my", "your", "our", "their", "them", "from", "into", "out", "up", "down", "over", "under",
    "again", "more", "most", "very", "can", "could", "should", "would", "will", "just", "not",
    "no", "yes", "do", "does", "did", "doing", "rt", "via", "amp", "t", "s",
];

/// Lowercase token to occurrence count, in first-seen order.
type KeywordTable = IndexMap<String, usize>;

struct RankedPost<'a> {
    post: &'a Post,
    score: usize,
}

fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

fn lowercase_tokens(normalized: &str) -> impl Iterator<Item = String> + '_ {
    normalized.split_whitespace().map(str::to_lowercase)
}

fn keyword_table(normalized_texts: &[String]) -> KeywordTable {
    let mut table = KeywordTable::new();
    for text in normalized_texts {
        for token in lowercase_tokens(text) {
            if token.chars().count() < MIN_TOKEN_CHARS || is_stopword(&token) {
                continue;
            }
            *table.entry(token).or_insert(0) += 1;
        }
    }
    table
}

/// Most frequent tokens first; equal counts keep first-seen order.
fn top_keywords(table: &KeywordTable, limit: usize) -> Vec<String> {
    let mut entries: Vec<(&String, &usize)> = table.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1));
    entries
        .into_iter()
        .take(limit)
        .map(|(token, _)| token.clone())
        .collect()
}

/// Highest aggregate keyword score first; equal scores keep fetch order.
fn rank_posts<'a>(posts: &'a [Post], table: &KeywordTable, limit: usize) -> Vec<RankedPost<'a>> {
    let mut ranked: Vec<RankedPost<'a>> = posts
        .iter()
        .map(|post| {
            let normalized = normalize(&post.text);
            let score = lowercase_tokens(&normalized)
                .map(|token| table.get(&token).copied().unwrap_or(0))
                .sum();
            RankedPost { post, score }
        })
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked.truncate(limit);
    ranked
}

/// Posts that best cover the batch's frequent keywords, best first.
pub fn representative_posts(posts: &[Post]) -> Vec<Post> {
    let table = keyword_table(&normalized_nonempty(posts));
    rank_posts(posts, &table, MAX_REPRESENTATIVE_POSTS)
        .into_iter()
        .map(|ranked| ranked.post.clone())
        .collect()
}

fn normalized_nonempty(posts: &[Post]) -> Vec<String> {
    posts
        .iter()
        .map(|post| normalize(&post.text))
        .filter(|text| !text.is_empty())
        .collect()
}

fn render_summary(topic: &str, keywords: &[String], excerpts: &[String]) -> String {
    let mut summary = format!("Summary for \"{}\": ", topic);
    if !keywords.is_empty() {
        summary.push_str(&format!("Key themes include {}. ", keywords.join(", ")));
    }
    if !excerpts.is_empty() {
        let quoted: Vec<String> = excerpts.iter().map(|e| format!("\"{}\"", e)).collect();
        summary.push_str(&format!("Representative points: {}.", quoted.join("; ")));
    }
    summary
}

fn render_hashtags(keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .map(|keyword| {
            keyword
                .chars()
                .filter(char::is_ascii_alphanumeric)
                .collect::<String>()
        })
        .filter(|tag| tag.len() >= MIN_TOKEN_CHARS)
        .take(MAX_HASHTAGS)
        .map(|tag| format!("#{}", tag))
        .collect()
}

fn render_suggested_post(topic: &str, keywords: &[String], representative: &[Post]) -> String {
    let body = if !keywords.is_empty() {
        keywords
            .iter()
            .take(POST_KEYWORDS)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    } else if let Some(first) = representative.first() {
        truncate(&collapse_whitespace(&first.text), POST_EXCERPT_MAX_CHARS)
    } else {
        FALLBACK_POST_BODY.to_string()
    };

    let mut post = format!("Quick roundup on {}: {}. What do you think?", topic, body);
    let hashtags = render_hashtags(keywords);
    if !hashtags.is_empty() {
        post.push(' ');
        post.push_str(&hashtags.join(" "));
    }
    truncate(&post, SUGGESTED_POST_MAX_CHARS)
}

/// Build a digest for `topic` from `posts` without any network calls.
pub fn summarize(topic: &str, posts: &[Post]) -> SummaryResult {
    let table = keyword_table(&normalized_nonempty(posts));
    let keywords = top_keywords(&table, MAX_KEYWORDS);
    let representative: Vec<Post> = rank_posts(posts, &table, MAX_REPRESENTATIVE_POSTS)
        .into_iter()
        .map(|ranked| ranked.post.clone())
        .collect();

    let excerpts: Vec<String> = representative
        .iter()
        .map(|post| truncate(&collapse_whitespace(&post.text), SUMMARY_EXCERPT_MAX_CHARS))
        .collect();

    SummaryResult {
        summary: render_summary(topic, &keywords, &excerpts),
        suggested_post: render_suggested_post(topic, &keywords, &representative),
        keywords,
        bullets: excerpts,
        representative_posts: representative,
    }
}
