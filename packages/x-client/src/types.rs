use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Display name used when a tweet's author is missing from `includes.users`.
pub const UNKNOWN_AUTHOR_NAME: &str = "Unknown";
/// Handle used when a tweet's author is missing from `includes.users`.
pub const UNKNOWN_AUTHOR_USERNAME: &str = "unknown";

/// Query parameters for `GET /tweets/search/recent`.
#[derive(Debug, Clone)]
pub struct SearchRecentParams {
    pub query: String,
    /// Page size; the API accepts 10..=100.
    pub max_results: u32,
    pub next_token: Option<String>,
}

impl SearchRecentParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            max_results: 100,
            next_token: None,
        }
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    /// Continue from a previous page. Blank tokens are ignored.
    pub fn with_next_token(mut self, token: Option<&str>) -> Self {
        self.next_token = token
            .filter(|t| !t.trim().is_empty())
            .map(str::to_string);
        self
    }

    /// Query pairs sent to the API, including the author expansion.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("query", self.query.clone()),
            ("max_results", self.max_results.to_string()),
            ("tweet.fields", "created_at,author_id,lang".to_string()),
            ("expansions", "author_id".to_string()),
            ("user.fields", "username,name".to_string()),
        ];
        if let Some(token) = &self.next_token {
            pairs.push(("next_token", token.clone()));
        }
        pairs
    }
}

/// One page of recent-search results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPage {
    /// Absent when the page has no results.
    #[serde(default)]
    pub data: Vec<Tweet>,
    #[serde(default)]
    pub includes: Includes,
    #[serde(default)]
    pub meta: Meta,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tweet {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub author_id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub lang: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Includes {
    #[serde(default)]
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Meta {
    pub next_token: Option<String>,
    pub result_count: Option<u32>,
    pub newest_id: Option<String>,
    pub oldest_id: Option<String>,
}

/// A tweet joined with its expanded author.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthoredTweet {
    pub id: String,
    pub author_id: String,
    pub author_name: String,
    pub author_username: String,
    pub text: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl SearchPage {
    /// Continuation token for the next page, if any.
    pub fn next_token(&self) -> Option<&str> {
        self.meta
            .next_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
    }

    /// Tweets in page order, each joined with its author from `includes.users`.
    pub fn authored_tweets(&self) -> Vec<AuthoredTweet> {
        let users: HashMap<&str, &User> = self
            .includes
            .users
            .iter()
            .filter(|u| !u.id.trim().is_empty())
            .map(|u| (u.id.as_str(), u))
            .collect();

        self.data
            .iter()
            .map(|tweet| {
                let author = users.get(tweet.author_id.as_str());
                AuthoredTweet {
                    id: tweet.id.clone(),
                    author_id: tweet.author_id.clone(),
                    author_name: author
                        .map(|u| u.name.clone())
                        .unwrap_or_else(|| UNKNOWN_AUTHOR_NAME.to_string()),
                    author_username: author
                        .map(|u| u.username.clone())
                        .unwrap_or_else(|| UNKNOWN_AUTHOR_USERNAME.to_string()),
                    text: tweet.text.clone(),
                    created_at: tweet.created_at,
                }
            })
            .collect()
    }
}
