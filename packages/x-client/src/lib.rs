//! Pure X (Twitter) API v2 client.
//!
//! A minimal client for the recent-search endpoint. Pagination is left to the
//! caller: each call returns one page plus its continuation token.
//!
//! # Example
//!
//! ```rust,ignore
//! use x_client::{SearchRecentParams, XClient};
//!
//! let client = XClient::new("bearer-token");
//!
//! let page = client
//!     .search_recent(&SearchRecentParams::new("rust -is:retweet"))
//!     .await?;
//! for tweet in page.authored_tweets() {
//!     println!("@{}: {}", tweet.author_username, tweet.text);
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{Result, XError};
pub use types::{AuthoredTweet, Includes, Meta, SearchPage, SearchRecentParams, Tweet, User};

const BASE_URL: &str = "https://api.x.com/2";
const USER_AGENT: &str = concat!("topic-digest/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct XClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl XClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: token.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different API root (proxies, test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one page of recent tweets matching the query.
    pub async fn search_recent(&self, params: &SearchRecentParams) -> Result<SearchPage> {
        let url = format!("{}/tweets/search/recent", self.base_url);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .query(&params.to_query_pairs())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "X recent search failed");
            return Err(XError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let page: SearchPage = resp.json().await?;
        tracing::debug!(
            results = page.data.len(),
            has_next = page.next_token().is_some(),
            "Fetched recent search page"
        );
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = XClient::new("token").with_base_url("http://localhost:9000/2/");
        assert_eq!(client.base_url(), "http://localhost:9000/2");
    }

    #[test]
    fn test_api_error_message() {
        let err = XError::Api {
            status: 429,
            message: "Too Many Requests".into(),
        };
        assert_eq!(err.to_string(), "X API error: HTTP 429 -> Too Many Requests");
        assert!(!err.is_decode());
    }
}
