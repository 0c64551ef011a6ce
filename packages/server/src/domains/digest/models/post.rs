use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use x_client::AuthoredTweet;

/// A social post as returned by the search provider, joined with its author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub author_id: String,
    /// Display name
    pub author_name: String,
    /// Handle without the leading `@`
    pub author_username: String,
    pub text: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<AuthoredTweet> for Post {
    fn from(tweet: AuthoredTweet) -> Self {
        Self {
            id: tweet.id,
            author_id: tweet.author_id,
            author_name: tweet.author_name,
            author_username: tweet.author_username,
            text: tweet.text,
            created_at: tweet.created_at,
        }
    }
}
