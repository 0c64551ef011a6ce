//! Paginated fetch of recent posts, one per author.

use indexmap::map::Entry;
use indexmap::IndexMap;
use tracing::{debug, info};

use crate::domains::digest::models::Post;
use crate::error::DigestResult;
use crate::kernel::BaseSearchProvider;

/// Hard stop on pagination regardless of how many authors were found.
pub const MAX_SEARCH_PAGES: usize = 5;

/// Posts requested per page.
pub const SEARCH_PAGE_SIZE: u32 = 100;

/// Search query for a topic. Reposts are excluded upstream.
pub fn build_query(topic: &str) -> String {
    format!("{} -is:retweet", topic)
}

/// Fetch up to `target_count` recent posts about `topic`, keeping only the
/// first post seen from each author.
///
/// Posts come back in provider order. Paging stops once the target is
/// reached, when the provider has no further pages, or after
/// [`MAX_SEARCH_PAGES`] pages. A provider error aborts the fetch.
pub async fn fetch_recent_unique_authors(
    search: &dyn BaseSearchProvider,
    topic: &str,
    target_count: usize,
) -> DigestResult<Vec<Post>> {
    if target_count == 0 {
        return Ok(Vec::new());
    }

    let query = build_query(topic);
    let mut by_author: IndexMap<String, Post> = IndexMap::new();
    let mut next_token: Option<String> = None;

    for page in 1..=MAX_SEARCH_PAGES {
        let result = search
            .search_page(&query, SEARCH_PAGE_SIZE, next_token.as_deref())
            .await?;

        for post in result.posts {
            if by_author.len() >= target_count {
                break;
            }
            if let Entry::Vacant(slot) = by_author.entry(post.author_id.clone()) {
                slot.insert(post);
            }
        }

        debug!(
            topic = %topic,
            page,
            unique_authors = by_author.len(),
            "Fetched search page"
        );

        if by_author.len() >= target_count {
            break;
        }

        next_token = result.next_token.filter(|token| !token.trim().is_empty());
        if next_token.is_none() {
            break;
        }
    }

    info!(
        topic = %topic,
        unique_authors = by_author.len(),
        "Fetched posts from unique authors"
    );

    Ok(by_author.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DigestError;
    use crate::kernel::{mock_post, MockSearchProvider};
    use std::collections::HashSet;

    fn page_of(prefix: &str, authors: std::ops::Range<usize>) -> Vec<Post> {
        authors
            .map(|i| mock_post(&format!("{}-{}", prefix, i), &format!("a{}", i), "hello"))
            .collect()
    }

    #[tokio::test]
    async fn test_zero_target_never_calls_provider() {
        let search = MockSearchProvider::new().with_page(page_of("p", 0..3), None);

        let posts = fetch_recent_unique_authors(&search, "rust", 0).await.unwrap();

        assert!(posts.is_empty());
        assert_eq!(search.call_count(), 0);
    }

    #[tokio::test]
    async fn test_first_post_per_author_wins() {
        let search = MockSearchProvider::new().with_page(
            vec![
                mock_post("1", "alice", "first from alice"),
                mock_post("2", "bob", "first from bob"),
                mock_post("3", "alice", "second from alice"),
                mock_post("4", "carol", "first from carol"),
            ],
            None,
        );

        let posts = fetch_recent_unique_authors(&search, "rust", 50).await.unwrap();

        let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "4"]);
    }

    #[tokio::test]
    async fn test_query_and_continuation_token_forwarded() {
        let search = MockSearchProvider::new()
            .with_page(page_of("p1", 0..2), Some("tok-2"))
            .with_page(page_of("p2", 2..4), None);

        let posts = fetch_recent_unique_authors(&search, "rust lang", 50)
            .await
            .unwrap();

        assert_eq!(posts.len(), 4);
        let calls = search.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].query, "rust lang -is:retweet");
        assert_eq!(calls[0].page_size, SEARCH_PAGE_SIZE);
        assert_eq!(calls[0].next_token, None);
        assert_eq!(calls[1].next_token.as_deref(), Some("tok-2"));
    }

    #[tokio::test]
    async fn test_stops_mid_page_at_target() {
        let search = MockSearchProvider::new()
            .with_page(page_of("p", 0..10), Some("more"))
            .with_page(page_of("q", 10..20), None);

        let posts = fetch_recent_unique_authors(&search, "rust", 3).await.unwrap();

        let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p-0", "p-1", "p-2"]);
        assert_eq!(search.call_count(), 1);
    }

    #[tokio::test]
    async fn test_blank_token_ends_pagination() {
        let search = MockSearchProvider::new()
            .with_page(page_of("p", 0..2), Some("  "))
            .with_page(page_of("q", 2..4), None);

        let posts = fetch_recent_unique_authors(&search, "rust", 50).await.unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(search.call_count(), 1);
    }

    #[tokio::test]
    async fn test_terminates_after_max_pages() {
        // every page repeats the same author and always offers another page
        let search = MockSearchProvider::new()
            .repeating_page(vec![mock_post("1", "only", "again")], Some("forever"));

        let posts = fetch_recent_unique_authors(&search, "rust", 50).await.unwrap();

        assert_eq!(posts.len(), 1);
        assert_eq!(search.call_count(), MAX_SEARCH_PAGES);
    }

    #[tokio::test]
    async fn test_provider_error_discards_partial_results() {
        let search = MockSearchProvider::new()
            .with_page(page_of("p", 0..5), Some("next"))
            .with_error(DigestError::Upstream("X API error: HTTP 429 -> slow down".into()));

        let err = fetch_recent_unique_authors(&search, "rust", 50)
            .await
            .unwrap_err();

        assert!(matches!(err, DigestError::Upstream(_)));
        assert_eq!(search.call_count(), 2);
    }

    #[tokio::test]
    async fn test_bounds_and_uniqueness_across_pages() {
        let mut search = MockSearchProvider::new();
        for page in 0..5 {
            // authors overlap between consecutive pages
            let start = page * 15;
            search = search.with_page(page_of(&format!("pg{}", page), start..start + 30), Some("next"));
        }

        let posts = fetch_recent_unique_authors(&search, "rust", 50).await.unwrap();

        assert_eq!(posts.len(), 50);
        let authors: HashSet<_> = posts.iter().map(|p| p.author_id.as_str()).collect();
        assert_eq!(authors.len(), posts.len());
        // a0..a29 come from the first page, a30..a44 from the second
        assert_eq!(posts[0].id, "pg0-0");
        assert_eq!(posts[30].id, "pg1-30");
    }
}
