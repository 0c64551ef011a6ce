//! Test fixtures for building post batches.

use digest_core::domains::digest::models::Post;
use digest_core::kernel::mock_post;

/// Three authors who all talk about memory safety.
pub fn rust_programming_posts() -> Vec<Post> {
    vec![
        mock_post(
            "101",
            "alice",
            "Rust gives you memory safety without a GC. Memory bugs are compile errors.",
        ),
        mock_post(
            "102",
            "bob",
            "Ownership makes memory management explicit; memory safety is the payoff",
        ),
        mock_post(
            "103",
            "carol",
            "Fearless concurrency plus memory safety. The memory model is strict but fair",
        ),
    ]
}

/// `count` posts, each from a different author.
pub fn distinct_author_posts(prefix: &str, count: usize) -> Vec<Post> {
    (0..count)
        .map(|i| {
            mock_post(
                &format!("{}-{}", prefix, i),
                &format!("{}-author-{}", prefix, i),
                "tokio async runtime benchmarks",
            )
        })
        .collect()
}
