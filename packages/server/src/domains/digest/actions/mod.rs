//! Digest domain actions - entry-point business logic
//!
//! Called directly from the HTTP handlers and the CLI. Actions take the raw
//! topic plus `ServerDeps` and return the final `DigestResponse`.

pub mod fetch_posts;
pub mod generate;
pub mod llm_summary;
pub mod moderate;
pub mod summarize;

pub use fetch_posts::{build_query, fetch_recent_unique_authors, MAX_SEARCH_PAGES, SEARCH_PAGE_SIZE};
pub use generate::{generate_digest, run_pipeline, validate_topic, DigestProgress};
pub use llm_summary::summarize_with_model;
pub use moderate::{moderate_suggested_post, WITHHELD_NOTICE};
pub use summarize::{summarize, EXTRACTIVE_MODEL, SUGGESTED_POST_MAX_CHARS};
