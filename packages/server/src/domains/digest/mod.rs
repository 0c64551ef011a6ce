pub mod actions;
pub mod cache;
pub mod models;

pub use actions::{generate_digest, run_pipeline, DigestProgress};
pub use cache::ResponseCache;
pub use models::{DigestResponse, ModerationResult, Post, SummaryBackend, SummaryResult};
