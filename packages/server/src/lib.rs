// Topic Digest - API Core
//
// This crate turns a free-text topic into a digest of recent posts from unique
// authors: an extractive (or model-written) summary, ranked keywords and a
// moderated suggested post, cached per topic and served over JSON and SSE.

pub mod common;
pub mod config;
pub mod domains;
pub mod error;
pub mod kernel;
pub mod server;

pub use config::*;
pub use error::{DigestError, DigestResult};
