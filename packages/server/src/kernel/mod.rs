//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use deps::{
    DigestSettings, OpenAIAdapter, OpenAIModerationAdapter, ServerDeps, XSearchAdapter,
    TARGET_UNIQUE_AUTHORS,
};
pub use test_dependencies::{
    mock_post, MockAI, MockSafetyClassifier, MockSearchProvider, SearchCallArgs, TestDependencies,
};
pub use traits::*;
