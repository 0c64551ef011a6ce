pub mod moderation;
pub mod post;
pub mod response;
pub mod summary;

pub use moderation::ModerationResult;
pub use post::Post;
pub use response::DigestResponse;
pub use summary::{SummaryBackend, SummaryResult, UnknownSummaryBackend};
