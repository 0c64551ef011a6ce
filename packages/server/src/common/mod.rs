// Common utilities shared across the application

pub mod text;

pub use text::{collapse_whitespace, normalize, truncate};
