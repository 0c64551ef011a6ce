// Business domains
pub mod digest;
