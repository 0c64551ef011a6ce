// HTTP routes
pub mod generate;
pub mod health;
pub mod stream;

pub use generate::*;
pub use health::*;
pub use stream::*;
