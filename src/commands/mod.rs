pub mod cache;
pub mod status;

pub use cache::*;
pub use status::*;
