//! Nimbus Navigation
//!
//! Address bar input resolution and the durable navigation history log.
//!
//! Input resolution is purely syntactic:
//! 1. Absolute URL → returned as-is
//! 2. Host-like input (`example.com`) → scheme-prefixed URL
//! 3. Anything else → search query via a `%s` template

mod error;
mod history;
mod normalize;
pub mod percent;

pub use error::NavigationError;
pub use history::{HistoryLog, HistoryRecord};
pub use normalize::AddressNormalizer;

pub type Result<T> = std::result::Result<T, NavigationError>;
