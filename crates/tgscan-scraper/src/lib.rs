pub mod client;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod pacing;
pub mod source;
pub mod types;

pub use client::{ClientConfig, TgtgClient};
pub use error::ScraperError;
pub use normalize::normalize_item;
pub use pacing::{FailureKind, PacingPolicy};
pub use source::ItemSource;
