//! Tooty - drain a queue file of posts to Mastodon
//!
//! This library parses the queue file format, publishes each queued post
//! through a [`platforms::Platform`], and empties the queue once every post
//! has been published.

pub mod config;
pub mod drain;
pub mod error;
pub mod logging;
pub mod platforms;
pub mod poster;
pub mod queue;
pub mod types;

// Re-export commonly used types
pub use config::{Config, Credentials};
pub use drain::{drain_all, DrainSummary};
pub use error::{Result, TootyError};
pub use queue::parse_queue;
pub use types::{Media, Post};
