//! Publishing service abstraction and implementations
//!
//! The queue drain only needs two capabilities from the remote service:
//! uploading a media file and publishing a status. Both are expressed by the
//! [`Platform`] trait so that the drain can run against Mastodon in
//! production and against [`mock::MockPlatform`] in tests.
//!
//! # Examples
//!
//! ```no_run
//! use libtooty::platforms::{Platform, StatusRequest, mastodon::MastodonClient};
//!
//! # async fn example() -> libtooty::error::Result<()> {
//! let client = MastodonClient::new(
//!     "https://merveilles.town".to_string(),
//!     "your-access-token".to_string(),
//! )?;
//!
//! let media_id = client.upload_media("cat.png", "a cat", "0,0").await?;
//! let request = StatusRequest {
//!     text: "Hello!".to_string(),
//!     media_ids: vec![media_id],
//!     visibility: "public".to_string(),
//!     ..Default::default()
//! };
//! let status_id = client.post_status(&request).await?;
//! println!("posted ({})", status_id);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::error::Result;

pub mod mastodon;

// Mock platform is available for all builds (not just tests) to support integration tests
pub mod mock;

/// Everything needed to publish one status
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusRequest {
    pub text: String,
    /// Status to reply to; `0` means not a reply
    pub reply_id: i64,
    pub media_ids: Vec<String>,
    pub sensitive: bool,
    pub spoiler_text: String,
    pub visibility: String,
}

/// Publishing service capabilities used by the queue drain
#[async_trait]
pub trait Platform: Send + Sync {
    /// Get the platform name
    fn name(&self) -> &str;

    /// Upload a local media file
    ///
    /// # Arguments
    ///
    /// * `path` - Local path of the file to upload
    /// * `description` - Alt text for the attachment
    /// * `focus` - Focal point as `"x,y"`
    ///
    /// # Returns
    ///
    /// The remote media id to reference when publishing.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Upload` carrying the offending path.
    async fn upload_media(&self, path: &str, description: &str, focus: &str) -> Result<String>;

    /// Publish a status and return its remote id
    async fn post_status(&self, request: &StatusRequest) -> Result<String>;
}
