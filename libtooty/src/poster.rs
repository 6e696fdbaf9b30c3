//! Per-post publishing pipeline
//!
//! Publishing a queued post runs these steps in order, and stops at the
//! first failure:
//!
//! 1. default the visibility to `public`
//! 2. upload attachments, in header order
//! 3. compose the status text
//! 4. publish the status
//!
//! There is no retry and no rollback. A post that fails midway is abandoned
//! in whatever state it reached.

use std::fmt;

use tracing::{debug, info};

use crate::error::Result;
use crate::platforms::{Platform, StatusRequest};
use crate::types::{Media, Post};

/// Focal point sent with every upload
pub const DEFAULT_FOCUS: &str = "0,0";

/// What was published for one queued post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub status_id: String,
    /// Status replied to; `0` when the post is not a reply
    pub reply_id: i64,
    pub contents: String,
    pub media: Vec<Media>,
}

impl fmt::Display for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "posted ({})", self.status_id)?;
        if self.reply_id > 0 {
            writeln!(f, "in reply to {}", self.reply_id)?;
        }
        write!(f, "{}", self.contents)?;
        if !self.media.is_empty() {
            let attachments: Vec<String> = self.media.iter().map(Media::to_string).collect();
            write!(f, "\nattachments: {}", attachments.join(", "))?;
        }
        Ok(())
    }
}

/// Upload every attachment of `post`, recording the remote ids in order
///
/// Does nothing when the post has no media. The first failed upload aborts
/// the rest; ids gathered before it are discarded.
pub async fn upload_media(post: &mut Post, platform: &dyn Platform) -> Result<()> {
    if !post.has_media() {
        return Ok(());
    }

    let mut media_ids = Vec::with_capacity(post.media.len());
    for media in &post.media {
        debug!(path = %media.path, platform = platform.name(), "Uploading media");
        let media_id = platform
            .upload_media(&media.path, &media.description, DEFAULT_FOCUS)
            .await?;
        media_ids.push(media_id);
    }

    post.media_ids = media_ids;
    Ok(())
}

/// Publish one queued post
pub async fn send(post: &mut Post, platform: &dyn Platform) -> Result<Confirmation> {
    post.default_visibility();
    upload_media(post, platform).await?;

    let contents = post.contents();
    let request = StatusRequest {
        text: contents.clone(),
        reply_id: post.reply_id,
        media_ids: post.media_ids.clone(),
        sensitive: false,
        spoiler_text: String::new(),
        visibility: post.visibility.clone(),
    };

    let status_id = platform.post_status(&request).await?;
    info!(
        status_id = %status_id,
        visibility = %post.visibility,
        platform = platform.name(),
        "Published status"
    );

    Ok(Confirmation {
        status_id,
        reply_id: if post.is_replying() { post.reply_id } else { 0 },
        contents,
        media: post.media.clone(),
    })
}
