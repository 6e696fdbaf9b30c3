//! Core types for Tooty

use std::fmt;

/// Visibility applied when a queued post does not set `+mode`
pub const DEFAULT_VISIBILITY: &str = "public";

/// An attachment requested by a `+media` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    pub path: String,
    pub description: String,
}

impl Media {
    pub fn new(path: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            description: description.into(),
        }
    }
}

impl fmt::Display for Media {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.path, self.description)
    }
}

/// One queued post, as read from a block of the queue file
///
/// `media_ids` stays empty until the media uploader has run; afterwards it
/// holds one remote id per entry of `media`, in the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Post {
    pub text: Vec<String>,
    pub visibility: String,
    pub media: Vec<Media>,
    pub media_ids: Vec<String>,
    pub reply_id: i64,
}

impl Post {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_replying(&self) -> bool {
        self.reply_id > 0
    }

    pub fn has_media(&self) -> bool {
        !self.media.is_empty()
    }

    /// Fill in `public` when no visibility was requested
    pub fn default_visibility(&mut self) {
        if self.visibility.is_empty() {
            self.visibility = DEFAULT_VISIBILITY.to_string();
        }
    }

    /// Status text: body lines joined with newlines, surrounding whitespace trimmed
    pub fn contents(&self) -> String {
        self.text.join("\n").trim().to_string()
    }
}
