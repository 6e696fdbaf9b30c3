//! Mastodon platform implementation
//!
//! Uploads media and publishes statuses through the megalodon library.

use async_trait::async_trait;
use megalodon::entities::{StatusVisibility, UploadMedia};
use megalodon::megalodon::{PostStatusInputOptions, PostStatusOutput, UploadMediaInputOptions};
use megalodon::{Megalodon, SNS};
use tracing::debug;

use crate::config::Credentials;
use crate::error::{PlatformError, Result};
use crate::platforms::{Platform, StatusRequest};

/// Mastodon platform client
///
/// The client is created once per run and shared by reference for every
/// upload and publish call.
pub struct MastodonClient {
    /// The megalodon client for API interactions
    client: Box<dyn Megalodon + Send + Sync>,

    /// The instance URL (e.g., "https://merveilles.town")
    instance_url: String,
}

impl MastodonClient {
    /// Create a new Mastodon client
    ///
    /// # Arguments
    ///
    /// * `instance_url` - The base URL of the Mastodon instance
    /// * `access_token` - OAuth access token for authentication
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use libtooty::platforms::mastodon::MastodonClient;
    ///
    /// # fn example() -> libtooty::error::Result<()> {
    /// let client = MastodonClient::new(
    ///     "https://merveilles.town".to_string(),
    ///     "your-access-token".to_string()
    /// )?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(instance_url: String, access_token: String) -> Result<Self> {
        let instance_url = normalize_instance_url(&instance_url);
        let client = megalodon::generator(
            SNS::Mastodon,
            instance_url.clone(),
            Some(access_token),
            None,
        )
        .map_err(|e| {
            PlatformError::Authentication(format!("Failed to create Mastodon client: {:?}", e))
        })?;

        Ok(Self {
            client,
            instance_url,
        })
    }

    /// Create a client for `instance` using the user token from `credentials`
    pub fn from_credentials(instance: &str, credentials: &Credentials) -> Result<Self> {
        Self::new(instance.to_string(), credentials.token.clone())
    }

    pub fn instance_url(&self) -> &str {
        &self.instance_url
    }
}

#[async_trait]
impl Platform for MastodonClient {
    fn name(&self) -> &str {
        "mastodon"
    }

    async fn upload_media(&self, path: &str, description: &str, focus: &str) -> Result<String> {
        let options = UploadMediaInputOptions {
            description: Some(description.to_string()),
            focus: Some(focus.to_string()),
        };

        let response = self
            .client
            .upload_media(path.to_string(), Some(&options))
            .await
            .map_err(|e| upload_error(path, map_megalodon_error(e, "upload media")))?;

        let media_id = match response.json {
            UploadMedia::Attachment(attachment) => attachment.id,
            UploadMedia::AsyncAttachment(attachment) => attachment.id,
        };
        debug!(path, media_id = %media_id, "Uploaded media");

        Ok(media_id)
    }

    async fn post_status(&self, request: &StatusRequest) -> Result<String> {
        let options = status_options(request)?;

        let response = self
            .client
            .post_status(request.text.clone(), Some(&options))
            .await
            .map_err(|e| map_megalodon_error(e, "post status"))?;

        let status_id = match response.json {
            PostStatusOutput::Status(status) => status.id,
            PostStatusOutput::ScheduledStatus(scheduled) => scheduled.id,
        };

        Ok(status_id)
    }
}

/// Translate a status request into megalodon's option set
///
/// Non-positive reply ids, empty media lists and empty spoiler text are left unset.
fn status_options(request: &StatusRequest) -> Result<PostStatusInputOptions> {
    Ok(PostStatusInputOptions {
        media_ids: (!request.media_ids.is_empty()).then(|| request.media_ids.clone()),
        in_reply_to_id: (request.reply_id > 0).then(|| request.reply_id.to_string()),
        sensitive: Some(request.sensitive),
        spoiler_text: (!request.spoiler_text.is_empty()).then(|| request.spoiler_text.clone()),
        visibility: Some(parse_visibility(&request.visibility)?),
        ..Default::default()
    })
}

/// Attach the failing path to an upload error
///
/// Authentication failures keep their variant so a bad token exits the same
/// way whether or not the post carried media.
fn upload_error(path: &str, error: PlatformError) -> PlatformError {
    match error {
        PlatformError::Authentication(message) => {
            PlatformError::Authentication(format!("{} (uploading {})", message, path))
        }
        other => PlatformError::Upload {
            path: path.to_string(),
            message: other.to_string(),
        },
    }
}

/// Map a queue `mode` value onto a Mastodon visibility level
fn parse_visibility(visibility: &str) -> Result<StatusVisibility> {
    match visibility {
        "public" => Ok(StatusVisibility::Public),
        "unlisted" => Ok(StatusVisibility::Unlisted),
        "private" => Ok(StatusVisibility::Private),
        "direct" => Ok(StatusVisibility::Direct),
        other => Err(PlatformError::Validation(format!(
            "Unknown Mastodon visibility '{}'. \
                Suggestion: Use one of public, unlisted, private or direct.",
            other
        ))
        .into()),
    }
}

/// Ensure instance URL has an http(s):// prefix
fn normalize_instance_url(instance: &str) -> String {
    if instance.starts_with("http://") || instance.starts_with("https://") {
        instance.trim_end_matches('/').to_string()
    } else {
        format!("https://{}", instance.trim_end_matches('/'))
    }
}

/// Map megalodon errors to PlatformError
///
/// # Error Mapping
///
/// - HTTP 401/403 → `PlatformError::Authentication` (OAuth token issues)
/// - HTTP 422 → `PlatformError::Validation` (content validation failures)
/// - HTTP 429 → `PlatformError::RateLimit` (rate limit exceeded)
/// - HTTP 5xx and anything else → `PlatformError::Network`
fn map_megalodon_error(error: megalodon::error::Error, context: &str) -> PlatformError {
    let error_str = error.to_string();
    let error_lower = error_str.to_lowercase();

    match extract_http_status(&error_str) {
        Some(401) | Some(403) => PlatformError::Authentication(format!(
            "Mastodon authentication failed ({}): {}. \
                    Suggestion: Verify the token in your credentials file is valid and has not expired.",
            context, error_str
        )),
        Some(422) => PlatformError::Validation(format!(
            "Mastodon validation failed ({}): {}",
            context, error_str
        )),
        Some(429) => PlatformError::RateLimit(format!(
            "Mastodon rate limit exceeded ({}): {}. \
                    Suggestion: Wait a few minutes before running again.",
            context, error_str
        )),
        Some(500..=599) => PlatformError::Network(format!(
            "Mastodon server error ({}): {}",
            context, error_str
        )),
        Some(_) => {
            PlatformError::Network(format!("Mastodon HTTP error ({}): {}", context, error_str))
        }
        None => {
            if error_lower.contains("unauthorized") || error_lower.contains("forbidden") {
                PlatformError::Authentication(format!(
                    "Mastodon authentication failed ({}): {}",
                    context, error_str
                ))
            } else if error_lower.contains("parse")
                || error_lower.contains("json")
                || error_lower.contains("deserialize")
            {
                PlatformError::Posting(format!(
                    "Mastodon response parse error ({}): {}",
                    context, error_str
                ))
            } else {
                PlatformError::Network(format!(
                    "Mastodon error ({}): {}. \
                        Suggestion: Check your network connection and instance availability.",
                    context, error_str
                ))
            }
        }
    }
}

/// Extract HTTP status code from error message
///
/// Looks for patterns like "HTTP 401" or "status 403".
fn extract_http_status(error_str: &str) -> Option<u16> {
    ["HTTP ", "status ", "code: ", "status_code: "]
        .iter()
        .filter_map(|prefix| error_str.find(prefix).map(|pos| &error_str[pos + prefix.len()..]))
        .filter_map(|rest| rest.get(0..3)?.parse::<u16>().ok())
        .find(|code| (100..=599).contains(code))
}
