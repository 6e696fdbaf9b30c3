//! Queue file parsing
//!
//! The queue is a plain text file of posts separated by `---`. Each block may
//! start with a run of header lines that set metadata for the post:
//!
//! ```text
//! +mode: unlisted
//! +reply: 123456789
//! +media: /path/to/img.png;a photo of a cat
//! first line of the post body
//! second line
//! ---
//! next post's body, no headers
//! ```
//!
//! Headers are only recognized as a contiguous prefix of the block. The first
//! line that is not a `+` line ends the header section, and every line after
//! it (including ones starting with `+`) is body text.

use tracing::debug;

use crate::error::{QueueError, Result};
use crate::types::{Media, Post};

/// Separator between queued posts
pub const DELIMITER: &str = "---";

/// A `+key: value` header line split into its parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

/// Parse the raw contents of a queue file into posts, in file order
///
/// Whitespace-only input yields no posts.
///
/// # Errors
///
/// Returns `QueueError::InvalidReply` when a `+reply` value is not a base-10
/// integer and `QueueError::MalformedMedia` when a `+media` value has no `;`.
pub fn parse_queue(raw: &str) -> Result<Vec<Post>> {
    let contents = raw.trim();
    if contents.is_empty() {
        return Ok(Vec::new());
    }

    contents.split(DELIMITER).map(parse_block).collect()
}

/// Parse one delimiter-separated block into a post
pub fn parse_block(block: &str) -> Result<Post> {
    // The line break right after a delimiter belongs to it, not to the body
    let block = block
        .strip_prefix("\r\n")
        .or_else(|| block.strip_prefix('\n'))
        .unwrap_or(block);

    let mut post = Post::new();
    let mut headers_finished = false;

    for line in block.lines() {
        if !headers_finished && line.starts_with('+') {
            post.apply_header(line)?;
        } else {
            headers_finished = true;
            post.text.push(line.to_string());
        }
    }

    Ok(post)
}

/// Match a line against the header grammar
///
/// A header is `+`, an optional whitespace character, a key made of word
/// characters, `:`, an optional whitespace character, then the value (the
/// rest of the line, which may contain further colons).
pub fn parse_header(line: &str) -> Option<Header<'_>> {
    let rest = line.strip_prefix('+')?;
    let rest = skip_one_whitespace(rest);

    let key_len = rest
        .find(|c: char| !is_word_char(c))
        .unwrap_or(rest.len());
    if key_len == 0 {
        return None;
    }

    let (key, rest) = rest.split_at(key_len);
    let rest = rest.strip_prefix(':')?;
    let value = skip_one_whitespace(rest);

    Some(Header { key, value })
}

fn skip_one_whitespace(s: &str) -> &str {
    match s.chars().next() {
        Some(c) if c.is_ascii_whitespace() => &s[c.len_utf8()..],
        _ => s,
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl Post {
    /// Apply a header line to this post
    ///
    /// Lines that do not match the header grammar and unknown keys are
    /// ignored.
    pub fn apply_header(&mut self, line: &str) -> Result<()> {
        let Some(header) = parse_header(line) else {
            debug!(line, "Dropping unrecognized header line");
            return Ok(());
        };

        match header.key {
            "reply" => {
                self.reply_id =
                    header
                        .value
                        .parse::<i64>()
                        .map_err(|source| QueueError::InvalidReply {
                            value: header.value.to_string(),
                            source,
                        })?;
            }
            "mode" => {
                self.visibility = header.value.to_string();
            }
            "media" => {
                let (path, description) =
                    header
                        .value
                        .split_once(';')
                        .ok_or_else(|| QueueError::MalformedMedia {
                            value: header.value.to_string(),
                        })?;
                self.media.push(Media::new(path, description));
            }
            other => {
                debug!(key = other, "Ignoring unknown header");
                return Ok(());
            }
        }

        debug!(key = header.key, value = header.value, "Applied header");
        Ok(())
    }
}
