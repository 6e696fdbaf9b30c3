//! Queue draining
//!
//! Publishes every post in the queue file in file order, then empties the
//! file. Any failure stops the run before the file is touched, so posts
//! published earlier in the run stay queued and are sent again next time.

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::platforms::Platform;
use crate::poster;
use crate::queue::parse_queue;

/// Outcome of a completed drain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainSummary {
    pub published: usize,
}

/// Publish every queued post and truncate the queue file
///
/// Each confirmation is written to `out` as soon as its post is published.
///
/// # Errors
///
/// Returns the first error hit while reading, parsing, publishing or
/// truncating. The queue file is left unchanged in every case except a
/// failed truncate.
pub async fn drain_all<W: Write>(
    queue_path: &Path,
    platform: &dyn Platform,
    out: &mut W,
) -> Result<DrainSummary> {
    let raw = std::fs::read_to_string(queue_path)?;
    let posts = parse_queue(&raw)?;
    info!(
        queue = %queue_path.display(),
        count = posts.len(),
        "Draining queue"
    );

    let mut summary = DrainSummary::default();
    for mut post in posts {
        let confirmation = poster::send(&mut post, platform).await?;
        writeln!(out, "{}", confirmation)?;
        summary.published += 1;
    }

    clear_queue(queue_path)?;
    info!(published = summary.published, "Queue drained");

    Ok(summary)
}

/// Truncate the queue file
pub fn clear_queue(queue_path: &Path) -> Result<()> {
    std::fs::write(queue_path, "")?;
    Ok(())
}
