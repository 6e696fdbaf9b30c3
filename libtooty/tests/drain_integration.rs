//! Integration tests for draining a queue file
//!
//! Runs the whole parse, publish and truncate cycle against the mock
//! platform with queue files in temporary directories.

use std::path::PathBuf;

use libtooty::drain_all;
use libtooty::platforms::mock::MockPlatform;
use libtooty::platforms::StatusRequest;
use libtooty::TootyError;
use tempfile::TempDir;

fn write_queue(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let queue_path = temp_dir.path().join("example.txt");
    std::fs::write(&queue_path, contents).unwrap();
    (temp_dir, queue_path)
}

#[tokio::test]
async fn test_empty_queue_publishes_nothing() {
    let (_temp_dir, queue_path) = write_queue("  \n\n ");
    let platform = MockPlatform::success();
    let mut out = Vec::new();

    let summary = drain_all(&queue_path, &platform, &mut out).await.unwrap();

    assert_eq!(summary.published, 0);
    assert_eq!(platform.post_call_count(), 0);
    assert!(out.is_empty());
    assert_eq!(std::fs::read_to_string(&queue_path).unwrap(), "");
}

#[tokio::test]
async fn test_drain_publishes_in_file_order_and_truncates() {
    let raw = "\
+mode: unlisted
+reply: 123456789
+media: /path/to/img.png;a photo of a cat
first line of the post body
second line
---
next post's body, no headers
";
    let (_temp_dir, queue_path) = write_queue(raw);
    let platform = MockPlatform::success();
    let mut out = Vec::new();

    let summary = drain_all(&queue_path, &platform, &mut out).await.unwrap();

    assert_eq!(summary.published, 2);
    assert_eq!(
        platform.posts(),
        vec![
            StatusRequest {
                text: "first line of the post body\nsecond line".to_string(),
                reply_id: 123_456_789,
                media_ids: vec![MockPlatform::media_id_for("/path/to/img.png")],
                sensitive: false,
                spoiler_text: String::new(),
                visibility: "unlisted".to_string(),
            },
            StatusRequest {
                text: "next post's body, no headers".to_string(),
                reply_id: 0,
                media_ids: vec![],
                sensitive: false,
                spoiler_text: String::new(),
                visibility: "public".to_string(),
            },
        ]
    );

    let printed = String::from_utf8(out).unwrap();
    assert_eq!(
        printed,
        "posted (101)\n\
         in reply to 123456789\n\
         first line of the post body\n\
         second line\n\
         attachments: /path/to/img.png (a photo of a cat)\n\
         posted (102)\n\
         next post's body, no headers\n"
    );
    assert_eq!(std::fs::read_to_string(&queue_path).unwrap(), "");
}

#[tokio::test]
async fn test_media_ids_follow_header_order() {
    let (_temp_dir, queue_path) = write_queue("+media: a.png;first\n+media: b.png;second\nbody\n");
    let platform = MockPlatform::success();
    let mut out = Vec::new();

    drain_all(&queue_path, &platform, &mut out).await.unwrap();

    let uploads = platform.uploads();
    assert_eq!(uploads.len(), 2);
    assert_eq!(uploads[0].path, "a.png");
    assert_eq!(uploads[1].path, "b.png");
    assert!(uploads.iter().all(|u| u.focus == "0,0"));

    assert_eq!(
        platform.posts()[0].media_ids,
        vec![
            MockPlatform::media_id_for("a.png"),
            MockPlatform::media_id_for("b.png")
        ]
    );
}

#[tokio::test]
async fn test_publish_failure_leaves_queue_untouched() {
    let raw = "post one\n---\npost two\n---\npost three\n";
    let (_temp_dir, queue_path) = write_queue(raw);
    let platform = MockPlatform::post_failure(2, "HTTP 503 Service Unavailable");
    let mut out = Vec::new();

    let result = drain_all(&queue_path, &platform, &mut out).await;

    assert!(matches!(result, Err(TootyError::Platform(_))));
    // The third post is never attempted
    assert_eq!(platform.post_call_count(), 2);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "posted (101)\npost one\n"
    );
    assert_eq!(std::fs::read_to_string(&queue_path).unwrap(), raw);
}

#[tokio::test]
async fn test_upload_failure_reports_path_and_keeps_queue() {
    let raw = "+media: missing.png;gone\nbody\n";
    let (_temp_dir, queue_path) = write_queue(raw);
    let platform = MockPlatform::upload_failure("missing.png", "No such file");
    let mut out = Vec::new();

    let err = drain_all(&queue_path, &platform, &mut out)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("missing.png"));
    assert_eq!(platform.post_call_count(), 0);
    assert_eq!(std::fs::read_to_string(&queue_path).unwrap(), raw);
}

#[tokio::test]
async fn test_malformed_media_header_is_reported() {
    let raw = "+media: no-description.png\nbody\n";
    let (_temp_dir, queue_path) = write_queue(raw);
    let platform = MockPlatform::success();
    let mut out = Vec::new();

    let err = drain_all(&queue_path, &platform, &mut out)
        .await
        .unwrap_err();

    assert_eq!(err.exit_code(), 3);
    assert!(platform.uploads().is_empty());
    assert_eq!(std::fs::read_to_string(&queue_path).unwrap(), raw);
}
