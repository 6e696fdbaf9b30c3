//! Mock platform implementation for testing
//!
//! This module provides a configurable, deterministic publishing service. It
//! records every call it receives so tests can verify ordering, and it can be
//! told to reject a particular upload or publish call.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::error::{PlatformError, Result};
use crate::platforms::{Platform, StatusRequest};

/// One recorded `upload_media` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCall {
    pub path: String,
    pub description: String,
    pub focus: String,
}

/// Configuration for mock platform behavior
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Platform name
    pub name: String,

    /// Uploads of this path fail
    pub failing_upload: Option<String>,

    /// The publish call with this 1-based index fails
    pub failing_post: Option<usize>,

    /// Error message returned by a failing call
    pub error: String,

    /// Uploads that have been made, in call order
    pub uploads: Arc<Mutex<Vec<UploadCall>>>,

    /// Publish calls that have been made, in call order
    pub posts: Arc<Mutex<Vec<StatusRequest>>>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            name: "mock".to_string(),
            failing_upload: None,
            failing_post: None,
            error: "Mock failure".to_string(),
            uploads: Arc::new(Mutex::new(Vec::new())),
            posts: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Mock platform for testing
pub struct MockPlatform {
    config: MockConfig,
}

impl MockPlatform {
    /// Create a new mock platform with the given configuration
    pub fn new(config: MockConfig) -> Self {
        Self { config }
    }

    /// Create a mock platform that always succeeds
    pub fn success() -> Self {
        Self::new(MockConfig::default())
    }

    /// Create a mock platform that rejects uploads of `path`
    pub fn upload_failure(path: &str, error: &str) -> Self {
        Self::new(MockConfig {
            failing_upload: Some(path.to_string()),
            error: error.to_string(),
            ..Default::default()
        })
    }

    /// Create a mock platform whose `nth` publish call (1-based) fails
    pub fn post_failure(nth: usize, error: &str) -> Self {
        Self::new(MockConfig {
            failing_post: Some(nth),
            error: error.to_string(),
            ..Default::default()
        })
    }

    /// Media id the mock assigns to an upload of `path`
    pub fn media_id_for(path: &str) -> String {
        format!("media:{}", path)
    }

    /// All uploads received so far
    pub fn uploads(&self) -> Vec<UploadCall> {
        self.config.uploads.lock().unwrap().clone()
    }

    /// All publish calls received so far, including a failed one
    pub fn posts(&self) -> Vec<StatusRequest> {
        self.config.posts.lock().unwrap().clone()
    }

    pub fn post_call_count(&self) -> usize {
        self.config.posts.lock().unwrap().len()
    }
}

#[async_trait]
impl Platform for MockPlatform {
    fn name(&self) -> &str {
        &self.config.name
    }

    async fn upload_media(&self, path: &str, description: &str, focus: &str) -> Result<String> {
        self.config.uploads.lock().unwrap().push(UploadCall {
            path: path.to_string(),
            description: description.to_string(),
            focus: focus.to_string(),
        });

        if self.config.failing_upload.as_deref() == Some(path) {
            return Err(PlatformError::Upload {
                path: path.to_string(),
                message: self.config.error.clone(),
            }
            .into());
        }

        Ok(Self::media_id_for(path))
    }

    async fn post_status(&self, request: &StatusRequest) -> Result<String> {
        let call_number = {
            let mut posts = self.config.posts.lock().unwrap();
            posts.push(request.clone());
            posts.len()
        };

        if self.config.failing_post == Some(call_number) {
            return Err(PlatformError::Posting(self.config.error.clone()).into());
        }

        Ok(format!("{}", 100 + call_number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_success() {
        let platform = MockPlatform::success();
        assert_eq!(platform.name(), "mock");

        let media_id = platform.upload_media("a.png", "first", "0,0").await.unwrap();
        assert_eq!(media_id, "media:a.png");

        let request = StatusRequest {
            text: "Test content".to_string(),
            media_ids: vec![media_id],
            visibility: "public".to_string(),
            ..Default::default()
        };
        let status_id = platform.post_status(&request).await.unwrap();
        assert_eq!(status_id, "101");

        assert_eq!(
            platform.uploads(),
            vec![UploadCall {
                path: "a.png".to_string(),
                description: "first".to_string(),
                focus: "0,0".to_string(),
            }]
        );
        assert_eq!(platform.posts(), vec![request]);
    }

    #[tokio::test]
    async fn test_mock_upload_failure() {
        let platform = MockPlatform::upload_failure("b.png", "file too large");

        assert!(platform.upload_media("a.png", "ok", "0,0").await.is_ok());

        let err = platform.upload_media("b.png", "bad", "0,0").await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("b.png"));
        assert!(message.contains("file too large"));
    }

    #[tokio::test]
    async fn test_mock_post_failure_on_second_call() {
        let platform = MockPlatform::post_failure(2, "Network error");
        let request = StatusRequest::default();

        assert!(platform.post_status(&request).await.is_ok());
        let err = platform.post_status(&request).await.unwrap_err();
        assert!(err.to_string().contains("Network error"));
        assert!(platform.post_status(&request).await.is_ok());
        assert_eq!(platform.post_call_count(), 3);
    }
}
