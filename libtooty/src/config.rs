//! Configuration for Tooty
//!
//! Tooty runs against one account with fixed file locations, so the
//! configuration is a set of constants rather than a file.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

pub const DEFAULT_QUEUE_PATH: &str = "./example.txt";
pub const DEFAULT_CREDENTIALS_PATH: &str = "./creds.json";
pub const DEFAULT_INSTANCE: &str = "https://merveilles.town";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Queue file drained on each run
    pub queue_path: PathBuf,
    /// JSON file holding the application and user credentials
    pub credentials_path: PathBuf,
    /// Mastodon instance the account lives on
    pub instance: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            queue_path: PathBuf::from(DEFAULT_QUEUE_PATH),
            credentials_path: PathBuf::from(DEFAULT_CREDENTIALS_PATH),
            instance: DEFAULT_INSTANCE.to_string(),
        }
    }
}

/// Application and user credentials
///
/// ```json
/// { "key": "<app id>", "secret": "<app secret>", "token": "<user access token>" }
/// ```
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub key: String,
    pub secret: String,
    pub token: String,
}

impl Credentials {
    /// Load credentials from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let credentials = serde_json::from_str(content).map_err(ConfigError::DecodeError)?;
        Ok(credentials)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"[REDACTED]")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TootyError;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_uses_fixed_paths() {
        let config = Config::default();
        assert_eq!(config.queue_path, PathBuf::from("./example.txt"));
        assert_eq!(config.credentials_path, PathBuf::from("./creds.json"));
        assert_eq!(config.instance, "https://merveilles.town");
    }

    #[test]
    fn test_load_credentials() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("creds.json");
        std::fs::write(
            &path,
            r#"{ "key": "app-id", "secret": "app-secret", "token": "user-token" }"#,
        )
        .unwrap();

        let credentials = Credentials::load(&path).unwrap();
        assert_eq!(credentials.key, "app-id");
        assert_eq!(credentials.secret, "app-secret");
        assert_eq!(credentials.token, "user-token");
    }

    #[test]
    fn test_load_missing_credentials_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = Credentials::load(&temp_dir.path().join("missing.json"));

        match result {
            Err(TootyError::Config(ConfigError::ReadError(_))) => {}
            other => panic!("Expected ReadError, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_credentials_json() {
        let result = Credentials::from_json(r#"{ "key": "app-id" "#);

        match result {
            Err(TootyError::Config(ConfigError::DecodeError(_))) => {}
            other => panic!("Expected DecodeError, got {:?}", other),
        }
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let credentials = Credentials::from_json(
            r#"{ "key": "app-id", "secret": "app-secret", "token": "user-token" }"#,
        )
        .unwrap();
        let debug = format!("{:?}", credentials);

        assert!(debug.contains("app-id"));
        assert!(!debug.contains("app-secret"));
        assert!(!debug.contains("user-token"));
    }
}
