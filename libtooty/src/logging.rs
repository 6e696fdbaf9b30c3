//! Logging setup for tooty
//!
//! Events always go to stderr so that stdout only carries publish
//! confirmations. A scheduled run stays quiet at the default `warn` level.
//!
//! ```bash
//! TOOTY_LOG_LEVEL=debug TOOTY_LOG_FORMAT=json tooty
//! ```

use tracing_subscriber::EnvFilter;

pub const DEFAULT_LEVEL: &str = "warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Plain lines without targets, for cron mail and terminals
    #[default]
    Text,
    /// One JSON object per line
    Json,
    /// Multi-line output with source locations
    Pretty,
}

impl LogFormat {
    /// Look up a format by name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "text" => Some(LogFormat::Text),
            "json" => Some(LogFormat::Json),
            "pretty" => Some(LogFormat::Pretty),
            _ => None,
        }
    }
}

/// Format and level for the stderr subscriber
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub format: LogFormat,
    pub level: String,
}

impl LogSettings {
    /// Build settings from raw `TOOTY_LOG_FORMAT` / `TOOTY_LOG_LEVEL` values
    ///
    /// Missing or unknown formats fall back to text; a missing level falls
    /// back to [`DEFAULT_LEVEL`].
    pub fn from_vars(format: Option<&str>, level: Option<&str>) -> Self {
        Self {
            format: format.and_then(LogFormat::from_name).unwrap_or_default(),
            level: level.unwrap_or(DEFAULT_LEVEL).to_string(),
        }
    }

    pub fn from_env() -> Self {
        let format = std::env::var("TOOTY_LOG_FORMAT").ok();
        let level = std::env::var("TOOTY_LOG_LEVEL").ok();
        Self::from_vars(format.as_deref(), level.as_deref())
    }

    /// Install the global subscriber; `RUST_LOG` overrides the level
    ///
    /// # Panics
    ///
    /// Panics if a global subscriber is already installed
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr);

        match self.format {
            LogFormat::Json => builder.json().flatten_event(true).init(),
            LogFormat::Pretty => builder.pretty().with_file(true).with_line_number(true).init(),
            LogFormat::Text => builder.with_target(false).init(),
        }
    }
}

/// Initialize logging from the environment
pub fn init_default() {
    LogSettings::from_env().init();
}
