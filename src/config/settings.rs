//! Client configuration settings
//!
//! Defines configuration structures and environment loading logic

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Production API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.mailbreeze.com";
/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Extra attempts after the first one for retryable failures
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Main SDK configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct Settings {
    /// MailBreeze API key (`sk_live_...` / `sk_test_...`)
    pub api_key: String,
    /// API base URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum retries for retryable failures
    pub max_retries: u32,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or env-filter directive
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl Settings {
    /// Settings with defaults for everything but the key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            logging: LoggingConfig::default(),
        }
    }

    /// Load settings from the environment (and `.env` if present)
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let settings = Self {
            api_key: std::env::var("MAILBREEZE_API_KEY")
                .context("MAILBREEZE_API_KEY environment variable not set")?,
            base_url: get_env_or_default("MAILBREEZE_BASE_URL", DEFAULT_BASE_URL),
            timeout_secs: get_env_or_default("MAILBREEZE_TIMEOUT", "30")
                .parse()
                .context("Invalid timeout value")?,
            max_retries: get_env_or_default("MAILBREEZE_MAX_RETRIES", "3")
                .parse()
                .context("Invalid max retries value")?,
            logging: LoggingConfig {
                level: get_env_or_default("RUST_LOG", "info"),
                format: get_env_or_default("LOG_FORMAT", "text"),
            },
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            anyhow::bail!("API key is required and cannot be blank");
        }

        if self.api_key.contains(char::is_whitespace) {
            anyhow::bail!("API key cannot contain whitespace characters");
        }

        if !self.base_url.starts_with("http") {
            anyhow::bail!("Invalid base URL format, should start with 'http'");
        }

        if self.timeout_secs == 0 {
            anyhow::bail!("Timeout cannot be 0");
        }

        EnvFilter::try_new(&self.logging.level)
            .with_context(|| format!("Invalid log filter: {}", self.logging.level))?;

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("logging", &self.logging)
            .finish()
    }
}

/// Get environment variable or default value
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
