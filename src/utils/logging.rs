//! Logging utilities
//!
//! Subscriber initialisation and helpers that keep secrets out of log lines

use crate::config::settings::LoggingConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static API_KEY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"sk_(live|test)_[a-zA-Z0-9]+").expect("valid API key pattern"));

/// Replace anything that looks like a MailBreeze API key with `[REDACTED]`
pub fn redact_api_keys(s: &str) -> Cow<'_, str> {
    API_KEY_PATTERN.replace_all(s, "[REDACTED]")
}

/// Truncate a string with a note about original length
pub fn truncate_content(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... ({} chars truncated)", &s[..end], s.len() - end)
}

/// Initialize the global tracing subscriber
///
/// `json` format is meant for production, anything else yields human readable output.
/// Returns an error if a global subscriber was already installed.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if config.format == "json" {
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(config.level.as_str())
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .finish(),
        )
    } else {
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(config.level.as_str())
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .finish(),
        )
    };

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    tracing::debug!("Logging system initialized");
    Ok(())
}
