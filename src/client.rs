//! SDK entry point
//!
//! `MailBreeze` wires every resource onto one shared transport.

use crate::config::settings::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::config::Settings;
use crate::resources::{Attachments, Automations, Contacts, Emails, Lists, Verification};
use crate::services::{HttpClient, RetryConfig};
use crate::utils::error::{MailBreezeError, MailBreezeResult};
use std::fmt;
use std::time::Duration;

/// MailBreeze API client
///
/// ```no_run
/// # async fn run() -> mailbreeze::MailBreezeResult<()> {
/// use mailbreeze::{MailBreeze, SendEmailParams};
///
/// let client = MailBreeze::builder().api_key("sk_live_xxx").build()?;
/// let params = SendEmailParams::new("hello@example.com", ["user@example.com"])
///     .subject("Welcome")
///     .html("<p>Hi!</p>");
/// let result = client.emails().send(&params).await?;
/// println!("queued {}", result.id);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MailBreeze {
    http: HttpClient,
    emails: Emails,
    lists: Lists,
    attachments: Attachments,
    verification: Verification,
    automations: Automations,
}

impl MailBreeze {
    /// Client with default settings
    pub fn new(api_key: impl Into<String>) -> MailBreezeResult<Self> {
        Self::builder().api_key(api_key).build()
    }

    pub fn builder() -> MailBreezeBuilder {
        MailBreezeBuilder::default()
    }

    /// Client configured from loaded `Settings`
    pub fn from_settings(settings: &Settings) -> MailBreezeResult<Self> {
        Self::builder()
            .api_key(settings.api_key.clone())
            .base_url(settings.base_url.clone())
            .timeout(settings.timeout())
            .max_retries(settings.max_retries)
            .build()
    }

    fn from_http(http: HttpClient) -> Self {
        Self {
            emails: Emails::new(http.clone()),
            lists: Lists::new(http.clone()),
            attachments: Attachments::new(http.clone()),
            verification: Verification::new(http.clone()),
            automations: Automations::new(http.clone()),
            http,
        }
    }

    pub fn emails(&self) -> &Emails {
        &self.emails
    }

    pub fn lists(&self) -> &Lists {
        &self.lists
    }

    /// Contacts of one list
    pub fn contacts(&self, list_id: impl Into<String>) -> Contacts {
        Contacts::new(self.http.clone(), list_id)
    }

    pub fn attachments(&self) -> &Attachments {
        &self.attachments
    }

    pub fn verification(&self) -> &Verification {
        &self.verification
    }

    pub fn automations(&self) -> &Automations {
        &self.automations
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }
}

/// Builder for `MailBreeze`
#[derive(Clone, Default)]
pub struct MailBreezeBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    max_retries: Option<u32>,
    retry_config: Option<RetryConfig>,
}

impl MailBreezeBuilder {
    /// API key (required)
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the API base URL, e.g. for staging
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Retries for rate limit and server errors; 0 disables retrying
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Full retry policy; `max_retries` still wins when both are set
    pub fn retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = Some(retry_config);
        self
    }

    pub fn build(self) -> MailBreezeResult<MailBreeze> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                MailBreezeError::configuration("API key is required and cannot be blank")
            })?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !base_url.starts_with("http") {
            return Err(MailBreezeError::configuration(format!(
                "Invalid base URL: {}",
                base_url
            )));
        }

        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        if timeout.is_zero() {
            return Err(MailBreezeError::configuration("Timeout cannot be 0"));
        }

        let mut retry_config = self.retry_config.unwrap_or_default();
        if let Some(max_retries) = self.max_retries {
            retry_config.max_retries = max_retries;
        }

        let http = HttpClient::new(&api_key, &base_url, timeout, retry_config)?;
        Ok(MailBreeze::from_http(http))
    }
}

impl fmt::Debug for MailBreezeBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailBreezeBuilder")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("retry_config", &self.retry_config)
            .finish()
    }
}
