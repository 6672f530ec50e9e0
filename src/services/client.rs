//! HTTP client service
//!
//! Encapsulates HTTP communication with the MailBreeze API: authentication headers,
//! envelope decoding, error mapping and retries.

use crate::models::ApiEnvelope;
use crate::utils::error::{ErrorContext, MailBreezeError, MailBreezeResult};
use crate::utils::logging::truncate_content;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, Response};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, warn};

const API_KEY_HEADER: &str = "x-api-key";
const IDEMPOTENCY_KEY_HEADER: &str = "x-idempotency-key";
const REQUEST_ID_HEADER: &str = "x-request-id";
const RETRY_AFTER_HEADER: &str = "retry-after";

/// Retry configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum retry attempts after the first request
    pub max_retries: u32,
    /// Base delay time (milliseconds), doubled on every attempt
    pub base_delay_ms: u64,
    /// Maximum delay time (milliseconds), also caps `Retry-After`
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 1000,
            max_delay_ms: 30_000,
        }
    }
}

impl RetryConfig {
    /// Delay before retry number `attempt + 1`
    pub fn delay_for(&self, attempt: u32, error: &MailBreezeError) -> Duration {
        let delay_ms = match error.retry_after() {
            Some(seconds) => seconds.saturating_mul(1000),
            None => self
                .base_delay_ms
                .saturating_mul(2_u64.saturating_pow(attempt)),
        };
        Duration::from_millis(delay_ms.min(self.max_delay_ms))
    }
}

/// Per-request options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    idempotency_key: Option<String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options carrying a random (UUID v4) idempotency key
    pub fn generated() -> Self {
        Self::new().with_idempotency_key(uuid::Uuid::new_v4().to_string())
    }

    /// Set the idempotency key; control characters are stripped so the
    /// value cannot inject extra headers
    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        let key: String = key.into().chars().filter(|c| !c.is_control()).collect();
        self.idempotency_key = Some(key);
        self
    }

    pub fn idempotency_key(&self) -> Option<&str> {
        self.idempotency_key.as_deref()
    }
}

/// Decoded successful response before it is mapped onto a concrete type
struct ApiData {
    status: u16,
    request_id: Option<String>,
    data: Option<serde_json::Value>,
}

/// A request that can be replayed on retry
struct PreparedRequest<'a> {
    method: Method,
    path: &'a str,
    query: &'a [(&'a str, String)],
    body: Option<Vec<u8>>,
    idempotency_key: Option<HeaderValue>,
}

/// MailBreeze API client
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    retry_config: RetryConfig,
}

impl HttpClient {
    /// Create a new client instance
    pub fn new(
        api_key: &str,
        base_url: &str,
        timeout: Duration,
        retry_config: RetryConfig,
    ) -> MailBreezeResult<Self> {
        let mut api_key_value = HeaderValue::from_str(api_key)
            .map_err(|_| MailBreezeError::configuration("API key contains invalid characters"))?;
        api_key_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key_value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent())
            .default_headers(headers)
            .build()
            .network_context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry_config,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry_config
    }

    /// GET `path` with query parameters
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> MailBreezeResult<T> {
        let request = PreparedRequest {
            method: Method::GET,
            path,
            query,
            body: None,
            idempotency_key: None,
        };
        self.execute(request).await
    }

    /// POST a JSON body to `path`
    pub async fn post<B, T>(
        &self,
        path: &str,
        body: &B,
        options: Option<&RequestOptions>,
    ) -> MailBreezeResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let idempotency_key = match options.and_then(RequestOptions::idempotency_key) {
            Some(key) => Some(
                HeaderValue::from_str(key)
                    .invalid_argument_context("Invalid idempotency key")?,
            ),
            None => None,
        };
        let request = PreparedRequest {
            method: Method::POST,
            path,
            query: &[],
            body: Some(serde_json::to_vec(body)?),
            idempotency_key,
        };
        self.execute(request).await
    }

    /// PATCH a JSON body to `path`
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> MailBreezeResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = PreparedRequest {
            method: Method::PATCH,
            path,
            query: &[],
            body: Some(serde_json::to_vec(body)?),
            idempotency_key: None,
        };
        self.execute(request).await
    }

    /// PUT a JSON body to `path`
    pub async fn put<B, T>(&self, path: &str, body: &B) -> MailBreezeResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = PreparedRequest {
            method: Method::PUT,
            path,
            query: &[],
            body: Some(serde_json::to_vec(body)?),
            idempotency_key: None,
        };
        self.execute(request).await
    }

    /// DELETE `path`, discarding any payload
    pub async fn delete(&self, path: &str) -> MailBreezeResult<()> {
        let request = PreparedRequest {
            method: Method::DELETE,
            path,
            query: &[],
            body: None,
            idempotency_key: None,
        };
        self.execute::<IgnoredAny>(request).await?;
        Ok(())
    }

    /// Run a request with retries and decode `data` into `T`
    async fn execute<T: DeserializeOwned>(&self, request: PreparedRequest<'_>) -> MailBreezeResult<T> {
        let response = self.execute_with_retry(&request).await?;

        serde_json::from_value(response.data.unwrap_or(serde_json::Value::Null)).map_err(|e| {
            MailBreezeError::parse(
                response.status,
                format!("Failed to parse response data: {}", e),
                response.request_id,
            )
        })
    }

    async fn execute_with_retry(&self, request: &PreparedRequest<'_>) -> MailBreezeResult<ApiData> {
        let mut attempt = 0;

        loop {
            match self.send_once(request).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() && attempt < self.retry_config.max_retries => {
                    let delay = self.retry_config.delay_for(attempt, &e);
                    warn!(
                        "{} {} failed with {}, retrying after {}ms (attempt {}/{})",
                        request.method,
                        request.path,
                        e.code(),
                        delay.as_millis(),
                        attempt + 1,
                        self.retry_config.max_retries
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    error!("{} {} failed: {}", request.method, request.path, e);
                    return Err(e);
                }
            }
        }
    }

    async fn send_once(&self, request: &PreparedRequest<'_>) -> MailBreezeResult<ApiData> {
        let url = format!("{}{}", self.base_url, request.path);
        debug!("Sending {} {}", request.method, url);

        let mut builder = self.client.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            builder = builder.query(request.query);
        }
        if let Some(key) = &request.idempotency_key {
            builder = builder.header(IDEMPOTENCY_KEY_HEADER, key.clone());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| MailBreezeError::network(format!("Network error: {}", e)))?;

        self.handle_response(response).await
    }

    /// Handle HTTP response: unwrap the envelope or map it to an error
    async fn handle_response(&self, response: Response) -> MailBreezeResult<ApiData> {
        let status = response.status().as_u16();
        let request_id = header_string(&response, REQUEST_ID_HEADER);
        let retry_after = header_string(&response, RETRY_AFTER_HEADER)
            .and_then(|v| v.trim().parse::<u64>().ok());

        if status == 204 {
            return Ok(ApiData {
                status,
                request_id,
                data: None,
            });
        }

        let body = response.text().await.map_err(|_| MailBreezeError::ResponseRead {
            status,
            message: "Failed to read response body".to_string(),
            request_id: request_id.clone(),
        })?;

        if body.trim().is_empty() && status < 400 {
            return Ok(ApiData {
                status,
                request_id,
                data: None,
            });
        }

        let envelope: ApiEnvelope = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) => {
                if status >= 400 {
                    debug!("Unparseable error body: {}", truncate_content(&body, 200));
                    return Err(MailBreezeError::from_status(
                        status,
                        format!("HTTP error: {}", status),
                        request_id,
                        retry_after,
                        None,
                    ));
                }
                return Err(MailBreezeError::parse(
                    status,
                    format!("Failed to parse response: {}", e),
                    request_id,
                ));
            }
        };

        if !envelope.success || envelope.error.is_some() {
            let (message, details) = match envelope.error {
                Some(error) => (
                    error.message.unwrap_or_else(|| "Unknown error".to_string()),
                    error.details,
                ),
                None => ("Unknown error".to_string(), None),
            };
            return Err(MailBreezeError::from_status(
                status,
                message,
                request_id,
                retry_after,
                details,
            ));
        }

        if status >= 400 {
            return Err(MailBreezeError::from_status(
                status,
                "HTTP error",
                request_id,
                retry_after,
                None,
            ));
        }

        debug!("Request completed with status {}", status);
        Ok(ApiData {
            status,
            request_id,
            data: envelope.data,
        })
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("max_retries", &self.retry_config.max_retries)
            .finish()
    }
}

/// `mailbreeze-rust/<version>`
pub fn user_agent() -> String {
    format!("mailbreeze-rust/{}", crate::VERSION)
}

fn header_string(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
