//! Emails resource

use super::{require_id, Resource};
use crate::models::{
    CancelEmailResult, Email, EmailStats, EmailStatsResponse, EmailsResponse, ListEmailsParams,
    SendEmailParams, SendEmailResult,
};
use crate::services::{HttpClient, RequestOptions};
use crate::utils::error::MailBreezeResult;
use serde_json::json;

/// Send and inspect transactional email (`/emails`)
#[derive(Debug, Clone)]
pub struct Emails {
    http: HttpClient,
}

impl Resource for Emails {
    fn http(&self) -> &HttpClient {
        &self.http
    }

    fn base_path(&self) -> &str {
        "/emails"
    }
}

impl Emails {
    pub(crate) fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Send an email
    pub async fn send(&self, params: &SendEmailParams) -> MailBreezeResult<SendEmailResult> {
        self.send_with_options(params, None).await
    }

    /// Send an email at most once for a given idempotency key
    pub async fn send_with_idempotency_key(
        &self,
        params: &SendEmailParams,
        idempotency_key: &str,
    ) -> MailBreezeResult<SendEmailResult> {
        let options = RequestOptions::new().with_idempotency_key(idempotency_key);
        self.send_with_options(params, Some(&options)).await
    }

    /// Send an email with explicit request options
    pub async fn send_with_options(
        &self,
        params: &SendEmailParams,
        options: Option<&RequestOptions>,
    ) -> MailBreezeResult<SendEmailResult> {
        params.validate()?;
        self.http().post(&self.build_path(""), params, options).await
    }

    /// List sent emails
    pub async fn list(&self, params: &ListEmailsParams) -> MailBreezeResult<EmailsResponse> {
        self.http()
            .get(&self.build_path(""), &params.to_query_params())
            .await
    }

    /// Fetch one email by id
    pub async fn get(&self, email_id: &str) -> MailBreezeResult<Email> {
        let email_id = require_id(email_id, "email_id")?;
        self.http()
            .get(&self.build_path(&format!("/{}", email_id)), &[])
            .await
    }

    /// Aggregated sending statistics
    pub async fn stats(&self) -> MailBreezeResult<EmailStats> {
        let response: EmailStatsResponse =
            self.http().get(&self.build_path("/stats"), &[]).await?;
        Ok(response.stats)
    }

    /// Cancel a pending email
    pub async fn cancel(&self, email_id: &str) -> MailBreezeResult<CancelEmailResult> {
        let email_id = require_id(email_id, "email_id")?;
        self.http()
            .post(
                &self.build_path(&format!("/{}/cancel", email_id)),
                &json!({}),
                None,
            )
            .await
    }
}
