//! Email verification resource

use super::{require_id, Resource};
use crate::models::{
    BatchVerifyParams, BatchVerifyResult, VerificationListItem, VerificationListResponse,
    VerificationStats, VerifyEmailResult, VerifyRequest,
};
use crate::services::HttpClient;
use crate::utils::error::{MailBreezeError, MailBreezeResult};

/// Address verification (`/email-verification`)
#[derive(Debug, Clone)]
pub struct Verification {
    http: HttpClient,
}

impl Resource for Verification {
    fn http(&self) -> &HttpClient {
        &self.http
    }

    fn base_path(&self) -> &str {
        "/email-verification"
    }
}

impl Verification {
    pub(crate) fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Verify a single address
    pub async fn verify(&self, email: &str) -> MailBreezeResult<VerifyEmailResult> {
        if email.trim().is_empty() {
            return Err(MailBreezeError::invalid_argument("email is required"));
        }
        self.http()
            .post(&self.build_path("/single"), &VerifyRequest { email }, None)
            .await
    }

    /// Start a batch verification
    pub async fn batch(&self, params: &BatchVerifyParams) -> MailBreezeResult<BatchVerifyResult> {
        params.validate()?;
        self.http()
            .post(&self.build_path("/batch"), params, None)
            .await
    }

    /// Status of a batch, including per-address results once finished
    pub async fn get(&self, verification_id: &str) -> MailBreezeResult<BatchVerifyResult> {
        let verification_id = require_id(verification_id, "verification_id")?;
        self.http()
            .get(
                &self.build_path(&format!("/{}", verification_id)),
                &[("includeResults", "true".to_string())],
            )
            .await
    }

    /// Recent batch verifications
    pub async fn list(&self) -> MailBreezeResult<Vec<VerificationListItem>> {
        let response: Option<VerificationListResponse> =
            self.http().get(&self.build_path(""), &[]).await?;
        Ok(response.map(|r| r.items).unwrap_or_default())
    }

    /// Account-wide verification counters
    pub async fn stats(&self) -> MailBreezeResult<VerificationStats> {
        self.http().get(&self.build_path("/stats"), &[]).await
    }
}
