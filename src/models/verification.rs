//! Email verification models

use super::null_default;
use crate::utils::error::{MailBreezeError, MailBreezeResult};
use serde::{Deserialize, Serialize};

wire_enum! {
    /// Verdict for a single address
    pub enum VerificationResult {
        Valid => "valid",
        Invalid => "invalid",
        Risky => "risky",
        Unknown => "unknown",
    }
}

/// Outcome of verifying one address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyEmailResult {
    pub email: String,
    #[serde(default, deserialize_with = "null_default")]
    pub is_valid: bool,
    #[serde(default)]
    pub result: Option<VerificationResult>,
    #[serde(default)]
    pub reason: Option<String>,
    /// Served from the verification cache
    #[serde(default, deserialize_with = "null_default")]
    pub cached: bool,
    /// 0 (safe) to 100 (risky)
    #[serde(default)]
    pub risk_score: Option<u32>,
    #[serde(default)]
    pub details: Option<VerificationDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationDetails {
    pub is_free_provider: Option<bool>,
    pub is_disposable: Option<bool>,
    pub is_role_account: Option<bool>,
    pub has_mx_records: Option<bool>,
    pub is_spam_trap: Option<bool>,
}

/// Addresses to verify in one batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchVerifyParams {
    pub emails: Vec<String>,
}

impl BatchVerifyParams {
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            emails: emails.into_iter().map(Into::into).collect(),
        }
    }

    pub fn validate(&self) -> MailBreezeResult<()> {
        if self.emails.is_empty() {
            return Err(MailBreezeError::invalid_argument(
                "emails list is required and cannot be empty",
            ));
        }
        Ok(())
    }
}

/// Per-verdict counts of a batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchAnalytics {
    #[serde(deserialize_with = "null_default")]
    pub valid: u64,
    #[serde(deserialize_with = "null_default")]
    pub invalid: u64,
    #[serde(deserialize_with = "null_default")]
    pub risky: u64,
    #[serde(deserialize_with = "null_default")]
    pub unknown: u64,
}

/// Status (and, once finished, results) of a batch verification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchVerifyResult {
    pub verification_id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub total_emails: u64,
    #[serde(default, deserialize_with = "null_default")]
    pub credits_deducted: u64,
    /// e.g. `processing`, `completed`
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub results: Option<Vec<VerifyEmailResult>>,
    #[serde(default)]
    pub analytics: Option<BatchAnalytics>,
}

/// Summary row of the batch listing (camelCase on the wire)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationListItem {
    pub id: String,
    #[serde(rename = "type", default)]
    pub verification_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub total_emails: u64,
    /// Percent complete
    #[serde(default, deserialize_with = "null_default")]
    pub progress: u32,
    #[serde(default)]
    pub analytics: Option<BatchAnalytics>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
}

/// `{items: [...]}` wrapper of the batch listing
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct VerificationListResponse {
    #[serde(default, deserialize_with = "null_default")]
    pub items: Vec<VerificationListItem>,
}

/// Account-wide verification counters
///
/// Accepts both the snake_case payload and the older camelCase `total*` names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationStats {
    #[serde(alias = "totalVerified", deserialize_with = "null_default")]
    pub total_verified: u64,
    #[serde(alias = "totalValid", deserialize_with = "null_default")]
    pub valid: u64,
    #[serde(alias = "totalInvalid", deserialize_with = "null_default")]
    pub invalid: u64,
    #[serde(alias = "totalRisky", deserialize_with = "null_default")]
    pub risky: u64,
    #[serde(alias = "totalUnknown", deserialize_with = "null_default")]
    pub unknown: u64,
    #[serde(alias = "totalVerifications", deserialize_with = "null_default")]
    pub total_verifications: u64,
    #[serde(alias = "validPercentage", deserialize_with = "null_default")]
    pub valid_percentage: f64,
    #[serde(alias = "creditsUsed", deserialize_with = "null_default")]
    pub credits_used: u64,
    #[serde(alias = "creditsRemaining", deserialize_with = "null_default")]
    pub credits_remaining: u64,
}

/// Body of the single-address endpoint
#[derive(Debug, Clone, Serialize)]
pub(crate) struct VerifyRequest<'a> {
    pub email: &'a str,
}
