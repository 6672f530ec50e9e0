//! Automation enrollment models

use super::{is_blank, null_default, push_paging, JsonMap, QueryParams};
use crate::utils::error::{MailBreezeError, MailBreezeResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

wire_enum! {
    /// Progress of a contact through an automation
    pub enum EnrollmentStatus {
        Active => "active",
        Completed => "completed",
        Cancelled => "cancelled",
        Failed => "failed",
    }
}

/// Parameters for enrolling a contact
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrollParams {
    pub automation_id: String,
    pub contact_id: String,
    /// Per-enrollment template variables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<JsonMap>,
}

impl EnrollParams {
    pub fn new(automation_id: impl Into<String>, contact_id: impl Into<String>) -> Self {
        Self {
            automation_id: automation_id.into(),
            contact_id: contact_id.into(),
            variables: None,
        }
    }

    pub fn variable(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.variables
            .get_or_insert_with(JsonMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn validate(&self) -> MailBreezeResult<()> {
        if is_blank(&self.automation_id) {
            return Err(MailBreezeError::invalid_argument("automation_id is required"));
        }
        if is_blank(&self.contact_id) {
            return Err(MailBreezeError::invalid_argument("contact_id is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollResult {
    pub enrollment_id: String,
    #[serde(default)]
    pub status: Option<EnrollmentStatus>,
    #[serde(default)]
    pub enrolled_at: Option<DateTime<Utc>>,
}

/// A contact's enrollment in an automation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: String,
    #[serde(default)]
    pub automation_id: Option<String>,
    #[serde(default)]
    pub automation_name: Option<String>,
    #[serde(default)]
    pub contact_id: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub status: Option<EnrollmentStatus>,
    #[serde(default, deserialize_with = "null_default")]
    pub current_step: u32,
    #[serde(default, deserialize_with = "null_default")]
    pub total_steps: u32,
    #[serde(default)]
    pub variables: Option<JsonMap>,
    #[serde(default)]
    pub enrolled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cancelled_at: Option<DateTime<Utc>>,
}

/// Filters for listing enrollments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListEnrollmentsParams {
    pub automation_id: Option<String>,
    pub status: Option<EnrollmentStatus>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListEnrollmentsParams {
    pub fn to_query_params(&self) -> QueryParams {
        let mut query = QueryParams::new();
        if let Some(automation_id) = &self.automation_id {
            query.push(("automation_id", automation_id.clone()));
        }
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        push_paging(&mut query, self.page, self.limit);
        query
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelEnrollmentResult {
    pub enrollment_id: String,
    #[serde(default)]
    pub status: Option<EnrollmentStatus>,
    #[serde(default)]
    pub cancelled_at: Option<DateTime<Utc>>,
}
