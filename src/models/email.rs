//! Email data models

use super::{is_blank, null_default, push_paging, JsonMap, PaginationMeta, QueryParams};
use crate::utils::error::{MailBreezeError, MailBreezeResult};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

wire_enum! {
    /// Delivery status of an email
    pub enum EmailStatus {
        Pending => "pending",
        Queued => "queued",
        Sent => "sent",
        Delivered => "delivered",
        Bounced => "bounced",
        Complained => "complained",
        Failed => "failed",
    }
}

/// Parameters for sending an email
///
/// Either `html`/`text` content or a `template_id` is expected by the API;
/// only `from` and at least one `to` recipient are checked locally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SendEmailParams {
    /// Sender address
    pub from: String,
    /// Recipient addresses
    pub to: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    /// Template variables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<JsonMap>,
    /// IDs of confirmed attachments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc: Option<Vec<String>>,
    /// Custom email headers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl SendEmailParams {
    pub fn new<I, S>(from: impl Into<String>, to: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            from: from.into(),
            to: to.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn template_id(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = Some(template_id.into());
        self
    }

    /// Add a single template variable
    pub fn variable(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.variables
            .get_or_insert_with(JsonMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn attachment_ids(mut self, ids: Vec<String>) -> Self {
        self.attachment_ids = Some(ids);
        self
    }

    pub fn reply_to(mut self, reply_to: impl Into<String>) -> Self {
        self.reply_to = Some(reply_to.into());
        self
    }

    pub fn cc(mut self, cc: Vec<String>) -> Self {
        self.cc = Some(cc);
        self
    }

    pub fn bcc(mut self, bcc: Vec<String>) -> Self {
        self.bcc = Some(bcc);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Check required fields before sending
    pub fn validate(&self) -> MailBreezeResult<()> {
        if is_blank(&self.from) {
            return Err(MailBreezeError::invalid_argument("from is required"));
        }
        if self.to.is_empty() {
            return Err(MailBreezeError::invalid_argument("to is required"));
        }
        Ok(())
    }
}

/// Result of a send request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendEmailResult {
    pub id: String,
    #[serde(default)]
    pub status: Option<EmailStatus>,
    #[serde(default)]
    pub message_id: Option<String>,
}

/// A sent or pending email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Email {
    pub id: String,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub to: Vec<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub status: Option<EmailStatus>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sent_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub message_id: Option<String>,
}

/// Aggregated sending statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailStats {
    #[serde(deserialize_with = "null_default")]
    pub sent: u64,
    #[serde(deserialize_with = "null_default")]
    pub delivered: u64,
    #[serde(deserialize_with = "null_default")]
    pub bounced: u64,
    #[serde(deserialize_with = "null_default")]
    pub complained: u64,
    #[serde(deserialize_with = "null_default")]
    pub opened: u64,
    #[serde(deserialize_with = "null_default")]
    pub clicked: u64,
    #[serde(deserialize_with = "null_default")]
    pub unsubscribed: u64,
}

/// `{stats: {...}}` wrapper returned by the stats endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct EmailStatsResponse {
    #[serde(default, deserialize_with = "null_default")]
    pub stats: EmailStats,
}

/// Result of cancelling a pending email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelEmailResult {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub cancelled: bool,
}

/// `{emails: [...], pagination: {...}}` list response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailsResponse {
    #[serde(default, deserialize_with = "null_default")]
    pub emails: Vec<Email>,
    #[serde(default)]
    pub pagination: Option<PaginationMeta>,
}

/// Filters for listing emails
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListEmailsParams {
    pub status: Option<EmailStatus>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub from_date: Option<DateTime<Utc>>,
    pub to_date: Option<DateTime<Utc>>,
}

impl ListEmailsParams {
    pub fn to_query_params(&self) -> QueryParams {
        let mut query = QueryParams::new();
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        push_paging(&mut query, self.page, self.limit);
        if let Some(from_date) = self.from_date {
            query.push((
                "from_date",
                from_date.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            ));
        }
        if let Some(to_date) = self.to_date {
            query.push((
                "to_date",
                to_date.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            ));
        }
        query
    }
}
