//! Contact data models

use super::{is_blank, null_default, push_paging, push_search, JsonMap, PaginationMeta, QueryParams};
use crate::utils::error::{MailBreezeError, MailBreezeResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

wire_enum! {
    /// Subscription status of a contact
    pub enum ContactStatus {
        Active => "active",
        Unsubscribed => "unsubscribed",
        Bounced => "bounced",
        Complained => "complained",
        Suppressed => "suppressed",
    }
}

wire_enum! {
    /// Legal basis under which the contact was collected
    pub enum ConsentType {
        Explicit => "explicit",
        Implicit => "implicit",
        LegitimateInterest => "legitimate_interest",
    }
}

wire_enum! {
    /// Why a contact is being suppressed
    pub enum SuppressReason {
        Manual => "manual",
        Unsubscribed => "unsubscribed",
        Bounced => "bounced",
        Complained => "complained",
        SpamTrap => "spam_trap",
    }
}

/// A contact inside a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub status: Option<ContactStatus>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub custom_fields: Option<JsonMap>,
    #[serde(default)]
    pub list_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub subscribed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub unsubscribed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub consent_type: Option<ConsentType>,
    #[serde(default)]
    pub consent_source: Option<String>,
    #[serde(default)]
    pub consent_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub consent_ip_address: Option<String>,
}

/// Parameters for adding a contact to a list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateContactParams {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<JsonMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl CreateContactParams {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Default::default()
        }
    }

    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    pub fn custom_field(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.custom_fields
            .get_or_insert_with(JsonMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn validate(&self) -> MailBreezeResult<()> {
        if is_blank(&self.email) {
            return Err(MailBreezeError::invalid_argument("email is required"));
        }
        Ok(())
    }
}

/// Partial update of a contact, including consent tracking fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateContactParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<JsonMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consent_type: Option<ConsentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consent_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consent_timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consent_ip_address: Option<String>,
}

/// Filters for listing contacts in a list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListContactsParams {
    pub status: Option<ContactStatus>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
}

impl ListContactsParams {
    pub fn to_query_params(&self) -> QueryParams {
        let mut query = QueryParams::new();
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        push_paging(&mut query, self.page, self.limit);
        push_search(&mut query, self.search.as_deref());
        query
    }
}

/// `{contacts: [...], pagination: {...}}` list response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactsResponse {
    #[serde(default, deserialize_with = "null_default")]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub pagination: Option<PaginationMeta>,
}

/// Body of the suppress endpoint
#[derive(Debug, Clone, Serialize)]
pub(crate) struct SuppressRequest {
    pub reason: SuppressReason,
}
