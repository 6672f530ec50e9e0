//! Contact list data models

use super::{is_blank, null_default, push_paging, push_search, QueryParams};
use crate::utils::error::{MailBreezeError, MailBreezeResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

wire_enum! {
    /// Type of a custom contact field
    pub enum FieldType {
        Text => "text",
        Number => "number",
        Date => "date",
        Boolean => "boolean",
        Select => "select",
    }
}

/// Schema of a custom field attached to a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomFieldDefinition {
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
    /// Allowed values for `select` fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl CustomFieldDefinition {
    pub fn new(key: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            field_type,
            required: None,
            default_value: None,
            options: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn default_value(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn options(mut self, options: Vec<String>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn validate(&self) -> MailBreezeResult<()> {
        if is_blank(&self.key) {
            return Err(MailBreezeError::invalid_argument("key is required"));
        }
        if is_blank(&self.label) {
            return Err(MailBreezeError::invalid_argument("label is required"));
        }
        let has_options = self.options.as_ref().is_some_and(|o| !o.is_empty());
        if self.field_type == FieldType::Select && !has_options {
            return Err(MailBreezeError::invalid_argument(
                "options are required for select type",
            ));
        }
        Ok(())
    }
}

/// A contact list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactList {
    pub id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub custom_fields: Option<Vec<CustomFieldDefinition>>,
    #[serde(default)]
    pub contact_count: Option<u64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Parameters for creating a list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateListParams {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Vec<CustomFieldDefinition>>,
}

impl CreateListParams {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn custom_field(mut self, field: CustomFieldDefinition) -> Self {
        self.custom_fields.get_or_insert_with(Vec::new).push(field);
        self
    }

    pub fn validate(&self) -> MailBreezeResult<()> {
        if is_blank(&self.name) {
            return Err(MailBreezeError::invalid_argument("name is required"));
        }
        for field in self.custom_fields.iter().flatten() {
            field.validate()?;
        }
        Ok(())
    }
}

/// Partial update of a list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Filters for listing lists
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListListsParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
}

impl ListListsParams {
    pub fn to_query_params(&self) -> QueryParams {
        let mut query = QueryParams::new();
        push_paging(&mut query, self.page, self.limit);
        push_search(&mut query, self.search.as_deref());
        query
    }
}

/// Per-status contact counts for a list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListStats {
    #[serde(deserialize_with = "null_default")]
    pub total_contacts: u64,
    #[serde(deserialize_with = "null_default")]
    pub active_contacts: u64,
    #[serde(deserialize_with = "null_default")]
    pub unsubscribed_contacts: u64,
    #[serde(deserialize_with = "null_default")]
    pub bounced_contacts: u64,
    #[serde(deserialize_with = "null_default")]
    pub complained_contacts: u64,
    #[serde(deserialize_with = "null_default")]
    pub suppressed_contacts: u64,
}
