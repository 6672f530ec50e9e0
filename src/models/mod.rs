//! Data models module
//!
//! Request parameters, response payloads and the shared response envelope

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Defines a unit-only enum that serializes as a fixed lowercase string
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $value)] $variant),+
        }

        impl $name {
            /// Wire representation
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub mod attachment;
pub mod automation;
pub mod contact;
pub mod email;
pub mod list;
pub mod verification;

pub use attachment::*;
pub use automation::*;
pub use contact::*;
pub use email::*;
pub use list::*;
pub use verification::*;

/// Free-form JSON object used for template variables and custom fields
pub type JsonMap = HashMap<String, serde_json::Value>;

/// Response envelope wrapping every API payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiEnvelope {
    /// Whether the call succeeded
    #[serde(default, deserialize_with = "null_default")]
    pub success: bool,
    /// Payload (absent on errors and some empty responses)
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    /// Error block (present when `success` is false)
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
    /// Additional metadata
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

/// Error block inside the envelope
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<HashMap<String, serde_json::Value>>,
}

/// Pagination metadata returned by list endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationMeta {
    #[serde(deserialize_with = "null_default")]
    pub page: u32,
    #[serde(deserialize_with = "null_default")]
    pub limit: u32,
    #[serde(deserialize_with = "null_default")]
    pub total: u64,
    #[serde(deserialize_with = "null_default")]
    pub total_pages: u32,
    #[serde(deserialize_with = "null_default")]
    pub has_next: bool,
    #[serde(deserialize_with = "null_default")]
    pub has_prev: bool,
}

/// Generic `{items, pagination}` list response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct PaginatedResponse<T> {
    #[serde(default = "Vec::new", deserialize_with = "null_default")]
    pub items: Vec<T>,
    #[serde(default)]
    pub pagination: Option<PaginationMeta>,
}

impl<T> Default for PaginatedResponse<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: None,
        }
    }
}

/// Ordered query string pairs
pub type QueryParams = Vec<(&'static str, String)>;

/// Append pagination fields shared by every list parameter struct
fn push_paging(query: &mut QueryParams, page: Option<u32>, limit: Option<u32>) {
    if let Some(page) = page {
        query.push(("page", page.to_string()));
    }
    if let Some(limit) = limit {
        query.push(("limit", limit.to_string()));
    }
}

/// Append `search` only when it carries a non-blank value
fn push_search(query: &mut QueryParams, search: Option<&str>) {
    if let Some(search) = search.filter(|s| !s.trim().is_empty()) {
        query.push(("search", search.to_string()));
    }
}

/// Decode an explicit `null` as the type's default, like a missing key
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Treat missing or whitespace-only strings as absent
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
