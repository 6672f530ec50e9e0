//! MailBreeze SDK
//!
//! Async client for the MailBreeze email API: transactional sending, contact lists,
//! attachments, address verification and automations.

pub mod client;
pub mod config;
pub mod models;
pub mod resources;
pub mod services;
pub mod utils;

// Re-export common types
pub use client::{MailBreeze, MailBreezeBuilder};
pub use config::Settings;
pub use models::*;
pub use resources::{
    Attachments, AutomationEnrollments, Automations, BoxStream, Contacts, Emails, Lists,
    Resource, Verification,
};
pub use services::{RequestOptions, RetryConfig};
pub use utils::error::{ErrorDetails, MailBreezeError, MailBreezeResult};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
