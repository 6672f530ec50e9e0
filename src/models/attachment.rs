//! Attachment upload models
//!
//! Uploads are two-step: request a presigned URL, PUT the bytes there, then confirm.

use super::is_blank;
use crate::utils::error::{MailBreezeError, MailBreezeResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

wire_enum! {
    /// Lifecycle state of an uploaded file
    pub enum AttachmentStatus {
        Pending => "pending",
        Uploaded => "uploaded",
        Expired => "expired",
    }
}

/// Parameters for requesting a presigned upload URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAttachmentUploadParams {
    pub file_name: String,
    pub content_type: String,
    /// Size in bytes
    pub file_size: u64,
}

impl CreateAttachmentUploadParams {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, file_size: u64) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            file_size,
        }
    }

    pub fn validate(&self) -> MailBreezeResult<()> {
        if is_blank(&self.file_name) {
            return Err(MailBreezeError::invalid_argument("file_name is required"));
        }
        if is_blank(&self.content_type) {
            return Err(MailBreezeError::invalid_argument("content_type is required"));
        }
        if self.file_size == 0 {
            return Err(MailBreezeError::invalid_argument("file_size must be positive"));
        }
        Ok(())
    }
}

/// Presigned upload target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAttachmentUploadResult {
    pub attachment_id: String,
    pub upload_url: String,
    pub upload_token: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Confirms that the file was PUT to the presigned URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmAttachmentParams {
    pub upload_token: String,
}

impl ConfirmAttachmentParams {
    pub fn new(upload_token: impl Into<String>) -> Self {
        Self {
            upload_token: upload_token.into(),
        }
    }

    pub fn validate(&self) -> MailBreezeResult<()> {
        if is_blank(&self.upload_token) {
            return Err(MailBreezeError::invalid_argument("upload_token is required"));
        }
        Ok(())
    }
}

/// A confirmed attachment, referenced by `SendEmailParams::attachment_ids`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub status: Option<AttachmentStatus>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
