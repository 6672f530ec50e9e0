//! Attachments resource

use super::Resource;
use crate::models::{
    Attachment, ConfirmAttachmentParams, CreateAttachmentUploadParams,
    CreateAttachmentUploadResult,
};
use crate::services::HttpClient;
use crate::utils::error::MailBreezeResult;

/// Two-step attachment uploads (`/attachments`)
///
/// Request an upload URL, PUT the file bytes to it yourself, then confirm with the
/// returned token. The confirmed attachment id goes into `SendEmailParams::attachment_ids`.
#[derive(Debug, Clone)]
pub struct Attachments {
    http: HttpClient,
}

impl Resource for Attachments {
    fn http(&self) -> &HttpClient {
        &self.http
    }

    fn base_path(&self) -> &str {
        "/attachments"
    }
}

impl Attachments {
    pub(crate) fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Request a presigned upload URL
    pub async fn create_upload(
        &self,
        params: &CreateAttachmentUploadParams,
    ) -> MailBreezeResult<CreateAttachmentUploadResult> {
        params.validate()?;
        self.http()
            .post(&self.build_path("/upload"), params, None)
            .await
    }

    /// Confirm a finished upload
    pub async fn confirm(&self, params: &ConfirmAttachmentParams) -> MailBreezeResult<Attachment> {
        params.validate()?;
        self.http()
            .post(&self.build_path("/confirm"), params, None)
            .await
    }
}
