//! Automations resource

use super::{paginate, require_id, BoxStream, Resource};
use crate::models::{
    CancelEnrollmentResult, EnrollParams, EnrollResult, Enrollment, ListEnrollmentsParams,
    PaginatedResponse,
};
use crate::services::HttpClient;
use crate::utils::error::MailBreezeResult;
use serde_json::json;

/// Enroll contacts into automations (`/automations`)
#[derive(Debug, Clone)]
pub struct Automations {
    http: HttpClient,
    enrollments: AutomationEnrollments,
}

impl Resource for Automations {
    fn http(&self) -> &HttpClient {
        &self.http
    }

    fn base_path(&self) -> &str {
        "/automations"
    }
}

impl Automations {
    pub(crate) fn new(http: HttpClient) -> Self {
        let enrollments = AutomationEnrollments { http: http.clone() };
        Self { http, enrollments }
    }

    /// Enroll a contact into an automation
    pub async fn enroll(&self, params: &EnrollParams) -> MailBreezeResult<EnrollResult> {
        params.validate()?;
        self.http()
            .post(
                &self.build_path(&format!("/{}/enroll", params.automation_id)),
                params,
                None,
            )
            .await
    }

    /// Enrollment management
    pub fn enrollments(&self) -> &AutomationEnrollments {
        &self.enrollments
    }
}

/// Inspect and cancel enrollments (`/automation-enrollments`)
#[derive(Debug, Clone)]
pub struct AutomationEnrollments {
    http: HttpClient,
}

impl Resource for AutomationEnrollments {
    fn http(&self) -> &HttpClient {
        &self.http
    }

    fn base_path(&self) -> &str {
        "/automation-enrollments"
    }
}

impl AutomationEnrollments {
    /// One page of enrollments
    pub async fn list(
        &self,
        params: &ListEnrollmentsParams,
    ) -> MailBreezeResult<PaginatedResponse<Enrollment>> {
        self.http()
            .get(&self.build_path(""), &params.to_query_params())
            .await
    }

    /// Every matching enrollment, fetched page by page
    pub fn list_all(&self, params: ListEnrollmentsParams) -> BoxStream<'static, Enrollment> {
        let enrollments = self.clone();
        let start_page = params.page.unwrap_or(1);
        paginate(start_page, move |page| {
            let enrollments = enrollments.clone();
            let params = ListEnrollmentsParams {
                page: Some(page),
                ..params.clone()
            };
            async move {
                let response = enrollments.list(&params).await?;
                Ok((response.items, response.pagination))
            }
        })
    }

    /// Stop an active enrollment
    pub async fn cancel(&self, enrollment_id: &str) -> MailBreezeResult<CancelEnrollmentResult> {
        let enrollment_id = require_id(enrollment_id, "enrollment_id")?;
        self.http()
            .post(
                &self.build_path(&format!("/{}/cancel", enrollment_id)),
                &json!({}),
                None,
            )
            .await
    }
}
