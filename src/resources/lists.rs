//! Contact lists resource

use super::{paginate, require_id, BoxStream, Resource};
use crate::models::{
    ContactList, CreateListParams, ListListsParams, ListStats, PaginatedResponse, UpdateListParams,
};
use crate::services::HttpClient;
use crate::utils::error::MailBreezeResult;

/// Manage contact lists (`/contact-lists`)
#[derive(Debug, Clone)]
pub struct Lists {
    http: HttpClient,
}

impl Resource for Lists {
    fn http(&self) -> &HttpClient {
        &self.http
    }

    fn base_path(&self) -> &str {
        "/contact-lists"
    }
}

impl Lists {
    pub(crate) fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn create(&self, params: &CreateListParams) -> MailBreezeResult<ContactList> {
        params.validate()?;
        self.http().post(&self.build_path(""), params, None).await
    }

    /// One page of lists
    pub async fn list(
        &self,
        params: &ListListsParams,
    ) -> MailBreezeResult<PaginatedResponse<ContactList>> {
        self.http()
            .get(&self.build_path(""), &params.to_query_params())
            .await
    }

    /// Every list, fetched page by page
    pub fn list_all(&self, params: ListListsParams) -> BoxStream<'static, ContactList> {
        let lists = self.clone();
        let start_page = params.page.unwrap_or(1);
        paginate(start_page, move |page| {
            let lists = lists.clone();
            let params = ListListsParams {
                page: Some(page),
                ..params.clone()
            };
            async move {
                let response = lists.list(&params).await?;
                Ok((response.items, response.pagination))
            }
        })
    }

    pub async fn get(&self, list_id: &str) -> MailBreezeResult<ContactList> {
        let list_id = require_id(list_id, "list_id")?;
        self.http()
            .get(&self.build_path(&format!("/{}", list_id)), &[])
            .await
    }

    pub async fn update(
        &self,
        list_id: &str,
        params: &UpdateListParams,
    ) -> MailBreezeResult<ContactList> {
        let list_id = require_id(list_id, "list_id")?;
        self.http()
            .patch(&self.build_path(&format!("/{}", list_id)), params)
            .await
    }

    pub async fn delete(&self, list_id: &str) -> MailBreezeResult<()> {
        let list_id = require_id(list_id, "list_id")?;
        self.http()
            .delete(&self.build_path(&format!("/{}", list_id)))
            .await
    }

    /// Per-status contact counts
    pub async fn stats(&self, list_id: &str) -> MailBreezeResult<ListStats> {
        let list_id = require_id(list_id, "list_id")?;
        self.http()
            .get(&self.build_path(&format!("/{}/stats", list_id)), &[])
            .await
    }
}
