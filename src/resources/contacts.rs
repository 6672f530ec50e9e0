//! Contacts resource, scoped to one contact list

use super::{paginate, require_id, BoxStream, Resource};
use crate::models::{
    Contact, ContactsResponse, CreateContactParams, ListContactsParams, SuppressReason,
    SuppressRequest, UpdateContactParams,
};
use crate::services::HttpClient;
use crate::utils::error::MailBreezeResult;
use serde::de::IgnoredAny;

/// Manage the contacts of a list (`/contact-lists/{list_id}/contacts`)
#[derive(Debug, Clone)]
pub struct Contacts {
    http: HttpClient,
    list_id: String,
    base_path: String,
}

impl Resource for Contacts {
    fn http(&self) -> &HttpClient {
        &self.http
    }

    fn base_path(&self) -> &str {
        &self.base_path
    }
}

impl Contacts {
    pub(crate) fn new(http: HttpClient, list_id: impl Into<String>) -> Self {
        let list_id = list_id.into();
        let base_path = format!("/contact-lists/{}/contacts", list_id);
        Self {
            http,
            list_id,
            base_path,
        }
    }

    /// Id of the list this resource is scoped to
    pub fn list_id(&self) -> &str {
        &self.list_id
    }

    fn path(&self, suffix: &str) -> MailBreezeResult<String> {
        require_id(&self.list_id, "list_id")?;
        Ok(self.build_path(suffix))
    }

    pub async fn create(&self, params: &CreateContactParams) -> MailBreezeResult<Contact> {
        params.validate()?;
        self.http().post(&self.path("")?, params, None).await
    }

    /// One page of contacts
    pub async fn list(&self, params: &ListContactsParams) -> MailBreezeResult<ContactsResponse> {
        self.http()
            .get(&self.path("")?, &params.to_query_params())
            .await
    }

    /// Every contact in the list, fetched page by page
    pub fn list_all(&self, params: ListContactsParams) -> BoxStream<'static, Contact> {
        let contacts = self.clone();
        let start_page = params.page.unwrap_or(1);
        paginate(start_page, move |page| {
            let contacts = contacts.clone();
            let params = ListContactsParams {
                page: Some(page),
                ..params.clone()
            };
            async move {
                let response = contacts.list(&params).await?;
                Ok((response.contacts, response.pagination))
            }
        })
    }

    pub async fn get(&self, contact_id: &str) -> MailBreezeResult<Contact> {
        let contact_id = require_id(contact_id, "contact_id")?;
        self.http()
            .get(&self.path(&format!("/{}", contact_id))?, &[])
            .await
    }

    pub async fn update(
        &self,
        contact_id: &str,
        params: &UpdateContactParams,
    ) -> MailBreezeResult<Contact> {
        let contact_id = require_id(contact_id, "contact_id")?;
        self.http()
            .put(&self.path(&format!("/{}", contact_id))?, params)
            .await
    }

    pub async fn delete(&self, contact_id: &str) -> MailBreezeResult<()> {
        let contact_id = require_id(contact_id, "contact_id")?;
        self.http()
            .delete(&self.path(&format!("/{}", contact_id))?)
            .await
    }

    /// Stop all sending to a contact
    pub async fn suppress(&self, contact_id: &str, reason: SuppressReason) -> MailBreezeResult<()> {
        let contact_id = require_id(contact_id, "contact_id")?;
        let _: IgnoredAny = self
            .http()
            .post(
                &self.path(&format!("/{}/suppress", contact_id))?,
                &SuppressRequest { reason },
                None,
            )
            .await?;
        Ok(())
    }
}
