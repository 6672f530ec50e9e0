//! API resources
//!
//! One type per API area, each a thin typed mapping onto the shared transport

pub mod attachments;
pub mod automations;
pub mod contacts;
pub mod emails;
pub mod lists;
pub mod verification;

pub use attachments::Attachments;
pub use automations::{AutomationEnrollments, Automations};
pub use contacts::Contacts;
pub use emails::Emails;
pub use lists::Lists;
pub use verification::Verification;

use crate::models::PaginationMeta;
use crate::services::HttpClient;
use crate::utils::error::{MailBreezeError, MailBreezeResult};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::future::Future;

/// A boxed stream of items fetched page by page
pub type BoxStream<'a, T> = futures::stream::BoxStream<'a, MailBreezeResult<T>>;

/// Resource trait
///
/// Every resource is rooted at a base path on the shared transport.
pub trait Resource {
    /// Transport used for requests
    fn http(&self) -> &HttpClient;

    /// Path prefix of the resource, e.g. `/emails`
    fn base_path(&self) -> &str;

    /// Full path for `suffix`; an empty suffix yields the base path
    fn build_path(&self, suffix: &str) -> String {
        if suffix.is_empty() {
            self.base_path().to_string()
        } else {
            format!("{}{}", self.base_path(), suffix)
        }
    }
}

/// Reject empty identifiers before they turn into a different URL
pub(crate) fn require_id<'a>(id: &'a str, name: &str) -> MailBreezeResult<&'a str> {
    if id.trim().is_empty() {
        return Err(MailBreezeError::invalid_argument(format!("{} is required", name)));
    }
    Ok(id)
}

/// Stream every item of a paginated listing, starting at `start_page`
///
/// `fetch` loads one page. Iteration stops when the server reports no next page,
/// omits pagination, returns an empty page, or the page number would overflow;
/// the first error ends the stream.
pub(crate) fn paginate<'a, T, F, Fut>(start_page: u32, fetch: F) -> BoxStream<'a, T>
where
    T: Send + 'a,
    F: Fn(u32) -> Fut + Send + 'a,
    Fut: Future<Output = MailBreezeResult<(Vec<T>, Option<PaginationMeta>)>> + Send + 'a,
{
    stream::try_unfold(Some(start_page), move |state| {
        let request = state.map(|page| (page, fetch(page)));
        async move {
            let Some((page, request)) = request else {
                return Ok(None);
            };
            let (items, pagination) = request.await?;
            let next = match pagination {
                Some(meta) if meta.has_next && !items.is_empty() => page.checked_add(1),
                _ => None,
            };
            let items = stream::iter(items.into_iter().map(Ok::<T, MailBreezeError>));
            Ok::<_, MailBreezeError>(Some((items, next)))
        }
    })
    .try_flatten()
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn meta(page: u32, has_next: bool) -> Option<PaginationMeta> {
        Some(PaginationMeta {
            page,
            has_next,
            ..Default::default()
        })
    }

    #[test]
    fn test_require_id() {
        assert_eq!(require_id("abc", "id").unwrap(), "abc");
        let err = require_id("  ", "list_id").unwrap_err();
        assert_eq!(err.code(), "INVALID_ARGUMENT");
        assert!(err.message().contains("list_id"));
    }

    #[tokio::test]
    async fn test_paginate_walks_until_no_next_page() {
        let items: Vec<u32> = paginate(1, |page| async move {
            Ok((vec![page * 10, page * 10 + 1], meta(page, page < 3)))
        })
        .try_collect()
        .await
        .unwrap();

        assert_eq!(items, vec![10, 11, 20, 21, 30, 31]);
    }

    #[tokio::test]
    async fn test_paginate_stops_on_empty_page() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let items: Vec<u32> = paginate(2, move |page| {
            counter.fetch_add(1, Ordering::SeqCst);
            async move { Ok((Vec::<u32>::new(), meta(page, true))) }
        })
        .try_collect()
        .await
        .unwrap();

        assert!(items.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_paginate_stops_without_pagination() {
        let items: Vec<u32> = paginate(1, |_| async { Ok((vec![1, 2], None)) })
            .try_collect()
            .await
            .unwrap();
        assert_eq!(items, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_paginate_stops_at_last_page_number() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let items: Vec<u32> = paginate(u32::MAX, move |page| {
            counter.fetch_add(1, Ordering::SeqCst);
            async move { Ok((vec![7], meta(page, true))) }
        })
        .try_collect()
        .await
        .unwrap();

        assert_eq!(items, vec![7]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_paginate_propagates_errors() {
        let result: MailBreezeResult<Vec<u32>> = paginate(1, |page| async move {
            if page == 2 {
                Err(MailBreezeError::network("connection reset"))
            } else {
                Ok((vec![page], meta(page, true)))
            }
        })
        .try_collect()
        .await;

        assert_eq!(result.unwrap_err().code(), "NETWORK_ERROR");
    }
}
