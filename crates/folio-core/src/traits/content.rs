//! Content source trait.

use std::sync::Arc;

use async_trait::async_trait;

use crate::Result;
use crate::content::{ContentFilter, Page, PageRequest};

/// A paginated remote listing of content items.
///
/// Implementations translate a [`PageRequest`] into an upstream call and
/// normalize the response into a [`Page`]. Failures are returned, not
/// swallowed; see [`Accumulator`](crate::Accumulator) for the fail-soft
/// policy applied on top.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch one page.
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page>;

    /// Total number of items matching a filter, if the upstream can tell.
    async fn count_matching(&self, filter: &ContentFilter) -> Result<Option<u64>> {
        let _ = filter;
        Ok(None)
    }
}

#[async_trait]
impl<T> ContentSource for Arc<T>
where
    T: ContentSource + ?Sized,
{
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page> {
        (**self).fetch_page(request).await
    }

    async fn count_matching(&self, filter: &ContentFilter) -> Result<Option<u64>> {
        (**self).count_matching(filter).await
    }
}
