//! Pagination types.

use serde::{Deserialize, Serialize};

use super::ContentItem;

/// A request for one page of content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Number of items wanted. Always at least 1.
    pub count: usize,

    /// Opaque continuation token from the previous page, if any.
    pub after: Option<String>,
}

impl PageRequest {
    /// Create a request, raising a zero count to 1.
    pub fn new(count: usize, after: Option<String>) -> Self {
        Self {
            count: count.max(1),
            after,
        }
    }

    /// Request the first page.
    pub fn first(count: usize) -> Self {
        Self::new(count, None)
    }
}

/// One page of content returned by a source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Items in this page, in upstream order.
    pub items: Vec<ContentItem>,

    /// Whether the upstream reports more items after this page.
    pub has_more: bool,

    /// Continuation token for the next page.
    pub next_cursor: Option<String>,
}

impl Page {
    /// An empty, final page.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Opaque continuation state for a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationCursor {
    /// Token to resume after, as issued by the upstream API.
    pub token: Option<String>,

    /// Whether more items are available.
    pub has_more: bool,
}

impl PaginationCursor {
    /// Advance the cursor from a page response.
    ///
    /// A page without a continuation token cannot be followed, so it ends the
    /// listing even if the upstream claims otherwise.
    pub fn advance(&mut self, page: &Page) {
        self.has_more = page.has_more && page.next_cursor.is_some();
        if page.next_cursor.is_some() {
            self.token = page.next_cursor.clone();
        }
    }

    /// Mark the listing as finished without moving the token.
    pub fn exhaust(&mut self) {
        self.has_more = false;
    }
}

impl Default for PaginationCursor {
    fn default() -> Self {
        Self {
            token: None,
            has_more: true,
        }
    }
}
