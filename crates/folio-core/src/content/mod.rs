//! Content types.
//!
//! This module defines the values that flow between sources, the
//! accumulator, and consumer views. The operations that produce them are
//! methods on the source traits in [`traits`](crate::traits).

mod article;
mod filter;
mod item;
mod page;
mod product;

pub use article::{Article, Author, AuthorRef};
pub use filter::ContentFilter;
pub use item::{ContentItem, Tag, TagColor};
pub use page::{Page, PageRequest, PaginationCursor};
pub use product::Product;
