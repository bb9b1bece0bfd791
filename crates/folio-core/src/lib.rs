//! folio-core - Content types, sources, and the incremental accumulator.
//!
//! Remote listings are read through a [`ContentSource`]. An [`Accumulator`]
//! turns successive pages into one ordered, deduplicated list that consumer
//! views filter with a [`ContentFilter`].
//!
//! # Example
//!
//! ```no_run
//! use folio_core::{Accumulator, ContentFilter, ContentSource, Slug, fill_visible};
//!
//! # async fn example(source: impl ContentSource) -> Result<(), folio_core::Error> {
//! let articles = Accumulator::new(source);
//! let rust = ContentFilter::tag(Slug::new("rust")?);
//!
//! fill_visible(&articles, Some(&rust), 10, 5).await;
//! for item in articles.visible(&rust) {
//!     println!("{}", item.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod accumulator;
pub mod content;
pub mod error;
pub mod token;
pub mod traits;
pub mod types;
pub mod view;

pub use accumulator::{
    Accumulator, AccumulatorConfig, DEFAULT_OVERFETCH, LoadOutcome, Phase, Snapshot,
};
pub use content::{
    Article, Author, AuthorRef, ContentFilter, ContentItem, Page, PageRequest, PaginationCursor,
    Product, Tag, TagColor,
};
pub use error::Error;
pub use token::ApiToken;
pub use traits::{ContentSource, ProductSource};
pub use types::{ApiUrl, Slug};
pub use view::{FillReport, TagCount, fill_visible, tag_tally};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
