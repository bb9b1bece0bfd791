//! Validated primitive types.
//!
//! These types check their invariants at construction time, so a value that
//! exists is a value that can be sent upstream.

mod api_url;
mod slug;

pub use api_url::ApiUrl;
pub use slug::Slug;
