//! Core traits for content and product sources.

mod content;
mod product;

pub use content::ContentSource;
pub use product::ProductSource;
