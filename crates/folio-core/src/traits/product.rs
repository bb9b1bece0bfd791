//! Product source trait.

use async_trait::async_trait;

use crate::Result;
use crate::content::Product;

/// A listing of store products.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// List all products.
    async fn list_products(&self) -> Result<Vec<Product>>;
}
