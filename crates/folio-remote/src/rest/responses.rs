//! Response shapes of the product listing route.

use serde::Deserialize;

use folio_core::Product;

/// Envelope returned by the store proxy route.
#[derive(Debug, Deserialize)]
pub struct ProductsEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: Option<Vec<ProductRecord>>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One product as the upstream store describes it.
#[derive(Debug, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: u64,
    #[serde(default)]
    pub formatted_price: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub short_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub published: Option<bool>,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Product {
            id: record.id,
            name: record.name,
            description: record.description.filter(|d| !d.trim().is_empty()),
            price_cents: record.price,
            formatted_price: record.formatted_price,
            currency: record.currency.unwrap_or_else(|| "usd".to_string()),
            url: record.short_url.or(record.url),
            thumbnail_url: record.thumbnail_url.or(record.preview_url),
            published: record.published.unwrap_or(true),
        }
    }
}
