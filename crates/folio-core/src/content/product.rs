//! Product type.

use serde::{Deserialize, Serialize};

/// A product listed in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Price in the smallest currency unit.
    pub price_cents: u64,

    /// Price as the store formats it, e.g. `$12`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_price: Option<String>,

    /// ISO currency code, lowercase as the store reports it.
    pub currency: String,

    /// Purchase page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,

    #[serde(default)]
    pub published: bool,
}

impl Product {
    /// The price for display, falling back to a plain rendering of the
    /// minor units when the store did not format it.
    pub fn display_price(&self) -> String {
        match &self.formatted_price {
            Some(formatted) => formatted.clone(),
            None => format!(
                "{}.{:02} {}",
                self.price_cents / 100,
                self.price_cents % 100,
                self.currency.to_uppercase()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(formatted: Option<&str>) -> Product {
        Product {
            id: "p1".to_string(),
            name: "Rust Course".to_string(),
            description: None,
            price_cents: 1999,
            formatted_price: formatted.map(str::to_string),
            currency: "usd".to_string(),
            url: None,
            thumbnail_url: None,
            published: true,
        }
    }

    #[test]
    fn display_price_prefers_store_format() {
        assert_eq!(product(Some("$19.99")).display_price(), "$19.99");
    }

    #[test]
    fn display_price_falls_back_to_minor_units() {
        assert_eq!(product(None).display_price(), "19.99 USD");
    }
}
