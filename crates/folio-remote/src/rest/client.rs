//! HTTP client for the product listing route.

use async_trait::async_trait;
use tracing::{debug, instrument, trace};

use folio_core::error::ApiError;
use folio_core::{ApiUrl, Product, ProductSource, Result};

use super::responses::ProductsEnvelope;
use crate::http::{build_client, decode_json, status_error, transport_error};

/// Reads the product listing from a JSON endpoint answering
/// `{ success, data: [...] }`.
#[derive(Debug, Clone)]
pub struct ProductClient {
    client: reqwest::Client,
    endpoint: ApiUrl,
}

impl ProductClient {
    /// Create a client for the given listing URL.
    pub fn new(endpoint: ApiUrl) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            endpoint,
        })
    }

    /// Returns the listing URL.
    pub fn endpoint(&self) -> &ApiUrl {
        &self.endpoint
    }
}

#[async_trait]
impl ProductSource for ProductClient {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn list_products(&self) -> Result<Vec<Product>> {
        debug!("Fetching products");

        let response = self
            .client
            .get(self.endpoint.as_str())
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        trace!(status = %status, "product listing response");
        if !status.is_success() {
            return Err(status_error(response).await);
        }

        let envelope: ProductsEnvelope = decode_json(response).await?;
        if !envelope.success {
            return Err(ApiError::Rejected {
                message: envelope.message.or(envelope.error),
            }
            .into());
        }

        let products: Vec<Product> = envelope
            .data
            .ok_or(ApiError::MissingData { what: "data" })?
            .into_iter()
            .map(Product::from)
            .collect();

        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }
}
