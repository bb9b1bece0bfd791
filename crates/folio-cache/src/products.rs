//! Read-through product cache.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use folio_core::{Error, Product, ProductSource, Result};

use crate::store::TtlCache;

/// Cache key of the product listing.
pub const PRODUCTS_KEY: &str = "products";

/// A [`ProductSource`] that answers from a [`TtlCache`] while the cached
/// listing is fresh and fetches from `inner` otherwise.
///
/// Storage failures never fail a listing. The first one switches the cache
/// off for the lifetime of this value and every later call goes straight to
/// `inner`.
#[derive(Debug)]
pub struct CachedProducts<S> {
    inner: S,
    cache: TtlCache,
    storage_ok: AtomicBool,
}

impl<S: ProductSource> CachedProducts<S> {
    pub fn new(inner: S, cache: TtlCache) -> Self {
        Self {
            inner,
            cache,
            storage_ok: AtomicBool::new(true),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn cache(&self) -> &TtlCache {
        &self.cache
    }

    /// Whether the cache is still in use.
    pub fn storage_enabled(&self) -> bool {
        self.storage_ok.load(Ordering::Relaxed)
    }

    /// Fetch from upstream regardless of the cache, then store the result.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<Vec<Product>> {
        let products = self.inner.list_products().await?;
        self.store(&products);
        Ok(products)
    }

    /// Drop the cached listing.
    pub fn invalidate(&self) -> Result<bool> {
        self.cache.remove(PRODUCTS_KEY)
    }

    fn cached(&self) -> Option<Vec<Product>> {
        if !self.storage_enabled() {
            return None;
        }
        match self.cache.get(PRODUCTS_KEY) {
            Ok(hit) => hit,
            Err(e) => {
                self.disable(&e);
                None
            }
        }
    }

    fn store(&self, products: &[Product]) {
        if !self.storage_enabled() {
            return;
        }
        if let Err(e) = self.cache.put(PRODUCTS_KEY, &products) {
            self.disable(&e);
        }
    }

    fn disable(&self, err: &Error) {
        warn!(error = %err, "product cache unavailable, fetching directly");
        self.storage_ok.store(false, Ordering::Relaxed);
    }
}

#[async_trait]
impl<S: ProductSource> ProductSource for CachedProducts<S> {
    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>> {
        if let Some(products) = self.cached() {
            debug!(count = products.len(), "products served from cache");
            return Ok(products);
        }
        self.refresh().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::Duration;
    use folio_core::error::TransportError;
    use tempfile::TempDir;

    use super::*;

    /// Returns a fixed listing and counts calls.
    struct Counting {
        calls: Mutex<usize>,
        fail: bool,
    }

    impl Counting {
        fn new() -> Self {
            Self {
                calls: Mutex::new(0),
                fail: false,
            }
        }

        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl ProductSource for Counting {
        async fn list_products(&self) -> Result<Vec<Product>> {
            *self.calls.lock().unwrap() += 1;
            if self.fail {
                return Err(TransportError::Timeout.into());
            }
            Ok(vec![Product {
                id: "p1".to_string(),
                name: "Handbook".to_string(),
                description: None,
                price_cents: 2500,
                formatted_price: Some("$25".to_string()),
                currency: "usd".to_string(),
                url: None,
                thumbnail_url: None,
                published: true,
            }])
        }
    }

    #[tokio::test]
    async fn second_call_is_served_from_cache() {
        let dir = TempDir::new().unwrap();
        let products = CachedProducts::new(Counting::new(), TtlCache::with_default_ttl(dir.path()));

        let first = products.list_products().await.unwrap();
        let second = products.list_products().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(products.inner().calls(), 1);
    }

    #[tokio::test]
    async fn expired_listing_is_refetched() {
        let dir = TempDir::new().unwrap();
        let products = CachedProducts::new(
            Counting::new(),
            TtlCache::new(dir.path(), Duration::zero()),
        );

        products.list_products().await.unwrap();
        products.list_products().await.unwrap();

        assert_eq!(products.inner().calls(), 2);
    }

    #[tokio::test]
    async fn refresh_bypasses_cache() {
        let dir = TempDir::new().unwrap();
        let products = CachedProducts::new(Counting::new(), TtlCache::with_default_ttl(dir.path()));

        products.list_products().await.unwrap();
        products.refresh().await.unwrap();
        products.list_products().await.unwrap();

        assert_eq!(products.inner().calls(), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_fetch() {
        let dir = TempDir::new().unwrap();
        let products = CachedProducts::new(Counting::new(), TtlCache::with_default_ttl(dir.path()));

        products.list_products().await.unwrap();
        assert!(products.invalidate().unwrap());
        products.list_products().await.unwrap();

        assert_eq!(products.inner().calls(), 2);
    }

    #[tokio::test]
    async fn unusable_storage_falls_back_to_direct_fetch() {
        let dir = TempDir::new().unwrap();
        // A regular file where the cache directory should be.
        let blocked = dir.path().join("cache");
        std::fs::write(&blocked, "not a directory").unwrap();

        let products = CachedProducts::new(Counting::new(), TtlCache::with_default_ttl(&blocked));

        let listed = products.list_products().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(!products.storage_enabled());

        products.list_products().await.unwrap();
        assert_eq!(products.inner().calls(), 2);
    }

    #[tokio::test]
    async fn upstream_errors_are_returned() {
        let dir = TempDir::new().unwrap();
        let products = CachedProducts::new(
            Counting {
                calls: Mutex::new(0),
                fail: true,
            },
            TtlCache::with_default_ttl(dir.path()),
        );

        assert!(products.list_products().await.is_err());
        assert!(products.cache().get::<Vec<Product>>(PRODUCTS_KEY).unwrap().is_none());
    }
}
