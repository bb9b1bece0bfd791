//! Config file contents and resolved settings.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::Duration;
use serde::{Deserialize, Serialize};

use folio_cache::DEFAULT_TTL_HOURS;
use folio_core::{ApiToken, ApiUrl, ContentFilter, DEFAULT_OVERFETCH, Slug};
use folio_remote::DEFAULT_ENDPOINT;

use crate::cli::Overrides;

/// Articles shown per listing when nothing else is asked for.
const DEFAULT_PAGE_SIZE: usize = 10;

/// The config file as written on disk. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graphql_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_ttl_hours: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overfetch: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
    /// Category name to the tag slugs it groups.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub categories: BTreeMap<String, Vec<String>>,
}

impl FileConfig {
    /// A starting config with the defaults spelled out.
    pub fn template() -> Self {
        Self {
            graphql_url: Some(DEFAULT_ENDPOINT.to_string()),
            publication_host: Some("blog.example.com".to_string()),
            token: None,
            products_url: None,
            cache_ttl_hours: Some(DEFAULT_TTL_HOURS),
            overfetch: Some(DEFAULT_OVERFETCH),
            page_size: Some(DEFAULT_PAGE_SIZE),
            categories: BTreeMap::new(),
        }
    }
}

/// Settings after applying defaults, the config file, the environment, and
/// command-line flags, in that order.
#[derive(Debug, Clone)]
pub struct Settings {
    pub graphql_url: ApiUrl,
    pub publication_host: Option<String>,
    pub token: Option<ApiToken>,
    pub products_url: Option<ApiUrl>,
    pub cache_ttl: Duration,
    pub overfetch: usize,
    pub page_size: usize,
    pub categories: BTreeMap<String, Vec<Slug>>,
    pub cache_dir: PathBuf,
}

impl Settings {
    /// Resolve settings. `env` looks up environment variables.
    pub fn resolve(
        file: FileConfig,
        overrides: &Overrides,
        env: impl Fn(&str) -> Option<String>,
        cache_dir: PathBuf,
    ) -> Result<Self> {
        let pick = |flag: &Option<String>, var: &str, file: Option<String>| {
            flag.clone()
                .or_else(|| env(var))
                .filter(|v| !v.trim().is_empty())
                .or(file)
        };

        let graphql_url = pick(&overrides.graphql_url, "FOLIO_GRAPHQL_URL", file.graphql_url)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let graphql_url = ApiUrl::new(&graphql_url).context("Invalid GraphQL URL")?;

        let publication_host = pick(&overrides.host, "FOLIO_PUBLICATION_HOST", file.publication_host);

        let token = pick(&overrides.token, "FOLIO_TOKEN", file.token)
            .map(ApiToken::new)
            .transpose()
            .context("Invalid API token")?;

        let products_url = pick(&overrides.products_url, "FOLIO_PRODUCTS_URL", file.products_url)
            .map(|u| ApiUrl::new(&u))
            .transpose()
            .context("Invalid products URL")?;

        let ttl_hours = file.cache_ttl_hours.unwrap_or(DEFAULT_TTL_HOURS);
        if ttl_hours < 0 {
            bail!("cache_ttl_hours must not be negative");
        }
        let Some(cache_ttl) = Duration::try_hours(ttl_hours) else {
            bail!("cache_ttl_hours is too large: {}", ttl_hours);
        };

        let page_size = file.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            bail!("page_size must be at least 1");
        }

        let mut categories = BTreeMap::new();
        for (name, tags) in file.categories {
            let slugs = tags
                .iter()
                .map(Slug::new)
                .collect::<Result<Vec<_>, _>>()
                .with_context(|| format!("Invalid tag in category '{}'", name))?;
            categories.insert(name, slugs);
        }

        Ok(Self {
            graphql_url,
            publication_host,
            token,
            products_url,
            cache_ttl,
            overfetch: file.overfetch.unwrap_or(DEFAULT_OVERFETCH),
            page_size,
            categories,
            cache_dir,
        })
    }

    /// Load the config file and resolve against the process environment.
    pub fn load(overrides: &Overrides) -> Result<Self> {
        let file = super::storage::load_config()?;
        let cache_dir = super::storage::cache_dir()?;
        Self::resolve(file, overrides, |var| std::env::var(var).ok(), cache_dir)
    }

    /// The publication host, or an error explaining how to set one.
    pub fn require_host(&self) -> Result<&str> {
        self.publication_host.as_deref().context(
            "No publication host configured. Pass --host, set FOLIO_PUBLICATION_HOST, \
             or add publication_host to the config file.",
        )
    }

    /// The product listing URL, or an error explaining how to set one.
    pub fn require_products_url(&self) -> Result<&ApiUrl> {
        self.products_url.as_ref().context(
            "No products URL configured. Pass --products-url, set FOLIO_PRODUCTS_URL, \
             or add products_url to the config file.",
        )
    }

    /// Build the filter for a named category.
    pub fn category_filter(&self, name: &str) -> Result<ContentFilter> {
        match self.categories.get(name) {
            Some(tags) => Ok(ContentFilter::category(name, tags.clone())),
            None => {
                let known: Vec<&str> = self.categories.keys().map(String::as_str).collect();
                if known.is_empty() {
                    bail!("Unknown category '{}'. No categories are configured.", name)
                }
                bail!(
                    "Unknown category '{}'. Configured: {}",
                    name,
                    known.join(", ")
                )
            }
        }
    }
}
