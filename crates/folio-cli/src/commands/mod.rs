//! Subcommand implementations.

pub mod article;
pub mod articles;
pub mod author;
pub mod cache;
pub mod config;
pub mod products;
pub mod tags;

use anyhow::{Context, Result};
use tracing::debug;

use folio_cache::{CachedProducts, TtlCache};
use folio_remote::{GraphqlClient, HashnodeSource, ProductClient};

use crate::cli::{Commands, Overrides};
use crate::config::Settings;

pub async fn handle(command: Commands, overrides: &Overrides) -> Result<()> {
    match command {
        Commands::Articles(args) => articles::run(args, &settings(overrides)?).await,
        Commands::Article(args) => article::run(args, &settings(overrides)?).await,
        Commands::Author(args) => author::run(args, &settings(overrides)?).await,
        Commands::Tags(args) => tags::run(args, &settings(overrides)?).await,
        Commands::Products(args) => products::run(args, &settings(overrides)?).await,
        Commands::Cache(cmd) => cache::run(cmd, &settings(overrides)?),
        // Config commands must work even when the config file is unusable.
        Commands::Config(cmd) => config::run(cmd, overrides),
    }
}

fn settings(overrides: &Overrides) -> Result<Settings> {
    let settings = Settings::load(overrides)?;
    debug!(
        endpoint = %settings.graphql_url,
        host = ?settings.publication_host,
        "settings resolved"
    );
    Ok(settings)
}

/// Build the article source for the configured publication.
fn article_source(settings: &Settings) -> Result<HashnodeSource> {
    let host = settings.require_host()?;
    let client = GraphqlClient::new(settings.graphql_url.clone(), settings.token.clone())
        .context("Failed to create GraphQL client")?;
    debug!(authenticated = client.is_authenticated(), "GraphQL client ready");
    HashnodeSource::new(client, host).context("Invalid publication host")
}

/// Build the cached product source.
fn product_source(settings: &Settings) -> Result<CachedProducts<ProductClient>> {
    let url = settings.require_products_url()?;
    let client = ProductClient::new(url.clone()).context("Failed to create product client")?;
    let cache = TtlCache::new(&settings.cache_dir, settings.cache_ttl);
    Ok(CachedProducts::new(client, cache))
}

/// Attach context to an upstream failure, with a hint when the credentials
/// were rejected.
fn upstream_error(err: folio_core::Error, action: &str) -> anyhow::Error {
    let auth = err.is_auth_error();
    let err = anyhow::Error::new(err).context(format!("Failed to {}", action));
    if auth {
        err.context("The upstream rejected the credentials. Check --token or FOLIO_TOKEN.")
    } else {
        err
    }
}
