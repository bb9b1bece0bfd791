//! Products command implementation.

use anyhow::Result;
use clap::Args;

use folio_core::ProductSource;

use crate::config::Settings;
use crate::output;

#[derive(Args, Debug)]
pub struct ProductsArgs {
    /// Ignore the cached listing and fetch again
    #[arg(long)]
    pub refresh: bool,

    /// Include unpublished products
    #[arg(long)]
    pub all: bool,

    /// Print one JSON object per product
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ProductsArgs, settings: &Settings) -> Result<()> {
    let source = super::product_source(settings)?;

    let products = if args.refresh {
        source.refresh().await
    } else {
        source.list_products().await
    }
    .map_err(|e| super::upstream_error(e, "list products"))?;

    if !source.storage_enabled() {
        output::warn("Product cache unavailable; listing was fetched directly.");
    }

    let shown: Vec<_> = products
        .iter()
        .filter(|p| args.all || p.published)
        .collect();

    if shown.is_empty() {
        output::notice("No products found.");
        return Ok(());
    }

    for product in shown {
        if args.json {
            output::json(product)?;
        } else {
            output::product_line(product);
        }
    }

    Ok(())
}
