//! Cache command implementation.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use folio_cache::TtlCache;

use crate::config::Settings;
use crate::output;

#[derive(Args, Debug)]
pub struct CacheCommand {
    #[command(subcommand)]
    pub command: CacheSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CacheSubcommand {
    /// Remove every cached entry
    Clear,

    /// Print the cache directory
    Path,
}

pub fn run(cmd: CacheCommand, settings: &Settings) -> Result<()> {
    match cmd.command {
        CacheSubcommand::Clear => {
            let cache = TtlCache::new(&settings.cache_dir, settings.cache_ttl);
            let removed = cache.clear().context("Failed to clear cache")?;
            output::success(&format!("Removed {} cached entries", removed));
        }
        CacheSubcommand::Path => println!("{}", settings.cache_dir.display()),
    }
    Ok(())
}
