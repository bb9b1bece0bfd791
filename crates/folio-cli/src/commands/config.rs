//! Config command implementation.

use anyhow::{Result, bail};
use clap::{Args, Subcommand};

use crate::cli::Overrides;
use crate::config::{FileConfig, Settings, storage};
use crate::output;

#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Show the resolved settings
    Show,

    /// Print the config file path
    Path,

    /// Write a starting config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(cmd: ConfigCommand, overrides: &Overrides) -> Result<()> {
    match cmd.command {
        ConfigSubcommand::Show => show(overrides),
        ConfigSubcommand::Path => {
            println!("{}", storage::config_path()?.display());
            Ok(())
        }
        ConfigSubcommand::Init { force } => init(force),
    }
}

fn show(overrides: &Overrides) -> Result<()> {
    let settings = Settings::load(overrides)?;

    output::field("Config file", &storage::config_path()?.display().to_string());
    output::field("GraphQL URL", settings.graphql_url.as_str());
    output::field(
        "Publication",
        settings.publication_host.as_deref().unwrap_or("(not set)"),
    );
    output::field(
        "Token",
        if settings.token.is_some() { "(set)" } else { "(not set)" },
    );
    output::field(
        "Products URL",
        settings
            .products_url
            .as_ref()
            .map(|u| u.as_str())
            .unwrap_or("(not set)"),
    );
    output::field("Cache dir", &settings.cache_dir.display().to_string());
    output::field(
        "Cache TTL",
        &format!("{} hours", settings.cache_ttl.num_hours()),
    );
    output::field("Overfetch", &settings.overfetch.to_string());
    output::field("Page size", &settings.page_size.to_string());
    for (name, tags) in &settings.categories {
        let tags: Vec<&str> = tags.iter().map(|t| t.as_str()).collect();
        output::field(&format!("Category {}", name), &tags.join(", "));
    }

    Ok(())
}

fn init(force: bool) -> Result<()> {
    let path = storage::config_path()?;
    if path.exists() && !force {
        bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    let path = storage::save_config(&FileConfig::template())?;
    output::success(&format!("Wrote {}", path.display()));

    Ok(())
}
