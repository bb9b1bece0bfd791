//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};

use crate::commands::{
    article::ArticleArgs, articles::ArticlesArgs, author::AuthorArgs, cache::CacheCommand,
    config::ConfigCommand, products::ProductsArgs, tags::TagsArgs,
};

/// Browse a publication's articles, tags, and store.
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version = env!("FOLIO_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: Commands,
}

/// Settings given on the command line. These win over the environment and
/// the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct Overrides {
    /// GraphQL endpoint of the blogging platform
    #[arg(long, global = true)]
    pub graphql_url: Option<String>,

    /// Publication host, e.g. blog.example.com
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// API token sent as a bearer Authorization header
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Product listing URL
    #[arg(long, global = true)]
    pub products_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List articles, optionally filtered by tag, category, or text
    Articles(ArticlesArgs),

    /// Show one article
    Article(ArticleArgs),

    /// Show the publication author
    Author(AuthorArgs),

    /// Show how often each tag is used
    Tags(TagsArgs),

    /// List store products
    Products(ProductsArgs),

    /// Manage the local cache
    Cache(CacheCommand),

    /// Inspect or create the config file
    Config(ConfigCommand),
}
