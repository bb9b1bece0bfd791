//! Article command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use folio_core::Slug;

use crate::config::Settings;
use crate::output;

#[derive(Args, Debug)]
pub struct ArticleArgs {
    /// Article slug
    pub slug: String,

    /// Print the article as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ArticleArgs, settings: &Settings) -> Result<()> {
    let slug = Slug::new(&args.slug).context("Invalid article slug")?;
    let source = super::article_source(settings)?;

    let Some(article) = source
        .article(&slug)
        .await
        .map_err(|e| super::upstream_error(e, "fetch article"))?
    else {
        bail!("No article with slug '{}'", slug);
    };

    if args.json {
        return output::json_pretty(&article);
    }

    output::field("Title", &article.item.title);
    output::field("Published", &article.item.published_at.to_rfc3339());
    if let Some(author) = &article.author {
        output::field("Author", &format!("{} (@{})", author.name, author.username));
    }
    if let Some(minutes) = article.read_time_minutes {
        output::field("Read time", &format!("{} min", minutes));
    }
    if !article.item.tags.is_empty() {
        let tags: Vec<String> = article
            .item
            .tags
            .iter()
            .map(|t| output::tag_chip(t).to_string())
            .collect();
        output::field("Tags", &tags.join(" "));
    }
    println!();
    println!("{}", article.markdown);

    Ok(())
}
