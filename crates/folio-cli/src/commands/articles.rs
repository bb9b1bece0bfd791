//! Articles command implementation.

use anyhow::{Context, Result};
use clap::Args;

use folio_core::{
    Accumulator, AccumulatorConfig, ContentFilter, LoadOutcome, Slug, fill_visible,
};

use crate::config::Settings;
use crate::output;

#[derive(Args, Debug)]
pub struct ArticlesArgs {
    /// Only articles carrying this tag slug
    #[arg(long, conflicts_with_all = ["category", "search"])]
    pub tag: Option<String>,

    /// Only articles in this configured category
    #[arg(long, conflicts_with = "search")]
    pub category: Option<String>,

    /// Only articles whose title, brief, or tags contain this text
    #[arg(long)]
    pub search: Option<String>,

    /// Number of articles to show (defaults to page_size)
    #[arg(long, short = 'n')]
    pub count: Option<usize>,

    /// Give up after this many page requests
    #[arg(long, default_value_t = 5)]
    pub max_rounds: usize,

    /// Print one JSON object per article
    #[arg(long)]
    pub json: bool,
}

impl ArticlesArgs {
    fn filter(&self, settings: &Settings) -> Result<Option<ContentFilter>> {
        if let Some(tag) = &self.tag {
            let slug = Slug::new(tag).context("Invalid tag slug")?;
            return Ok(Some(ContentFilter::tag(slug)));
        }
        if let Some(name) = &self.category {
            return settings.category_filter(name).map(Some);
        }
        Ok(self.search.as_ref().map(ContentFilter::search))
    }
}

pub async fn run(args: ArticlesArgs, settings: &Settings) -> Result<()> {
    let filter = args.filter(settings)?;
    let count = args.count.unwrap_or(settings.page_size).max(1);

    let source = super::article_source(settings)?;
    let articles = Accumulator::with_config(
        source,
        AccumulatorConfig {
            overfetch: settings.overfetch,
        },
    );

    let report = fill_visible(&articles, filter.as_ref(), count, args.max_rounds).await;
    if report.last == Some(LoadOutcome::Failed) {
        output::warn("Could not load more articles; showing what was fetched.");
    }

    let mut items = match &filter {
        Some(filter) => articles.visible(filter),
        None => articles.items(),
    };
    items.truncate(count);

    if items.is_empty() {
        output::notice("No articles found.");
        return Ok(());
    }

    for item in &items {
        if args.json {
            output::json(item)?;
        } else {
            output::article_line(item);
        }
    }

    if let Some(total) = articles.total_hint() {
        output::notice(&format!("{} matching", total));
    }
    if articles.has_more() {
        output::notice(&format!(
            "More available. Run with --count {} to see more.",
            count.saturating_mul(2)
        ));
    }

    Ok(())
}
