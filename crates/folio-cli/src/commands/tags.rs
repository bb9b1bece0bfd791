//! Tags command implementation.

use anyhow::Result;
use clap::Args;

use folio_core::{Accumulator, AccumulatorConfig, LoadOutcome, tag_tally};
use folio_remote::MAX_PAGE_SIZE;

use crate::config::Settings;
use crate::output;

#[derive(Args, Debug)]
pub struct TagsArgs {
    /// Pages of articles to scan
    #[arg(long, default_value_t = 3)]
    pub pages: usize,

    /// Print one JSON object per tag
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: TagsArgs, settings: &Settings) -> Result<()> {
    let source = super::article_source(settings)?;
    let articles = Accumulator::with_config(source, AccumulatorConfig { overfetch: 0 });

    for _ in 0..args.pages {
        match articles.load_more(MAX_PAGE_SIZE, None).await {
            LoadOutcome::Appended { .. } => {}
            LoadOutcome::Failed => {
                output::warn("Could not load more articles; counting what was fetched.");
                break;
            }
            _ => break,
        }
    }

    let tally = tag_tally(&articles.items());
    if tally.is_empty() {
        output::notice("No tags found.");
        return Ok(());
    }

    for entry in &tally {
        if args.json {
            output::json(entry)?;
        } else {
            println!("{:>4}  {}", entry.count, output::tag_chip(&entry.tag));
        }
    }

    output::notice(&format!("Counted over {} articles", articles.len()));

    Ok(())
}
