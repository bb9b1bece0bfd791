//! Author command implementation.

use anyhow::Result;
use clap::Args;

use crate::config::Settings;
use crate::output;

#[derive(Args, Debug)]
pub struct AuthorArgs {
    /// Print the profile as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: AuthorArgs, settings: &Settings) -> Result<()> {
    let source = super::article_source(settings)?;
    let author = source
        .author()
        .await
        .map_err(|e| super::upstream_error(e, "fetch author"))?;

    if args.json {
        return output::json_pretty(&author);
    }

    output::field("Publication", source.host());
    output::field("Name", &author.name);
    output::field("Username", &author.username);
    if let Some(bio) = &author.bio {
        output::field("Bio", bio);
    }
    if let Some(picture) = &author.profile_picture {
        output::field("Picture", picture);
    }

    Ok(())
}
