//! latest-time command - Show the newest committer time

use super::open_repository;
use crate::cli::Context;
use crate::git::LatestCommitTimeOptions;
use crate::ui::output;
use anyhow::{Context as _, Result};

/// Print the committer time of the newest commit on `branch`, or across
/// all refs.
pub fn latest_time(ctx: &Context, branch: Option<String>) -> Result<()> {
    let repo = open_repository(ctx)?;
    let time = repo
        .latest_commit_time(LatestCommitTimeOptions {
            branch: branch.clone(),
            ..Default::default()
        })
        .with_context(|| match &branch {
            Some(b) => format!("Failed to read latest commit time of '{}'", b),
            None => "Failed to read latest commit time".to_string(),
        })?;

    if ctx.json {
        output::print_json(&time)
    } else {
        println!("{}", time.to_rfc3339());
        Ok(())
    }
}
