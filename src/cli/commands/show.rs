//! show command - Display the commit a revision names

use super::open_repository;
use crate::cli::Context;
use crate::git::CommitByRevisionOptions;
use crate::ui::output;
use anyhow::{Context as _, Result};

/// Resolve `rev` and print the commit.
pub fn show(ctx: &Context, rev: &str, path: Option<String>) -> Result<()> {
    let repo = open_repository(ctx)?;
    let commit = repo
        .commit_by_revision(
            rev,
            CommitByRevisionOptions {
                path,
                ..Default::default()
            },
        )
        .with_context(|| format!("Failed to resolve '{}'", rev))?;

    if ctx.json {
        output::print_json(commit.as_ref())
    } else {
        print!("{}", output::format_commit_detail(&commit));
        Ok(())
    }
}
