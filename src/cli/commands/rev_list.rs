//! rev-list command - List or count commits reachable from refspecs

use super::open_repository;
use crate::cli::Context;
use crate::git::{RevListCountOptions, RevListOptions};
use crate::ui::output;
use anyhow::{Context as _, Result};

/// List the commits reachable from `refspecs`, or only count them.
pub fn rev_list(ctx: &Context, refspecs: &[String], count: bool, path: Option<String>) -> Result<()> {
    let repo = open_repository(ctx)?;

    if count {
        let n = repo
            .rev_list_count(
                refspecs,
                RevListCountOptions {
                    path,
                    ..Default::default()
                },
            )
            .context("Failed to count commits")?;
        if ctx.json {
            return output::print_json(&n);
        }
        println!("{}", n);
        return Ok(());
    }

    let commits = repo
        .rev_list(
            refspecs,
            RevListOptions {
                path,
                ..Default::default()
            },
        )
        .context("Failed to list commits")?;
    output::print_commits(&commits, ctx.json)
}
