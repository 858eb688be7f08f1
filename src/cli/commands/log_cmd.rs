//! log command - List commits reachable from a revision

use super::open_repository;
use crate::cli::Context;
use crate::git::{CommitsByPageOptions, LogOptions};
use crate::ui::output;
use anyhow::{Context as _, Result};
use chrono::{DateTime, Utc};

/// Filters accepted by `gitrev log`.
#[derive(Debug, Clone, Default)]
pub struct LogArgs {
    pub since: Option<DateTime<Utc>>,
    pub max_count: Option<usize>,
    pub skip: Option<usize>,
    /// `(page, size)` when paging.
    pub page: Option<(usize, usize)>,
    pub grep: Option<String>,
    pub regexp_ignore_case: bool,
    pub path: Option<String>,
}

/// List commits reachable from `rev`.
///
/// With `page`, other traversal filters besides `path` are ignored.
pub fn log(ctx: &Context, rev: &str, args: LogArgs) -> Result<()> {
    let repo = open_repository(ctx)?;

    let commits = match args.page {
        Some((page, size)) => repo.commits_by_page(
            rev,
            page,
            size,
            CommitsByPageOptions {
                path: args.path,
                ..Default::default()
            },
        ),
        None => repo.log(
            rev,
            LogOptions {
                max_count: args.max_count,
                skip: args.skip,
                since: args.since,
                grep: args.grep,
                regexp_ignore_case: args.regexp_ignore_case,
                path: args.path,
                ..Default::default()
            },
        ),
    }
    .with_context(|| format!("Failed to list commits for '{}'", rev))?;

    output::print_commits(&commits, ctx.json)
}
