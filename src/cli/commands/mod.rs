//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Opens the repository with the loaded configuration
//! 2. Calls one [`Repository`] operation
//! 3. Formats and displays output
//!
//! Handlers never run git themselves.

mod diff_names;
mod latest_time;
mod log_cmd;
mod rev_list;
mod show;

pub use diff_names::diff_names;
pub use latest_time::latest_time;
pub use log_cmd::{log, LogArgs};
pub use rev_list::rev_list;
pub use show::show;

use crate::cli::args::Command;
use crate::cli::Context;
use crate::core::config::Config;
use crate::git::Repository;
use anyhow::{Context as _, Result};

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Log {
            rev,
            since,
            max_count,
            skip,
            page,
            page_size,
            grep,
            regexp_ignore_case,
            path,
        } => log_cmd::log(
            ctx,
            &rev,
            log_cmd::LogArgs {
                since,
                max_count,
                skip,
                page: page.zip(page_size),
                grep,
                regexp_ignore_case,
                path,
            },
        ),
        Command::Show { rev, path } => show::show(ctx, &rev, path),
        Command::DiffNames {
            base,
            head,
            merge_base,
            path,
        } => diff_names::diff_names(ctx, &base, &head, merge_base, path),
        Command::RevList {
            refspecs,
            count,
            path,
        } => rev_list::rev_list(ctx, &refspecs, count, path),
        Command::LatestTime { branch } => latest_time::latest_time(ctx, branch),
    }
}

/// Open the repository for the context's working directory.
///
/// Configuration is loaded from the global file and the repository's
/// `.git/gitrev/config.toml`. The repository file is looked up at the work
/// tree root, so it applies from any subdirectory.
pub(crate) fn open_repository(ctx: &Context) -> Result<Repository> {
    let cwd = match &ctx.cwd {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    // The global file alone decides how git is run to find the root.
    let global = Config::load(None)
        .context("Failed to load configuration")?
        .config;
    let repo = Repository::open_with_config(&cwd, &global)
        .with_context(|| format!("Failed to open repository at {}", cwd.display()))?;
    let root = match repo.toplevel() {
        Ok(root) => root,
        Err(err) => {
            tracing::debug!(error = %err, "no work tree root, using working directory");
            repo.path().to_path_buf()
        }
    };

    let config = Config::load(Some(root.as_path()))
        .context("Failed to load configuration")?
        .config;
    if let Some(path) = config.repo_config_loaded_from() {
        tracing::debug!(path = %path.display(), "loaded repository config");
    }

    Repository::open_with_config(&cwd, &config)
        .with_context(|| format!("Failed to open repository at {}", cwd.display()))
}
