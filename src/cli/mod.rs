//! cli
//!
//! Command-line interface layer for gitrev.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install the tracing subscriber
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and calls
//! [`crate::git::Repository`] operations; all git access stays in
//! [`crate::git`].

pub mod args;
pub mod commands;

pub use args::Cli;

use anyhow::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Flags shared by every command.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Working directory override
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled
    pub debug: bool,
    /// JSON output requested
    pub json: bool,
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.debug);

    let ctx = Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        json: cli.json,
    };

    commands::dispatch(cli.command, &ctx)
}

/// Log to stderr, honoring `RUST_LOG` when it is set.
fn init_tracing(debug: bool) {
    let default = if debug { "gitrev=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
