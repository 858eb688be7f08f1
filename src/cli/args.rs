//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--json`: Machine-readable output

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// gitrev - Structured access to Git history
#[derive(Parser, Debug)]
#[command(name = "gitrev")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if gitrev was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List commits reachable from a revision
    #[command(
        name = "log",
        long_about = "List commits reachable from a revision, most recent first.\n\n\
            The revision may be a branch, tag, hash, or any range git understands.",
        after_help = "\
EXAMPLES:
    # Last ten commits on main
    gitrev log main --max-count 10

    # Second page of twenty
    gitrev log main --page 2 --page-size 20

    # Commits touching src/ since a date
    gitrev log HEAD --since 2020-02-09T00:00:00Z --path src"
    )]
    Log {
        /// Revision to start from
        #[arg(default_value = "HEAD")]
        rev: String,

        /// Only commits at or after this time (RFC 3339)
        #[arg(long)]
        since: Option<DateTime<Utc>>,

        /// Maximum number of commits
        #[arg(short = 'n', long)]
        max_count: Option<usize>,

        /// Skip this many commits first
        #[arg(long, conflicts_with = "page")]
        skip: Option<usize>,

        /// Page number, starting at 1
        #[arg(long, requires = "page_size")]
        page: Option<usize>,

        /// Commits per page
        #[arg(long, requires = "page")]
        page_size: Option<usize>,

        /// Only commits whose message matches this pattern
        #[arg(long)]
        grep: Option<String>,

        /// Match --grep case-insensitively
        #[arg(short = 'i', long)]
        regexp_ignore_case: bool,

        /// Only commits touching this path
        #[arg(long)]
        path: Option<String>,
    },

    /// Show the commit a revision names
    Show {
        /// Revision to resolve
        rev: String,

        /// Newest commit at or before the revision touching this path
        #[arg(long)]
        path: Option<String>,
    },

    /// List paths changed between two revisions
    #[command(name = "diff-names")]
    DiffNames {
        /// Base revision
        base: String,

        /// Head revision
        head: String,

        /// Diff from the merge base of base and head
        #[arg(long)]
        merge_base: bool,

        /// Only paths equal to or under this path
        #[arg(long)]
        path: Option<String>,
    },

    /// List or count commits reachable from refspecs
    #[command(name = "rev-list")]
    RevList {
        /// Refspecs to walk
        #[arg(required = true)]
        refspecs: Vec<String>,

        /// Print only the number of commits
        #[arg(long)]
        count: bool,

        /// Only commits touching this path
        #[arg(long)]
        path: Option<String>,
    },

    /// Show the committer time of the newest commit
    #[command(name = "latest-time")]
    LatestTime {
        /// Branch to inspect (defaults to all refs)
        #[arg(long)]
        branch: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["gitrev", "show", "HEAD", "--json", "--cwd", "/tmp"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.cwd, Some(PathBuf::from("/tmp")));
        assert!(matches!(cli.command, Command::Show { ref rev, .. } if rev == "HEAD"));
    }

    #[test]
    fn log_defaults_to_head() {
        let cli = Cli::try_parse_from(["gitrev", "log"]).unwrap();
        match cli.command {
            Command::Log { rev, since, .. } => {
                assert_eq!(rev, "HEAD");
                assert!(since.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn log_parses_since() {
        let cli =
            Cli::try_parse_from(["gitrev", "log", "main", "--since", "2020-02-09T12:18:00Z"]).unwrap();
        match cli.command {
            Command::Log { since, .. } => {
                assert_eq!(since.map(|t| t.timestamp()), Some(1581250680));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn page_requires_size() {
        assert!(Cli::try_parse_from(["gitrev", "log", "--page", "2"]).is_err());
        assert!(Cli::try_parse_from(["gitrev", "log", "--page", "2", "--skip", "1", "--page-size", "3"]).is_err());
    }

    #[test]
    fn rev_list_requires_refspec() {
        assert!(Cli::try_parse_from(["gitrev", "rev-list"]).is_err());
        let cli = Cli::try_parse_from(["gitrev", "rev-list", "a", "b", "--count"]).unwrap();
        assert!(matches!(cli.command, Command::RevList { count: true, ref refspecs, .. } if refspecs.len() == 2));
    }
}
