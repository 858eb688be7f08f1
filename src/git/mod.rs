//! git
//!
//! Read access to Git history through the git command line.
//!
//! # Architecture
//!
//! This module is the only place that runs git. Every invocation goes
//! through an [`Executor`]; output is parsed into [`Commit`](crate::core::commit::Commit)
//! values and stored in the [`Repository`]'s [`CommitCache`].
//!
//! # Responsibilities
//!
//! - Opening a working copy
//! - Commit lookup by revision expression or identity
//! - History traversal with count, skip, time and path filters
//! - Changed-path diffs between revisions
//! - Commit counting and listing for refspecs
//! - Latest commit time per branch
//!
//! # Invariants
//!
//! - A cached commit is immutable and shared, never re-parsed
//! - Symmetric ranges are passed to git as written, never resolved locally
//! - No git command writes to the repository
//!
//! # Example
//!
//! ```no_run
//! use gitrev::git::{DiffNameOnlyOptions, Repository};
//!
//! let repo = Repository::open(".")?;
//! let head = repo.commit_by_revision("HEAD", Default::default())?;
//! let changed = repo.diff_name_only(
//!     "main",
//!     "HEAD",
//!     DiffNameOnlyOptions { needs_merge_base: true, ..Default::default() },
//! )?;
//! println!("{} touched {} paths", head.id.short(7), changed.len());
//! # Ok::<(), gitrev::git::GitError>(())
//! ```

pub mod cache;
mod errors;
mod exec;
pub mod mock;
mod options;
pub mod parse;
mod repository;
pub mod revision;

pub use cache::CommitCache;
pub use errors::{classify, GitError};
pub use exec::{Executor, GitCli, GitCommand};
pub use mock::MockExecutor;
pub use options::{
    CommitByRevisionOptions, CommitsByPageOptions, CommitsSinceOptions, DiffNameOnlyOptions,
    LatestCommitTimeOptions, LogOptions, RevListCountOptions, RevListOptions,
};
pub use repository::Repository;
pub use revision::RevisionRange;
