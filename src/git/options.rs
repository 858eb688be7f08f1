//! git::options
//!
//! Option structs for repository operations.
//!
//! Every field is optional; `Default` means "use git's default". `timeout`
//! of `None` falls back to the repository's configured timeout.
//!
//! # Example
//!
//! ```
//! use gitrev::git::LogOptions;
//!
//! let opts = LogOptions {
//!     max_count: Some(10),
//!     path: Some("src".into()),
//!     ..Default::default()
//! };
//! assert!(opts.since.is_none());
//! ```

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Options for [`Repository::log`](super::Repository::log).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogOptions {
    /// Maximum number of commits to return.
    pub max_count: Option<usize>,
    /// Number of commits to skip before returning any.
    pub skip: Option<usize>,
    /// Only commits at or after this time.
    pub since: Option<DateTime<Utc>>,
    /// Only commits whose message matches this pattern.
    pub grep: Option<String>,
    /// Match `grep` case-insensitively.
    pub regexp_ignore_case: bool,
    /// Only commits touching this path.
    pub path: Option<String>,
    pub timeout: Option<Duration>,
}

/// Options for [`Repository::commits_by_page`](super::Repository::commits_by_page).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitsByPageOptions {
    /// Only commits touching this path.
    pub path: Option<String>,
    pub timeout: Option<Duration>,
}

/// Options for [`Repository::commit_by_revision`](super::Repository::commit_by_revision).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitByRevisionOptions {
    /// Return the newest commit at or before the revision touching this path.
    pub path: Option<String>,
    pub timeout: Option<Duration>,
}

/// Options for [`Repository::commits_since`](super::Repository::commits_since).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitsSinceOptions {
    /// Only commits touching this path.
    pub path: Option<String>,
    pub timeout: Option<Duration>,
}

/// Options for [`Repository::diff_name_only`](super::Repository::diff_name_only).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffNameOnlyOptions {
    /// Diff against the merge base of base and head (`base...head`).
    pub needs_merge_base: bool,
    /// Only paths equal to or under this path.
    pub path: Option<String>,
    pub timeout: Option<Duration>,
}

/// Options for [`Repository::rev_list_count`](super::Repository::rev_list_count).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevListCountOptions {
    /// Only count commits touching this path.
    pub path: Option<String>,
    pub timeout: Option<Duration>,
}

/// Options for [`Repository::rev_list`](super::Repository::rev_list).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevListOptions {
    /// Only list commits touching this path.
    pub path: Option<String>,
    pub timeout: Option<Duration>,
}

/// Options for [`Repository::latest_commit_time`](super::Repository::latest_commit_time).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LatestCommitTimeOptions {
    /// Branch to inspect. `None` means the newest commit across all refs.
    pub branch: Option<String>,
    pub timeout: Option<Duration>,
}

impl From<CommitsSinceOptions> for LogOptions {
    fn from(opts: CommitsSinceOptions) -> Self {
        LogOptions {
            path: opts.path,
            timeout: opts.timeout,
            ..Default::default()
        }
    }
}
