//! git::repository
//!
//! History operations on a single working copy.
//!
//! # Architecture
//!
//! A [`Repository`] couples a normalized path with an [`Executor`] and the
//! [`CommitCache`] it exclusively owns. Each operation validates its
//! arguments, builds one [`GitCommand`], runs it, and parses the output.
//! Any full commit passes through the cache, so the same commit reached by
//! different traversals is parsed once and shared as `Arc<Commit>`.
//!
//! # Errors
//!
//! Argument problems are reported as [`GitError::ValidationError`] before
//! git is run. Failures mentioning an unknown revision become
//! [`GitError::RevisionNotExist`]; everything else is returned unchanged.
//! An empty result is a success, never an error.
//!
//! # Example
//!
//! ```no_run
//! use gitrev::git::{LogOptions, Repository};
//!
//! let repo = Repository::open(".")?;
//! for commit in repo.log("HEAD", LogOptions { max_count: Some(5), ..Default::default() })? {
//!     println!("{} {}", commit.id.short(7), commit.summary());
//! }
//! # Ok::<(), gitrev::git::GitError>(())
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};

use super::cache::CommitCache;
use super::errors::{classify, GitError};
use super::exec::{Executor, GitCli, GitCommand};
use super::options::{
    CommitByRevisionOptions, CommitsByPageOptions, CommitsSinceOptions, DiffNameOnlyOptions,
    LatestCommitTimeOptions, LogOptions, RevListCountOptions, RevListOptions,
};
use super::parse::{
    parse_commits, parse_count, parse_ids, parse_iso_time, parse_names, utf8, COMMIT_FORMAT,
};
use super::revision::{self, validate_rev};
use crate::core::commit::Commit;
use crate::core::config::{Config, DEFAULT_TIMEOUT};
use crate::core::types::Sha1;

/// Most commit ids passed to a single `git log --no-walk`.
const COMMIT_BATCH_SIZE: usize = 256;

/// A Git working copy.
#[derive(Debug)]
pub struct Repository {
    path: PathBuf,
    executor: Arc<dyn Executor>,
    cache: CommitCache,
    timeout: Duration,
}

impl Repository {
    /// Open the repository at `path` with default settings.
    ///
    /// The path is made absolute and must be an existing directory. No git
    /// command is run.
    ///
    /// # Errors
    ///
    /// [`GitError::NotADirectory`] if `path` does not name a directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let normalized = fs::canonicalize(path)
            .ok()
            .filter(|p| p.is_dir())
            .ok_or_else(|| GitError::NotADirectory {
                path: path.to_path_buf(),
            })?;

        Ok(Self {
            path: normalized,
            executor: Arc::new(GitCli::default()),
            cache: CommitCache::new(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Open the repository using the git program and timeout from `config`.
    pub fn open_with_config(path: impl AsRef<Path>, config: &Config) -> Result<Self, GitError> {
        Ok(Self::open(path)?
            .with_executor(Arc::new(GitCli::new(config.git_program())))
            .with_timeout(config.timeout()))
    }

    /// Replace the executor used for every invocation.
    pub fn with_executor(mut self, executor: Arc<dyn Executor>) -> Self {
        self.executor = executor;
        self
    }

    /// Set the timeout used when an operation does not specify one.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Absolute path of the working copy.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The commit cache owned by this repository.
    pub fn cache(&self) -> &CommitCache {
        &self.cache
    }

    /// Default timeout for operations.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Root of the working tree containing [`path`](Self::path).
    ///
    /// # Errors
    ///
    /// [`GitError::ExecutionFailure`] if the path is not inside a work tree.
    pub fn toplevel(&self) -> Result<PathBuf, GitError> {
        let cmd = GitCommand::new(["rev-parse", "--show-toplevel"]);
        let stdout = self.run(&cmd, None)?;
        let root = utf8(&stdout)?.trim_end_matches(['\n', '\r']);
        if root.is_empty() {
            return Err(GitError::MalformedOutput {
                message: "rev-parse printed no work tree".to_string(),
            });
        }
        Ok(PathBuf::from(root))
    }

    fn run(&self, cmd: &GitCommand, timeout: Option<Duration>) -> Result<Vec<u8>, GitError> {
        cmd.run(
            self.executor.as_ref(),
            &self.path,
            timeout.unwrap_or(self.timeout),
        )
    }

    // =========================================================================
    // Commit lookup
    // =========================================================================

    /// Get a commit by full identity, from the cache when possible.
    pub fn commit(&self, id: &Sha1) -> Result<Arc<Commit>, GitError> {
        self.load_commit(id, None)
    }

    fn load_commit(&self, id: &Sha1, timeout: Option<Duration>) -> Result<Arc<Commit>, GitError> {
        let mut commits = self.load_commits(std::slice::from_ref(id), timeout)?;
        commits.pop().ok_or_else(|| GitError::MalformedOutput {
            message: format!("git did not return commit {id}"),
        })
    }

    /// Get commits by identity, in the order given.
    ///
    /// Ids missing from the cache are fetched with as few invocations as
    /// possible; ids already cached cost nothing.
    pub fn commits(&self, ids: &[Sha1]) -> Result<Vec<Arc<Commit>>, GitError> {
        self.load_commits(ids, None)
    }

    fn load_commits(
        &self,
        ids: &[Sha1],
        timeout: Option<Duration>,
    ) -> Result<Vec<Arc<Commit>>, GitError> {
        let mut seen = HashSet::new();
        let missing: Vec<Sha1> = ids
            .iter()
            .filter(|id| !self.cache.contains(id) && seen.insert(**id))
            .copied()
            .collect();

        for batch in missing.chunks(COMMIT_BATCH_SIZE) {
            tracing::trace!(count = batch.len(), "fetching uncached commits");
            let cmd = GitCommand::new(["log", "--no-walk=unsorted", "-z", "--date=raw"])
                .arg(COMMIT_FORMAT)
                .extend(batch.iter().map(ToString::to_string))
                .path_filter(None);
            let stdout = self.run(&cmd, timeout)?;
            for commit in parse_commits(&stdout)? {
                self.cache.insert(commit);
            }
        }

        let mut commits = Vec::with_capacity(ids.len());
        for id in ids {
            let commit = self.cache.get(id).ok_or_else(|| GitError::MalformedOutput {
                message: format!("git did not return commit {id}"),
            })?;
            commits.push(commit);
        }
        Ok(commits)
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    /// List commits reachable from `rev`, most recent first.
    ///
    /// `rev` may be any revision expression git accepts, including ranges.
    pub fn log(&self, rev: &str, opts: LogOptions) -> Result<Vec<Arc<Commit>>, GitError> {
        validate_rev(rev)?;

        let cmd = GitCommand::new(["log", "-z", "--date=raw"])
            .arg(COMMIT_FORMAT)
            .extend(opts.max_count.map(|n| format!("--max-count={n}")))
            .extend(opts.skip.map(|n| format!("--skip={n}")))
            .extend(opts.since.map(since_arg))
            .extend(opts.grep.as_ref().map(|p| format!("--grep={p}")))
            .arg_if(opts.regexp_ignore_case, "--regexp-ignore-case")
            .arg(rev)
            .path_filter(opts.path.as_deref());

        let stdout = self.run(&cmd, opts.timeout).map_err(|e| classify(e, rev))?;
        let parsed = parse_commits(&stdout)?;

        let mut commits = Vec::with_capacity(parsed.len());
        for commit in parsed {
            commits.push(self.cache.insert(commit));
        }
        Ok(commits)
    }

    /// One page of [`log`](Self::log). Pages are numbered from 1; page 0 is
    /// treated as page 1.
    ///
    /// # Errors
    ///
    /// [`GitError::ValidationError`] if `size` is zero or the number of
    /// commits to skip does not fit in a `usize`; git is not run.
    pub fn commits_by_page(
        &self,
        rev: &str,
        page: usize,
        size: usize,
        opts: CommitsByPageOptions,
    ) -> Result<Vec<Arc<Commit>>, GitError> {
        if size == 0 {
            return Err(GitError::ValidationError(
                "page size must be greater than zero".to_string(),
            ));
        }
        let skip = (page.max(1) - 1).checked_mul(size).ok_or_else(|| {
            GitError::ValidationError(format!("page {page} of size {size} is out of range"))
        })?;

        self.log(
            rev,
            LogOptions {
                skip: Some(skip),
                max_count: Some(size),
                path: opts.path,
                timeout: opts.timeout,
                ..Default::default()
            },
        )
    }

    /// Commits reachable from `rev` at or after `since`, most recent first.
    ///
    /// Same traversal as [`log`](Self::log) with `since` set.
    pub fn commits_since(
        &self,
        rev: &str,
        since: DateTime<Utc>,
        opts: CommitsSinceOptions,
    ) -> Result<Vec<Arc<Commit>>, GitError> {
        self.log(
            rev,
            LogOptions {
                since: Some(since),
                ..opts.into()
            },
        )
    }

    /// Get the commit a revision expression names.
    ///
    /// A full 40-character id that is already cached is returned without
    /// running git.
    ///
    /// # Errors
    ///
    /// [`GitError::RevisionNotExist`] if the revision does not resolve, or
    /// if `path` is set and no commit at or before it touches that path.
    pub fn commit_by_revision(
        &self,
        rev: &str,
        opts: CommitByRevisionOptions,
    ) -> Result<Arc<Commit>, GitError> {
        validate_rev(rev)?;

        let path = opts.path.as_deref().filter(|p| !p.is_empty());
        if path.is_none() {
            if let Some(hit) = Sha1::parse(rev).ok().and_then(|id| self.cache.get(&id)) {
                return Ok(hit);
            }
        }

        let id = match path {
            Some(path) => {
                let cmd = GitCommand::new(["log", "-1", "--format=%H"])
                    .arg(rev)
                    .path_filter(Some(path));
                let stdout = self.run(&cmd, opts.timeout).map_err(|e| classify(e, rev))?;
                parse_ids(&stdout)?
                    .into_iter()
                    .next()
                    .ok_or_else(|| GitError::RevisionNotExist {
                        rev: rev.to_string(),
                    })?
            }
            None => revision::resolve(
                self.executor.as_ref(),
                &self.path,
                rev,
                opts.timeout.unwrap_or(self.timeout),
            )?,
        };

        self.load_commit(&id, opts.timeout)
    }

    // =========================================================================
    // Diff and rev-list
    // =========================================================================

    /// Paths changed between `base` and `head`, in git's order.
    ///
    /// Names are returned exactly as stored, without C-style quoting.
    ///
    /// With `needs_merge_base`, the diff is taken from the merge base of the
    /// two revisions (`base...head`); otherwise it is a direct two-revision
    /// diff.
    pub fn diff_name_only(
        &self,
        base: &str,
        head: &str,
        opts: DiffNameOnlyOptions,
    ) -> Result<Vec<String>, GitError> {
        validate_rev(base)?;
        validate_rev(head)?;

        let cmd = GitCommand::new(["-c", "core.quotePath=false", "diff", "--name-only", "-z"]);
        let (cmd, label) = if opts.needs_merge_base {
            let range = format!("{base}...{head}");
            (cmd.arg(range.clone()), range)
        } else {
            (cmd.arg(base).arg(head), format!("{base} {head}"))
        };
        let cmd = cmd.path_filter(opts.path.as_deref());

        let stdout = self
            .run(&cmd, opts.timeout)
            .map_err(|e| classify(e, &label))?;
        parse_names(&stdout)
    }

    /// Count commits reachable from `refspecs`.
    ///
    /// # Errors
    ///
    /// [`GitError::ValidationError`] if `refspecs` is empty; git is not run.
    pub fn rev_list_count<S: AsRef<str>>(
        &self,
        refspecs: &[S],
        opts: RevListCountOptions,
    ) -> Result<u64, GitError> {
        let label = validate_refspecs(refspecs)?;

        let cmd = GitCommand::new(["rev-list", "--count"])
            .extend(refspecs.iter().map(|r| r.as_ref()))
            .path_filter(opts.path.as_deref());

        let stdout = self
            .run(&cmd, opts.timeout)
            .map_err(|e| classify(e, &label))?;
        parse_count(&stdout)
    }

    /// Commits reachable from `refspecs`, in rev-list order.
    ///
    /// # Errors
    ///
    /// [`GitError::ValidationError`] if `refspecs` is empty; git is not run.
    pub fn rev_list<S: AsRef<str>>(
        &self,
        refspecs: &[S],
        opts: RevListOptions,
    ) -> Result<Vec<Arc<Commit>>, GitError> {
        let label = validate_refspecs(refspecs)?;

        let cmd = GitCommand::new(["rev-list"])
            .extend(refspecs.iter().map(|r| r.as_ref()))
            .path_filter(opts.path.as_deref());

        let stdout = self
            .run(&cmd, opts.timeout)
            .map_err(|e| classify(e, &label))?;
        let ids = parse_ids(&stdout)?;
        self.load_commits(&ids, opts.timeout)
    }

    /// Committer time of the newest commit on a branch, or across all refs
    /// when no branch is given.
    ///
    /// A branch is looked up by its exact name under `refs/heads/`; it is
    /// never treated as a pattern.
    ///
    /// # Errors
    ///
    /// [`GitError::RevisionNotExist`] if the branch does not exist, or if
    /// there are no refs at all.
    pub fn latest_commit_time(
        &self,
        opts: LatestCommitTimeOptions,
    ) -> Result<DateTime<FixedOffset>, GitError> {
        if let Some(branch) = &opts.branch {
            validate_rev(branch)?;
            let tip = revision::resolve(
                self.executor.as_ref(),
                &self.path,
                &format!("refs/heads/{branch}"),
                opts.timeout.unwrap_or(self.timeout),
            )
            .map_err(|e| match e {
                GitError::RevisionNotExist { .. } => GitError::RevisionNotExist {
                    rev: branch.clone(),
                },
                other => other,
            })?;
            return Ok(self.load_commit(&tip, opts.timeout)?.committer.when);
        }

        let cmd = GitCommand::new([
            "for-each-ref",
            "--count=1",
            "--sort=-committerdate",
            "--format=%(committerdate:iso-strict)",
        ]);
        let stdout = self
            .run(&cmd, opts.timeout)
            .map_err(|e| classify(e, "refs"))?;

        match utf8(&stdout)?.lines().find(|l| !l.trim().is_empty()) {
            Some(line) => parse_iso_time(line),
            None => Err(GitError::RevisionNotExist {
                rev: "refs".to_string(),
            }),
        }
    }
}

/// Raw git date form; avoids any locale or approxidate interpretation.
fn since_arg(since: DateTime<Utc>) -> String {
    format!("--since=@{} +0000", since.timestamp())
}

fn validate_refspecs<S: AsRef<str>>(refspecs: &[S]) -> Result<String, GitError> {
    if refspecs.is_empty() {
        return Err(GitError::ValidationError(
            "must have at least one refspec".to_string(),
        ));
    }
    for refspec in refspecs {
        validate_rev(refspec.as_ref())?;
    }
    Ok(refspecs
        .iter()
        .map(|r| r.as_ref())
        .collect::<Vec<_>>()
        .join(" "))
}
