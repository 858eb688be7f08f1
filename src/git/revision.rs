//! git::revision
//!
//! Resolution of revision expressions.
//!
//! Single revisions (branch, tag, full or abbreviated hash) are resolved by
//! `git rev-parse`; this module never disambiguates short hashes itself.
//! Symmetric ranges (`A...B`) are never reduced to one id: they are handed
//! verbatim to the commands that understand them.

use std::path::Path;
use std::time::Duration;

use super::errors::{classify, GitError};
use super::exec::{Executor, GitCommand};
use super::parse::parse_ids;
use crate::core::types::Sha1;

/// A symmetric-difference range `left...right`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionRange<'a> {
    pub left: &'a str,
    pub right: &'a str,
}

impl<'a> RevisionRange<'a> {
    /// Split `A...B`. Returns `None` for anything without `...`.
    ///
    /// Either side may be empty; git reads an empty side as `HEAD`.
    ///
    /// # Example
    ///
    /// ```
    /// use gitrev::git::RevisionRange;
    ///
    /// let range = RevisionRange::parse("main...feature").unwrap();
    /// assert_eq!(range.left, "main");
    /// assert_eq!(range.right, "feature");
    /// assert!(RevisionRange::parse("main").is_none());
    /// ```
    pub fn parse(rev: &'a str) -> Option<Self> {
        rev.split_once("...")
            .map(|(left, right)| Self { left, right })
    }
}

/// Check whether `rev` is a symmetric range.
pub fn is_range(rev: &str) -> bool {
    rev.contains("...")
}

/// Reject expressions that cannot be handed to git.
///
/// A leading `-` would be parsed as an option.
pub(crate) fn validate_rev(rev: &str) -> Result<(), GitError> {
    if rev.trim().is_empty() {
        return Err(GitError::ValidationError(
            "revision cannot be empty".to_string(),
        ));
    }
    if rev.starts_with('-') {
        return Err(GitError::ValidationError(format!(
            "revision cannot start with '-': {rev}"
        )));
    }
    Ok(())
}

/// Resolve a single revision to the commit it names.
///
/// # Errors
///
/// - [`GitError::ValidationError`] for an empty expression or a range
/// - [`GitError::RevisionNotExist`] if git cannot resolve it
/// - any execution error, unchanged
pub fn resolve(
    executor: &dyn Executor,
    dir: &Path,
    rev: &str,
    timeout: Duration,
) -> Result<Sha1, GitError> {
    validate_rev(rev)?;
    if is_range(rev) {
        return Err(GitError::ValidationError(format!(
            "cannot resolve range '{rev}' to a single commit"
        )));
    }

    let stdout = GitCommand::new(["rev-parse", "--verify"])
        .arg(format!("{rev}^{{commit}}"))
        .run(executor, dir, timeout)
        .map_err(|e| classify(e, rev))?;

    parse_ids(&stdout)?
        .into_iter()
        .next()
        .ok_or_else(|| GitError::RevisionNotExist {
            rev: rev.to_string(),
        })
}
