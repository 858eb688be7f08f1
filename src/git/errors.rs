//! git::errors
//!
//! Typed failure vocabulary for git operations.
//!
//! git has no structured error channel, so failures are recognized by
//! matching stderr text. All of that matching lives in [`classify`]; the
//! substrings are listed once below and nowhere else.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::core::types::TypeError;

/// stderr fragments meaning a revision expression did not resolve.
const REVISION_NOT_EXIST_PATTERNS: &[&str] = &[
    "unknown revision",
    "bad revision",
    "not a valid object name",
    "invalid object name",
    "needed a single revision",
];

/// stderr fragments meaning a named remote does not exist.
const REMOTE_NOT_EXIST_PATTERNS: &[&str] = &["no such remote"];

/// Errors from git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Identity text was not 40 hex characters.
    #[error("invalid object id: {text}")]
    InvalidFormat {
        /// The rejected text
        text: String,
    },

    /// A revision expression did not resolve to a commit.
    #[error("revision does not exist: {rev}")]
    RevisionNotExist {
        /// The expression as supplied by the caller
        rev: String,
    },

    /// A named remote does not exist.
    #[error("remote does not exist: {stderr}")]
    RemoteNotExist {
        /// Raw stderr from git
        stderr: String,
    },

    /// git produced output that does not match the expected grammar.
    #[error("malformed git output: {message}")]
    MalformedOutput {
        /// What was wrong
        message: String,
    },

    /// Caller arguments were rejected before running git.
    #[error("{0}")]
    ValidationError(String),

    /// git exited unsuccessfully for an unclassified reason.
    #[error("git {args} failed ({status}): {stderr}")]
    ExecutionFailure {
        /// Space-joined arguments
        args: String,
        /// Exit status description
        status: String,
        /// Raw stderr from git
        stderr: String,
    },

    /// git did not finish before its deadline and was killed.
    #[error("git {args} timed out after {timeout:?}")]
    Timeout {
        /// Space-joined arguments
        args: String,
        /// The deadline that elapsed
        timeout: Duration,
    },

    /// The git executable could not be started.
    #[error("failed to run '{program}': {source}")]
    Spawn {
        /// Program that was started
        program: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Repository path is not an existing directory.
    #[error("not a directory: {path}")]
    NotADirectory {
        /// The offending path
        path: PathBuf,
    },
}

impl GitError {
    /// Check whether this is a revision-not-found error.
    pub fn is_revision_not_exist(&self) -> bool {
        matches!(self, GitError::RevisionNotExist { .. })
    }

    /// Raw stderr for execution failures.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            GitError::ExecutionFailure { stderr, .. } | GitError::RemoteNotExist { stderr } => {
                Some(stderr)
            }
            _ => None,
        }
    }
}

impl From<TypeError> for GitError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::InvalidFormat { text, .. } => GitError::InvalidFormat { text },
        }
    }
}

/// Classify a failed invocation.
///
/// Execution failures whose stderr matches a known pattern are upgraded to
/// the matching typed error. `rev` is the expression to report for
/// [`GitError::RevisionNotExist`]. All other errors pass through unchanged.
pub fn classify(err: GitError, rev: &str) -> GitError {
    if let GitError::ExecutionFailure { stderr, .. } = &err {
        if matches_any(stderr, REVISION_NOT_EXIST_PATTERNS) {
            return GitError::RevisionNotExist {
                rev: rev.to_string(),
            };
        }
        if matches_any(stderr, REMOTE_NOT_EXIST_PATTERNS) {
            return GitError::RemoteNotExist {
                stderr: stderr.clone(),
            };
        }
    }
    err
}

/// Patterns are lowercase; git capitalizes some messages ("Not a valid
/// object name") and not others.
fn matches_any(text: &str, patterns: &[&str]) -> bool {
    let text = text.to_lowercase();
    patterns.iter().any(|p| text.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(stderr: &str) -> GitError {
        GitError::ExecutionFailure {
            args: "rev-parse --verify 404".to_string(),
            status: "exit status: 128".to_string(),
            stderr: stderr.to_string(),
        }
    }

    mod classify {
        use super::*;

        #[test]
        fn unknown_revision() {
            let err = classify(
                failure("fatal: ambiguous argument '404': unknown revision or path not in the working tree."),
                "404",
            );
            assert!(matches!(err, GitError::RevisionNotExist { ref rev } if rev == "404"));
        }

        #[test]
        fn needed_single_revision() {
            let err = classify(failure("fatal: Needed a single revision\n"), "nope");
            assert!(err.is_revision_not_exist());
        }

        #[test]
        fn bad_revision() {
            let err = classify(failure("fatal: bad revision 'nope'\n"), "nope");
            assert!(err.is_revision_not_exist());
        }

        #[test]
        fn not_a_valid_object_name() {
            let err = classify(failure("fatal: Not a valid object name nope"), "nope");
            assert!(err.is_revision_not_exist());

            let err = classify(failure("error: not a valid object name: 'nope'"), "nope");
            assert!(err.is_revision_not_exist());
        }

        #[test]
        fn no_such_remote() {
            let err = classify(failure("error: No such remote 'upstream'"), "");
            assert!(matches!(err, GitError::RemoteNotExist { .. }));
        }

        #[test]
        fn unrecognized_passes_through() {
            let err = classify(failure("fatal: not a git repository"), "HEAD");
            assert!(matches!(err, GitError::ExecutionFailure { .. }));
            assert_eq!(err.stderr(), Some("fatal: not a git repository"));
        }

        #[test]
        fn non_execution_errors_untouched() {
            let err = classify(GitError::ValidationError("x".into()), "HEAD");
            assert!(matches!(err, GitError::ValidationError(_)));
        }
    }

    #[test]
    fn from_type_error() {
        let err: GitError = TypeError::InvalidFormat {
            text: "abc".into(),
            reason: "too short".into(),
        }
        .into();
        assert!(matches!(err, GitError::InvalidFormat { ref text } if text == "abc"));
    }

    #[test]
    fn validation_display_is_bare_message() {
        let err = GitError::ValidationError("must have at least one refspec".into());
        assert_eq!(err.to_string(), "must have at least one refspec");
    }
}
