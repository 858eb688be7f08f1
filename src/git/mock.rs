//! git::mock
//!
//! Mock executor for deterministic testing.
//!
//! # Design
//!
//! `MockExecutor` answers invocations from a table of canned responses
//! keyed by the exact argument list, and records every call so tests can
//! assert how often (and whether) git was run. Unknown invocations fail
//! with an execution error naming the arguments.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use std::time::Duration;
//! use gitrev::git::{Executor, MockExecutor};
//!
//! let mock = MockExecutor::new();
//! mock.respond(&["rev-list", "--count", "main"], "3\n");
//!
//! let args: Vec<String> = vec!["rev-list".into(), "--count".into(), "main".into()];
//! let out = mock.execute(&args, Path::new("/repo"), Duration::from_secs(1)).unwrap();
//! assert_eq!(out, b"3\n");
//! assert_eq!(mock.call_count(), 1);
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::errors::GitError;
use super::exec::Executor;

/// Mock executor for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockExecutor {
    inner: Arc<Mutex<MockExecutorInner>>,
}

#[derive(Debug, Default)]
struct MockExecutorInner {
    responses: HashMap<Vec<String>, MockResponse>,
    calls: Vec<Vec<String>>,
}

#[derive(Debug, Clone)]
enum MockResponse {
    Stdout(Vec<u8>),
    Stderr(String),
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `args` with a successful run printing `stdout`.
    pub fn respond(&self, args: &[&str], stdout: impl Into<Vec<u8>>) {
        self.set(args, MockResponse::Stdout(stdout.into()));
    }

    /// Answer `args` with a failed run printing `stderr`.
    pub fn fail(&self, args: &[&str], stderr: impl Into<String>) {
        self.set(args, MockResponse::Stderr(stderr.into()));
    }

    fn set(&self, args: &[&str], response: MockResponse) {
        let key = args.iter().map(ToString::to_string).collect();
        self.lock().responses.insert(key, response);
    }

    /// Every invocation so far, in order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// Forget recorded calls, keeping responses.
    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockExecutorInner> {
        // A panicking test thread must not hide the state from the others.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Executor for MockExecutor {
    fn execute(
        &self,
        args: &[String],
        _dir: &Path,
        _timeout: Duration,
    ) -> Result<Vec<u8>, GitError> {
        let mut inner = self.lock();
        inner.calls.push(args.to_vec());

        match inner.responses.get(args) {
            Some(MockResponse::Stdout(out)) => Ok(out.clone()),
            Some(MockResponse::Stderr(err)) => Err(GitError::ExecutionFailure {
                args: args.join(" "),
                status: "exit status: 128".to_string(),
                stderr: err.clone(),
            }),
            None => Err(GitError::ExecutionFailure {
                args: args.join(" "),
                status: "exit status: 1".to_string(),
                stderr: format!("mock: no response for '{}'", args.join(" ")),
            }),
        }
    }
}
