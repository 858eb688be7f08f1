//! git::exec
//!
//! Running the git executable.
//!
//! # Architecture
//!
//! Every invocation goes through the [`Executor`] trait. [`GitCli`] is the
//! production implementation; tests substitute
//! [`MockExecutor`](super::mock::MockExecutor). Arguments are assembled with
//! [`GitCommand`].
//!
//! # Timeouts
//!
//! `GitCli` polls the child against a deadline. When the deadline passes
//! the child is killed and the call fails with [`GitError::Timeout`]; no
//! partial output is ever returned.

use std::fmt;
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::errors::GitError;
use super::parse::escape_path;
use crate::core::config::DEFAULT_GIT_PROGRAM;

/// Longest sleep between exit checks.
const MAX_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Capability to run git and capture its output.
pub trait Executor: Send + Sync + fmt::Debug {
    /// Run git with `args` in `dir`.
    ///
    /// Returns stdout on a zero exit status.
    ///
    /// # Errors
    ///
    /// - [`GitError::ExecutionFailure`] on a non-zero exit, carrying stderr
    /// - [`GitError::Timeout`] if `timeout` elapses first
    /// - [`GitError::Spawn`] if git cannot be started
    fn execute(&self, args: &[String], dir: &Path, timeout: Duration)
        -> Result<Vec<u8>, GitError>;
}

/// Executor that spawns the git binary.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl GitCli {
    /// Create an executor for the given program name or path.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The program this executor runs.
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new(DEFAULT_GIT_PROGRAM)
    }
}

impl Executor for GitCli {
    fn execute(
        &self,
        args: &[String],
        dir: &Path,
        timeout: Duration,
    ) -> Result<Vec<u8>, GitError> {
        let joined = args.join(" ");
        tracing::debug!(
            program = %self.program,
            args = %joined,
            dir = %dir.display(),
            ?timeout,
            "running git"
        );

        let mut child = Command::new(&self.program)
            .args(args)
            .current_dir(dir)
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("LC_ALL", "C")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| GitError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Drain both pipes concurrently so a full pipe never blocks the child.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        // A timeout too large to represent as an instant means no deadline.
        let waited = match Instant::now().checked_add(timeout) {
            Some(deadline) => self.wait_until(&mut child, deadline)?,
            None => Some(child.wait().map_err(|source| GitError::Spawn {
                program: self.program.clone(),
                source,
            })?),
        };
        let status = match waited {
            Some(status) => status,
            None => {
                let _ = child.kill();
                let _ = child.wait();
                tracing::warn!(args = %joined, ?timeout, "git timed out");
                return Err(GitError::Timeout {
                    args: joined,
                    timeout,
                });
            }
        };

        let stdout = stdout.join().unwrap_or_default();
        let stderr = stderr.join().unwrap_or_default();

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr).trim().to_string();
            tracing::debug!(args = %joined, %status, %stderr, "git failed");
            return Err(GitError::ExecutionFailure {
                args: joined,
                status: status.to_string(),
                stderr,
            });
        }

        Ok(stdout)
    }
}

impl GitCli {
    /// Wait for the child to exit, or return `None` once `deadline` passes.
    fn wait_until(
        &self,
        child: &mut Child,
        deadline: Instant,
    ) -> Result<Option<ExitStatus>, GitError> {
        let mut interval = Duration::from_millis(1);
        loop {
            let polled = child.try_wait().map_err(|source| GitError::Spawn {
                program: self.program.clone(),
                source,
            })?;
            if let Some(status) = polled {
                return Ok(Some(status));
            }

            let now = Instant::now();
            if now >= deadline {
                return Ok(None);
            }
            thread::sleep(interval.min(deadline - now));
            interval = (interval * 2).min(MAX_POLL_INTERVAL);
        }
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    })
}

/// Argument list for one git invocation.
///
/// # Example
///
/// ```
/// use gitrev::git::GitCommand;
///
/// let cmd = GitCommand::new(["rev-list", "--count"])
///     .arg("main")
///     .path_filter(Some(":weird"));
/// assert_eq!(cmd.args(), ["rev-list", "--count", "main", "--", "\\:weird"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitCommand {
    args: Vec<String>,
}

impl GitCommand {
    /// Start a command from its leading arguments.
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn extend<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append `arg` only when `enabled`.
    pub fn arg_if(self, enabled: bool, arg: impl Into<String>) -> Self {
        if enabled {
            self.arg(arg)
        } else {
            self
        }
    }

    /// End the revision arguments with `--`, followed by the escaped path
    /// when a non-empty path is given.
    ///
    /// The `--` keeps git from reading a revision that does not exist as a
    /// path name.
    pub fn path_filter(self, path: Option<&str>) -> Self {
        let cmd = self.arg("--");
        match path {
            Some(path) if !path.is_empty() => cmd.arg(escape_path(path)),
            _ => cmd,
        }
    }

    /// The assembled arguments.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Run with the given executor.
    pub fn run(
        &self,
        executor: &dyn Executor,
        dir: &Path,
        timeout: Duration,
    ) -> Result<Vec<u8>, GitError> {
        executor.execute(&self.args, dir, timeout)
    }
}
