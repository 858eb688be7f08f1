//! gitrev - Structured access to Git history
//!
//! gitrev reads commit history from a working copy by driving the `git`
//! executable and parsing its output into strongly typed values. Parsed
//! commits are cached per repository and shared across threads.
//!
//! # Architecture
//!
//! - [`core`] - Commit and identity types, configuration
//! - [`git`] - Executor, command building, parsing, and repository operations
//! - [`cli`] - The `gitrev` command-line interface
//! - [`ui`] - Output formatting for the command line
//!
//! # Correctness Invariants
//!
//! 1. Commit identities are always 40 lowercase hexadecimal characters
//! 2. A revision git cannot resolve is reported as `RevisionNotExist`
//! 3. An empty result is a success, never an error
//! 4. Every git invocation is bounded by a timeout

pub mod cli;
pub mod core;
pub mod git;
pub mod ui;
