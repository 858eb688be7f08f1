//! Tests that drive `Repository` through `MockExecutor`.
//!
//! These pin down the exact git invocations each operation makes and prove
//! that validation and cache hits never reach the executor.

use std::sync::Arc;

use tempfile::TempDir;

use gitrev::core::types::Sha1;
use gitrev::git::parse::COMMIT_FORMAT;
use gitrev::git::{
    CommitByRevisionOptions, GitError, LogOptions, MockExecutor, Repository, RevListOptions,
};

const HEAD: &str = "0eedd79eba4394bbef888c804e899731644367fe";
const PARENT: &str = "4e59b72440188e7c2578299fc28ea425fbe9aece";

fn record(id: &str, parents: &str, subject: &str) -> String {
    format!(
        "{id}\n{parents}\nTest User\ntest@example.com\n1581250680 +0800\n\
         Test User\ntest@example.com\n1581250680 +0800\n{subject}\n\0"
    )
}

fn setup() -> (TempDir, MockExecutor, Repository) {
    let dir = TempDir::new().unwrap();
    let mock = MockExecutor::new();
    let repo = Repository::open(dir.path())
        .unwrap()
        .with_executor(Arc::new(mock.clone()));
    (dir, mock, repo)
}

#[test]
fn empty_refspecs_are_rejected_before_invocation() {
    let (_dir, mock, repo) = setup();
    let none: Vec<String> = Vec::new();

    let err = repo.rev_list_count(&none, Default::default()).unwrap_err();
    assert!(matches!(err, GitError::ValidationError(ref m) if m == "must have at least one refspec"));

    let err = repo.rev_list(&none, RevListOptions::default()).unwrap_err();
    assert!(matches!(err, GitError::ValidationError(_)));

    assert_eq!(mock.call_count(), 0);
}

#[test]
fn short_hash_then_full_hash_hits_cache() {
    let (_dir, mock, repo) = setup();
    mock.respond(
        &["rev-parse", "--verify", "0eedd79^{commit}"],
        format!("{HEAD}\n"),
    );
    mock.respond(
        &[
            "log",
            "--no-walk=unsorted",
            "-z",
            "--date=raw",
            COMMIT_FORMAT,
            HEAD,
            "--",
        ],
        record(HEAD, PARENT, "Second"),
    );

    let first = repo
        .commit_by_revision("0eedd79", CommitByRevisionOptions::default())
        .unwrap();
    assert_eq!(first.id.to_string(), HEAD);
    assert_eq!(first.parents, [Sha1::parse(PARENT).unwrap()]);
    assert_eq!(first.author.when.offset().local_minus_utc(), 8 * 3600);
    assert_eq!(mock.call_count(), 2);

    mock.clear_calls();
    let second = repo
        .commit_by_revision(HEAD, CommitByRevisionOptions::default())
        .unwrap();
    assert_eq!(*first, *second);
    assert_eq!(mock.call_count(), 0);
}

#[test]
fn unresolvable_revision_runs_only_rev_parse() {
    let (_dir, mock, repo) = setup();
    mock.fail(
        &["rev-parse", "--verify", "404^{commit}"],
        "fatal: Needed a single revision",
    );

    let err = repo
        .commit_by_revision("404", Default::default())
        .unwrap_err();
    assert!(err.is_revision_not_exist());
    assert_eq!(mock.call_count(), 1);
    assert!(repo.cache().is_empty());
}

#[test]
fn log_output_fills_cache_for_later_lookups() {
    let (_dir, mock, repo) = setup();
    mock.respond(
        &["log", "-z", "--date=raw", COMMIT_FORMAT, "main", "--"],
        format!("{}{}", record(HEAD, PARENT, "Second"), record(PARENT, "", "First")),
    );

    let commits = repo.log("main", LogOptions::default()).unwrap();
    assert_eq!(commits.len(), 2);
    assert!(commits[1].is_root());

    mock.clear_calls();
    let parent = repo.commit(&Sha1::parse(PARENT).unwrap()).unwrap();
    assert_eq!(parent.summary(), "First");
    assert_eq!(mock.call_count(), 0);
}

#[test]
fn empty_log_is_success() {
    let (_dir, mock, repo) = setup();
    mock.respond(&["log", "-z", "--date=raw", COMMIT_FORMAT, "main", "--", "nowhere"], "");

    let commits = repo
        .log(
            "main",
            LogOptions {
                path: Some("nowhere".into()),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(commits.is_empty());
}

#[test]
fn remote_errors_are_classified() {
    let (_dir, mock, repo) = setup();
    mock.fail(
        &["log", "-z", "--date=raw", COMMIT_FORMAT, "origin/main", "--"],
        "fatal: No such remote 'origin'",
    );

    let err = repo.log("origin/main", Default::default()).unwrap_err();
    assert!(matches!(err, GitError::RemoteNotExist { .. }), "unexpected error: {err:?}");
}

#[test]
fn malformed_output_is_reported() {
    let (_dir, mock, repo) = setup();
    mock.respond(&["log", "-z", "--date=raw", COMMIT_FORMAT, "main", "--"], "not-a-hash\n\0");

    let err = repo.log("main", Default::default()).unwrap_err();
    assert!(matches!(err, GitError::MalformedOutput { .. }));
    assert!(repo.cache().is_empty());
}

#[test]
fn page_beyond_addressable_range_is_rejected_before_invocation() {
    let (_dir, mock, repo) = setup();

    let err = repo
        .commits_by_page("HEAD", usize::MAX, 2, Default::default())
        .unwrap_err();
    assert!(matches!(err, GitError::ValidationError(_)));
    assert_eq!(mock.call_count(), 0);
}
