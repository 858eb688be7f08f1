//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Human output is one line per item. When `--json` is enabled, output is
//! machine-readable JSON written as a single document.

use std::fmt::Display;
use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;

use crate::core::commit::Commit;

/// Length of abbreviated ids in human output.
pub const SHORT_ID_LEN: usize = 7;

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Format a commit as `<short id> <summary>`.
pub fn format_commit_line(commit: &Commit) -> String {
    format!("{} {}", commit.id.short(SHORT_ID_LEN), commit.summary())
}

/// Format a commit with its header fields and full message.
pub fn format_commit_detail(commit: &Commit) -> String {
    let mut out = format!("commit {}\n", commit.id);
    if commit.is_merge() {
        let parents: Vec<String> = commit
            .parents
            .iter()
            .map(|p| p.short(SHORT_ID_LEN))
            .collect();
        out.push_str(&format!("Merge: {}\n", parents.join(" ")));
    }
    out.push_str(&format!("Author: {}\n", commit.author.display_name()));
    out.push_str(&format!("Date:   {}\n", commit.author.when.to_rfc3339()));
    out.push('\n');
    for line in commit.message.trim_end().lines() {
        out.push_str("    ");
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Print commits one per line, or as a JSON array.
pub fn print_commits(commits: &[Arc<Commit>], json: bool) -> Result<()> {
    if json {
        let plain: Vec<&Commit> = commits.iter().map(|c| c.as_ref()).collect();
        return print_json(&plain);
    }
    for commit in commits {
        println!("{}", format_commit_line(commit));
    }
    Ok(())
}

/// Format a list of items.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commit::Signature;
    use crate::core::types::Sha1;
    use chrono::DateTime;

    fn commit(message: &str, parents: usize) -> Commit {
        let sig = Signature {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            when: DateTime::parse_from_rfc3339("2020-02-09T21:57:18+08:00").unwrap(),
        };
        Commit {
            id: Sha1::parse("4e59b72440188e7c2578299fc28ea425fbe9aece").unwrap(),
            parents: (0..parents)
                .map(|_| Sha1::parse("0eedd79eba4394bbef888c804e899731644367fe").unwrap())
                .collect(),
            author: sig.clone(),
            committer: sig,
            message: message.into(),
        }
    }

    #[test]
    fn commit_line_uses_summary() {
        let line = format_commit_line(&commit("Add README\n\nLonger body", 1));
        assert_eq!(line, "4e59b72 Add README");
    }

    #[test]
    fn detail_indents_message() {
        let detail = format_commit_detail(&commit("Subject\n\nBody\n", 1));
        assert!(detail.starts_with("commit 4e59b72440188e7c2578299fc28ea425fbe9aece\n"));
        assert!(detail.contains("Author: Ada <ada@example.com>\n"));
        assert!(detail.contains("    Subject\n"));
        assert!(detail.contains("    Body\n"));
        assert!(!detail.contains("Merge:"));
    }

    #[test]
    fn detail_lists_merge_parents() {
        let detail = format_commit_detail(&commit("Merge", 2));
        assert!(detail.contains("Merge: 0eedd79 0eedd79\n"));
    }

    #[test]
    fn format_list_prefixes() {
        assert_eq!(format_list(&["a", "b"], "- "), "- a\n- b");
    }
}
