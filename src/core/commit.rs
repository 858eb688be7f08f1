//! core::commit
//!
//! Commit records and the people attached to them.
//!
//! Commits are immutable once parsed. They are handed out as
//! `Arc<Commit>` by the repository cache and may be shared freely across
//! threads.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::types::Sha1;

/// Author or committer of a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    pub email: String,
    /// Time of the signature, in the timezone it was recorded with.
    pub when: DateTime<FixedOffset>,
}

impl Signature {
    /// Format as `Name <email>`.
    pub fn display_name(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }
}

/// A single point in history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub id: Sha1,
    /// Parent ids in recorded order. Empty for root commits.
    pub parents: Vec<Sha1>,
    pub author: Signature,
    pub committer: Signature,
    /// Full message, verbatim.
    pub message: String,
}

impl Commit {
    /// First line of the message.
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    pub fn parent_count(&self) -> usize {
        self.parents.len()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}

/// A ref name paired with the commit it points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub id: Sha1,
    pub refspec: String,
}
