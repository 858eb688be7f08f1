//! git::cache
//!
//! Per-repository commit cache.
//!
//! # Invariants
//!
//! - Keys are content hashes, so a cached commit can never go stale
//! - Each [`Repository`](super::Repository) owns exactly one cache; there is
//!   no process-wide instance
//! - Inserting an id that is already present keeps the existing entry

use std::sync::Arc;

use dashmap::DashMap;

use crate::core::commit::Commit;
use crate::core::types::Sha1;

/// Concurrent map from identity to parsed commit.
#[derive(Debug, Default)]
pub struct CommitCache {
    commits: DashMap<Sha1, Arc<Commit>>,
}

impl CommitCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a commit.
    pub fn get(&self, id: &Sha1) -> Option<Arc<Commit>> {
        let hit = self.commits.get(id).map(|entry| Arc::clone(entry.value()));
        tracing::trace!(%id, hit = hit.is_some(), "commit cache lookup");
        hit
    }

    /// Insert a commit, returning the shared copy held by the cache.
    ///
    /// If the id is already cached the existing entry is returned and
    /// `commit` is dropped.
    pub fn insert(&self, commit: Commit) -> Arc<Commit> {
        let entry = self
            .commits
            .entry(commit.id)
            .or_insert_with(|| Arc::new(commit));
        Arc::clone(entry.value())
    }

    pub fn contains(&self, id: &Sha1) -> bool {
        self.commits.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commit::Signature;
    use chrono::DateTime;
    use std::thread;

    fn commit(id: &str, message: &str) -> Commit {
        let sig = Signature {
            name: "Test User".into(),
            email: "test@example.com".into(),
            when: DateTime::parse_from_rfc3339("2020-02-09T12:18:00+00:00").unwrap(),
        };
        Commit {
            id: Sha1::parse(id).unwrap(),
            parents: Vec::new(),
            author: sig.clone(),
            committer: sig,
            message: message.into(),
        }
    }

    const ID: &str = "4e59b72440188e7c2578299fc28ea425fbe9aece";

    #[test]
    fn miss_then_hit() {
        let cache = CommitCache::new();
        let id = Sha1::parse(ID).unwrap();

        assert!(cache.get(&id).is_none());
        assert!(cache.is_empty());

        cache.insert(commit(ID, "first\n"));

        assert!(cache.contains(&id));
        assert_eq!(cache.get(&id).unwrap().message, "first\n");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn insert_is_idempotent() {
        let cache = CommitCache::new();
        let first = cache.insert(commit(ID, "first\n"));
        let second = cache.insert(commit(ID, "first\n"));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn existing_entry_wins() {
        let cache = CommitCache::new();
        cache.insert(commit(ID, "original\n"));
        let kept = cache.insert(commit(ID, "other\n"));
        assert_eq!(kept.message, "original\n");
    }

    #[test]
    fn concurrent_inserts() {
        let cache = Arc::new(CommitCache::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for _ in 0..100 {
                        cache.insert(commit(ID, "same\n"));
                        assert!(cache.get(&Sha1::parse(ID).unwrap()).is_some());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 1);
    }
}
