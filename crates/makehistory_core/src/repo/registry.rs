//! Caller-owned registry of open git repositories.

use super::git_repo::GitRepository;
use super::port::RepoResult;
use log::info;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Open repository handles keyed by normalized path.
///
/// The registry owns every handle it opens; closing a path or dropping the
/// registry releases the underlying repository.
#[derive(Default)]
pub struct RepositoryRegistry {
    repos: BTreeMap<PathBuf, GitRepository>,
}

impl RepositoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handle for `path`, opening it on first use.
    pub fn open(&mut self, path: impl AsRef<Path>) -> RepoResult<&GitRepository> {
        match self.repos.entry(normalize_path(path.as_ref())) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let repo = GitRepository::open(entry.key())?;
                info!(
                    "event=registry_open module=registry status=ok path={}",
                    entry.key().display()
                );
                Ok(entry.insert(repo))
            }
        }
    }

    /// Returns an already opened handle.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&GitRepository> {
        self.repos.get(&normalize_path(path.as_ref()))
    }

    /// Releases the handle for `path`. Returns whether one was open.
    pub fn close(&mut self, path: impl AsRef<Path>) -> bool {
        let removed = self.repos.remove(&normalize_path(path.as_ref())).is_some();
        if removed {
            info!("event=registry_close module=registry status=ok");
        }
        removed
    }

    /// Sorted paths of open handles.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.repos.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.repos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }
}

fn normalize_path(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::RepositoryRegistry;
    use git2::Repository;

    #[test]
    fn open_is_idempotent_per_path_and_close_releases() {
        let dir = tempfile::tempdir().expect("temp dir");
        Repository::init(dir.path()).expect("init repo");

        let mut registry = RepositoryRegistry::new();
        assert!(registry.is_empty());

        registry.open(dir.path()).expect("first open");
        registry
            .open(dir.path().join("."))
            .expect("same repository through a different spelling");
        assert_eq!(registry.len(), 1);
        assert!(registry.get(dir.path()).is_some());
        assert_eq!(
            registry.paths(),
            vec![std::fs::canonicalize(dir.path()).expect("canonical path")]
        );

        assert!(registry.close(dir.path()));
        assert!(!registry.close(dir.path()));
        assert!(registry.get(dir.path()).is_none());
    }

    #[test]
    fn open_failure_leaves_registry_unchanged() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut registry = RepositoryRegistry::new();
        assert!(registry.open(dir.path()).is_err());
        assert!(registry.is_empty());
    }
}
