//! In-memory repository port with failure injection.
//!
//! # Responsibility
//! - Provide a linear commit history that behaves like the git backend for
//!   scanning and commit creation, without touching disk.
//! - Let callers inject walker, read and write failures.
//!
//! # Invariants
//! - History is linear; insertion order is topological order.
//! - Commit ids are assigned sequentially and never reused.

use super::port::{
    paint_timestamp, CommitId, CommitWalk, RepoError, RepoResult, RepositoryPort, WalkOrder,
};
use chrono::{DateTime, FixedOffset, NaiveDate};
use std::cell::RefCell;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
struct MemoryCommit {
    id: CommitId,
    message: String,
    authored_at: DateTime<FixedOffset>,
}

#[derive(Debug, Default)]
struct MemoryState {
    commits: Vec<MemoryCommit>,
    unreadable: BTreeSet<CommitId>,
    create_budget: Option<usize>,
    walk_failure: Option<String>,
}

/// Linear in-memory commit history.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    state: RefCell<MemoryState>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an ordinary commit with an explicit authored timestamp.
    pub fn push_commit(
        &self,
        message: impl Into<String>,
        authored_at: DateTime<FixedOffset>,
    ) -> CommitId {
        let mut state = self.state.borrow_mut();
        let id = CommitId::new(format!("{:040x}", state.commits.len() + 1));
        state.commits.push(MemoryCommit {
            id: id.clone(),
            message: message.into(),
            authored_at,
        });
        id
    }

    /// Makes every later `create_commit` fail once `count` more commits succeed.
    pub fn fail_creates_after(&self, count: usize) {
        self.state.borrow_mut().create_budget = Some(count);
    }

    /// Makes message and date reads of `id` fail.
    pub fn mark_unreadable(&self, id: &CommitId) {
        self.state.borrow_mut().unreadable.insert(id.clone());
    }

    /// Makes `walk_commits` fail with `reason` until cleared with `None`.
    pub fn fail_walks(&self, reason: Option<&str>) {
        self.state.borrow_mut().walk_failure = reason.map(str::to_string);
    }

    pub fn len(&self) -> usize {
        self.state.borrow().commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().commits.is_empty()
    }

    /// Commit messages in insertion order.
    pub fn messages(&self) -> Vec<String> {
        self.state
            .borrow()
            .commits
            .iter()
            .map(|commit| commit.message.clone())
            .collect()
    }

    fn readable_commit(&self, id: &CommitId) -> RepoResult<MemoryCommit> {
        let state = self.state.borrow();
        if state.unreadable.contains(id) {
            return Err(RepoError::InvalidData(format!("commit {id} is unreadable")));
        }
        state
            .commits
            .iter()
            .find(|commit| &commit.id == id)
            .cloned()
            .ok_or_else(|| RepoError::NotFound(id.clone()))
    }
}

impl RepositoryPort for MemoryRepository {
    fn walk_commits(&self, order: WalkOrder) -> RepoResult<CommitWalk<'_>> {
        let state = self.state.borrow();
        if let Some(reason) = &state.walk_failure {
            return Err(RepoError::Unavailable(reason.clone()));
        }
        let mut ids: Vec<CommitId> = state
            .commits
            .iter()
            .map(|commit| commit.id.clone())
            .collect();
        if order == WalkOrder::NewestFirst {
            ids.reverse();
        }
        Ok(Box::new(ids.into_iter().map(Ok)))
    }

    fn commit_message(&self, id: &CommitId) -> RepoResult<String> {
        Ok(self.readable_commit(id)?.message)
    }

    fn commit_date(&self, id: &CommitId) -> RepoResult<DateTime<FixedOffset>> {
        Ok(self.readable_commit(id)?.authored_at)
    }

    fn create_commit(&self, date: NaiveDate, message: &str) -> RepoResult<CommitId> {
        {
            let mut state = self.state.borrow_mut();
            if let Some(budget) = state.create_budget.as_mut() {
                if *budget == 0 {
                    return Err(RepoError::Unavailable(
                        "commit creation rejected".to_string(),
                    ));
                }
                *budget -= 1;
            }
        }
        Ok(self.push_commit(message, paint_timestamp(date)))
    }
}
