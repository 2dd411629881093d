//! Git-backed repository port.
//!
//! # Responsibility
//! - Open an existing git repository and expose it through `RepositoryPort`.
//! - Create dated commits on top of `HEAD` without touching the working tree.
//!
//! # Invariants
//! - Native `git2` objects never escape this module; callers only see `CommitId`.
//! - An unborn `HEAD` walks as an empty history.
//! - New commits reuse the tree of the current `HEAD` commit (empty tree when unborn).

use super::port::{
    paint_timestamp, CommitId, CommitWalk, RepoError, RepoResult, RepositoryPort, WalkOrder,
};
use chrono::{DateTime, FixedOffset, NaiveDate};
use git2::{Commit, ErrorCode, Oid, Repository, Signature, Sort, Time, Tree};
use log::{error, info};
use std::path::Path;
use std::time::Instant;

const FALLBACK_AUTHOR_NAME: &str = "makehistory";
const FALLBACK_AUTHOR_EMAIL: &str = "makehistory@localhost";

/// Repository port over a local git repository.
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Opens the repository at `path`.
    ///
    /// # Side effects
    /// - Emits `repo_open` logging events with duration and status.
    ///
    /// # Errors
    /// - Returns `RepoError::Git` when no repository exists at `path`.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        let path = path.as_ref();
        let started_at = Instant::now();
        info!("event=repo_open module=repo status=start backend=git");

        match Repository::open(path) {
            Ok(repo) => {
                info!(
                    "event=repo_open module=repo status=ok backend=git duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(Self { repo })
            }
            Err(err) => {
                error!(
                    "event=repo_open module=repo status=error backend=git duration_ms={} error_code=repo_open_failed error={}",
                    started_at.elapsed().as_millis(),
                    err.message()
                );
                Err(err.into())
            }
        }
    }

    fn head_commit(&self) -> RepoResult<Option<Commit<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?)),
            Err(err) if is_unborn(&err) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn find_commit(&self, id: &CommitId) -> RepoResult<Commit<'_>> {
        let oid = Oid::from_str(id.as_str())
            .map_err(|_| RepoError::InvalidData(format!("`{id}` is not a git object id")))?;
        match self.repo.find_commit(oid) {
            Ok(commit) => Ok(commit),
            Err(err) if err.code() == ErrorCode::NotFound => Err(RepoError::NotFound(id.clone())),
            Err(err) => Err(err.into()),
        }
    }

    fn signature_at(&self, time: &Time) -> RepoResult<Signature<'static>> {
        let signature = match self.repo.signature() {
            Ok(configured) => Signature::new(
                configured.name().unwrap_or(FALLBACK_AUTHOR_NAME),
                configured.email().unwrap_or(FALLBACK_AUTHOR_EMAIL),
                time,
            )?,
            Err(_) => Signature::new(FALLBACK_AUTHOR_NAME, FALLBACK_AUTHOR_EMAIL, time)?,
        };
        Ok(signature)
    }

    fn empty_tree(&self) -> RepoResult<Tree<'_>> {
        let oid = self.repo.treebuilder(None)?.write()?;
        Ok(self.repo.find_tree(oid)?)
    }
}

impl RepositoryPort for GitRepository {
    fn walk_commits(&self, order: WalkOrder) -> RepoResult<CommitWalk<'_>> {
        if self.head_commit()?.is_none() {
            return Ok(Box::new(std::iter::empty()));
        }

        let mut walk = self.repo.revwalk()?;
        let sorting = match order {
            WalkOrder::OldestFirst => Sort::TOPOLOGICAL | Sort::TIME | Sort::REVERSE,
            WalkOrder::NewestFirst => Sort::TOPOLOGICAL | Sort::TIME,
        };
        walk.set_sorting(sorting)?;
        walk.push_head()?;

        Ok(Box::new(walk.map(|item| {
            item.map(|oid| CommitId::new(oid.to_string()))
                .map_err(RepoError::from)
        })))
    }

    fn commit_message(&self, id: &CommitId) -> RepoResult<String> {
        let commit = self.find_commit(id)?;
        // Legacy encodings are decoded lossily; marker prefixes are UTF-8 so
        // prefix matching stays exact.
        Ok(String::from_utf8_lossy(commit.message_bytes()).into_owned())
    }

    fn commit_date(&self, id: &CommitId) -> RepoResult<DateTime<FixedOffset>> {
        let commit = self.find_commit(id)?;
        let when = commit.author().when();
        let offset = FixedOffset::east_opt(when.offset_minutes() * 60).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "commit {id} has invalid timezone offset {}",
                when.offset_minutes()
            ))
        })?;
        let utc = DateTime::from_timestamp(when.seconds(), 0).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "commit {id} has out-of-range timestamp {}",
                when.seconds()
            ))
        })?;
        Ok(utc.with_timezone(&offset))
    }

    fn create_commit(&self, date: NaiveDate, message: &str) -> RepoResult<CommitId> {
        let time = Time::new(paint_timestamp(date).timestamp(), 0);
        let signature = self.signature_at(&time)?;
        let parent = self.head_commit()?;
        let tree = match &parent {
            Some(commit) => commit.tree()?,
            None => self.empty_tree()?,
        };
        let parents: Vec<&Commit<'_>> = parent.iter().collect();

        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;
        Ok(CommitId::new(oid.to_string()))
    }
}

fn is_unborn(err: &git2::Error) -> bool {
    matches!(err.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound)
}
