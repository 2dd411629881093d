//! Repository port contract consumed by the painting pipeline.
//!
//! # Responsibility
//! - Define the minimal capability the core needs from version control:
//!   ordered commit traversal, commit accessors and commit creation.
//! - Keep backend objects behind opaque `CommitId` handles.
//!
//! # Invariants
//! - A walk is lazy, forward-only and single-pass.
//! - `create_commit` is one independent unit of work; there are no
//!   multi-commit transactions.
//! - Painting commits carry an explicit author/committer date, never wall-clock.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Hour of day (UTC) stamped on painting commits; keeps the local date stable
/// for every timezone within +/-11h.
const PAINT_HOUR_UTC: u32 = 12;

pub type RepoResult<T> = Result<T, RepoError>;

/// Lazy commit sequence returned by [`RepositoryPort::walk_commits`].
pub type CommitWalk<'a> = Box<dyn Iterator<Item = RepoResult<CommitId>> + 'a>;

/// Opaque commit identifier owned by the repository backend.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitId(String);

impl CommitId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CommitId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Traversal order for commit walks. Both orders put parents and children in
/// topological order and break ties by commit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOrder {
    OldestFirst,
    NewestFirst,
}

/// Repository backend error.
#[derive(Debug)]
pub enum RepoError {
    Git(git2::Error),
    NotFound(CommitId),
    InvalidData(String),
    Unavailable(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Git(err) => write!(f, "git error: {}", err.message()),
            Self::NotFound(id) => write!(f, "commit not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid repository data: {message}"),
            Self::Unavailable(message) => write!(f, "repository unavailable: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Git(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) | Self::Unavailable(_) => None,
        }
    }
}

impl From<git2::Error> for RepoError {
    fn from(value: git2::Error) -> Self {
        Self::Git(value)
    }
}

/// Version-control capability required by the painting pipeline.
pub trait RepositoryPort {
    /// Opens a walker over commits reachable from the current head.
    ///
    /// An empty repository yields an empty walk.
    fn walk_commits(&self, order: WalkOrder) -> RepoResult<CommitWalk<'_>>;

    /// Full commit message; bytes that are not UTF-8 come back as U+FFFD.
    fn commit_message(&self, id: &CommitId) -> RepoResult<String>;

    /// Authored date of the commit, in the commit's own timezone.
    fn commit_date(&self, id: &CommitId) -> RepoResult<DateTime<FixedOffset>>;

    /// Creates one commit on top of the current head, dated at `date`.
    fn create_commit(&self, date: NaiveDate, message: &str) -> RepoResult<CommitId>;
}

impl<R: RepositoryPort + ?Sized> RepositoryPort for &R {
    fn walk_commits(&self, order: WalkOrder) -> RepoResult<CommitWalk<'_>> {
        (**self).walk_commits(order)
    }

    fn commit_message(&self, id: &CommitId) -> RepoResult<String> {
        (**self).commit_message(id)
    }

    fn commit_date(&self, id: &CommitId) -> RepoResult<DateTime<FixedOffset>> {
        (**self).commit_date(id)
    }

    fn create_commit(&self, date: NaiveDate, message: &str) -> RepoResult<CommitId> {
        (**self).create_commit(date, message)
    }
}

/// Timestamp stamped on a painting commit for `date`.
pub fn paint_timestamp(date: NaiveDate) -> DateTime<FixedOffset> {
    let noon = NaiveTime::from_hms_opt(PAINT_HOUR_UTC, 0, 0).unwrap_or_default();
    date.and_time(noon).and_utc().fixed_offset()
}

#[cfg(test)]
mod tests {
    use super::{paint_timestamp, CommitId, RepoError};
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn paint_timestamp_is_noon_utc_on_the_same_day() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date");
        let stamp = paint_timestamp(date);
        assert_eq!(stamp.date_naive(), date);
        assert_eq!(stamp.hour(), 12);
        assert_eq!(stamp.offset().local_minus_utc(), 0);
    }

    #[test]
    fn repo_error_messages_name_the_failure() {
        let err = RepoError::NotFound(CommitId::new("abc123"));
        assert_eq!(err.to_string(), "commit not found: abc123");
        let err = RepoError::Unavailable("disk full".to_string());
        assert!(err.to_string().contains("disk full"));
    }
}
