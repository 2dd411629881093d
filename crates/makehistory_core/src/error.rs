//! Top-level painting error taxonomy.
//!
//! # Invariants
//! - `Configuration` is raised before any repository mutation.
//! - `RepositoryAccess` never carries partial scan state.
//! - `RepositoryMutation` always reports how many requests were applied; the
//!   repository history remains the source of truth for a re-run.

use crate::config::ConfigError;
use crate::glyph::GlyphError;
use crate::model::matrix::MatrixError;
use crate::repo::port::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type PaintResult<T> = Result<T, PaintError>;

/// Errors surfaced by the painting pipeline to the process boundary.
#[derive(Debug)]
pub enum PaintError {
    Configuration(ConfigError),
    RepositoryAccess(RepoError),
    RepositoryMutation {
        applied: usize,
        remaining: usize,
        source: RepoError,
    },
}

impl PaintError {
    /// Requests applied before the failure (0 for non-mutation errors).
    pub fn applied(&self) -> usize {
        match self {
            Self::RepositoryMutation { applied, .. } => *applied,
            Self::Configuration(_) | Self::RepositoryAccess(_) => 0,
        }
    }
}

impl Display for PaintError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration(err) => write!(f, "invalid configuration: {err}"),
            Self::RepositoryAccess(err) => write!(f, "cannot read repository: {err}"),
            Self::RepositoryMutation {
                applied,
                remaining,
                source,
            } => write!(
                f,
                "commit creation failed after {applied} commits ({remaining} not applied): {source}; re-running resumes from the repository state"
            ),
        }
    }
}

impl Error for PaintError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Configuration(err) => Some(err),
            Self::RepositoryAccess(err) => Some(err),
            Self::RepositoryMutation { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for PaintError {
    fn from(value: ConfigError) -> Self {
        Self::Configuration(value)
    }
}

impl From<GlyphError> for PaintError {
    fn from(value: GlyphError) -> Self {
        Self::Configuration(ConfigError::Glyph(value))
    }
}

impl From<MatrixError> for PaintError {
    fn from(value: MatrixError) -> Self {
        Self::Configuration(ConfigError::Matrix(value))
    }
}
