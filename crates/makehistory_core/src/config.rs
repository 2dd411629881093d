//! Painting run configuration.
//!
//! # Responsibility
//! - Hold the inputs that define one painting: marker prefix, commits per
//!   unit of intensity and calendar anchor.
//! - Reject configurations that would corrupt progress detection.
//!
//! # Invariants
//! - `marker_prefix` is non-blank and single-line.
//! - `commits_per_unit` is within `1..=MAX_COMMITS_PER_UNIT`, so every planned
//!   cell count fits in `u32` without saturation.

use crate::glyph::GlyphError;
use crate::model::calendar::{AnchorOutOfRange, CalendarAnchor};
use crate::model::matrix::MatrixError;
use chrono::{Local, NaiveDate};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::num::NonZeroU32;

/// Marker prepended to every painting commit message.
pub const DEFAULT_MARKER_PREFIX: &str = "makehistory: ";
/// Commits per unit of intensity; dense enough to reach the darkest calendar shade.
pub const DEFAULT_COMMITS_PER_UNIT: u32 = 30;
/// Upper bound on commits per unit; a full-intensity 7x50 image then needs at
/// most 3,150,000 commits.
pub const MAX_COMMITS_PER_UNIT: u32 = 1_000;

/// Configuration errors; always reported before any repository mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyPrefix,
    MultilinePrefix,
    ZeroCommitsPerUnit,
    CommitsPerUnitTooLarge { requested: u32, max: u32 },
    Anchor(AnchorOutOfRange),
    Glyph(GlyphError),
    Matrix(MatrixError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPrefix => write!(f, "marker prefix cannot be empty"),
            Self::MultilinePrefix => write!(f, "marker prefix must be a single line"),
            Self::ZeroCommitsPerUnit => write!(f, "commits per day must be at least 1"),
            Self::CommitsPerUnitTooLarge { requested, max } => {
                write!(f, "commits per day must be at most {max}, got {requested}")
            }
            Self::Anchor(err) => write!(f, "{err}"),
            Self::Glyph(err) => write!(f, "{err}"),
            Self::Matrix(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Anchor(err) => Some(err),
            Self::Glyph(err) => Some(err),
            Self::Matrix(err) => Some(err),
            Self::EmptyPrefix
            | Self::MultilinePrefix
            | Self::ZeroCommitsPerUnit
            | Self::CommitsPerUnitTooLarge { .. } => None,
        }
    }
}

impl From<AnchorOutOfRange> for ConfigError {
    fn from(value: AnchorOutOfRange) -> Self {
        Self::Anchor(value)
    }
}

impl From<GlyphError> for ConfigError {
    fn from(value: GlyphError) -> Self {
        Self::Glyph(value)
    }
}

impl From<MatrixError> for ConfigError {
    fn from(value: MatrixError) -> Self {
        Self::Matrix(value)
    }
}

/// Inputs that fully determine the final painted state of a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintConfig {
    marker_prefix: String,
    commits_per_unit: NonZeroU32,
    anchor: CalendarAnchor,
}

impl PaintConfig {
    /// Builds a validated configuration.
    ///
    /// # Errors
    /// - `EmptyPrefix` / `MultilinePrefix` for unusable markers.
    /// - `ZeroCommitsPerUnit` when `commits_per_unit == 0`.
    /// - `CommitsPerUnitTooLarge` above `MAX_COMMITS_PER_UNIT`.
    pub fn new(
        marker_prefix: impl Into<String>,
        commits_per_unit: u32,
        anchor: CalendarAnchor,
    ) -> Result<Self, ConfigError> {
        let marker_prefix = marker_prefix.into();
        validate_prefix(&marker_prefix)?;
        if commits_per_unit > MAX_COMMITS_PER_UNIT {
            return Err(ConfigError::CommitsPerUnitTooLarge {
                requested: commits_per_unit,
                max: MAX_COMMITS_PER_UNIT,
            });
        }
        let commits_per_unit =
            NonZeroU32::new(commits_per_unit).ok_or(ConfigError::ZeroCommitsPerUnit)?;
        Ok(Self {
            marker_prefix,
            commits_per_unit,
            anchor,
        })
    }

    /// Default configuration anchored relative to `today`.
    pub fn for_today(today: NaiveDate) -> Self {
        Self {
            marker_prefix: DEFAULT_MARKER_PREFIX.to_string(),
            commits_per_unit: NonZeroU32::new(DEFAULT_COMMITS_PER_UNIT)
                .unwrap_or(NonZeroU32::MIN),
            anchor: CalendarAnchor::for_today(today),
        }
    }

    pub fn with_anchor(mut self, anchor: CalendarAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn marker_prefix(&self) -> &str {
        &self.marker_prefix
    }

    pub fn commits_per_unit(&self) -> NonZeroU32 {
        self.commits_per_unit
    }

    pub fn anchor(&self) -> CalendarAnchor {
        self.anchor
    }
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self::for_today(Local::now().date_naive())
    }
}

fn validate_prefix(prefix: &str) -> Result<(), ConfigError> {
    if prefix.trim().is_empty() {
        return Err(ConfigError::EmptyPrefix);
    }
    if prefix.contains(['\n', '\r']) {
        return Err(ConfigError::MultilinePrefix);
    }
    Ok(())
}
