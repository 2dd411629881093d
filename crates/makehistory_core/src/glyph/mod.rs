//! Glyph and bitmap source.
//!
//! # Responsibility
//! - Supply fixed-height intensity matrices for symbols, text and named images.
//!
//! # Invariants
//! - Lookups are pure; the tables are compile-time constants.
//! - Every returned matrix has already passed `IntensityMatrix` validation.

use crate::model::matrix::MatrixError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod ascii;
pub mod images;

pub use ascii::{lookup, supported_symbols};
pub use images::{image_names, named_image, render_text};

/// Errors produced while resolving a bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlyphError {
    NotFound(char),
    UnknownImage(String),
    EmptyText,
    Matrix(MatrixError),
}

impl Display for GlyphError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(symbol) => write!(f, "no glyph defined for `{symbol}`"),
            Self::UnknownImage(name) => write!(f, "unknown image `{name}`"),
            Self::EmptyText => write!(f, "text to paint is empty"),
            Self::Matrix(err) => write!(f, "{err}"),
        }
    }
}

impl Error for GlyphError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Matrix(err) => Some(err),
            Self::NotFound(_) | Self::UnknownImage(_) | Self::EmptyText => None,
        }
    }
}

impl From<MatrixError> for GlyphError {
    fn from(value: MatrixError) -> Self {
        Self::Matrix(value)
    }
}
