//! Intensity matrix model.
//!
//! # Responsibility
//! - Hold the fixed-height bitmap that gets painted onto the calendar.
//! - Validate shape and value bounds once, at construction.
//!
//! # Invariants
//! - Exactly `GRID_ROWS` rows, all of equal length.
//! - Width is within `1..=GRID_COLUMNS`.
//! - Every value is `<= MAX_INTENSITY`.
//! - A constructed matrix is never mutated.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Calendar rows, one per day of week (row 0 = Sunday).
pub const GRID_ROWS: usize = 7;
/// Paintable calendar columns (weeks). First and last partial weeks are left out.
pub const GRID_COLUMNS: usize = 50;
/// Largest value a single cell may carry.
pub const MAX_INTENSITY: u8 = 9;

/// Validation errors for intensity matrix construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    WrongRowCount { expected: usize, actual: usize },
    RaggedRows { row: usize, expected: usize, actual: usize },
    Empty,
    TooWide { columns: usize, max: usize },
    IntensityOutOfRange { row: usize, column: usize, value: u8 },
    InvalidArt { row: usize, column: usize, symbol: char },
}

impl Display for MatrixError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongRowCount { expected, actual } => {
                write!(f, "matrix must have {expected} rows, got {actual}")
            }
            Self::RaggedRows {
                row,
                expected,
                actual,
            } => write!(
                f,
                "matrix row {row} has {actual} columns, expected {expected}"
            ),
            Self::Empty => write!(f, "matrix has no columns"),
            Self::TooWide { columns, max } => {
                write!(f, "matrix is {columns} columns wide, at most {max} fit the calendar")
            }
            Self::IntensityOutOfRange { row, column, value } => write!(
                f,
                "intensity {value} at ({row},{column}) exceeds maximum {MAX_INTENSITY}"
            ),
            Self::InvalidArt {
                row,
                column,
                symbol,
            } => write!(f, "unsupported art symbol `{symbol}` at ({row},{column})"),
        }
    }
}

impl Error for MatrixError {}

/// Fixed 7-row grid of small unsigned intensities (0 = blank).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct IntensityMatrix {
    rows: Vec<Vec<u8>>,
}

impl IntensityMatrix {
    /// Builds a matrix from row-major values.
    ///
    /// # Errors
    /// - Returns an error when the row count is not `GRID_ROWS`.
    /// - Returns an error when rows differ in length, are empty or too wide.
    /// - Returns an error when any value exceeds `MAX_INTENSITY`.
    pub fn new(rows: Vec<Vec<u8>>) -> Result<Self, MatrixError> {
        if rows.len() != GRID_ROWS {
            return Err(MatrixError::WrongRowCount {
                expected: GRID_ROWS,
                actual: rows.len(),
            });
        }

        let width = rows[0].len();
        for (index, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(MatrixError::RaggedRows {
                    row: index,
                    expected: width,
                    actual: row.len(),
                });
            }
        }
        if width == 0 {
            return Err(MatrixError::Empty);
        }
        if width > GRID_COLUMNS {
            return Err(MatrixError::TooWide {
                columns: width,
                max: GRID_COLUMNS,
            });
        }

        for (row_index, row) in rows.iter().enumerate() {
            if let Some((column, &value)) = row
                .iter()
                .enumerate()
                .find(|(_, &value)| value > MAX_INTENSITY)
            {
                return Err(MatrixError::IntensityOutOfRange {
                    row: row_index,
                    column,
                    value,
                });
            }
        }

        Ok(Self { rows })
    }

    /// Parses text art into a matrix.
    ///
    /// `' '` and `'.'` are blank, `'#'` is intensity 1, digits are taken literally.
    pub fn from_art(rows: &[&str]) -> Result<Self, MatrixError> {
        let mut parsed = Vec::with_capacity(rows.len());
        for (row_index, line) in rows.iter().enumerate() {
            let mut values = Vec::with_capacity(line.len());
            for (column, symbol) in line.chars().enumerate() {
                let value = match symbol {
                    ' ' | '.' => 0,
                    '#' => 1,
                    '0'..='9' => symbol as u8 - b'0',
                    other => {
                        return Err(MatrixError::InvalidArt {
                            row: row_index,
                            column,
                            symbol: other,
                        })
                    }
                };
                values.push(value);
            }
            parsed.push(values);
        }
        Self::new(parsed)
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn columns(&self) -> usize {
        self.rows[0].len()
    }

    /// Returns the value at `(row, column)`, or `None` outside the matrix.
    pub fn get(&self, row: usize, column: usize) -> Option<u8> {
        self.rows.get(row)?.get(column).copied()
    }

    /// Row-major view of all values.
    pub fn row_values(&self) -> impl Iterator<Item = &[u8]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Number of entries with a non-zero intensity.
    pub fn non_zero_cells(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&value| value > 0)
            .count()
    }

    /// Places `other` to the right of `self`, separated by `gap` blank columns.
    pub fn hconcat(&self, other: &Self, gap: usize) -> Result<Self, MatrixError> {
        let rows = self
            .rows
            .iter()
            .zip(&other.rows)
            .map(|(left, right)| {
                let mut joined = Vec::with_capacity(left.len() + gap + right.len());
                joined.extend_from_slice(left);
                joined.extend(std::iter::repeat(0).take(gap));
                joined.extend_from_slice(right);
                joined
            })
            .collect();
        Self::new(rows)
    }

    /// Horizontally centers the matrix inside `columns`, padding with blanks.
    pub fn center_in(&self, columns: usize) -> Result<Self, MatrixError> {
        let width = self.columns();
        if width > columns {
            return Err(MatrixError::TooWide {
                columns: width,
                max: columns,
            });
        }
        let left = (columns - width) / 2;
        let right = columns - width - left;
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut padded = vec![0; left];
                padded.extend_from_slice(row);
                padded.extend(std::iter::repeat(0).take(right));
                padded
            })
            .collect();
        Self::new(rows)
    }
}

impl TryFrom<Vec<Vec<u8>>> for IntensityMatrix {
    type Error = MatrixError;

    fn try_from(value: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IntensityMatrix> for Vec<Vec<u8>> {
    fn from(value: IntensityMatrix) -> Self {
        value.rows
    }
}

#[cfg(test)]
mod tests {
    use super::{IntensityMatrix, MatrixError, GRID_COLUMNS};

    fn blank(width: usize) -> Vec<Vec<u8>> {
        vec![vec![0; width]; 7]
    }

    #[test]
    fn rejects_wrong_row_count() {
        let err = IntensityMatrix::new(vec![vec![1]; 6]).expect_err("6 rows must fail");
        assert_eq!(
            err,
            MatrixError::WrongRowCount {
                expected: 7,
                actual: 6
            }
        );
    }

    #[test]
    fn rejects_ragged_rows() {
        let mut rows = blank(3);
        rows[4].push(0);
        let err = IntensityMatrix::new(rows).expect_err("ragged rows must fail");
        assert!(matches!(err, MatrixError::RaggedRows { row: 4, .. }));
    }

    #[test]
    fn rejects_empty_and_too_wide() {
        assert_eq!(
            IntensityMatrix::new(blank(0)).expect_err("empty must fail"),
            MatrixError::Empty
        );
        assert!(matches!(
            IntensityMatrix::new(blank(GRID_COLUMNS + 1)),
            Err(MatrixError::TooWide { .. })
        ));
        assert!(IntensityMatrix::new(blank(GRID_COLUMNS)).is_ok());
    }

    #[test]
    fn rejects_out_of_range_intensity() {
        let mut rows = blank(2);
        rows[3][1] = 10;
        let err = IntensityMatrix::new(rows).expect_err("10 is above the maximum");
        assert_eq!(
            err,
            MatrixError::IntensityOutOfRange {
                row: 3,
                column: 1,
                value: 10
            }
        );
    }

    #[test]
    fn parses_art_symbols() {
        let matrix =
            IntensityMatrix::from_art(&["#. 3", "    ", "    ", "    ", "    ", "    ", "9   "])
                .expect("art should parse");
        assert_eq!(matrix.get(0, 0), Some(1));
        assert_eq!(matrix.get(0, 1), Some(0));
        assert_eq!(matrix.get(0, 3), Some(3));
        assert_eq!(matrix.get(6, 0), Some(9));
        assert_eq!(matrix.get(7, 0), None);
        assert_eq!(matrix.non_zero_cells(), 3);
    }

    #[test]
    fn rejects_unknown_art_symbol() {
        let err = IntensityMatrix::from_art(&["x", " ", " ", " ", " ", " ", " "])
            .expect_err("x is not an art symbol");
        assert!(matches!(err, MatrixError::InvalidArt { symbol: 'x', .. }));
    }

    #[test]
    fn hconcat_and_center_keep_shape() {
        let one = IntensityMatrix::new(vec![vec![1]; 7]).expect("valid");
        let two = IntensityMatrix::new(vec![vec![2, 2]; 7]).expect("valid");
        let joined = one.hconcat(&two, 1).expect("fits");
        assert_eq!(joined.columns(), 4);
        assert_eq!(joined.get(0, 1), Some(0));
        assert_eq!(joined.get(6, 3), Some(2));

        let centered = joined.center_in(10).expect("fits");
        assert_eq!(centered.columns(), 10);
        assert_eq!(centered.get(0, 3), Some(1));
        assert_eq!(centered.non_zero_cells(), joined.non_zero_cells());
    }
}
