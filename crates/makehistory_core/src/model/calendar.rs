//! Calendar geometry: cell positions, anchor dates and plan units.
//!
//! # Responsibility
//! - Map grid positions to absolute dates and back.
//! - Define the per-cell plan and request records exchanged by the pipeline.
//!
//! # Invariants
//! - `date = anchor + column * 7 + row` days for every in-bounds position.
//! - `position_for(date_for(p)) == Some(p)` for every in-bounds `p`.
//! - An anchor only exists when every date of its window is representable.

use crate::model::matrix::{GRID_COLUMNS, GRID_ROWS};
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DAYS_PER_WEEK: u64 = 7;
/// Day offset of the bottom-right cell from the anchor.
const WINDOW_LAST_OFFSET: u64 = (GRID_COLUMNS as u64 - 1) * DAYS_PER_WEEK + (GRID_ROWS as u64 - 1);

/// Grid coordinate; row is day-of-week, column is week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellPosition {
    pub row: usize,
    pub column: usize,
}

impl CellPosition {
    /// Returns a position when it lies inside the calendar grid.
    pub fn new(row: usize, column: usize) -> Option<Self> {
        (row < GRID_ROWS && column < GRID_COLUMNS).then_some(Self { row, column })
    }
}

impl Display for CellPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "cell({},{})", self.row, self.column)
    }
}

/// Anchor whose grid window runs past the last representable date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorOutOfRange(pub NaiveDate);

impl Display for AnchorOutOfRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "anchor {} leaves no room for a {GRID_COLUMNS}-week calendar",
            self.0
        )
    }
}

impl Error for AnchorOutOfRange {}

/// Date of grid position (0,0). Fixed for one painting run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NaiveDate", into = "NaiveDate")]
pub struct CalendarAnchor(NaiveDate);

impl CalendarAnchor {
    /// Anchors the grid at `date`.
    ///
    /// # Errors
    /// - `AnchorOutOfRange` when the last cell of the window would overflow
    ///   the calendar type.
    pub fn new(date: NaiveDate) -> Result<Self, AnchorOutOfRange> {
        date.checked_add_days(Days::new(WINDOW_LAST_OFFSET))
            .map(|_| Self(date))
            .ok_or(AnchorOutOfRange(date))
    }

    /// Most recent Sunday on or before `today`, minus `GRID_COLUMNS` weeks.
    ///
    /// Dates too close to the ends of the calendar type clamp to the nearest
    /// valid anchor.
    pub fn for_today(today: NaiveDate) -> Self {
        let since_sunday = u64::from(today.weekday().num_days_from_sunday());
        let anchor = today
            .checked_sub_days(Days::new(since_sunday + GRID_COLUMNS as u64 * DAYS_PER_WEEK))
            .unwrap_or(NaiveDate::MIN);
        Self::new(anchor).unwrap_or_else(|_| Self::latest())
    }

    fn latest() -> Self {
        Self(
            NaiveDate::MAX
                .checked_sub_days(Days::new(WINDOW_LAST_OFFSET))
                .unwrap_or(NaiveDate::MIN),
        )
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Absolute date painted by `position`.
    pub fn date_for(&self, position: CellPosition) -> NaiveDate {
        let offset = position.column as u64 * DAYS_PER_WEEK + position.row as u64;
        // In range: construction checked the window's last cell.
        self.0
            .checked_add_days(Days::new(offset))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Inverse of [`Self::date_for`]; `None` when `date` is outside the grid window.
    pub fn position_for(&self, date: NaiveDate) -> Option<CellPosition> {
        let days = u64::try_from((date - self.0).num_days()).ok()?;
        let column = usize::try_from(days / DAYS_PER_WEEK).ok()?;
        let row = usize::try_from(days % DAYS_PER_WEEK).ok()?;
        CellPosition::new(row, column)
    }
}

impl TryFrom<NaiveDate> for CalendarAnchor {
    type Error = AnchorOutOfRange;

    fn try_from(value: NaiveDate) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CalendarAnchor> for NaiveDate {
    fn from(value: CalendarAnchor) -> Self {
        value.0
    }
}

/// One planned cell and the number of painting commits it should carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub position: CellPosition,
    pub target_count: u32,
}

/// One commit-creation request emitted by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintingRequest {
    pub position: CellPosition,
    pub date: NaiveDate,
    pub message: String,
}
