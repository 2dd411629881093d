//! Observed painting progress recovered from repository history.
//!
//! The commit history is the only state store; a record is rebuilt on every
//! scan and never persisted elsewhere.

use crate::model::calendar::CellPosition;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-cell count of painting commits already present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressRecord {
    counts: BTreeMap<CellPosition, u32>,
}

impl ProgressRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one observed painting commit to `position`.
    pub fn record(&mut self, position: CellPosition) {
        let count = self.counts.entry(position).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Observed count for `position` (0 when never painted).
    pub fn count(&self, position: CellPosition) -> u32 {
        self.counts.get(&position).copied().unwrap_or(0)
    }

    /// Total painting commits across all cells.
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&count| u64::from(count)).sum()
    }

    /// Painted cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (CellPosition, u32)> + '_ {
        self.counts.iter().map(|(&position, &count)| (position, count))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Counters describing one history scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Commits yielded by the walker.
    pub walked: usize,
    /// Marker commits that landed inside the grid window.
    pub matched: usize,
    /// Marker commits dated outside the grid window.
    pub out_of_window: usize,
    /// Commits that could not be read and were left out of the tally.
    pub skipped: usize,
}
