//! Intensity matrix to calendar plan mapping.

use crate::model::calendar::{CellPosition, GridCell};
use crate::model::matrix::IntensityMatrix;
use std::num::NonZeroU32;

/// Converts `matrix` into a row-major painting plan.
///
/// Emits one `GridCell` per non-zero entry with
/// `target_count = value * commits_per_unit`; blank entries are omitted since
/// they need no commits. Counts saturate at `u32::MAX`; a `PaintConfig`
/// bounds `commits_per_unit` so validated runs never get there.
pub fn map_to_plan(matrix: &IntensityMatrix, commits_per_unit: NonZeroU32) -> Vec<GridCell> {
    let mut plan = Vec::with_capacity(matrix.non_zero_cells());
    for (row, values) in matrix.row_values().enumerate() {
        for (column, &value) in values.iter().enumerate() {
            if value == 0 {
                continue;
            }
            // Matrix validation bounds both coordinates to the grid.
            let Some(position) = CellPosition::new(row, column) else {
                continue;
            };
            plan.push(GridCell {
                position,
                target_count: u32::from(value).saturating_mul(commits_per_unit.get()),
            });
        }
    }
    plan
}

/// Total commits a plan asks for.
pub fn planned_commits(plan: &[GridCell]) -> u64 {
    plan.iter().map(|cell| u64::from(cell.target_count)).sum()
}
