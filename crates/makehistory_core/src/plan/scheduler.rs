//! Painting scheduler: reconciles the target plan against observed progress.
//!
//! # Invariants
//! - Output is a pure function of `(plan, progress, anchor, marker_prefix)`:
//!   same inputs, same requests in the same order with the same dates.
//! - A cell never receives more requests than its deficit.

use crate::model::calendar::{CalendarAnchor, CellPosition, GridCell, PaintingRequest};
use crate::model::progress::ProgressRecord;

/// Emits commit-creation requests for one anchor and marker prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintingScheduler {
    anchor: CalendarAnchor,
    marker_prefix: String,
}

impl PaintingScheduler {
    pub fn new(anchor: CalendarAnchor, marker_prefix: impl Into<String>) -> Self {
        Self {
            anchor,
            marker_prefix: marker_prefix.into(),
        }
    }

    pub fn anchor(&self) -> CalendarAnchor {
        self.anchor
    }

    pub fn marker_prefix(&self) -> &str {
        &self.marker_prefix
    }

    /// Commit message used for every painting commit on `position`.
    pub fn message_for(&self, position: CellPosition) -> String {
        format!("{}{}", self.marker_prefix, position)
    }

    /// Returns the ordered requests needed to bring every planned cell up to
    /// its target count.
    ///
    /// Cells are visited in plan order; each emits `target - observed`
    /// requests (none when already at or above target).
    pub fn reconcile(&self, plan: &[GridCell], progress: &ProgressRecord) -> Vec<PaintingRequest> {
        let mut requests = Vec::new();
        for cell in plan {
            let deficit = cell
                .target_count
                .saturating_sub(progress.count(cell.position));
            if deficit == 0 {
                continue;
            }
            let date = self.anchor.date_for(cell.position);
            let message = self.message_for(cell.position);
            requests.extend((0..deficit).map(|_| PaintingRequest {
                position: cell.position,
                date,
                message: message.clone(),
            }));
        }
        requests
    }
}

#[cfg(test)]
mod tests {
    use super::PaintingScheduler;
    use crate::model::calendar::{CalendarAnchor, CellPosition, GridCell};
    use crate::model::progress::ProgressRecord;
    use chrono::NaiveDate;

    fn scheduler() -> PaintingScheduler {
        let anchor = CalendarAnchor::new(NaiveDate::from_ymd_opt(2025, 11, 2).expect("valid"))
            .expect("anchor");
        PaintingScheduler::new(anchor, "paint: ")
    }

    fn cell(row: usize, column: usize, target_count: u32) -> GridCell {
        GridCell {
            position: CellPosition::new(row, column).expect("in bounds"),
            target_count,
        }
    }

    #[test]
    fn emits_deficit_requests_per_cell_in_plan_order() {
        let scheduler = scheduler();
        let plan = [cell(0, 1, 2), cell(3, 0, 1)];
        let mut progress = ProgressRecord::new();
        progress.record(plan[0].position);

        let requests = scheduler.reconcile(&plan, &progress);

        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].position, plan[0].position);
        assert_eq!(requests[0].date, NaiveDate::from_ymd_opt(2025, 11, 9).expect("valid"));
        assert_eq!(requests[0].message, "paint: cell(0,1)");
        assert_eq!(requests[1].position, plan[1].position);
        assert_eq!(requests[1].date, NaiveDate::from_ymd_opt(2025, 11, 5).expect("valid"));
    }

    #[test]
    fn over_painted_and_zero_target_cells_emit_nothing() {
        let scheduler = scheduler();
        let plan = [cell(1, 1, 1), cell(2, 2, 0)];
        let mut progress = ProgressRecord::new();
        progress.record(plan[0].position);
        progress.record(plan[0].position);

        assert!(scheduler.reconcile(&plan, &progress).is_empty());
    }

    #[test]
    fn reconcile_is_deterministic() {
        let scheduler = scheduler();
        let plan = [cell(0, 0, 3), cell(6, 49, 2)];
        let progress = ProgressRecord::new();
        assert_eq!(
            scheduler.reconcile(&plan, &progress),
            scheduler.reconcile(&plan, &progress)
        );
    }
}
