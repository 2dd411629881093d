//! Painting use-case service.
//!
//! # Responsibility
//! - Run the full pipeline: scan history, reconcile against the plan, apply
//!   the missing commits.
//! - Keep CLI callers decoupled from the stage modules and the backend.
//!
//! # Invariants
//! - The scan is fully exhausted before any request is emitted.
//! - Requests are applied one at a time, in emission order.
//! - No in-memory checkpoint survives a failure; a re-run rescans.

use crate::config::PaintConfig;
use crate::error::{PaintError, PaintResult};
use crate::model::calendar::{GridCell, PaintingRequest};
use crate::model::matrix::IntensityMatrix;
use crate::model::progress::{ProgressRecord, ScanStats};
use crate::plan::mapper::{map_to_plan, planned_commits};
use crate::plan::scanner::scan_with_stats;
use crate::plan::scheduler::PaintingScheduler;
use crate::repo::port::{CommitId, RepositoryPort};
use crate::service::painter::apply_requests;
use log::info;

/// Summary of one completed painting run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintOutcome {
    /// Commits the image needs in total.
    pub planned: u64,
    /// Planned commits that were already in history before this run.
    pub already_present: u64,
    /// Commits created by this run.
    pub applied: usize,
    pub created: Vec<CommitId>,
    pub scan: ScanStats,
}

/// Pending work computed without touching the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPaint {
    pub planned: u64,
    pub already_present: u64,
    pub requests: Vec<PaintingRequest>,
    pub scan: ScanStats,
}

/// Use-case service wrapping a repository port and one configuration.
pub struct PaintService<R: RepositoryPort> {
    repo: R,
    config: PaintConfig,
    scheduler: PaintingScheduler,
}

impl<R: RepositoryPort> PaintService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R, config: PaintConfig) -> Self {
        let scheduler = PaintingScheduler::new(config.anchor(), config.marker_prefix());
        Self {
            repo,
            config,
            scheduler,
        }
    }

    pub fn config(&self) -> &PaintConfig {
        &self.config
    }

    /// Target per-cell commit counts for `matrix`.
    pub fn plan(&self, matrix: &IntensityMatrix) -> Vec<GridCell> {
        map_to_plan(matrix, self.config.commits_per_unit())
    }

    /// Scans history for painting commits under the configured prefix and anchor.
    ///
    /// # Errors
    /// - `PaintError::RepositoryAccess` when the history cannot be walked.
    pub fn progress(&self) -> PaintResult<(ProgressRecord, ScanStats)> {
        scan_with_stats(
            &self.repo,
            self.config.marker_prefix(),
            self.config.anchor(),
        )
        .map_err(PaintError::RepositoryAccess)
    }

    /// Scans and reconciles without creating commits.
    pub fn pending(&self, matrix: &IntensityMatrix) -> PaintResult<PendingPaint> {
        let plan = self.plan(matrix);
        let (progress, scan) = self.progress()?;
        let requests = self.scheduler.reconcile(&plan, &progress);
        Ok(PendingPaint {
            planned: planned_commits(&plan),
            already_present: already_present(&plan, &progress),
            requests,
            scan,
        })
    }

    /// Paints `matrix`: scan, reconcile, then apply every missing commit.
    ///
    /// # Errors
    /// - `RepositoryAccess` when the scan cannot start; nothing is created.
    /// - `RepositoryMutation` when a commit fails; earlier commits stay in
    ///   history and a re-run picks up from there.
    pub fn paint(&self, matrix: &IntensityMatrix) -> PaintResult<PaintOutcome> {
        let pending = self.pending(matrix)?;
        info!(
            "event=paint module=service status=start planned={} already_present={} requests={}",
            pending.planned,
            pending.already_present,
            pending.requests.len()
        );

        let report = apply_requests(&self.repo, &pending.requests)?;
        info!(
            "event=paint module=service status=ok applied={}",
            report.applied
        );
        Ok(PaintOutcome {
            planned: pending.planned,
            already_present: pending.already_present,
            applied: report.applied,
            created: report.created,
            scan: pending.scan,
        })
    }
}

fn already_present(plan: &[GridCell], progress: &ProgressRecord) -> u64 {
    plan.iter()
        .map(|cell| u64::from(cell.target_count.min(progress.count(cell.position))))
        .sum()
}
