//! Sequential application of painting requests.

use crate::error::{PaintError, PaintResult};
use crate::model::calendar::PaintingRequest;
use crate::repo::port::{CommitId, RepositoryPort};
use log::{debug, error, info};
use std::time::Instant;

/// Result of applying a request queue to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub applied: usize,
    pub created: Vec<CommitId>,
}

/// Applies `requests` one at a time, strictly in order.
///
/// # Errors
/// - Stops at the first failed `create_commit` and returns
///   `PaintError::RepositoryMutation` with the number already applied.
///   Nothing is retried.
pub fn apply_requests<R: RepositoryPort + ?Sized>(
    repo: &R,
    requests: &[PaintingRequest],
) -> PaintResult<ApplyReport> {
    let started_at = Instant::now();
    info!(
        "event=apply module=painter status=start requests={}",
        requests.len()
    );

    let mut report = ApplyReport::default();
    for request in requests {
        match repo.create_commit(request.date, &request.message) {
            Ok(id) => {
                debug!(
                    "event=apply_commit module=painter status=ok position={} date={} commit={}",
                    request.position, request.date, id
                );
                report.applied += 1;
                report.created.push(id);
            }
            Err(err) => {
                error!(
                    "event=apply module=painter status=error duration_ms={} applied={} remaining={} error_code=create_commit_failed error={}",
                    started_at.elapsed().as_millis(),
                    report.applied,
                    requests.len() - report.applied,
                    err
                );
                return Err(PaintError::RepositoryMutation {
                    applied: report.applied,
                    remaining: requests.len() - report.applied,
                    source: err,
                });
            }
        }
    }

    info!(
        "event=apply module=painter status=ok duration_ms={} applied={}",
        started_at.elapsed().as_millis(),
        report.applied
    );
    Ok(report)
}
