//! History scanner: rebuilds painting progress from commit history.
//!
//! # Responsibility
//! - Walk the repository oldest-first (topological, time tie-break).
//! - Classify commits as painting or ordinary by marker prefix.
//! - Fold painting commits into a `ProgressRecord` keyed by calendar cell.
//!
//! # Invariants
//! - Walker construction failure is fatal; no partial record is returned.
//! - A single unreadable commit is logged and skipped, never fatal.
//! - Marker commits dated outside the grid window are ignored.

use crate::model::calendar::{CalendarAnchor, CellPosition};
use crate::model::progress::{ProgressRecord, ScanStats};
use crate::repo::port::{CommitId, RepoResult, RepositoryPort, WalkOrder};
use log::{error, info, warn};
use std::time::Instant;

enum CommitKind {
    Ordinary,
    Painting(CellPosition),
    OutOfWindow,
}

/// Scans `repo` and returns the observed per-cell painting counts.
///
/// # Errors
/// - Returns the port error when the commit walker cannot be opened.
pub fn scan<R: RepositoryPort + ?Sized>(
    repo: &R,
    marker_prefix: &str,
    anchor: CalendarAnchor,
) -> RepoResult<ProgressRecord> {
    scan_with_stats(repo, marker_prefix, anchor).map(|(progress, _)| progress)
}

/// Same as [`scan`], additionally reporting walk counters.
pub fn scan_with_stats<R: RepositoryPort + ?Sized>(
    repo: &R,
    marker_prefix: &str,
    anchor: CalendarAnchor,
) -> RepoResult<(ProgressRecord, ScanStats)> {
    let started_at = Instant::now();
    info!(
        "event=scan module=scanner status=start anchor={}",
        anchor.date()
    );

    let walk = match repo.walk_commits(WalkOrder::OldestFirst) {
        Ok(walk) => walk,
        Err(err) => {
            error!(
                "event=scan module=scanner status=error duration_ms={} error_code=walk_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err);
        }
    };

    let mut progress = ProgressRecord::new();
    let mut stats = ScanStats::default();
    for item in walk {
        stats.walked += 1;
        let id = match item {
            Ok(id) => id,
            Err(err) => {
                warn!(
                    "event=scan_commit module=scanner status=skipped error_code=walk_item_failed error={}",
                    err
                );
                stats.skipped += 1;
                continue;
            }
        };
        match classify_commit(repo, &id, marker_prefix, anchor) {
            Ok(CommitKind::Ordinary) => {}
            Ok(CommitKind::Painting(position)) => {
                progress.record(position);
                stats.matched += 1;
            }
            Ok(CommitKind::OutOfWindow) => stats.out_of_window += 1,
            Err(err) => {
                warn!(
                    "event=scan_commit module=scanner status=skipped error_code=commit_unreadable commit={} error={}",
                    id, err
                );
                stats.skipped += 1;
            }
        }
    }

    info!(
        "event=scan module=scanner status=ok duration_ms={} walked={} matched={} out_of_window={} skipped={}",
        started_at.elapsed().as_millis(),
        stats.walked,
        stats.matched,
        stats.out_of_window,
        stats.skipped
    );
    Ok((progress, stats))
}

fn classify_commit<R: RepositoryPort + ?Sized>(
    repo: &R,
    id: &CommitId,
    marker_prefix: &str,
    anchor: CalendarAnchor,
) -> RepoResult<CommitKind> {
    let message = repo.commit_message(id)?;
    if !message.starts_with(marker_prefix) {
        return Ok(CommitKind::Ordinary);
    }
    let authored = repo.commit_date(id)?;
    Ok(match anchor.position_for(authored.date_naive()) {
        Some(position) => CommitKind::Painting(position),
        None => CommitKind::OutOfWindow,
    })
}
