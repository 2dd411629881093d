use chrono::{Duration, FixedOffset, NaiveDate, TimeZone};
use makehistory_core::{
    apply_requests, lookup, map_to_plan, scan, scan_with_stats, CalendarAnchor, CellPosition,
    MemoryRepository, PaintConfig, PaintError, PaintService, PaintingScheduler, RepositoryPort,
};
use std::collections::BTreeMap;
use std::num::NonZeroU32;

const PREFIX: &str = "paint: ";

fn anchor() -> CalendarAnchor {
    CalendarAnchor::new(NaiveDate::from_ymd_opt(2025, 11, 2).unwrap()).unwrap()
}

fn config(per_unit: u32) -> PaintConfig {
    PaintConfig::new(PREFIX, per_unit, anchor()).unwrap()
}

fn request_multiset(
    requests: &[makehistory_core::PaintingRequest],
) -> BTreeMap<(NaiveDate, CellPosition), usize> {
    let mut set = BTreeMap::new();
    for request in requests {
        *set.entry((request.date, request.position)).or_insert(0) += 1;
    }
    set
}

#[test]
fn hash_glyph_on_empty_repository_needs_one_commit_per_lit_cell() {
    let repo = MemoryRepository::new();
    let service = PaintService::new(&repo, config(1));
    let hash = lookup('#').unwrap();

    let pending = service.pending(&hash).unwrap();
    assert_eq!(pending.requests.len(), 20);
    assert_eq!(pending.planned, 20);
    assert_eq!(pending.already_present, 0);

    for request in &pending.requests {
        assert_eq!(request.date, anchor().date_for(request.position));
        assert!(request.message.starts_with(PREFIX));
    }
    // Row-major: first non-zero cell of `#` is (0,1).
    assert_eq!(pending.requests[0].position, CellPosition::new(0, 1).unwrap());

    let outcome = service.paint(&hash).unwrap();
    assert_eq!(outcome.applied, 20);
    assert_eq!(repo.len(), 20);
}

#[test]
fn second_run_is_a_no_op() {
    let repo = MemoryRepository::new();
    let service = PaintService::new(&repo, config(3));
    let hash = lookup('#').unwrap();

    let first = service.paint(&hash).unwrap();
    assert_eq!(first.applied, 20 * 3);

    let second = service.paint(&hash).unwrap();
    assert_eq!(second.applied, 0);
    assert_eq!(second.already_present, 20 * 3);
    assert_eq!(second.scan.matched, 20 * 3);
    assert_eq!(repo.len(), 20 * 3);
}

#[test]
fn resuming_after_k_requests_yields_exactly_the_rest() {
    let repo = MemoryRepository::new();
    let hash = lookup('#').unwrap();
    let plan = map_to_plan(&hash, NonZeroU32::new(2).unwrap());
    let scheduler = PaintingScheduler::new(anchor(), PREFIX);

    let all = scheduler.reconcile(&plan, &scan(&repo, PREFIX, anchor()).unwrap());
    assert_eq!(all.len(), 40);

    let k = 11;
    apply_requests(&repo, &all[..k]).unwrap();

    let rest = scheduler.reconcile(&plan, &scan(&repo, PREFIX, anchor()).unwrap());
    assert_eq!(rest.len(), all.len() - k);
    assert_eq!(request_multiset(&rest), request_multiset(&all[k..]));
}

#[test]
fn failed_commit_aborts_queue_and_rerun_resumes() {
    let repo = MemoryRepository::new();
    repo.fail_creates_after(5);
    let service = PaintService::new(&repo, config(1));
    let hash = lookup('#').unwrap();

    let err = service.paint(&hash).unwrap_err();
    match err {
        PaintError::RepositoryMutation {
            applied, remaining, ..
        } => {
            assert_eq!(applied, 5);
            assert_eq!(remaining, 15);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(repo.len(), 5);

    let pending = service.pending(&hash).unwrap();
    assert_eq!(pending.requests.len(), 15);
    assert_eq!(pending.already_present, 5);
}

#[test]
fn walker_failure_is_fatal_and_creates_nothing() {
    let repo = MemoryRepository::new();
    repo.fail_walks(Some("index locked"));
    let service = PaintService::new(&repo, config(1));

    let err = service.paint(&lookup('#').unwrap()).unwrap_err();
    assert!(matches!(err, PaintError::RepositoryAccess(_)));
    assert!(repo.is_empty());
}

#[test]
fn unreadable_commit_is_skipped_not_fatal() {
    let repo = MemoryRepository::new();
    let position = CellPosition::new(2, 4).unwrap();
    let readable = repo
        .create_commit(anchor().date_for(position), "paint: first")
        .unwrap();
    let broken = repo
        .create_commit(anchor().date_for(position), "paint: second")
        .unwrap();
    repo.mark_unreadable(&broken);

    let (progress, stats) = scan_with_stats(&repo, PREFIX, anchor()).unwrap();
    assert_eq!(progress.count(position), 1);
    assert_eq!(stats.walked, 2);
    assert_eq!(stats.matched, 1);
    assert_eq!(stats.skipped, 1);
    assert!(repo.commit_message(&readable).is_ok());
}

#[test]
fn ordinary_and_out_of_window_commits_are_not_counted() {
    let repo = MemoryRepository::new();
    let utc = FixedOffset::east_opt(0).unwrap();
    let in_window = utc
        .from_local_datetime(&anchor().date().and_hms_opt(9, 0, 0).unwrap())
        .unwrap();

    repo.push_commit("fix: typo", in_window);
    repo.push_commit("paint: early", in_window - Duration::days(1));
    repo.push_commit("paint: late", in_window + Duration::weeks(50));
    repo.push_commit("unrelated paint: not a prefix", in_window);
    repo.push_commit("paint: counted", in_window);

    let (progress, stats) = scan_with_stats(&repo, PREFIX, anchor()).unwrap();
    assert_eq!(progress.total(), 1);
    assert_eq!(progress.count(CellPosition::new(0, 0).unwrap()), 1);
    assert_eq!(stats.walked, 5);
    assert_eq!(stats.out_of_window, 2);
}

#[test]
fn commit_date_uses_the_commits_own_timezone() {
    let repo = MemoryRepository::new();
    let position = CellPosition::new(3, 10).unwrap();
    let local_date = anchor().date_for(position);
    // 23:30 at UTC-08:00 is already the next day in UTC.
    let pacific = FixedOffset::west_opt(8 * 3600).unwrap();
    let late_evening = pacific
        .from_local_datetime(&local_date.and_hms_opt(23, 30, 0).unwrap())
        .unwrap();
    repo.push_commit("paint: tz", late_evening);

    let progress = scan(&repo, PREFIX, anchor()).unwrap();
    assert_eq!(progress.count(position), 1);
}

#[test]
fn a_different_prefix_paints_independently() {
    let repo = MemoryRepository::new();
    let hash = lookup('#').unwrap();
    PaintService::new(&repo, config(1)).paint(&hash).unwrap();

    let other = PaintConfig::new("other: ", 1, anchor()).unwrap();
    let pending = PaintService::new(&repo, other).pending(&hash).unwrap();
    assert_eq!(pending.requests.len(), 20);
}

#[test]
fn over_painted_cells_are_left_alone() {
    let repo = MemoryRepository::new();
    let hash = lookup('#').unwrap();
    PaintService::new(&repo, config(3)).paint(&hash).unwrap();

    let pending = PaintService::new(&repo, config(1)).pending(&hash).unwrap();
    assert!(pending.requests.is_empty());
    assert_eq!(pending.already_present, 20);
}
