use gymapp_core::model::{BackupSnapshot, DayEntry, DiaryEntry};
use gymapp_core::store::{JsonFileSchedulerState, MemoryCollection};
use gymapp_core::{
    PrimaryCollections, RecordGateway, RetentionScheduler, SnapshotOutcome,
    SNAPSHOT_RETENTION_LIMIT,
};

fn memory_gateway() -> RecordGateway {
    RecordGateway::new(
        Some(PrimaryCollections {
            day_entries: Box::new(MemoryCollection::<DayEntry>::new()),
            diary_entries: Box::new(MemoryCollection::<DiaryEntry>::new()),
            snapshots: Box::new(MemoryCollection::<BackupSnapshot>::new()),
        }),
        Box::new(MemoryCollection::<DayEntry>::new()),
    )
}

fn scheduler_in(dir: &tempfile::TempDir) -> RetentionScheduler<JsonFileSchedulerState> {
    RetentionScheduler::new(JsonFileSchedulerState::new(
        dir.path().join("scheduler_state.json"),
    ))
}

#[test]
fn first_run_captures_the_diary() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = memory_gateway();
    gateway.add_diary_entry(&DiaryEntry::new("2026-08-05", "Squat", "60kg x5", ""));
    gateway.add_diary_entry(&DiaryEntry::new("2026-08-06", "Bench", "40kg x8", ""));

    let scheduler = scheduler_in(&dir);
    let outcome = scheduler.run_for_day(&gateway, "2026-08-06");

    assert_eq!(outcome, SnapshotOutcome::Created);
    let snapshots = gateway.all_snapshots();
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].date, "2026-08-06");
    assert_eq!(snapshots[0].logs.len(), 2);
}

#[test]
fn second_run_same_day_creates_no_second_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = memory_gateway();
    let scheduler = scheduler_in(&dir);

    assert_eq!(
        scheduler.run_for_day(&gateway, "2026-08-06"),
        SnapshotOutcome::Created
    );
    assert_eq!(
        scheduler.run_for_day(&gateway, "2026-08-06"),
        SnapshotOutcome::AlreadyRan
    );
    assert_eq!(gateway.all_snapshots().len(), 1);
}

#[test]
fn marker_survives_process_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = memory_gateway();

    assert_eq!(
        scheduler_in(&dir).run_for_day(&gateway, "2026-08-06"),
        SnapshotOutcome::Created
    );
    // A fresh scheduler over the same state file models the next start.
    assert_eq!(
        scheduler_in(&dir).run_for_day(&gateway, "2026-08-06"),
        SnapshotOutcome::AlreadyRan
    );
    assert_eq!(
        scheduler_in(&dir).run_for_day(&gateway, "2026-08-07"),
        SnapshotOutcome::Created
    );
    assert_eq!(gateway.all_snapshots().len(), 2);
}

#[test]
fn retention_keeps_only_the_newest_thirty_by_ts() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = memory_gateway();

    for i in 1..=35i64 {
        let mut snapshot = BackupSnapshot::capture(format!("2026-07-{:02}", i % 28 + 1), vec![]);
        snapshot.id = format!("seed-{i:02}");
        snapshot.ts = i;
        gateway.put_snapshot(&snapshot).unwrap();
    }

    let scheduler = scheduler_in(&dir);
    assert_eq!(
        scheduler.run_for_day(&gateway, "2026-08-06"),
        SnapshotOutcome::Created
    );

    let snapshots = gateway.all_snapshots();
    assert_eq!(snapshots.len(), SNAPSHOT_RETENTION_LIMIT);

    // The fresh capture plus seeds 7..=35 survive; 1..=6 are pruned.
    for i in 1..=6 {
        assert!(!snapshots.iter().any(|s| s.id == format!("seed-{i:02}")));
    }
    for i in 7..=35 {
        assert!(snapshots.iter().any(|s| s.id == format!("seed-{i:02}")));
    }
    assert!(snapshots.iter().any(|s| s.date == "2026-08-06"));
}

#[test]
fn failed_capture_defers_and_leaves_marker_untouched() {
    let dir = tempfile::tempdir().unwrap();
    // No primary store: snapshot persistence has no backend.
    let gateway = RecordGateway::new(None, Box::new(MemoryCollection::<DayEntry>::new()));
    let scheduler = scheduler_in(&dir);

    assert_eq!(
        scheduler.run_for_day(&gateway, "2026-08-06"),
        SnapshotOutcome::Deferred
    );
    // Marker untouched, so the same day is retried rather than skipped.
    assert_eq!(
        scheduler.run_for_day(&gateway, "2026-08-06"),
        SnapshotOutcome::Deferred
    );
}

#[test]
fn custom_retention_bound_is_honored() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = memory_gateway();

    for i in 1..=5i64 {
        let mut snapshot = BackupSnapshot::capture("2026-08-01", vec![]);
        snapshot.id = format!("seed-{i}");
        snapshot.ts = i;
        gateway.put_snapshot(&snapshot).unwrap();
    }

    let scheduler = RetentionScheduler::with_retention(
        JsonFileSchedulerState::new(dir.path().join("scheduler_state.json")),
        3,
    );
    assert_eq!(
        scheduler.run_for_day(&gateway, "2026-08-06"),
        SnapshotOutcome::Created
    );

    let snapshots = gateway.all_snapshots();
    assert_eq!(snapshots.len(), 3);
    assert!(snapshots.iter().any(|s| s.date == "2026-08-06"));
    assert!(snapshots.iter().any(|s| s.id == "seed-5"));
    assert!(snapshots.iter().any(|s| s.id == "seed-4"));
}
