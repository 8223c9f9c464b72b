use gymapp_core::db::open_db_in_memory;
use gymapp_core::model::{BackupSnapshot, DayEntry, DiaryEntry};
use gymapp_core::store::{
    JsonFileCollection, MemoryCollection, RecordCollection, StoreError, StoreResult, StoredRecord,
};
use gymapp_core::{PrimaryCollections, RecordGateway};
use std::rc::Rc;

/// Adapter that fails every operation, for exercising the swallow-and-
/// fallback policy.
struct BrokenCollection;

impl<T: StoredRecord> RecordCollection<T> for BrokenCollection {
    fn get(&self, _id: &str) -> StoreResult<Option<T>> {
        Err(StoreError::Unavailable)
    }

    fn put(&self, _record: &T) -> StoreResult<()> {
        Err(StoreError::Unavailable)
    }

    fn get_all(&self) -> StoreResult<Vec<T>> {
        Err(StoreError::Unavailable)
    }

    fn delete(&self, _id: &str) -> StoreResult<()> {
        Err(StoreError::Unavailable)
    }

    fn clear(&self) -> StoreResult<()> {
        Err(StoreError::Unavailable)
    }
}

fn memory_primary() -> PrimaryCollections {
    PrimaryCollections {
        day_entries: Box::new(MemoryCollection::<DayEntry>::new()),
        diary_entries: Box::new(MemoryCollection::<DiaryEntry>::new()),
        snapshots: Box::new(MemoryCollection::<BackupSnapshot>::new()),
    }
}

fn memory_gateway() -> RecordGateway {
    RecordGateway::new(Some(memory_primary()), Box::new(MemoryCollection::<DayEntry>::new()))
}

fn entry(exercise: &str) -> DayEntry {
    DayEntry::new("January|Week 1|Day 1", "January", "Week 1", "Day 1", exercise)
}

#[test]
fn write_then_read_returns_equal_record() {
    let gateway = memory_gateway();
    let mut squat = entry("Squat");
    squat.kg = "60kg".to_string();
    squat.note = "RIR 2".to_string();

    gateway.write_day_entry(&squat);

    assert_eq!(gateway.day_entry(&squat.id), Some(squat));
}

#[test]
fn write_and_read_survive_missing_primary() {
    let gateway = RecordGateway::new(None, Box::new(MemoryCollection::<DayEntry>::new()));
    assert!(!gateway.primary_available());

    let squat = entry("Squat");
    gateway.write_day_entry(&squat);

    assert_eq!(gateway.day_entry(&squat.id), Some(squat.clone()));
    assert_eq!(gateway.all_day_entries(), vec![squat]);
}

#[test]
fn write_and_read_survive_broken_primary() {
    let gateway = RecordGateway::new(
        Some(PrimaryCollections {
            day_entries: Box::new(BrokenCollection),
            diary_entries: Box::new(BrokenCollection),
            snapshots: Box::new(BrokenCollection),
        }),
        Box::new(MemoryCollection::<DayEntry>::new()),
    );

    let squat = entry("Squat");
    gateway.write_day_entry(&squat);

    assert_eq!(gateway.day_entry(&squat.id), Some(squat.clone()));
    assert_eq!(gateway.all_day_entries(), vec![squat]);
}

#[test]
fn rewriting_same_id_keeps_one_record_with_last_values() {
    let gateway = memory_gateway();

    let mut squat = entry("Squat");
    squat.kg = "60kg".to_string();
    gateway.write_day_entry(&squat);

    squat.kg = "62.5kg".to_string();
    squat.note = "new PR".to_string();
    squat.ts += 1;
    gateway.write_day_entry(&squat);

    let all = gateway.all_day_entries();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].kg, "62.5kg");
    assert_eq!(all[0].note, "new PR");
}

#[test]
fn read_falls_back_to_mirror_when_primary_misses() {
    let mirror = MemoryCollection::new();
    let lagging = entry("Deadlift");
    mirror.put(&lagging).unwrap();

    let gateway = RecordGateway::new(Some(memory_primary()), Box::new(mirror));

    assert_eq!(gateway.day_entry(&lagging.id), Some(lagging));
}

#[test]
fn read_all_unions_stores_and_primary_wins_on_collision() {
    let primary = memory_primary();
    let mirror = MemoryCollection::new();

    let mut primary_copy = entry("Squat");
    primary_copy.kg = "primary".to_string();
    primary.day_entries.put(&primary_copy).unwrap();

    let mut mirror_copy = entry("Squat");
    mirror_copy.kg = "mirror".to_string();
    // Even a newer mirror ts does not outrank the primary copy.
    mirror_copy.ts = primary_copy.ts + 1000;
    mirror.put(&mirror_copy).unwrap();

    let mirror_only = entry("Bench");
    mirror.put(&mirror_only).unwrap();

    let gateway = RecordGateway::new(Some(primary), Box::new(mirror));
    let mut all = gateway.all_day_entries();
    all.sort_by(|a, b| a.id.cmp(&b.id));

    assert_eq!(all.len(), 2);
    let squat = all.iter().find(|e| e.exercise == "Squat").unwrap();
    assert_eq!(squat.kg, "primary");
    assert!(all.iter().any(|e| e.id == mirror_only.id));
}

#[test]
fn clear_day_entries_empties_both_stores() {
    let gateway = memory_gateway();
    gateway.write_day_entry(&entry("Squat"));
    gateway.write_day_entry(&entry("Bench"));

    gateway.clear_day_entries();

    assert!(gateway.all_day_entries().is_empty());
}

#[test]
fn diary_entries_list_most_recent_first() {
    let gateway = memory_gateway();

    let mut first = DiaryEntry::new("2026-08-05", "Squat", "60kg x5", "");
    first.ts = 100;
    let mut second = DiaryEntry::new("2026-08-06", "Bench", "40kg x8", "");
    second.ts = 200;

    gateway.add_diary_entry(&first);
    gateway.add_diary_entry(&second);

    let listed = gateway.all_diary_entries();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);

    gateway.clear_diary();
    assert!(gateway.all_diary_entries().is_empty());
}

#[test]
fn sqlite_primary_and_json_mirror_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let conn = Rc::new(open_db_in_memory().unwrap());
    let mirror: JsonFileCollection<DayEntry> =
        JsonFileCollection::new(dir.path().join("day_entries.json"));

    let gateway = RecordGateway::new(
        Some(PrimaryCollections::sqlite(conn)),
        Box::new(mirror),
    );

    let mut row = entry("Row");
    row.kg = "30kg".to_string();
    gateway.write_day_entry(&row);

    assert_eq!(gateway.day_entry(&row.id), Some(row.clone()));

    // The mirror file alone must be able to serve the record back.
    let standalone: JsonFileCollection<DayEntry> =
        JsonFileCollection::new(dir.path().join("day_entries.json"));
    assert_eq!(standalone.get(&row.id).unwrap(), Some(row));
}
