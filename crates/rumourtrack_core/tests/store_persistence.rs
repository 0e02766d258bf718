use chrono::NaiveDate;
use rumourtrack_core::{
    RepoError, Report, ReportRepository, ReportType, Rumour, RumourRepository, RumourStatus,
    StoreError, RUMOUR_ID_FLOOR,
};
use std::fs;
use tempfile::TempDir;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn absent_file_loads_as_empty_collection() {
    let dir = TempDir::new().unwrap();

    let repo = RumourRepository::load(dir.path().join("rumours.json")).unwrap();
    assert!(repo.is_empty());
    assert!(repo.get_all().is_empty());
}

#[test]
fn malformed_file_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rumours.json");
    fs::write(&path, "not json at all").unwrap();

    let err = RumourRepository::load(&path).unwrap_err();
    assert!(matches!(err, StoreError::Malformed { .. }));
}

#[test]
fn non_array_file_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rumours.json");
    fs::write(&path, r#"{ "rumourId": "10000001" }"#).unwrap();

    let err = RumourRepository::load(&path).unwrap_err();
    assert!(matches!(err, StoreError::Malformed { .. }));
}

#[test]
fn collection_roundtrips_through_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rumours.json");

    let mut repo = RumourRepository::load(&path).unwrap();
    let first = repo
        .add_rumour("Bridge closed all week", "market gossip", date(2026, 8, 1), 3)
        .unwrap();
    let second = repo
        .add_rumour("Flood coming on Friday", "radio phone-in", date(2026, 8, 2), 8)
        .unwrap();
    repo.update_status(&second.rumour_id, RumourStatus::Panic)
        .unwrap();

    let reloaded = RumourRepository::load(&path).unwrap();
    let all = reloaded.get_all();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0], first);
    assert_eq!(all[1].rumour_id, second.rumour_id);
    assert!(all[1].is_panic());
}

#[test]
fn generated_rumour_ids_start_above_the_floor() {
    let dir = TempDir::new().unwrap();
    let mut repo = RumourRepository::load(dir.path().join("rumours.json")).unwrap();

    assert_eq!(
        repo.next_rumour_id().unwrap(),
        (RUMOUR_ID_FLOOR + 1).to_string()
    );

    let first = repo.add_rumour("a", "b", date(2026, 8, 1), 1).unwrap();
    let second = repo.add_rumour("c", "d", date(2026, 8, 1), 2).unwrap();
    assert_eq!(first.rumour_id, "10000001");
    assert_eq!(second.rumour_id, "10000002");
}

#[test]
fn rumour_id_scan_skips_low_and_non_numeric_ids() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rumours.json");
    let seed = vec![
        Rumour::new("42", "low seed id", "seed", date(2026, 1, 1), 1),
        Rumour::new("legacy-7", "non-numeric id", "seed", date(2026, 1, 1), 1),
        Rumour::new("10000005", "assigned id", "seed", date(2026, 1, 1), 1),
    ];
    fs::write(&path, serde_json::to_string_pretty(&seed).unwrap()).unwrap();

    let repo = RumourRepository::load(&path).unwrap();
    assert_eq!(repo.next_rumour_id().unwrap(), "10000006");
}

#[test]
fn rumour_id_allocation_stops_at_the_numeric_ceiling() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rumours.json");
    let seed = vec![Rumour::new(
        u64::MAX.to_string(),
        "largest storable id",
        "seed",
        date(2026, 1, 1),
        1,
    )];
    fs::write(&path, serde_json::to_string_pretty(&seed).unwrap()).unwrap();

    let mut repo = RumourRepository::load(&path).unwrap();
    let err = repo.next_rumour_id().unwrap_err();
    assert!(matches!(err, RepoError::Store(StoreError::IdsExhausted { .. })));

    let err = repo.add_rumour("a", "b", date(2026, 1, 2), 1).unwrap_err();
    assert!(matches!(err, RepoError::Store(StoreError::IdsExhausted { .. })));
    assert_eq!(repo.len(), 1);
}

#[test]
fn report_ids_are_sequential_and_zero_padded() {
    let dir = TempDir::new().unwrap();
    let mut repo = ReportRepository::load(dir.path().join("reports.json")).unwrap();

    let first = repo
        .add_report(
            "U0001",
            "10000001",
            ReportType::Misinformation,
            "",
            date(2026, 8, 2),
        )
        .unwrap();
    let second = repo
        .add_report(
            "U0002",
            "10000001",
            ReportType::Incitement,
            "",
            date(2026, 8, 2),
        )
        .unwrap();

    assert_eq!(first.report_id, "R0001");
    assert_eq!(second.report_id, "R0002");
}

#[test]
fn report_id_sequence_resumes_from_largest_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reports.json");
    let seed = vec![Report::new(
        "R0009",
        "U0001",
        "10000001",
        date(2026, 8, 1),
        ReportType::Distortion,
        "seed",
    )];
    fs::write(&path, serde_json::to_string_pretty(&seed).unwrap()).unwrap();

    let mut repo = ReportRepository::load(&path).unwrap();
    let next = repo
        .add_report(
            "U0002",
            "10000001",
            ReportType::Incitement,
            "",
            date(2026, 8, 2),
        )
        .unwrap();
    assert_eq!(next.report_id, "R0010");
}

#[test]
fn report_id_padding_grows_past_four_digits() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reports.json");
    let seed = vec![Report::new(
        "R9999",
        "U0001",
        "10000001",
        date(2026, 8, 1),
        ReportType::Distortion,
        "seed",
    )];
    fs::write(&path, serde_json::to_string_pretty(&seed).unwrap()).unwrap();

    let mut repo = ReportRepository::load(&path).unwrap();
    let next = repo
        .add_report(
            "U0002",
            "10000001",
            ReportType::Incitement,
            "",
            date(2026, 8, 2),
        )
        .unwrap();
    assert_eq!(next.report_id, "R10000");
}

#[test]
fn report_id_allocation_stops_at_the_numeric_ceiling() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reports.json");
    let seed = vec![Report::new(
        format!("R{}", u64::MAX),
        "U0001",
        "10000001",
        date(2026, 8, 1),
        ReportType::Distortion,
        "seed",
    )];
    fs::write(&path, serde_json::to_string_pretty(&seed).unwrap()).unwrap();

    let mut repo = ReportRepository::load(&path).unwrap();
    let err = repo
        .add_report(
            "U0002",
            "10000001",
            ReportType::Incitement,
            "",
            date(2026, 8, 2),
        )
        .unwrap_err();
    assert!(matches!(err, RepoError::Store(StoreError::IdsExhausted { .. })));
    assert_eq!(repo.len(), 1);
}

#[test]
fn duplicate_ids_resolve_to_first_occurrence() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rumours.json");
    let seed = vec![
        Rumour::new("10000001", "first copy", "seed", date(2026, 1, 1), 1),
        Rumour::new("10000001", "second copy", "seed", date(2026, 1, 1), 1),
    ];
    fs::write(&path, serde_json::to_string_pretty(&seed).unwrap()).unwrap();

    let repo = RumourRepository::load(&path).unwrap();
    assert_eq!(repo.get_by_id("10000001").unwrap().title, "first copy");
}

#[test]
fn failed_write_rolls_back_the_append() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reports.json");
    let mut repo = ReportRepository::load(&path).unwrap();
    // A directory squatting on the target path makes the rename fail.
    fs::create_dir(&path).unwrap();

    let err = repo
        .add_report(
            "U0001",
            "10000001",
            ReportType::Misinformation,
            "",
            date(2026, 8, 2),
        )
        .unwrap_err();

    assert!(matches!(err, RepoError::Store(StoreError::Io { .. })));
    assert!(repo.is_empty());
}

#[test]
fn failed_write_rolls_back_the_update() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rumours.json");
    let mut repo = RumourRepository::load(&path).unwrap();
    let rumour = repo
        .add_rumour("title", "source", date(2026, 8, 1), 1)
        .unwrap();

    fs::remove_file(&path).unwrap();
    fs::create_dir(&path).unwrap();

    let err = repo
        .update_status(&rumour.rumour_id, RumourStatus::Panic)
        .unwrap_err();

    assert!(matches!(err, RepoError::Store(StoreError::Io { .. })));
    assert!(!repo.get_by_id(&rumour.rumour_id).unwrap().is_panic());
}

#[test]
fn status_write_for_unknown_id_is_not_found() {
    let dir = TempDir::new().unwrap();
    let mut repo = RumourRepository::load(dir.path().join("rumours.json")).unwrap();

    let err = repo
        .update_status("99999999", RumourStatus::Panic)
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound { .. }));
}

#[test]
fn persisted_files_leave_no_temp_sibling() {
    let dir = TempDir::new().unwrap();
    let mut repo = RumourRepository::load(dir.path().join("rumours.json")).unwrap();
    repo.add_rumour("title", "source", date(2026, 8, 1), 1)
        .unwrap();

    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["rumours.json"]);
}

#[test]
fn counts_and_duplicate_probe_track_reports() {
    let dir = TempDir::new().unwrap();
    let mut repo = ReportRepository::load(dir.path().join("reports.json")).unwrap();
    repo.add_report("U0001", "10000001", ReportType::Misinformation, "", date(2026, 8, 2))
        .unwrap();
    repo.add_report("U0002", "10000001", ReportType::Incitement, "", date(2026, 8, 2))
        .unwrap();
    repo.add_report("U0001", "10000002", ReportType::Distortion, "", date(2026, 8, 3))
        .unwrap();

    let counts = repo.report_counts();
    assert_eq!(counts.get("10000001"), Some(&2));
    assert_eq!(counts.get("10000002"), Some(&1));
    assert_eq!(repo.count_for("10000001"), 2);
    assert_eq!(repo.count_for("10000009"), 0);

    assert!(repo.has_report("U0001", "10000001"));
    assert!(repo.has_report("U0001", "10000002"));
    assert!(!repo.has_report("U0002", "10000002"));
}
