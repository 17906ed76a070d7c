use class_planner::persistence::{SCHEDULE_KEY, SESSION_KEY};
use class_planner::{
    ClassGroup, DayOfWeek, FileStorage, FixedCredentials, NewClassSession, PersistenceError,
    ScheduleState, ScheduleStore, Storage, load_state_from_json, save_state_to_json,
    save_timetable_to_csv,
};
use tempfile::{NamedTempFile, tempdir};

fn build_sample_state() -> ScheduleState {
    let mut state = ScheduleState::seeded_for(DayOfWeek::Terca);
    state.class_colors.set(ClassGroup::Class1B, "#101010");
    state
}

#[test]
fn file_storage_round_trips_records() {
    let dir = tempdir().unwrap();
    let storage = FileStorage::new(dir.path().join("records")).unwrap();

    assert_eq!(storage.get_item(SCHEDULE_KEY).unwrap(), None);
    storage.set_item(SCHEDULE_KEY, r#"{"a":1}"#).unwrap();
    storage.set_item(SCHEDULE_KEY, r#"{"a":2}"#).unwrap();
    assert_eq!(
        storage.get_item(SCHEDULE_KEY).unwrap().as_deref(),
        Some(r#"{"a":2}"#)
    );

    storage.remove_item(SCHEDULE_KEY).unwrap();
    storage.remove_item(SCHEDULE_KEY).unwrap();
    assert_eq!(storage.get_item(SCHEDULE_KEY).unwrap(), None);
}

#[test]
fn file_storage_rejects_path_like_keys() {
    let dir = tempdir().unwrap();
    let storage = FileStorage::new(dir.path()).unwrap();
    let err = storage.set_item("../escape", "{}").unwrap_err();
    assert!(matches!(err, PersistenceError::InvalidData(_)));
}

#[test]
fn store_survives_restart_on_file_storage() {
    let dir = tempdir().unwrap();
    let created_id = {
        let storage = FileStorage::new(dir.path()).unwrap();
        let mut store = ScheduleStore::open(storage, FixedCredentials::default());
        assert!(store.login("admin", "admin").unwrap());
        store
            .add_class(
                NewClassSession::new(ClassGroup::Class2A, DayOfWeek::Sexta, "07:30 - 08:20")
                    .with_teacher("Edgar"),
            )
            .unwrap()
            .id
    };

    let storage = FileStorage::new(dir.path()).unwrap();
    assert!(storage.get_item(SESSION_KEY).unwrap().is_some());
    let store = ScheduleStore::open(storage, FixedCredentials::default());
    assert!(store.is_admin());
    let restored = store.state().find_class(&created_id).expect("class restored");
    assert_eq!(restored.teacher, "Edgar");
    assert_eq!(restored.color.as_deref(), Some("#F8E3F8"));
}

#[cfg(feature = "sqlite")]
#[test]
fn sqlite_storage_round_trips_records() {
    use class_planner::SqliteStorage;

    let file = NamedTempFile::new().unwrap();
    {
        let storage = SqliteStorage::new(file.path()).unwrap();
        storage.set_item(SESSION_KEY, "first").unwrap();
        storage.set_item(SESSION_KEY, "second").unwrap();
        storage.set_item(SCHEDULE_KEY, "{}").unwrap();
        storage.remove_item(SCHEDULE_KEY).unwrap();
    }

    let storage = SqliteStorage::new(file.path()).unwrap();
    assert_eq!(
        storage.get_item(SESSION_KEY).unwrap().as_deref(),
        Some("second")
    );
    assert_eq!(storage.get_item(SCHEDULE_KEY).unwrap(), None);
}

#[cfg(feature = "sqlite")]
#[test]
fn store_survives_restart_on_sqlite_storage() {
    use class_planner::SqliteStorage;

    let file = NamedTempFile::new().unwrap();
    {
        let storage = SqliteStorage::new(file.path()).unwrap();
        let mut store = ScheduleStore::open(storage, FixedCredentials::default());
        store.login("admin", "admin").unwrap();
        store.remove_class("th1").unwrap();
        store.set_current_day(DayOfWeek::Quinta).unwrap();
    }

    let storage = SqliteStorage::new(file.path()).unwrap();
    let store = ScheduleStore::open(storage, FixedCredentials::default());
    assert_eq!(store.state().current_day, DayOfWeek::Quinta);
    assert!(store.state().find_class("th1").is_none());
    assert!(store.state().find_class("th2").is_some());
}

#[test]
fn json_export_round_trips_state() {
    let file = NamedTempFile::new().unwrap();
    let state = build_sample_state();
    save_state_to_json(&state, file.path()).unwrap();

    let loaded = load_state_from_json(file.path()).unwrap();
    assert_eq!(loaded, state);
    assert_eq!(loaded.class_colors.get(ClassGroup::Class1B), "#101010");
}

#[test]
fn json_import_rejects_duplicate_ids() {
    let file = NamedTempFile::new().unwrap();
    let mut state = build_sample_state();
    let duplicate = state.classes[3].clone();
    state.classes.push(duplicate);
    save_state_to_json(&state, file.path()).unwrap();

    let err = load_state_from_json(file.path()).unwrap_err();
    assert!(matches!(err, PersistenceError::InvalidData(_)));
}

#[test]
fn json_import_reports_malformed_files() {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), "{\"classes\": 3}").unwrap();
    let err = load_state_from_json(file.path()).unwrap_err();
    assert!(matches!(err, PersistenceError::Serialization(_)));
}

#[test]
fn csv_export_writes_one_row_per_class() {
    let file = NamedTempFile::new().unwrap();
    let state = build_sample_state();
    save_timetable_to_csv(&state, file.path()).unwrap();

    let mut reader = csv::Reader::from_path(file.path()).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        ["day", "class_group", "time_slot", "teacher", "subject", "room", "color"]
    );

    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), state.classes.len());
    assert_eq!(&rows[0][0], "segunda");
    assert_eq!(&rows[0][1], "1D");
    assert_eq!(&rows[0][2], "07:30 - 08:20");
    assert!(rows.iter().any(|row| &row[0] == "quinta"));
}
