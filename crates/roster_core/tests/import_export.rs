use roster_core::db::open_db_in_memory;
use roster_core::{
    export_all, export_json, import_from_path, import_from_str, Employee, EmployeeStorage,
    ExportError, Gender, ImportError, MemorySlotRepository, SqliteSlotRepository, StorageError,
    DEFAULT_STORAGE_KEY, EXPORT_FILE_NAME, INVALID_FORMAT_MESSAGE,
};
use std::collections::HashSet;

fn record(id: &str, name: &str) -> Employee {
    Employee::with_id(id, name, Gender::Other, 1_000.0)
}

#[test]
fn export_writes_pretty_json_file() {
    let repo = MemorySlotRepository::new();
    let storage = EmployeeStorage::new(&repo);
    assert!(storage.save(&[record("1", "Ada")]));
    let dir = tempfile::tempdir().unwrap();

    assert!(export_all(&storage, dir.path()));

    let written = std::fs::read_to_string(dir.path().join(EXPORT_FILE_NAME)).unwrap();
    assert_eq!(
        written,
        "[\n  {\n    \"id\": \"1\",\n    \"name\": \"Ada\",\n    \"gender\": \"Other\",\n    \"salary\": 1000\n  }\n]"
    );
}

#[test]
fn export_of_empty_store_is_empty_array() {
    let storage = EmployeeStorage::new(MemorySlotRepository::new());
    assert_eq!(export_json(&storage).unwrap(), "[]");
}

#[test]
fn export_fails_when_stored_data_is_corrupted() {
    let repo = MemorySlotRepository::new();
    repo.insert_raw(DEFAULT_STORAGE_KEY, "not json");
    let storage = EmployeeStorage::new(&repo);
    let dir = tempfile::tempdir().unwrap();

    assert!(matches!(
        export_json(&storage).unwrap_err(),
        ExportError::Load(StorageError::Corrupted(_))
    ));
    assert!(!export_all(&storage, dir.path()));
    assert!(!dir.path().join(EXPORT_FILE_NAME).exists());
}

#[test]
fn export_fails_when_target_directory_is_missing() {
    let storage = EmployeeStorage::new(MemorySlotRepository::new());
    let dir = tempfile::tempdir().unwrap();
    assert!(!export_all(&storage, &dir.path().join("missing")));
}

#[test]
fn import_of_export_restores_the_same_records() {
    let conn = open_db_in_memory().unwrap();
    let storage = EmployeeStorage::new(SqliteSlotRepository::try_new(&conn).unwrap());
    let original = vec![
        Employee::with_id("1", "Ada", Gender::Female, 120_000.0),
        Employee::with_id("2", "Alan", Gender::Male, 99_999.99),
    ];
    assert!(storage.save(&original));
    let document = export_json(&storage).unwrap();

    assert!(storage.save(&[]));
    let summary = import_from_str(&storage, &document, false).unwrap();

    assert_eq!(summary.count, 2);
    let restored: HashSet<_> = storage.load().into_iter().map(|e| e.id).collect();
    assert_eq!(restored, HashSet::from(["1".to_string(), "2".to_string()]));
    assert_eq!(storage.load(), original);
}

#[test]
fn non_array_document_is_rejected_with_format_message() {
    let storage = EmployeeStorage::new(MemorySlotRepository::new());
    assert!(storage.save(&[record("1", "Ada")]));

    let err = import_from_str(&storage, r#"{"a":1}"#, false).unwrap_err();

    assert!(matches!(err, ImportError::Format));
    assert_eq!(err.to_string(), INVALID_FORMAT_MESSAGE);
    assert_eq!(storage.load(), vec![record("1", "Ada")]);
}

#[test]
fn invalid_json_reports_parser_message() {
    let storage = EmployeeStorage::new(MemorySlotRepository::new());
    let err = import_from_str(&storage, "[{\"id\": ", false).unwrap_err();

    assert!(matches!(err, ImportError::Parse(_)));
    assert!(!err.to_string().is_empty());
}

#[test]
fn merge_appends_imported_after_existing() {
    let storage = EmployeeStorage::new(MemorySlotRepository::new());
    assert!(storage.save(&[record("1", "Existing")]));

    let summary = import_from_str(
        &storage,
        r#"[{"id":"2","name":"Imported","gender":"Other","salary":1000}]"#,
        true,
    )
    .unwrap();

    assert_eq!(summary.count, 1);
    assert!(summary.persisted);
    assert_eq!(
        storage.load(),
        vec![record("1", "Existing"), record("2", "Imported")]
    );
    assert_eq!(summary.employees, storage.load());
}

#[test]
fn merge_keeps_duplicate_ids() {
    let storage = EmployeeStorage::new(MemorySlotRepository::new());
    assert!(storage.save(&[record("1", "First")]));

    import_from_str(
        &storage,
        r#"[{"id":"1","name":"Second","gender":"Other","salary":1000}]"#,
        true,
    )
    .unwrap();

    let ids: Vec<_> = storage.load().into_iter().map(|e| e.id).collect();
    assert_eq!(ids, vec!["1", "1"]);
}

#[test]
fn replace_import_discards_existing_records() {
    let storage = EmployeeStorage::new(MemorySlotRepository::new());
    assert!(storage.save(&[record("1", "Old"), record("2", "Older")]));

    let summary = import_from_str(&storage, "[]", false).unwrap();

    assert_eq!(summary.count, 0);
    assert!(storage.load().is_empty());
}

#[test]
fn imported_values_are_not_revalidated() {
    let storage = EmployeeStorage::new(MemorySlotRepository::new());
    let summary = import_from_str(
        &storage,
        r#"[{"id":"x","name":"Q","gender":"Male","salary":-10}]"#,
        false,
    )
    .unwrap();

    assert_eq!(summary.employees[0].name, "Q");
    assert_eq!(summary.employees[0].salary, -10.0);
}

#[test]
fn gender_outside_form_choices_is_imported_as_is() {
    let storage = EmployeeStorage::new(MemorySlotRepository::new());
    let summary = import_from_str(
        &storage,
        r#"[{"id":"1","name":"Ann","gender":"female","salary":100},{"id":"2","name":"Bo","gender":"","salary":200}]"#,
        false,
    )
    .unwrap();

    assert_eq!(summary.count, 2);
    assert!(summary.persisted);
    let loaded = storage.load();
    assert_eq!(loaded[0].gender, Gender::Unrecognized("female".to_string()));
    assert_eq!(loaded[1].gender.as_str(), "");

    let document = export_json(&storage).unwrap();
    assert!(document.contains(r#""gender": "female""#));
    assert!(document.contains(r#""gender": """#));
}

#[test]
fn failed_persist_still_reports_imported_count() {
    let storage = EmployeeStorage::new(MemorySlotRepository::with_quota(16));
    let summary = import_from_str(
        &storage,
        r#"[{"id":"1","name":"Ada","gender":"Female","salary":5}]"#,
        false,
    )
    .unwrap();

    assert_eq!(summary.count, 1);
    assert!(!summary.persisted);
    assert!(storage.load().is_empty());
}

#[test]
fn import_from_path_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("incoming.json");
    std::fs::write(
        &path,
        r#"[{"id":"9","name":"Imported","gender":"Male","salary":42}]"#,
    )
    .unwrap();
    let storage = EmployeeStorage::new(MemorySlotRepository::new());

    let summary = import_from_path(&storage, &path, false).unwrap();

    assert_eq!(summary.count, 1);
    assert_eq!(storage.load()[0].id, "9");
}

#[test]
fn import_from_missing_path_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let storage = EmployeeStorage::new(MemorySlotRepository::new());

    let err = import_from_path(&storage, &dir.path().join("absent.json"), false).unwrap_err();
    assert!(matches!(err, ImportError::Read(_)));
}
