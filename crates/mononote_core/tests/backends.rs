use mononote_core::{
    JsonFileBackend, MemoryBackend, NoteBackend, NoteDraft, NoteStore, SqliteBackend,
    StorageError, STORAGE_KEY,
};

fn exercise_backend<B: NoteBackend>(backend: B) -> B {
    let mut store = NoteStore::new(backend);
    assert!(store.list().unwrap().is_empty());

    let kept = store
        .create(NoteDraft::new("kept").with_tags(["a"]))
        .unwrap();
    let dropped = store.create(NoteDraft::new("dropped")).unwrap();
    assert!(store.delete(&dropped.id).unwrap());

    let listed = store.list().unwrap();
    assert_eq!(listed, vec![kept]);
    store.into_backend()
}

#[test]
fn memory_backend_persists_serialized_collection() {
    let backend = exercise_backend(MemoryBackend::new());
    let payload = backend.payload().unwrap();
    let decoded: serde_json::Value = serde_json::from_str(payload).unwrap();
    assert_eq!(decoded.as_array().unwrap().len(), 1);
    assert_eq!(decoded[0]["title"], "kept");
}

#[test]
fn json_file_backend_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("nested").join("data");

    let backend = exercise_backend(JsonFileBackend::new(&data_dir));
    assert_eq!(
        backend.path(),
        data_dir.join(format!("{STORAGE_KEY}.json")).as_path()
    );
    assert!(backend.path().exists());

    let reopened = NoteStore::new(JsonFileBackend::new(&data_dir));
    let notes = reopened.list().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "kept");
}

#[test]
fn json_file_backend_treats_corrupt_file_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let backend = JsonFileBackend::new(dir.path());
    std::fs::write(backend.path(), "not json at all").unwrap();

    let store = NoteStore::new(backend);
    assert!(store.list().unwrap().is_empty());
    assert!(store.search("json").unwrap().is_empty());
}

#[test]
fn json_file_backend_reports_write_failures() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "file, not a directory").unwrap();

    let mut backend = JsonFileBackend::new(&blocker);
    let err = backend.save(&[]).unwrap_err();
    assert!(matches!(err, StorageError::Io { .. }));
}

#[test]
fn sqlite_backend_in_memory_roundtrip() {
    let backend = exercise_backend(SqliteBackend::in_memory().unwrap());
    let rows: i64 = backend
        .connection()
        .query_row("SELECT COUNT(*) FROM kv_store;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn sqlite_backend_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.sqlite3");

    drop(exercise_backend(SqliteBackend::open(&path).unwrap()));

    let reopened = NoteStore::new(SqliteBackend::open(&path).unwrap());
    let notes = reopened.list().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].tags, vec!["a".to_string()]);
}

#[test]
fn sqlite_backend_treats_corrupt_row_as_empty() {
    let mut backend = SqliteBackend::in_memory().unwrap();
    backend.write_raw("{\"oops\":").unwrap();

    let store = NoteStore::new(backend);
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn boxed_backends_work_through_the_store() {
    let backend: Box<dyn NoteBackend> = Box::new(MemoryBackend::new());
    let mut store = NoteStore::new(backend);
    let created = store.create(NoteDraft::new("boxed")).unwrap();
    assert_eq!(store.get(&created.id).unwrap(), Some(created));
    assert_eq!(store.backend().describe(), "memory");
}
