use mononote_core::{
    add_tag, remove_tag, write_export, ExportFormat, MemoryBackend, NoteDraft, NoteId,
    NoteService, NoteServiceError, NoteStore, SaveOutcome,
};

fn service() -> NoteService<MemoryBackend> {
    NoteService::new(NoteStore::new(MemoryBackend::new()))
}

#[test]
fn save_without_selection_creates_trimmed_note() {
    let mut service = service();
    let outcome = service
        .save(
            None,
            NoteDraft::new("  Weekly plan  ")
                .with_content("\n- ship it\n\n")
                .with_tags(["work"]),
        )
        .unwrap();

    let SaveOutcome::Created(note) = outcome else {
        panic!("expected a created note");
    };
    assert_eq!(note.title, "Weekly plan");
    assert_eq!(note.content, "- ship it");
    assert_eq!(note.tags, vec!["work".to_string()]);
}

#[test]
fn save_with_selection_updates_in_place() {
    let mut service = service();
    let created = service
        .save(None, NoteDraft::new("first"))
        .unwrap()
        .into_note();

    let outcome = service
        .save(Some(&created.id), NoteDraft::new("second"))
        .unwrap();
    assert!(matches!(outcome, SaveOutcome::Updated(_)));
    assert_eq!(outcome.note().id, created.id);
    assert_eq!(outcome.note().created_at, created.created_at);
    assert_eq!(service.filter(None).unwrap().len(), 1);
}

#[test]
fn save_rejects_blank_title() {
    let mut service = service();
    let err = service.save(None, NoteDraft::new("   ")).unwrap_err();
    assert!(matches!(err, NoteServiceError::EmptyTitle));
    assert!(service.filter(None).unwrap().is_empty());
}

#[test]
fn save_with_stale_selection_reports_not_found() {
    let mut service = service();
    let ghost = NoteId::from("deleted-elsewhere");
    let err = service
        .save(Some(&ghost), NoteDraft::new("title"))
        .unwrap_err();
    assert!(matches!(err, NoteServiceError::NoteNotFound(id) if id == ghost));
    assert!(service.filter(None).unwrap().is_empty());
}

#[test]
fn filter_and_search_respect_tag_selection() {
    let mut service = service();
    let work = service
        .save(
            None,
            NoteDraft::new("standup").with_content("notes").with_tags(["work"]),
        )
        .unwrap()
        .into_note();
    service
        .save(
            None,
            NoteDraft::new("journal").with_content("notes").with_tags(["home"]),
        )
        .unwrap();

    assert_eq!(service.filter(None).unwrap().len(), 2);
    let filtered = service.filter(Some("work")).unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, work.id);

    assert_eq!(service.search("NOTES", None).unwrap().len(), 2);
    let narrowed = service.search("notes", Some("work")).unwrap();
    assert_eq!(narrowed.len(), 1);
    assert_eq!(narrowed[0].id, work.id);

    assert_eq!(
        service.all_tags().unwrap(),
        vec!["home".to_string(), "work".to_string()]
    );
}

#[test]
fn editor_tag_helpers_feed_save() {
    let mut tags = add_tag(&[], " rust ");
    tags = add_tag(&tags, "rust");
    tags = add_tag(&tags, "cli");
    tags = remove_tag(&tags, "rust");

    let mut service = service();
    let note = service
        .save(None, NoteDraft::new("tags").with_tags(tags))
        .unwrap()
        .into_note();
    assert_eq!(note.tags, vec!["cli".to_string()]);
}

#[test]
fn export_text_contains_content_verbatim_and_joined_tags() {
    let mut service = service();
    let note = service
        .save(
            None,
            NoteDraft::new("Trip: Lisbon")
                .with_content("Pack *light*\nBook tram 28")
                .with_tags(["travel", "2026"]),
        )
        .unwrap()
        .into_note();

    let text = service.export(&note.id, ExportFormat::Text).unwrap();
    assert_eq!(text.file_name, "Trip__Lisbon.txt");
    assert_eq!(
        text.body,
        "Trip: Lisbon\n\nPack *light*\nBook tram 28\n\nTags: travel, 2026"
    );

    let markdown = service.export(&note.id, ExportFormat::Markdown).unwrap();
    assert_eq!(markdown.file_name, "Trip__Lisbon.md");
    assert_eq!(
        markdown.body,
        "# Trip: Lisbon\n\nPack *light*\nBook tram 28\n\n**Tags:** travel, 2026"
    );
}

#[test]
fn export_of_untagged_note_keeps_empty_tag_line() {
    let mut service = service();
    let note = service
        .save(None, NoteDraft::new("bare"))
        .unwrap()
        .into_note();
    let text = service.export(&note.id, ExportFormat::Text).unwrap();
    assert_eq!(text.body, "bare\n\n\n\nTags: ");
}

#[test]
fn export_unknown_note_is_not_found() {
    let service = service();
    let err = service
        .export(&NoteId::from("nope"), ExportFormat::Text)
        .unwrap_err();
    assert!(matches!(err, NoteServiceError::NoteNotFound(_)));
}

#[test]
fn write_export_places_file_in_target_directory() {
    let mut service = service();
    let note = service
        .save(None, NoteDraft::new("hello world").with_content("body"))
        .unwrap()
        .into_note();
    let document = service.export(&note.id, ExportFormat::Markdown).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = write_export(dir.path().join("out"), &document).unwrap();
    assert_eq!(path, dir.path().join("out").join("hello_world.md"));
    assert_eq!(std::fs::read_to_string(path).unwrap(), document.body);
}
