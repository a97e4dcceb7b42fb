use chrono::{Duration, TimeZone, Utc};
use notespro_core::{
    Difficulty, EntityId, EntityKind, ManualClock, MemoryStorage, NewNote, NotePatch,
    NotebookError, NotebookService, NotesStore, PersistentNotesStore, STORAGE_KEY,
};

type Service = NotebookService<PersistentNotesStore<MemoryStorage>>;

fn service() -> Service {
    NotebookService::new(PersistentNotesStore::open(MemoryStorage::new()))
}

fn tag_id(service: &Service, name: &str) -> EntityId {
    service
        .store()
        .tags()
        .iter()
        .find(|tag| tag.name == name)
        .map(|tag| tag.id.clone())
        .unwrap()
}

fn category_id(service: &Service, name: &str) -> EntityId {
    service
        .store()
        .categories()
        .iter()
        .find(|category| category.name == name)
        .map(|category| category.id.clone())
        .unwrap()
}

#[test]
fn create_note_trims_fields_and_defaults_blank_category() {
    let mut service = service();
    let mut fields = NewNote::new("  Traits  ", "\tShared behavior\n");
    fields.category = "   ".to_string();

    let id = service.create_note(fields).unwrap();

    let note = &service.store().notes()[0];
    assert_eq!(note.id, id);
    assert_eq!(note.title, "Traits");
    assert_eq!(note.content, "Shared behavior");
    assert_eq!(note.category, "Uncategorized");
}

#[test]
fn create_note_rejects_blank_title_or_content() {
    let mut service = service();

    assert_eq!(
        service.create_note(NewNote::new("  ", "body")).unwrap_err(),
        NotebookError::TitleRequired
    );
    assert_eq!(
        service.create_note(NewNote::new("title", "")).unwrap_err(),
        NotebookError::ContentRequired
    );
    assert!(service.store().notes().is_empty());
}

#[test]
fn edit_note_validates_supplied_fields_only() {
    let mut service = service();
    let id = service.create_note(NewNote::new("a", "b")).unwrap();

    let err = service
        .edit_note(
            &id,
            NotePatch {
                title: Some(" ".to_string()),
                ..NotePatch::default()
            },
        )
        .unwrap_err();
    assert_eq!(err, NotebookError::TitleRequired);

    service
        .edit_note(
            &id,
            NotePatch {
                content: Some(" new body ".to_string()),
                category: Some(" ".to_string()),
                ..NotePatch::default()
            },
        )
        .unwrap();
    let note = &service.store().notes()[0];
    assert_eq!(note.title, "a");
    assert_eq!(note.content, "new body");
    assert_eq!(note.category, "Uncategorized");
}

#[test]
fn empty_edit_leaves_note_and_timestamp_alone() {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap());
    let store = PersistentNotesStore::open_with(MemoryStorage::new(), clock.clone(), STORAGE_KEY);
    let mut service = NotebookService::new(store);
    let id = service.create_note(NewNote::new("a", "b")).unwrap();
    let before = service.store().notes()[0].clone();

    clock.advance(Duration::minutes(5));
    service.edit_note(&id, NotePatch::default()).unwrap();

    assert_eq!(service.store().notes()[0], before);
    assert!(service
        .edit_note(&EntityId::from("missing"), NotePatch::default())
        .is_err());
}

#[test]
fn note_commands_report_unknown_ids() {
    let mut service = service();
    let missing = EntityId::from("missing");

    assert!(matches!(
        service.toggle_reveal(&missing),
        Err(NotebookError::NotFound {
            kind: EntityKind::Note,
            ..
        })
    ));
    assert!(service.delete_note(&missing).is_err());
    assert!(service.set_difficulty(&missing, Difficulty::Medium).is_err());
}

#[test]
fn toggle_reveal_flips_flag_and_set_difficulty_applies() {
    let mut service = service();
    let id = service.create_note(NewNote::new("a", "b")).unwrap();

    assert!(service.toggle_reveal(&id).unwrap());
    assert!(!service.toggle_reveal(&id).unwrap());
    service.set_difficulty(&id, Difficulty::Difficult).unwrap();

    let note = &service.store().notes()[0];
    assert_eq!(note.is_revealed, Some(false));
    assert_eq!(note.difficulty, Difficulty::Difficult);

    service.delete_note(&id).unwrap();
    assert!(service.store().notes().is_empty());
}

#[test]
fn create_tag_rejects_case_insensitive_duplicates_and_uses_palette() {
    let mut service = service();

    assert_eq!(
        service.create_tag(" work ").unwrap_err(),
        NotebookError::DuplicateName {
            kind: EntityKind::Tag,
            name: "work".to_string(),
        }
    );
    assert_eq!(
        service.create_tag("").unwrap_err(),
        NotebookError::NameRequired(EntityKind::Tag)
    );

    let id = service.create_tag("Rust").unwrap();
    let tag = service.store().tags().iter().find(|t| t.id == id).unwrap();
    assert_eq!(tag.name, "Rust");
    assert!(!tag.is_default);
    // Fifth tag: palette index 4.
    assert_eq!(tag.color, "#EF4444");
}

#[test]
fn rename_tag_allows_own_name_but_not_another() {
    let mut service = service();
    let work = tag_id(&service, "Work");

    service.rename_tag(&work, "WORK").unwrap();
    assert!(matches!(
        service.rename_tag(&work, "ideas"),
        Err(NotebookError::DuplicateName { .. })
    ));
    assert_eq!(
        service
            .store()
            .tags()
            .iter()
            .find(|t| t.id == work)
            .unwrap()
            .name,
        "WORK"
    );
}

#[test]
fn toggle_default_tag_keeps_a_single_default() {
    let mut service = service();
    let ideas = tag_id(&service, "Ideas");

    assert!(service.toggle_default_tag(&ideas).unwrap());

    let defaults: Vec<&str> = service
        .store()
        .tags()
        .iter()
        .filter(|tag| tag.is_default)
        .map(|tag| tag.name.as_str())
        .collect();
    assert_eq!(defaults, vec!["Ideas"]);

    assert!(!service.toggle_default_tag(&ideas).unwrap());
    assert!(service.store().tags().iter().all(|tag| !tag.is_default));
}

#[test]
fn default_tag_cannot_be_deleted() {
    let mut service = service();
    let untagged = tag_id(&service, "Untagged");

    assert_eq!(
        service.delete_tag(&untagged).unwrap_err(),
        NotebookError::DefaultTagProtected(untagged.clone())
    );

    let personal = tag_id(&service, "Personal");
    service.delete_tag(&personal).unwrap();
    assert_eq!(service.store().tags().len(), 3);
}

#[test]
fn category_rules_apply_placeholder_and_protect_fallback() {
    let mut service = service();

    let id = service.create_category("Rust", "  ").unwrap();
    let created = service
        .store()
        .categories()
        .iter()
        .find(|c| c.id == id)
        .unwrap();
    assert_eq!(created.description, "No description provided");
    assert!(service.create_category("rust", "dup").is_err());

    service.edit_category(&id, "Rust Lang", "Systems").unwrap();
    let edited = service
        .store()
        .categories()
        .iter()
        .find(|c| c.id == id)
        .unwrap();
    assert_eq!(edited.name, "Rust Lang");
    assert_eq!(edited.description, "Systems");

    let fallback = category_id(&service, "Uncategorized");
    assert_eq!(
        service.delete_category(&fallback).unwrap_err(),
        NotebookError::FallbackCategoryProtected(fallback.clone())
    );

    service.delete_category(&id).unwrap();
    assert!(service.delete_category(&id).is_err());
}

#[test]
fn deleting_category_through_service_repoints_notes() {
    let mut service = service();
    let mut fields = NewNote::new("a", "b");
    fields.category = "Learning".to_string();
    service.create_note(fields).unwrap();

    service
        .delete_category(&category_id(&service, "Learning"))
        .unwrap();

    assert_eq!(service.store().notes()[0].category, "Uncategorized");
}
