use super::*;
use crate::cli::output::OutputFormat;
use crate::cli::{BacklinksArgs, CheckArgs, EditArgs, ListArgs, NewArgs, RmArgs, ShowArgs, TagsArgs};
use crate::domain::NoteId;
use crate::service::NoteService;
use crate::store::MemoryStore;
use anyhow::Result;
use std::cell::RefCell;
use std::path::Path;

// Test helpers
fn service() -> NoteService<MemoryStore> {
    NoteService::open(MemoryStore::new()).unwrap()
}

fn id(s: &str) -> NoteId {
    s.parse().unwrap()
}

fn new_args(title: &str, body: &str, tags: &[&str]) -> NewArgs {
    NewArgs {
        title: title.to_string(),
        body: body.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        id: None,
        format: None,
    }
}

fn edit_args(note: &str) -> EditArgs {
    EditArgs {
        note: note.to_string(),
        title: None,
        body: None,
        tags: Vec::new(),
        clear_tags: false,
    }
}

/// Editor double that replaces the file contents and records the path.
struct FakeEditor {
    new_contents: Option<String>,
    opened: RefCell<Vec<String>>,
}

impl FakeEditor {
    fn writing(contents: &str) -> Self {
        Self {
            new_contents: Some(contents.to_string()),
            opened: RefCell::new(Vec::new()),
        }
    }

    fn untouched() -> Self {
        Self {
            new_contents: None,
            opened: RefCell::new(Vec::new()),
        }
    }
}

impl EditorLauncher for FakeEditor {
    fn open(&self, path: &Path) -> Result<()> {
        self.opened
            .borrow_mut()
            .push(std::fs::read_to_string(path)?);
        if let Some(contents) = &self.new_contents {
            std::fs::write(path, contents)?;
        }
        Ok(())
    }
}

// ===========================================
// truncate_str tests
// ===========================================

#[test]
fn truncate_str_short_string_unchanged() {
    assert_eq!(truncate_str("hello", 10), "hello");
}

#[test]
fn truncate_str_adds_ellipsis() {
    assert_eq!(truncate_str("hello world", 6), "hello…");
}

#[test]
fn truncate_str_counts_chars_not_bytes() {
    assert_eq!(truncate_str("héllo", 5), "héllo");
}

#[test]
fn store_db_path_is_hidden_dir() {
    assert!(store_db_path(Path::new("/notes")).ends_with(".quill/notes.db"));
}

// ===========================================
// resolve_note tests
// ===========================================

#[test]
fn resolve_exact_id() {
    let service = service();
    service
        .create_note_with_id(id("abc"), "Title", "", &["#x"])
        .unwrap();

    match resolve_note(&service, "abc") {
        ResolveResult::Unique(note) => assert_eq!(note.id(), &id("abc")),
        other => panic!("expected unique, got {:?}", other),
    }
}

#[test]
fn resolve_unique_prefix() {
    let service = service();
    let created = service.create_note("Title", "", &[] as &[&str]).unwrap();

    match resolve_note(&service, &created.as_str()[..8]) {
        ResolveResult::Unique(note) => assert_eq!(note.id(), &created),
        other => panic!("expected unique, got {:?}", other),
    }
}

#[test]
fn resolve_short_input_is_not_a_prefix() {
    let service = service();
    service
        .create_note_with_id(id("abcdef"), "Title", "", &[] as &[&str])
        .unwrap();
    assert!(matches!(resolve_note(&service, "abc"), ResolveResult::NotFound));
}

#[test]
fn resolve_title_case_insensitive() {
    let service = service();
    service.create_note("Meeting Notes", "", &[] as &[&str]).unwrap();
    assert!(matches!(
        resolve_note(&service, "meeting notes"),
        ResolveResult::Unique(_)
    ));
}

#[test]
fn resolve_duplicate_titles_is_ambiguous() {
    let service = service();
    service.create_note("Same", "", &[] as &[&str]).unwrap();
    service.create_note("Same", "", &[] as &[&str]).unwrap();

    match resolve_note(&service, "Same") {
        ResolveResult::Ambiguous(notes) => assert_eq!(notes.len(), 2),
        other => panic!("expected ambiguous, got {:?}", other),
    }
}

#[test]
fn resolve_missing_is_not_found() {
    let service = service();
    assert!(matches!(
        resolve_note(&service, "nothing here"),
        ResolveResult::NotFound
    ));
}

// ===========================================
// new tests
// ===========================================

#[test]
fn new_creates_note_with_tags() {
    let service = service();
    handle_new(
        &new_args("Idea", "see [[later]]", &["#Draft"]),
        &service,
        OutputFormat::Human,
    )
    .unwrap();

    let notes = service.list_notes();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].tags()[0].as_str(), "#draft");
    assert_eq!(service.backlinks_for(&id("later")), vec![notes[0].id().clone()]);
}

#[test]
fn new_with_explicit_id() {
    let service = service();
    let mut args = new_args("Later", "", &[]);
    args.id = Some("later".to_string());
    handle_new(&args, &service, OutputFormat::Json).unwrap();

    assert_eq!(service.get_note(&id("later")).unwrap().title(), "Later");
}

#[test]
fn new_rejects_invalid_explicit_id() {
    let service = service();
    let mut args = new_args("Bad", "", &[]);
    args.id = Some("not valid".to_string());
    assert!(handle_new(&args, &service, OutputFormat::Human).is_err());
    assert!(service.list_notes().is_empty());
}

#[test]
fn new_rejects_invalid_tag() {
    let service = service();
    let err = handle_new(
        &new_args("Title", "", &["has space"]),
        &service,
        OutputFormat::Human,
    )
    .unwrap_err();
    assert!(err.to_string().contains("validation failed"));
}

// ===========================================
// show / ls / search / tags tests
// ===========================================

#[test]
fn show_missing_note_fails() {
    let service = service();
    let args = ShowArgs {
        note: "ghost".to_string(),
        format: None,
    };
    let err = handle_show(&args, &service, OutputFormat::Human).unwrap_err();
    assert!(err.to_string().contains("note not found"));
}

#[test]
fn show_existing_note_succeeds() {
    let service = service();
    service.create_note("Shown", "body [[x]]", &["#a"]).unwrap();
    let args = ShowArgs {
        note: "Shown".to_string(),
        format: None,
    };
    handle_show(&args, &service, OutputFormat::Json).unwrap();
}

#[test]
fn list_with_invalid_tag_fails() {
    let service = service();
    let args = ListArgs {
        tags: vec!["bad tag".to_string()],
        format: None,
    };
    assert!(handle_list(&args, &service, OutputFormat::Human).is_err());
}

#[test]
fn search_rejects_blank_query() {
    let service = service();
    let args = crate::cli::SearchArgs {
        query: "   ".to_string(),
        tags: Vec::new(),
        format: None,
    };
    assert!(handle_search(&args, &service, OutputFormat::Human).is_err());
}

#[test]
fn tags_on_empty_store_succeeds() {
    let service = service();
    let args = TagsArgs {
        counts: true,
        format: None,
    };
    handle_tags(&args, &service, OutputFormat::Human).unwrap();
}

// ===========================================
// edit tests
// ===========================================

#[test]
fn edit_with_flags_updates_fields() {
    let service = service();
    let created = service.create_note("Old", "body", &["#a"]).unwrap();

    let mut args = edit_args(created.as_str());
    args.title = Some("New".to_string());
    args.tags = vec!["#b".to_string()];
    handle_edit_impl(&args, &service, &FakeEditor::untouched()).unwrap();

    let note = service.get_note(&created).unwrap();
    assert_eq!(note.title(), "New");
    assert_eq!(note.body(), "body");
    assert_eq!(note.tags()[0].as_str(), "#b");
    assert!(service.notes_for_tag("#a").unwrap().is_empty());
}

#[test]
fn edit_clear_tags() {
    let service = service();
    let created = service.create_note("Tagged", "", &["#a", "#b"]).unwrap();

    let mut args = edit_args(created.as_str());
    args.clear_tags = true;
    handle_edit_impl(&args, &service, &FakeEditor::untouched()).unwrap();

    assert!(service.get_note(&created).unwrap().tags().is_empty());
    assert!(service.all_tags().is_empty());
}

#[test]
fn edit_without_flags_uses_editor_for_body() {
    let service = service();
    let created = service.create_note("Draft", "original", &[] as &[&str]).unwrap();

    let editor = FakeEditor::writing("rewritten [[other]]");
    handle_edit_impl(&edit_args(created.as_str()), &service, &editor).unwrap();

    assert_eq!(editor.opened.borrow().as_slice(), ["original".to_string()]);
    assert_eq!(service.get_note(&created).unwrap().body(), "rewritten [[other]]");
    assert_eq!(service.backlinks_for(&id("other")), vec![created]);
}

#[test]
fn edit_without_changes_keeps_modified() {
    let service = service();
    let created = service.create_note("Draft", "same", &[] as &[&str]).unwrap();
    let before = service.get_note(&created).unwrap().modified();

    handle_edit_impl(&edit_args(created.as_str()), &service, &FakeEditor::untouched()).unwrap();

    assert_eq!(service.get_note(&created).unwrap().modified(), before);
}

#[test]
fn edit_rejects_empty_title() {
    let service = service();
    let created = service.create_note("Keep", "", &[] as &[&str]).unwrap();

    let mut args = edit_args(created.as_str());
    args.title = Some(" ".to_string());
    assert!(handle_edit_impl(&args, &service, &FakeEditor::untouched()).is_err());
    assert_eq!(service.get_note(&created).unwrap().title(), "Keep");
}

// ===========================================
// rm / backlinks / check tests
// ===========================================

#[test]
fn rm_deletes_note_and_keeps_backlink() {
    let service = service();
    service
        .create_note_with_id(id("target"), "Target", "", &[] as &[&str])
        .unwrap();
    let source = service.create_note("Source", "[[target]]", &[] as &[&str]).unwrap();

    handle_rm(
        &RmArgs {
            note: "target".to_string(),
        },
        &service,
    )
    .unwrap();

    assert!(service.get_note(&id("target")).is_err());
    assert_eq!(service.backlinks_for(&id("target")), vec![source]);
}

#[test]
fn backlinks_for_uncreated_target() {
    let service = service();
    service.create_note("Source", "[[future]]", &[] as &[&str]).unwrap();

    let args = BacklinksArgs {
        note: "future".to_string(),
        format: None,
    };
    handle_backlinks(&args, &service, OutputFormat::Json).unwrap();
}

#[test]
fn backlinks_rejects_invalid_identifier() {
    let service = service();
    let args = BacklinksArgs {
        note: "not an id".to_string(),
        format: None,
    };
    assert!(handle_backlinks(&args, &service, OutputFormat::Human).is_err());
}

#[test]
fn check_passes_on_fresh_service() {
    let service = service();
    service.create_note("A", "[[B]]", &["#x"]).unwrap();

    let args = CheckArgs {
        fix: false,
        format: None,
    };
    handle_check(&args, &service, OutputFormat::Human).unwrap();
}
