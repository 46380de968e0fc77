use markin_core::section::{InsertPosition, InsertRequest, InsertStatus};
use markin_core::notefile::write_atomic;
use markin_core::{NoteFile, NoteFileError};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

const SECTION: &str = "## 💭 ✍️ ✨ Notes";

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn creates_missing_file_and_directories() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("vault/daily/2025-03-09.md");

    let note = NoteFile::new(&path);
    let result = note.insert(&InsertRequest::new(SECTION, "- first")).unwrap();

    assert_eq!(result.status, InsertStatus::CreatedDocument);
    assert_eq!(fs::read_to_string(&path).unwrap(), format!("{SECTION}\n- first\n"));
}

#[test]
fn second_insert_goes_under_heading() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("note.md");
    let note = NoteFile::new(&path);

    note.insert(&InsertRequest::new(SECTION, "- first")).unwrap();
    note.insert(&InsertRequest::new(SECTION, "- second")).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, format!("{SECTION}\n- second\n- first\n"));
}

#[test]
fn empty_line_creates_nothing() {
    let tmp = tempdir().unwrap();
    let dir = tmp.path().join("markdown");
    let note = NoteFile::new(dir.join("test.md"));

    let result = note
        .insert(&InsertRequest::new(SECTION, "").create_if_missing(true))
        .unwrap();

    assert_eq!(result.status, InsertStatus::Unchanged);
    assert!(!dir.exists(), "no directory should be created for an empty line");
}

#[test]
fn empty_existing_file_is_filled() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("test.md");
    write_file(&path, "");

    NoteFile::new(&path)
        .insert(&InsertRequest::new(SECTION, "- item"))
        .unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), format!("{SECTION}\n- item\n"));
}

#[test]
fn end_of_section_before_next_heading() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("test.md");
    write_file(&path, &format!("{SECTION}\n- Existing item\n## Next Section\n"));

    NoteFile::new(&path)
        .insert(&InsertRequest::new(SECTION, "- Test item").position(InsertPosition::BeforeEnd))
        .unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines, vec![SECTION, "- Existing item", "- Test item", "", "## Next Section"]);
}

#[test]
fn missing_section_leaves_file_untouched() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("test.md");
    let original = "## Other Section\r\n- Existing item\r\n\r\n\r\n";
    write_file(&path, original);

    let err = NoteFile::new(&path)
        .insert(&InsertRequest::new(SECTION, "- Test item"))
        .unwrap_err();

    match &err {
        NoteFileError::SectionNotFound { section, path: p } => {
            assert_eq!(section, SECTION);
            assert_eq!(p, &path);
        }
        other => panic!("expected SectionNotFound, got {other:?}"),
    }
    assert!(err.is_recoverable());
    assert_eq!(fs::read(&path).unwrap(), original.as_bytes());
}

#[test]
fn missing_section_is_created_when_allowed() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("test.md");
    write_file(&path, "## Other Section\n- Existing item\n\n");

    let result = NoteFile::new(&path)
        .insert(&InsertRequest::new(SECTION, "- Test item").create_if_missing(true))
        .unwrap();

    assert_eq!(result.status, InsertStatus::CreatedSection);
    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec!["## Other Section", "- Existing item", "", SECTION, "- Test item"]
    );
}

#[test]
fn unreadable_target_is_read_error() {
    let tmp = tempdir().unwrap();
    // A directory where the note should be
    let path = tmp.path().join("note.md");
    fs::create_dir_all(&path).unwrap();

    let err = NoteFile::new(&path)
        .insert(&InsertRequest::new(SECTION, "- x"))
        .unwrap_err();

    assert!(matches!(err, NoteFileError::Read { .. }), "got {err:?}");
    assert!(!err.is_recoverable());
}

#[test]
fn uncreatable_directory_is_create_dir_error() {
    let tmp = tempdir().unwrap();
    let blocker = tmp.path().join("blocker");
    write_file(&blocker, "not a directory");

    let err = write_atomic(&blocker.join("daily/note.md"), "## X\n").unwrap_err();

    assert!(matches!(err, NoteFileError::CreateDir { .. }), "got {err:?}");
    assert_eq!(fs::read_to_string(&blocker).unwrap(), "not a directory");
}
