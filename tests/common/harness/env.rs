//! Isolated test environment with temp directory.

use super::{QuillCommand, TestNote};
use quill::service::NoteService;
use quill::store::{NoteStore, SqliteStore};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary notes directory.
///
/// Creates a temp directory that is automatically cleaned up on drop.
/// Notes can be seeded straight into the database before running commands.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    /// Path to the notes directory
    notes_dir: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let notes_dir = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            notes_dir,
        }
    }

    /// Returns the path to the notes directory.
    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    /// Returns the path of the notes database.
    pub fn db_path(&self) -> PathBuf {
        self.notes_dir.join(".quill").join("notes.db")
    }

    /// Writes a note straight into the database, bypassing the CLI.
    pub fn add_note(&self, test_note: &TestNote) {
        let mut store = SqliteStore::open(&self.db_path()).expect("Failed to open store");
        store
            .put(&test_note.to_note())
            .expect("Failed to write test note");
    }

    /// Opens a note service over this environment's database.
    pub fn service(&self) -> NoteService<SqliteStore> {
        let store = SqliteStore::open(&self.db_path()).expect("Failed to open store");
        NoteService::open(store).expect("Failed to open service")
    }

    /// Writes a config file into this environment's config home.
    pub fn write_config(&self, content: &str) {
        let dir = self.notes_dir.join(".config").join("quill");
        std::fs::create_dir_all(&dir).expect("Failed to create config dir");
        std::fs::write(dir.join("config.toml"), content).expect("Failed to write config");
    }

    /// Creates a QuillCommand configured for this test environment.
    pub fn cmd(&self) -> QuillCommand {
        QuillCommand::new()
            .config_home(&self.notes_dir.join(".config"))
            .dir(&self.notes_dir)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_creates_temp_directory() {
        let env = TestEnv::new();
        assert!(env.notes_dir().is_dir());
    }

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.notes_dir().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_db_path() {
        let env = TestEnv::new();
        let db_path = env.db_path();
        assert!(db_path.ends_with(".quill/notes.db"));
        assert!(db_path.starts_with(env.notes_dir()));
    }

    #[test]
    fn test_env_add_note_is_visible_to_service() {
        let env = TestEnv::new();
        let note = TestNote::new("Seeded").id("seeded").tag("x");
        env.add_note(&note);

        let service = env.service();
        assert_eq!(service.get_note(note.note_id()).unwrap().title(), "Seeded");
        assert_eq!(service.notes_for_tag("#x").unwrap().len(), 1);
    }
}
