//! Isolated test environment with temp directory.

use super::{DaybookCommand, TestNote};
use daybook::domain::Note;
use daybook::store::{FileBackend, NoteRepository, SlotStore};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with temporary data and config directories.
///
/// Creates a temp directory that is automatically cleaned up on drop.
/// Commands run from it never see the user's real config file.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    /// Path to the data directory
    data_dir: PathBuf,
    /// Path used as `XDG_CONFIG_HOME` and `HOME`
    config_home: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let data_dir = temp_dir.path().join("data");
        let config_home = temp_dir.path().join("home");
        std::fs::create_dir_all(&data_dir).expect("Failed to create data directory");
        std::fs::create_dir_all(&config_home).expect("Failed to create config directory");
        Self {
            _temp_dir: temp_dir,
            data_dir,
            config_home,
        }
    }

    /// Returns the path to the data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Returns the path of the JSON slot file the file backend writes.
    pub fn notes_file(&self) -> PathBuf {
        self.data_dir.join("notes.json")
    }

    fn store(&self) -> SlotStore<FileBackend> {
        let backend = FileBackend::open(&self.data_dir).expect("Failed to open data directory");
        SlotStore::new(backend)
    }

    /// Adds a test note to the store and returns the stored note.
    pub fn add_note(&self, test_note: &TestNote) -> Note {
        let note = test_note.to_note();
        self.store()
            .upsert(note.clone())
            .expect("Failed to write test note");
        note
    }

    /// Reads the collection back from disk.
    pub fn notes(&self) -> Vec<Note> {
        self.store().list_all()
    }

    /// Writes `~/.config/daybook/config.toml` for this environment.
    pub fn write_config(&self, content: &str) -> PathBuf {
        let dir = self.config_home.join("daybook");
        std::fs::create_dir_all(&dir).expect("Failed to create config directory");
        let path = dir.join("config.toml");
        std::fs::write(&path, content).expect("Failed to write config");
        path
    }

    /// Creates a DaybookCommand configured for this test environment.
    pub fn cmd(&self) -> DaybookCommand {
        DaybookCommand::new()
            .env("XDG_CONFIG_HOME", &self.config_home)
            .env("HOME", &self.config_home)
            .dir(&self.data_dir)
    }

    /// Writes a file to the test environment and returns its path.
    ///
    /// Useful for creating custom templates, CSS files, etc.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.data_dir.join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
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
        assert!(env.data_dir().is_dir(), "data directory should exist");
    }

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.data_dir().to_path_buf()
        };
        assert!(
            !path.exists(),
            "temp directory should be cleaned up on drop"
        );
    }

    #[test]
    fn test_env_provides_command() {
        let env = TestEnv::new();
        let cmd = env.cmd();
        let args = cmd.get_args();
        assert_eq!(args[0], "--dir");
        assert_eq!(args[1], env.data_dir().to_string_lossy());
    }

    #[test]
    fn test_env_add_note_writes_slot_file() {
        let env = TestEnv::new();
        let note = env.add_note(&TestNote::new("# Stored\nbody"));

        assert!(env.notes_file().is_file());
        assert_eq!(env.notes(), vec![note]);
    }

    #[test]
    fn test_env_add_multiple_notes_newest_first() {
        let env = TestEnv::new();
        let first = env.add_note(&TestNote::new("# First"));
        let second = env.add_note(&TestNote::new("# Second"));

        let ids: Vec<_> = env.notes().iter().map(|n| n.id().clone()).collect();
        assert_eq!(ids, vec![second.id().clone(), first.id().clone()]);
    }
}
