//! File-based storage backend.

use crate::core::ChatSession;
use chrono::Utc;
use crate::error::Result;
use crate::storage::traits::SessionStore;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Name of the snapshot file inside the aura home.
pub const SESSIONS_FILE: &str = "chat_sessions.json";

/// File-based storage backend with atomic writes.
#[derive(Debug)]
pub struct FileBackend {
    base_dir: PathBuf,
}

impl FileBackend {
    /// Create a new file backend.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Path to the snapshot file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.base_dir.join(SESSIONS_FILE)
    }

    /// Unused name for a quarantined snapshot, e.g.
    /// `chat_sessions.json.20261016T101500.123Z.corrupt`.
    fn quarantine_path(&self) -> PathBuf {
        let stamp = Utc::now().format("%Y%m%dT%H%M%S%.3fZ").to_string();
        let mut target = self.base_dir.join(format!("{SESSIONS_FILE}.{stamp}.corrupt"));
        let mut n = 1;
        while target.exists() {
            target = self
                .base_dir
                .join(format!("{SESSIONS_FILE}.{stamp}-{n}.corrupt"));
            n += 1;
        }
        target
    }
}

impl SessionStore for FileBackend {
    fn load(&self) -> Result<Option<Vec<ChatSession>>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        // Bytes, not a string: bad encoding must surface as a parse error
        let contents = fs::read(&path)?;
        let sessions: Vec<ChatSession> = serde_json::from_slice(&contents)?;
        debug!(count = sessions.len(), path = %path.display(), "loaded sessions");
        Ok(Some(sessions))
    }

    fn save(&self, sessions: &[ChatSession]) -> Result<()> {
        let path = self.path();
        let temp = path.with_extension("tmp");

        let contents = serde_json::to_string_pretty(sessions)?;
        fs::write(&temp, &contents)?;

        // Rename is atomic, so readers never see a half-written snapshot
        fs::rename(&temp, &path)?;

        debug!(count = sessions.len(), "saved sessions");
        Ok(())
    }

    fn quarantine(&self) -> Result<()> {
        let path = self.path();
        if path.exists() {
            let target = self.quarantine_path();
            fs::rename(&path, &target)?;
            warn!(path = %target.display(), "moved unreadable sessions aside");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Message;
    use tempfile::TempDir;

    fn create_test_backend() -> (FileBackend, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::new(temp_dir.path().to_path_buf()).unwrap();
        (backend, temp_dir)
    }

    #[test]
    fn creates_base_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let _backend = FileBackend::new(nested.clone()).unwrap();
        assert!(nested.exists());
    }

    #[test]
    fn load_missing_snapshot() {
        let (store, _temp) = create_test_backend();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_and_load_round_trip() {
        let (store, _temp) = create_test_backend();
        let mut first = ChatSession::default_session();
        first.messages.push(Message::user("Hi"));
        first.messages.push(Message::bot_with_sources(
            "Hello",
            Some(serde_json::json!(["guide.pdf"])),
        ));
        let mut second = ChatSession::new("Chat 2");
        second.messages.push(Message::apology());
        let sessions = vec![first, second];

        store.save(&sessions).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, sessions);
    }

    #[test]
    fn atomic_write_creates_no_temp_file() {
        let (store, temp_dir) = create_test_backend();

        store.save(&[ChatSession::default_session()]).unwrap();

        assert!(!temp_dir.path().join("chat_sessions.tmp").exists());
        assert!(temp_dir.path().join(SESSIONS_FILE).exists());
    }

    #[test]
    fn save_overwrites_previous_snapshot() {
        let (store, _temp) = create_test_backend();

        store
            .save(&[
                ChatSession::default_session(),
                ChatSession::new("Chat 2"),
            ])
            .unwrap();
        let only = ChatSession::new("Solo");
        store.save(std::slice::from_ref(&only)).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, vec![only]);
    }

    #[test]
    fn load_corrupted_returns_error() {
        let (store, _temp) = create_test_backend();
        fs::write(store.path(), "{ this is not valid json }").unwrap();
        assert!(store.load().is_err());
    }

    #[test]
    fn load_wrong_schema_returns_error() {
        let (store, _temp) = create_test_backend();
        fs::write(store.path(), r#"{"name": "not a list", "value": 42}"#).unwrap();
        assert!(store.load().is_err());
    }

    #[test]
    fn load_empty_file_returns_error() {
        let (store, _temp) = create_test_backend();
        fs::write(store.path(), "").unwrap();
        assert!(store.load().is_err());
    }

    fn corrupt_files(dir: &std::path::Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|p| p.extension().is_some_and(|e| e == "corrupt"))
            .collect();
        files.sort();
        files
    }

    #[test]
    fn load_invalid_utf8_is_parse_error() {
        let (store, _temp) = create_test_backend();
        fs::write(store.path(), [0xff, 0xfe, 0x00, 0x9f]).unwrap();
        assert!(matches!(store.load(), Err(crate::error::Error::Serde(_))));
    }

    #[test]
    fn quarantine_moves_snapshot_aside() {
        let (store, temp_dir) = create_test_backend();
        fs::write(store.path(), "garbage").unwrap();

        store.quarantine().unwrap();

        assert!(!store.path().exists());
        let moved = corrupt_files(temp_dir.path());
        assert_eq!(moved.len(), 1);
        assert_eq!(fs::read_to_string(&moved[0]).unwrap(), "garbage");
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn quarantine_keeps_earlier_copies() {
        let (store, temp_dir) = create_test_backend();

        fs::write(store.path(), "first").unwrap();
        store.quarantine().unwrap();
        fs::write(store.path(), "second").unwrap();
        store.quarantine().unwrap();

        let contents: Vec<String> = corrupt_files(temp_dir.path())
            .iter()
            .map(|p| fs::read_to_string(p).unwrap())
            .collect();
        assert_eq!(contents.len(), 2);
        assert!(contents.contains(&"first".to_string()));
        assert!(contents.contains(&"second".to_string()));
    }

    #[test]
    fn quarantine_without_snapshot_succeeds() {
        let (store, _temp) = create_test_backend();
        store.quarantine().unwrap();
    }
}
