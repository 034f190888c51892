//! In-memory storage backend for testing.

use crate::core::ChatSession;
use crate::error::Result;
use crate::storage::traits::SessionStore;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Stored value of a [`MemoryBackend`].
#[derive(Debug, Clone, Default)]
enum Snapshot {
    #[default]
    Empty,
    Sessions(Vec<ChatSession>),
    Corrupt,
}

/// In-memory storage backend for testing.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    snapshot: RwLock<Snapshot>,
    saves: AtomicUsize,
}

impl MemoryBackend {
    /// Create a new, empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend pre-populated with a snapshot.
    #[must_use]
    pub fn with_sessions(sessions: Vec<ChatSession>) -> Self {
        Self {
            snapshot: RwLock::new(Snapshot::Sessions(sessions)),
            saves: AtomicUsize::new(0),
        }
    }

    /// Create a backend whose snapshot fails to parse.
    #[must_use]
    pub fn corrupt() -> Self {
        Self {
            snapshot: RwLock::new(Snapshot::Corrupt),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of successful saves so far.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Current snapshot, if a valid one is stored.
    #[must_use]
    pub fn sessions(&self) -> Option<Vec<ChatSession>> {
        match &*self.snapshot.read().unwrap() {
            Snapshot::Sessions(sessions) => Some(sessions.clone()),
            Snapshot::Empty | Snapshot::Corrupt => None,
        }
    }
}

impl SessionStore for MemoryBackend {
    fn load(&self) -> Result<Option<Vec<ChatSession>>> {
        match &*self.snapshot.read().unwrap() {
            Snapshot::Empty => Ok(None),
            Snapshot::Sessions(sessions) => Ok(Some(sessions.clone())),
            Snapshot::Corrupt => {
                let err = serde_json::from_str::<Vec<ChatSession>>("{ corrupt").unwrap_err();
                Err(err.into())
            }
        }
    }

    fn save(&self, sessions: &[ChatSession]) -> Result<()> {
        *self.snapshot.write().unwrap() = Snapshot::Sessions(sessions.to_vec());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn quarantine(&self) -> Result<()> {
        let mut snapshot = self.snapshot.write().unwrap();
        if matches!(*snapshot, Snapshot::Corrupt) {
            *snapshot = Snapshot::Empty;
        }
        Ok(())
    }
}
