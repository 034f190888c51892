//! Storage trait definitions.

use crate::core::ChatSession;
use crate::error::Result;

/// Durable home for the session collection.
///
/// The collection is stored as a single snapshot that every save overwrites
/// wholesale.
pub trait SessionStore: Send + Sync {
    /// Read the stored snapshot.
    ///
    /// Returns `Ok(None)` when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails or the snapshot is
    /// malformed.
    fn load(&self) -> Result<Option<Vec<ChatSession>>>;

    /// Replace the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn save(&self, sessions: &[ChatSession]) -> Result<()>;

    /// Move an unreadable snapshot out of the way so the next save does not
    /// destroy it.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn quarantine(&self) -> Result<()>;
}
