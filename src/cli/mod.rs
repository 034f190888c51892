//! CLI command implementations.
//!
//! Sessions are addressed by 1-based position, matching what `aura list`
//! prints.

pub mod chat;
pub mod list;
pub mod manage;
pub mod render;
pub mod send;
pub mod show;

use crate::config::Config;
use crate::core::SessionManager;
use crate::error::{Error, Result};
use crate::storage::FileBackend;

/// Open the session manager over the configured storage directory.
///
/// # Errors
///
/// Returns an error if the storage directory cannot be created or read.
pub fn open_manager(config: &Config) -> Result<SessionManager<FileBackend>> {
    let store = FileBackend::new(config.storage.path.clone())?;
    SessionManager::load(store)
}

/// Convert a 1-based position into a collection index.
///
/// # Errors
///
/// Returns [`Error::InvalidIndex`] for position 0.
pub fn to_index(position: usize) -> Result<usize> {
    position.checked_sub(1).ok_or(Error::InvalidIndex(position))
}

/// Report index errors from the manager in terms of the user's position.
pub(crate) fn at_position<T>(position: usize, result: Result<T>) -> Result<T> {
    result.map_err(|e| match e {
        Error::InvalidIndex(_) => Error::InvalidIndex(position),
        other => other,
    })
}
