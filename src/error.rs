//! Error types for aura.

use std::io;
use thiserror::Error;

/// Result type alias for aura operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in aura operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Storage I/O error.
    #[error("Storage error: {0}")]
    Storage(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Transport failure talking to the chat backend.
    #[error("Backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Chat backend answered with a non-success status.
    #[error("Backend returned status {0}")]
    BackendStatus(u16),

    /// Session index outside the collection.
    #[error("No chat at position {0}")]
    InvalidIndex(usize),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
