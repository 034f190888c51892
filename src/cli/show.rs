//! `aura show` command implementation.

use crate::cli::render::render_transcript;
use crate::cli::{at_position, open_manager, to_index};
use crate::config::Config;
use crate::core::SessionManager;
use crate::error::{Error, Result};
use crate::storage::SessionStore;

/// Run the show command.
///
/// Prints the full transcript of the session at `position`.
///
/// # Errors
///
/// Returns an error if the position is invalid or the storage backend fails.
pub fn run(config: &Config, position: usize) -> Result<()> {
    let manager = open_manager(config)?;
    println!("{}", transcript(&manager, position)?);
    Ok(())
}

/// Transcript of the session at 1-based `position`.
fn transcript<S: SessionStore>(manager: &SessionManager<S>, position: usize) -> Result<String> {
    let index = to_index(position)?;
    let session = manager
        .sessions()
        .get(index)
        .ok_or(Error::InvalidIndex(index));
    at_position(position, session).map(render_transcript)
}
