//! `aura new`, `aura rename` and `aura delete` command implementations.

use crate::cli::{at_position, open_manager, to_index};
use crate::config::Config;
use crate::error::Result;

/// Run the new command.
///
/// # Errors
///
/// Returns an error if the storage backend fails.
pub fn new_chat(config: &Config) -> Result<()> {
    let mut manager = open_manager(config)?;
    let session = manager.create_session()?;
    println!("Created \"{}\" at position 1.", session.name);
    Ok(())
}

/// Run the rename command.
///
/// # Errors
///
/// Returns an error if the position is invalid or the storage backend fails.
pub fn rename(config: &Config, position: usize, name: &str) -> Result<()> {
    let index = to_index(position)?;
    let mut manager = open_manager(config)?;

    if at_position(position, manager.rename_session(index, name))? {
        println!("Renamed chat {position} to \"{}\".", name.trim());
    } else {
        println!("Name is empty; chat {position} left unchanged.");
    }
    Ok(())
}

/// Run the delete command.
///
/// # Errors
///
/// Returns an error if the position is invalid or the storage backend fails.
pub fn delete(config: &Config, position: usize) -> Result<()> {
    let index = to_index(position)?;
    let mut manager = open_manager(config)?;

    let name = manager
        .sessions()
        .get(index)
        .map(|s| s.name.clone())
        .unwrap_or_default();
    at_position(position, manager.delete_session(index))?;

    println!("Deleted \"{name}\".");
    Ok(())
}
