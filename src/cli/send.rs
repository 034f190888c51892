//! `aura send` command implementation.

use crate::backend::{ChatBackend, HttpBackend};
use crate::cli::render::render_message;
use crate::cli::{at_position, open_manager, to_index};
use crate::config::Config;
use crate::core::{Message, SessionManager};
use crate::error::Result;
use crate::storage::SessionStore;

/// Run the send command.
///
/// Sends one message to the session at `position` and prints the reply.
/// Backend failures are printed as the apology stored in the session.
///
/// # Errors
///
/// Returns an error if the position is invalid or the storage backend fails.
pub fn run(config: &Config, position: usize, text: &str) -> Result<()> {
    let mut manager = open_manager(config)?;
    let backend = HttpBackend::new(&config.backend)?;

    match exchange(&mut manager, &backend, position, text)? {
        Some(reply) => println!("{}", render_message(&reply)),
        None => println!("Nothing to send."),
    }
    Ok(())
}

/// Select the session at `position` and send `text` to it.
fn exchange<S: SessionStore>(
    manager: &mut SessionManager<S>,
    backend: &impl ChatBackend,
    position: usize,
    text: &str,
) -> Result<Option<Message>> {
    let index = to_index(position)?;
    at_position(position, manager.select_session(index))?;
    manager.send(text, backend)
}
