//! `aura list` command implementation.

use crate::cli::open_manager;
use crate::cli::render::render_session_list;
use crate::config::Config;
use crate::error::Result;

/// Run the list command.
///
/// Shows every session with its position, name, message count and a preview
/// of the latest message.
///
/// # Errors
///
/// Returns an error if the storage backend fails.
pub fn run(config: &Config) -> Result<()> {
    let manager = open_manager(config)?;

    println!(
        "{}",
        render_session_list(manager.sessions(), manager.active_index())
    );
    println!("{}", "─".repeat(80));
    println!(
        "{} session(s) stored in {}",
        manager.sessions().len(),
        manager.store().path().display()
    );

    Ok(())
}
