//! aura CLI - terminal chat client for the MentalAura companion.

use aura::config::load_config;
use aura::{cli, logging};
use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// Get the version string.
///
/// Tagged builds report the bare crate version; anything else appends the
/// git hash, e.g. "0.1.0-dev (abc1234-dirty)".
fn version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("AURA_GIT_HASH");
    const IS_RELEASE: &str = env!("AURA_IS_RELEASE");

    static VERSION_STRING: std::sync::OnceLock<String> = std::sync::OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" {
            VERSION.to_string()
        } else {
            format!("{VERSION}-dev ({GIT_HASH})")
        }
    })
}

#[derive(Parser)]
#[command(name = "aura")]
#[command(author, version = version(), about = "Chat with the MentalAura companion", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat (default).
    Chat,

    /// List chats.
    List,

    /// Print the messages of a chat.
    Show {
        /// Chat position as shown by `aura list`.
        #[arg(default_value = "1")]
        chat: usize,
    },

    /// Start a new chat.
    New,

    /// Rename a chat.
    Rename {
        /// Chat position as shown by `aura list`.
        chat: usize,

        /// New name.
        name: String,
    },

    /// Delete a chat.
    Delete {
        /// Chat position as shown by `aura list`.
        chat: usize,
    },

    /// Send one message and print the reply.
    Send {
        /// Chat position as shown by `aura list`.
        #[arg(short, long, default_value = "1")]
        chat: usize,

        /// Message text.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("aura: error: {e}");
            return ExitCode::FAILURE;
        }
    };
    logging::init_logging(&config.logging);

    let result = match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => cli::chat::run(&config),
        Commands::List => cli::list::run(&config),
        Commands::Show { chat } => cli::show::run(&config, chat),
        Commands::New => cli::manage::new_chat(&config),
        Commands::Rename { chat, name } => cli::manage::rename(&config, chat, &name),
        Commands::Delete { chat } => cli::manage::delete(&config, chat),
        Commands::Send { chat, text } => cli::send::run(&config, chat, &text.join(" ")),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("aura: error: {e}");
            ExitCode::FAILURE
        }
    }
}
