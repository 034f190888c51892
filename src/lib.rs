//! aura - terminal chat client for the MentalAura companion.
//!
//! Keeps a list of chat sessions on disk and forwards each message to the
//! companion backend, recording its reply (or a friendly apology when the
//! backend is unreachable) in the session log.

pub mod backend;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod storage;

pub use config::Config;
pub use error::{Error, Result};
