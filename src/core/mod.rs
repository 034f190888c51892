//! Core chat session types and lifecycle.

pub mod events;
pub mod manager;
pub mod session;

pub use events::{ManagerEvent, Observer};
pub use manager::SessionManager;
pub use session::{APOLOGY, ChatSession, DEFAULT_SESSION_NAME, GREETING, Message, Sender};
