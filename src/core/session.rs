//! Chat session types.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Seeded first message of every new session.
pub const GREETING: &str = "Hello! I'm your compassionate AI companion. How can I support you today? Please remember, I'm here to provide information, not to replace a licensed professional.";

/// Bot message shown when the backend cannot be reached.
pub const APOLOGY: &str =
    "I'm having some trouble connecting right now. Please try again in a moment.";

/// Name of the session synthesized at startup or after deleting the last one.
pub const DEFAULT_SESSION_NAME: &str = "New Chat";

/// One chat conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    /// Session identifier, also sent to the backend.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Message log, oldest first.
    pub messages: Vec<Message>,
}

impl ChatSession {
    /// Create a session with a fresh id and the greeting message.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            id: new_session_id(),
            name: name.to_string(),
            messages: vec![Message::bot(GREETING)],
        }
    }

    /// Create the default `New Chat` session.
    #[must_use]
    pub fn default_session() -> Self {
        Self::new(DEFAULT_SESSION_NAME)
    }

    /// Most recent message, if any.
    #[must_use]
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Typed by the user.
    User,
    /// Returned by the backend or synthesized on failure.
    Bot,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message body.
    pub text: String,

    /// Author.
    pub sender: Sender,

    /// Attribution data returned by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Value>,

    /// True for locally synthesized failure notices.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_error: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(b: &bool) -> bool {
    !*b
}

impl Message {
    /// A user-authored message.
    #[must_use]
    pub fn user(text: &str) -> Self {
        Self {
            text: text.to_string(),
            sender: Sender::User,
            sources: None,
            is_error: false,
        }
    }

    /// A bot-authored message without sources.
    #[must_use]
    pub fn bot(text: &str) -> Self {
        Self {
            text: text.to_string(),
            sender: Sender::Bot,
            sources: None,
            is_error: false,
        }
    }

    /// A bot reply carrying backend attributions.
    #[must_use]
    pub fn bot_with_sources(text: &str, sources: Option<Value>) -> Self {
        Self {
            sources,
            ..Self::bot(text)
        }
    }

    /// The fixed apology shown when the backend fails.
    #[must_use]
    pub fn apology() -> Self {
        Self {
            is_error: true,
            ..Self::bot(APOLOGY)
        }
    }

    /// Source labels suitable for display.
    ///
    /// Arrays of strings are returned as-is; any other JSON value is rendered
    /// compactly as a single entry.
    #[must_use]
    pub fn source_labels(&self) -> Vec<String> {
        match &self.sources {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
            Some(Value::String(s)) => vec![s.clone()],
            Some(other) => vec![other.to_string()],
        }
    }
}

/// Generate a session id: `session_<unix-millis>_<uuid>`.
#[must_use]
pub fn new_session_id() -> String {
    format!(
        "session_{}_{}",
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple()
    )
}
