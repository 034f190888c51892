//! Plain-text rendering of sessions and messages.

use crate::core::{ChatSession, Message, Sender};
use std::fmt::Write;

/// Maximum length for the last-message preview in listings.
const PREVIEW_LEN: usize = 40;

/// Render one message, with its sources on a second line if present.
#[must_use]
pub fn render_message(message: &Message) -> String {
    let prefix = match (message.sender, message.is_error) {
        (Sender::User, _) => "you",
        (Sender::Bot, false) => "aura",
        (Sender::Bot, true) => "aura (!)",
    };

    let mut out = format!("{prefix}> {}", message.text);
    let sources = message.source_labels();
    if !sources.is_empty() {
        let _ = write!(out, "\n      sources: {}", sources.join(", "));
    }
    out
}

/// Render a whole session log under a header line.
#[must_use]
pub fn render_transcript(session: &ChatSession) -> String {
    let mut out = format!("── {} ──", session.name);
    for message in &session.messages {
        out.push('\n');
        out.push_str(&render_message(message));
    }
    out
}

/// Render the session list with 1-based positions; `*` marks the active one.
#[must_use]
pub fn render_session_list(sessions: &[ChatSession], active: usize) -> String {
    let mut out = format!("{:<5} {:<24} {:>5}  Last message", "#", "Name", "Msgs");
    out.push('\n');
    out.push_str(&"─".repeat(80));

    for (i, session) in sessions.iter().enumerate() {
        let marker = if i == active { '*' } else { ' ' };
        let preview = format_preview(session.last_message().map(|m| m.text.as_str()));
        let _ = write!(
            out,
            "\n{marker}{:<4} {:<24} {:>5}  {preview}",
            i + 1,
            truncate(&session.name, 24),
            session.messages.len(),
        );
    }
    out
}

/// First line of `text`, shortened for a listing.
fn format_preview(text: Option<&str>) -> String {
    match text {
        Some(t) => {
            let first_line = t.lines().next().unwrap_or(t);
            truncate(first_line, PREVIEW_LEN)
        }
        None => "(empty)".to_string(),
    }
}

/// Shorten to `max` characters, appending `...` when cut.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}
