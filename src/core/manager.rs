//! Chat session manager.
//!
//! Owns the ordered session collection, tracks the active session and the
//! single in-flight backend request, and persists the whole collection after
//! every mutation.

use crate::backend::{ChatBackend, ChatReply, ChatRequest};
use crate::core::events::{ManagerEvent, Observer};
use crate::core::session::{ChatSession, Message};
use crate::error::{Error, Result};
use crate::storage::SessionStore;
use tracing::{debug, info, warn};

/// Session collection plus the state needed to drive it.
pub struct SessionManager<S: SessionStore> {
    sessions: Vec<ChatSession>,
    active: usize,
    /// Session id of the outstanding request, if one is in flight.
    pending: Option<String>,
    store: S,
    observers: Vec<Box<dyn Observer>>,
}

impl<S: SessionStore> std::fmt::Debug for SessionManager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("sessions", &self.sessions.len())
            .field("active", &self.active)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl<S: SessionStore> SessionManager<S> {
    /// Load the collection from `store`.
    ///
    /// A missing or empty snapshot yields a single default session. A
    /// malformed snapshot is quarantined and replaced the same way. The first
    /// session starts out active.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    pub fn load(store: S) -> Result<Self> {
        let loaded = match store.load() {
            Ok(Some(sessions)) if !sessions.is_empty() => Some(sessions),
            Ok(_) => None,
            Err(Error::Serde(e)) => {
                warn!(error = %e, "stored sessions are unreadable, starting fresh");
                store.quarantine()?;
                None
            }
            Err(e) => return Err(e),
        };

        let mut manager = Self {
            sessions: Vec::new(),
            active: 0,
            pending: None,
            store,
            observers: Vec::new(),
        };

        match loaded {
            Some(sessions) => {
                debug!(count = sessions.len(), "restored sessions");
                manager.sessions = sessions;
            }
            None => {
                manager.sessions.push(ChatSession::default_session());
                manager.persist()?;
            }
        }

        Ok(manager)
    }

    /// Register an observer for state changes.
    pub fn subscribe(&mut self, observer: impl Observer + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// All sessions, newest first.
    #[must_use]
    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    /// Index of the active session.
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The active session.
    #[must_use]
    pub fn active_session(&self) -> Option<&ChatSession> {
        self.sessions.get(self.active)
    }

    /// True while a backend request is outstanding.
    #[must_use]
    pub fn is_waiting(&self) -> bool {
        self.pending.is_some()
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a new session at the front of the list and make it active.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be saved.
    pub fn create_session(&mut self) -> Result<&ChatSession> {
        let session = ChatSession::new(&format!("Chat {}", self.sessions.len() + 1));
        info!(id = %session.id, name = %session.name, "created session");

        self.sessions.insert(0, session);
        self.set_active(0);
        self.persist()?;

        Ok(&self.sessions[0])
    }

    /// Make the session at `index` active.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIndex`] if `index` is out of range.
    pub fn select_session(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.set_active(index);
        Ok(())
    }

    /// Delete the session at `index`.
    ///
    /// Deleting the last remaining session replaces it with a fresh default
    /// one. The active index keeps pointing at the same session when an
    /// earlier one is removed, and falls back to 0 when the active session
    /// itself is removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIndex`] if `index` is out of range, or an error
    /// if the collection cannot be saved.
    pub fn delete_session(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        let removed = self.sessions.remove(index);
        info!(id = %removed.id, name = %removed.name, "deleted session");

        if self.sessions.is_empty() {
            self.sessions.push(ChatSession::default_session());
            self.set_active(0);
        } else if index == self.active {
            self.set_active(0);
        } else if index < self.active {
            self.set_active(self.active - 1);
        }

        self.persist()
    }

    /// Rename the session at `index`.
    ///
    /// Names are trimmed; a blank name is ignored. Returns whether the rename
    /// was applied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIndex`] if `index` is out of range, or an error
    /// if the collection cannot be saved.
    pub fn rename_session(&mut self, index: usize, name: &str) -> Result<bool> {
        self.check_index(index)?;
        let name = name.trim();
        if name.is_empty() {
            debug!(index, "ignoring blank rename");
            return Ok(false);
        }

        self.sessions[index].name = name.to_string();
        self.persist()?;
        Ok(true)
    }

    /// Append a user message to the active session and start a request.
    ///
    /// Returns the request to send to the backend, or `None` when the message
    /// is blank, a request is already in flight, or no session is active.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be saved. The message is
    /// then taken back out and the manager stays idle.
    pub fn append_user_message(&mut self, text: &str) -> Result<Option<ChatRequest>> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        if let Some(id) = &self.pending {
            debug!(pending = %id, "request already in flight, ignoring send");
            return Ok(None);
        }
        let Some(session) = self.sessions.get_mut(self.active) else {
            return Ok(None);
        };

        session.messages.push(Message::user(text));
        let session_id = session.id.clone();

        if let Err(e) = self.persist() {
            self.sessions[self.active].messages.pop();
            return Err(e);
        }

        self.pending = Some(session_id.clone());
        self.emit(&ManagerEvent::PendingChanged { waiting: true });
        self.emit(&ManagerEvent::MessageAppended {
            session_id: session_id.clone(),
        });

        Ok(Some(ChatRequest {
            message: text.to_string(),
            session_id,
        }))
    }

    /// Record a successful backend reply.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be saved.
    pub fn receive_bot_response(&mut self, reply: ChatReply) -> Result<()> {
        let sources = reply.context_sources.filter(|v| !v.is_null());
        self.complete(Message::bot_with_sources(&reply.response, sources))
    }

    /// Record a failed backend exchange as an apology message.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be saved.
    pub fn receive_bot_error(&mut self) -> Result<()> {
        self.complete(Message::apology())
    }

    /// Send `text` through `backend` and record the outcome.
    ///
    /// Backend failures never reach the caller; they become an apology
    /// message in the session log. Returns the bot message that was appended,
    /// or `None` if the send was not accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be saved.
    pub fn send(&mut self, text: &str, backend: &impl ChatBackend) -> Result<Option<Message>> {
        let Some(request) = self.append_user_message(text)? else {
            return Ok(None);
        };
        let session_id = request.session_id.clone();

        match backend.chat(&request) {
            Ok(reply) => self.receive_bot_response(reply)?,
            Err(e) => {
                warn!(error = %e, "chat backend failed");
                self.receive_bot_error()?;
            }
        }

        Ok(self
            .sessions
            .iter()
            .find(|s| s.id == session_id)
            .and_then(ChatSession::last_message)
            .cloned())
    }

    /// Append a bot message to the session the outstanding request came
    /// from, falling back to the active session, and go idle.
    fn complete(&mut self, message: Message) -> Result<()> {
        let target = self
            .pending
            .take()
            .or_else(|| self.active_session().map(|s| s.id.clone()));
        self.emit(&ManagerEvent::PendingChanged { waiting: false });

        let Some(target) = target else {
            return Ok(());
        };
        let Some(session) = self.sessions.iter_mut().find(|s| s.id == target) else {
            warn!(id = %target, "session deleted before its reply arrived, dropping reply");
            return Ok(());
        };

        session.messages.push(message);
        self.persist()?;
        self.emit(&ManagerEvent::MessageAppended { session_id: target });
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.sessions.len() {
            Ok(())
        } else {
            Err(Error::InvalidIndex(index))
        }
    }

    fn set_active(&mut self, index: usize) {
        if self.active != index {
            self.active = index;
            self.emit(&ManagerEvent::ActiveChanged { index });
        }
    }

    fn persist(&mut self) -> Result<()> {
        self.store.save(&self.sessions)?;
        self.emit(&ManagerEvent::SessionsChanged);
        Ok(())
    }

    fn emit(&self, event: &ManagerEvent) {
        for observer in &self.observers {
            observer.notify(event);
        }
    }
}
