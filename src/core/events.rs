//! Change notifications emitted by the session manager.

/// Something observable happened to the session collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManagerEvent {
    /// The collection was mutated and persisted.
    SessionsChanged,

    /// The active session index changed.
    ActiveChanged {
        /// New active index.
        index: usize,
    },

    /// A message was appended; renderers should scroll to the latest one.
    MessageAppended {
        /// Session that received the message.
        session_id: String,
    },

    /// The in-flight request flag flipped.
    PendingChanged {
        /// True while a backend request is outstanding.
        waiting: bool,
    },
}

/// Receives manager events.
pub trait Observer {
    /// Called after the state change described by `event` is complete.
    fn notify(&self, event: &ManagerEvent);
}

impl<F> Observer for F
where
    F: Fn(&ManagerEvent),
{
    fn notify(&self, event: &ManagerEvent) {
        self(event);
    }
}
