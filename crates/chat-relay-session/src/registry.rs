//! Identifier to session registry.

use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use chat_relay_core::{Identifier, Session};

/// Concurrency-safe mapping from identifier to live session.
///
/// Holds at most one session per identifier; a second `register` for the same
/// identifier replaces the first without closing it. The lock is only held for
/// the map operation itself, never across a send.
#[derive(Debug, Default)]
pub struct Registry {
    sessions: RwLock<HashMap<Identifier, Session>>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the session for its identifier.
    pub fn register(&self, session: Session) {
        let identifier = session.identifier().clone();
        let connection_id = session.connection_id();
        let displaced = self.write().insert(identifier, session);

        if let Some(previous) = displaced {
            tracing::debug!(
                user_id = %previous.identifier(),
                displaced = %previous.connection_id(),
                %connection_id,
                "Replaced existing session"
            );
        }
    }

    /// Get the current session for an identifier.
    #[must_use]
    pub fn lookup(&self, id: &str) -> Option<Session> {
        self.read().get(id).cloned()
    }

    /// Remove the session for an identifier. No-op if absent.
    pub fn deregister(&self, id: &str) {
        if let Some(session) = self.write().remove(id) {
            tracing::debug!(
                user_id = %session.identifier(),
                connection_id = %session.connection_id(),
                "Session deregistered"
            );
        }
    }

    /// Register a session and return a guard that deregisters it when dropped.
    #[must_use = "dropping the registration deregisters the session immediately"]
    pub fn acquire(self: &Arc<Self>, session: Session) -> Registration {
        let identifier = session.identifier().clone();
        self.register(session);
        Registration {
            registry: Arc::clone(self),
            identifier: Some(identifier),
        }
    }

    /// Whether a session is registered for the identifier.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.read().contains_key(id)
    }

    /// Number of registered sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // A poisoned lock still holds a whole map: every critical section is a
    // single insert/remove/get.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<Identifier, Session>> {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<Identifier, Session>> {
        self.sessions.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Scoped registration: deregisters its identifier exactly once, on drop or
/// on `release`, whichever comes first.
#[derive(Debug)]
pub struct Registration {
    registry: Arc<Registry>,
    identifier: Option<Identifier>,
}

impl Registration {
    /// Identifier this registration holds.
    #[must_use]
    pub fn identifier(&self) -> Option<&Identifier> {
        self.identifier.as_ref()
    }

    /// Deregister now.
    pub fn release(mut self) {
        self.release_inner();
    }

    fn release_inner(&mut self) {
        if let Some(identifier) = self.identifier.take() {
            self.registry.deregister(identifier.as_str());
        }
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.release_inner();
    }
}
