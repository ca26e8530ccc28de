//! Session store abstraction and the in-memory implementation.
//!
//! DESIGN
//! ======
//! Stores are synchronous and infallible from the caller's point of view,
//! like browser local storage: a failed write is logged, never surfaced to
//! the page. Mutation is whole-session only (`set_session` / `clear_session`).

use std::sync::{Arc, PoisonError, RwLock};

use super::types::{Session, SessionData, User};

/// Get/set/clear access to the current session.
pub trait SessionStore: Send + Sync {
    /// Copy of the current session.
    fn snapshot(&self) -> Session;

    /// Replace the whole session with a freshly issued one.
    fn set_session(&self, data: SessionData);

    /// Drop tokens and profile.
    fn clear_session(&self);

    fn access_token(&self) -> Option<String> {
        self.snapshot().access_token
    }

    fn refresh_token(&self) -> Option<String> {
        self.snapshot().refresh_token
    }

    fn user(&self) -> Option<User> {
        self.snapshot().user
    }
}

impl<S: SessionStore + ?Sized> SessionStore for Arc<S> {
    fn snapshot(&self) -> Session {
        (**self).snapshot()
    }

    fn set_session(&self, data: SessionData) {
        (**self).set_session(data);
    }

    fn clear_session(&self) {
        (**self).clear_session();
    }
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// Process-local store. The web tier creates one per browser request.
#[derive(Debug, Default)]
pub struct MemoryStore {
    session: RwLock<Session>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with an existing session.
    #[must_use]
    pub fn with_session(session: Session) -> Self {
        Self { session: RwLock::new(session) }
    }
}

impl SessionStore for MemoryStore {
    fn snapshot(&self) -> Session {
        self.session.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set_session(&self, data: SessionData) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = Session::from(data);
    }

    fn clear_session(&self) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = Session::default();
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
