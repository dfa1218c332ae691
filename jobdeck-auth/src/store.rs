//! Shared ownership of the current session.

use crate::error::AuthError;
use crate::session::Session;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;

/// Owns the current [`Session`], if any.
///
/// Writes replace the whole session behind the lock, so a reader always sees
/// either the previous or the next session, never a partially updated one.
/// Writes flow through the refresh coordinator (and the initial login),
/// keeping a single writer; reads are cheap snapshot clones of the inner
/// `Arc`.
#[derive(Debug, Default)]
pub struct TokenStore {
    current: RwLock<Option<Arc<Session>>>,
    last_error: RwLock<Option<AuthError>>,
}

impl TokenStore {
    /// Create an empty store (logged out).
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current session, or `None` when logged out.
    pub fn current(&self) -> Option<Arc<Session>> {
        self.current.read().clone()
    }

    /// Whether the access token is still valid `margin` from now.
    ///
    /// The margin keeps a request from racing expiry during network latency.
    /// Always false when logged out.
    pub fn is_valid(&self, margin: Duration) -> bool {
        self.current
            .read()
            .as_ref()
            .is_some_and(|session| session.valid_for(margin))
    }

    /// Replace the session after a successful exchange. Returns the stored
    /// handle so the writer can hand it to waiters.
    pub fn update(&self, session: Session) -> Arc<Session> {
        let session = Arc::new(session);
        *self.current.write() = Some(session.clone());
        *self.last_error.write() = None;
        session
    }

    /// Drop the session (logout).
    pub fn clear(&self) {
        *self.current.write() = None;
        *self.last_error.write() = None;
    }

    /// Drop the session because of a terminal failure, recording the cause.
    pub fn invalidate(&self, error: AuthError) {
        *self.current.write() = None;
        *self.last_error.write() = Some(error);
    }

    /// The terminal failure that ended the last session, if any.
    pub fn last_error(&self) -> Option<AuthError> {
        self.last_error.read().clone()
    }
}
