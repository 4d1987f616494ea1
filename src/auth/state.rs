//! In-memory authentication record shared by the rest of the application.
//! The record is replaced wholesale: token, session id and user claims are
//! committed together and cleared together, so observers never see a
//! partially updated session.

use crate::auth::token::UserRecord;
use parking_lot::RwLock;
use std::sync::Arc;

/// Snapshot of an authenticated session.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub session_id: String,
    pub user: UserRecord,
}

/// Process-wide authentication state. Cheap to clone; clones share the same
/// underlying record.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    inner: Arc<RwLock<Option<Session>>>,
}

impl AuthState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole record with an authenticated session.
    pub fn commit(&self, session: Session) {
        *self.inner.write() = Some(session);
    }

    /// Drops the whole record, back to unauthenticated.
    pub fn clear(&self) {
        *self.inner.write() = None;
    }

    /// Snapshot of the current session. Only valid until the next
    /// `commit`/`clear`; there is no versioning beyond the atomic replace.
    #[must_use]
    pub fn read(&self) -> Option<Session> {
        self.inner.read().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.read().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn session(id: u64) -> Session {
        Session {
            token: format!("h.c.{id}"),
            session_id: "sid".to_string(),
            user: UserRecord(json!({ "id": id })),
        }
    }

    #[test]
    fn test_starts_unauthenticated() {
        let state = AuthState::new();
        assert!(state.read().is_none());
        assert!(!state.is_authenticated());
    }

    #[test]
    fn test_commit_replaces_whole_record() {
        let state = AuthState::new();
        state.commit(session(1));
        state.commit(session(2));

        let snapshot = state.read().unwrap();
        assert_eq!(snapshot.token, "h.c.2");
        assert_eq!(snapshot.user.0["id"], json!(2));
        assert!(state.is_authenticated());
    }

    #[test]
    fn test_clear_drops_all_fields() {
        let state = AuthState::new();
        state.commit(session(1));
        state.clear();
        assert!(state.read().is_none());
        assert!(!state.is_authenticated());
    }

    #[test]
    fn test_clones_share_the_record() {
        let state = AuthState::new();
        let observer = state.clone();
        state.commit(session(3));
        assert!(observer.is_authenticated());
        observer.clear();
        assert!(state.read().is_none());
    }
}
