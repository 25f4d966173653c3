//! Session Guard
//!
//! Gates the protected part of the UI: only an authenticated session may
//! see it. The guard is a three-state machine re-run on every pass through
//! a protected view:
//!
//! ```text
//! Checking -> Authorized    (session valid: render the protected view)
//! Checking -> Redirecting   (session invalid: force logout, route to login)
//! ```
//!
//! `Redirecting` is terminal for the pass; [`SessionGuard::invalidate`]
//! is the "fresh mount" that puts the machine back to `Checking`, invoked
//! when a session-change notification arrives or after the login view
//! routes back into the app.
//!
//! There is no retry and no partial recovery: a failed check always forces
//! a logout before redirecting, so no stale or half-valid session survives
//! it.

use super::session::SessionStore;

/// Guard verdict for the current render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Not checked yet this pass
    Checking,
    /// Session valid, protected content may render
    Authorized,
    /// Session invalid, route to the login view
    Redirecting,
}

/// Auth gate for protected views
#[derive(Debug)]
pub struct SessionGuard {
    state: GuardState,
}

impl Default for SessionGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionGuard {
    /// A fresh guard always starts out checking
    pub fn new() -> Self {
        Self {
            state: GuardState::Checking,
        }
    }

    /// Current state without re-evaluating
    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Run the check against the store.
    ///
    /// From `Checking` or `Authorized` this consults
    /// [`SessionStore::is_authenticated`]; a failed check forces a logout
    /// to clear any partially-valid stored state, then redirects. Once
    /// `Redirecting`, the verdict is stable until [`invalidate`] restarts
    /// the machine.
    ///
    /// [`invalidate`]: SessionGuard::invalidate
    pub fn evaluate(&mut self, store: &SessionStore) -> GuardState {
        if self.state == GuardState::Redirecting {
            return self.state;
        }
        if store.is_authenticated() {
            self.state = GuardState::Authorized;
        } else {
            store.logout();
            self.state = GuardState::Redirecting;
        }
        self.state
    }

    /// Restart at `Checking`, as a fresh mount would
    pub fn invalidate(&mut self) {
        self.state = GuardState::Checking;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::egui_app::session::{Session, SessionStore};
    use crate::shared::models::{Role, UserSummary};
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine as _;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn valid_session() -> Session {
        let exp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
            + 3600;
        let header = URL_SAFE_NO_PAD.encode(b"{\"alg\":\"HS256\",\"typ\":\"JWT\"}");
        let payload = URL_SAFE_NO_PAD.encode(format!("{{\"exp\":{}}}", exp).as_bytes());
        Session {
            token: format!("{}.{}.sig", header, payload),
            user: UserSummary {
                id: 1,
                email: "a@b.com".to_string(),
                name: "A".to_string(),
                role: Role::Student,
            },
        }
    }

    #[test]
    fn test_starts_checking() {
        let guard = SessionGuard::new();
        assert_eq!(guard.state(), GuardState::Checking);
    }

    #[test]
    fn test_valid_session_authorizes() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path());
        store.login(&valid_session());

        let mut guard = SessionGuard::new();
        assert_eq!(guard.evaluate(&store), GuardState::Authorized);
    }

    #[test]
    fn test_empty_store_redirects() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path());

        let mut guard = SessionGuard::new();
        assert_eq!(guard.evaluate(&store), GuardState::Redirecting);
    }

    #[test]
    fn test_failed_check_forces_logout() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path());
        let mut session = valid_session();
        session.token = "expired-garbage".to_string();
        store.login(&session);

        let mut guard = SessionGuard::new();
        assert_eq!(guard.evaluate(&store), GuardState::Redirecting);
        // The partially-valid session is gone
        assert_eq!(store.get_user(), None);
        assert_eq!(store.get_token(), None);
    }

    #[test]
    fn test_redirecting_is_terminal_until_invalidated() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path());

        let mut guard = SessionGuard::new();
        assert_eq!(guard.evaluate(&store), GuardState::Redirecting);

        // Even with a session now present, the verdict stands for this pass
        store.login(&valid_session());
        assert_eq!(guard.evaluate(&store), GuardState::Redirecting);

        // A fresh mount re-checks
        guard.invalidate();
        assert_eq!(guard.evaluate(&store), GuardState::Authorized);
    }
}
