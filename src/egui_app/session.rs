//! Session Store
//!
//! Durable client-side persistence of the authenticated session, plus
//! change notification for interested listeners.
//!
//! The session survives restarts so the app does not need a server round
//! trip on every launch, but a cached token is never trusted past its
//! expiry: every authentication check re-reads the `exp` claim. Two keys
//! are persisted under the app data directory, one file per key:
//!
//! - `currentUser` - JSON-encoded [`UserSummary`]
//! - `authToken`   - raw bearer token string
//!
//! Invariant: a session is either absent or complete. Reads that find a
//! corrupt user record clear both keys and report "no session" - corrupted
//! state is discarded, never repaired, and the user re-authenticates.
//! Writes are best-effort: a failing storage medium is logged and the app
//! keeps running with an in-memory-only session for this launch.

use crate::shared::error::StorageError;
use crate::shared::models::UserSummary;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Storage key holding the JSON-encoded user record
pub const USER_KEY: &str = "currentUser";

/// Storage key holding the raw bearer token
pub const TOKEN_KEY: &str = "authToken";

/// Safety margin subtracted from the token expiry, in seconds. A token
/// expiring within this window counts as expired already, so an in-flight
/// request cannot ride a credential that dies mid-call.
const EXPIRY_MARGIN_SECS: u64 = 30;

/// An authenticated session: the bearer credential plus the identity it
/// belongs to. The store persists and deletes these only as a pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: UserSummary,
}

/// Claims the client reads out of the token payload. The signature is the
/// backend's business - the client only looks at `exp`.
#[derive(Debug, Deserialize)]
struct TokenClaims {
    #[serde(default)]
    exp: Option<u64>,
}

type Listener = Box<dyn Fn() + Send + Sync>;

/// File-backed session store with listener broadcast.
///
/// Shared across the app behind an `Arc`; all session access goes through
/// this object, nothing else touches the underlying files.
pub struct SessionStore {
    dir: PathBuf,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_listener_id: AtomicU64,
}

impl SessionStore {
    /// Open a store rooted at the given directory
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            listeners: Mutex::new(Vec::new()),
            next_listener_id: AtomicU64::new(1),
        }
    }

    /// Open the store at the default per-user data directory
    pub fn open_default() -> Self {
        let dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("projecthub");
        Self::open(dir)
    }

    /// Directory backing this store
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist a session and broadcast the change.
    ///
    /// Storage failures are logged and swallowed - the caller keeps its
    /// in-memory session either way.
    pub fn login(&self, session: &Session) {
        if let Err(e) = self.write_session(session) {
            tracing::warn!(
                "failed to persist session under {}: {}",
                self.dir.display(),
                e
            );
        }
        self.notify();
    }

    /// Delete the stored session. Idempotent: with nothing stored this is a
    /// complete no-op and no change is broadcast.
    pub fn logout(&self) {
        let removed_user = remove_key(&self.key_path(USER_KEY));
        let removed_token = remove_key(&self.key_path(TOKEN_KEY));
        if removed_user || removed_token {
            self.notify();
        }
    }

    /// Read the stored user record.
    ///
    /// Returns `None` when absent. An unparsable record clears **both**
    /// keys before returning `None`, so a half-valid session never
    /// lingers.
    pub fn get_user(&self) -> Option<UserSummary> {
        let raw = read_key(&self.key_path(USER_KEY))?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("stored user record is corrupt, clearing session: {}", e);
                self.clear_storage();
                None
            }
        }
    }

    /// Read the stored bearer token
    pub fn get_token(&self) -> Option<String> {
        read_key(&self.key_path(TOKEN_KEY))
    }

    /// Whether the stored token is missing, malformed, or expires within
    /// the safety margin. Never errors: anything unreadable is "expired".
    pub fn is_token_expired(&self) -> bool {
        match self.get_token() {
            Some(token) => token_is_expired(&token),
            None => true,
        }
    }

    /// The single source of truth for "may this client act as a user".
    ///
    /// True only when the user record parses, a token is present, and the
    /// token has not expired. The user read runs first so its self-healing
    /// settles the stored state before the token checks.
    pub fn is_authenticated(&self) -> bool {
        self.get_user().is_some() && self.get_token().is_some() && !self.is_token_expired()
    }

    /// Register a listener invoked after every broadcast session change.
    /// Returns an id accepted by [`SessionStore::unsubscribe`].
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) -> u64 {
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push((id, Box::new(listener)));
        }
        id
    }

    /// Remove a previously registered listener
    pub fn unsubscribe(&self, id: u64) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.retain(|(listener_id, _)| *listener_id != id);
        }
    }

    fn notify(&self) {
        if let Ok(listeners) = self.listeners.lock() {
            for (_, listener) in listeners.iter() {
                listener();
            }
        }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    fn write_session(&self, session: &Session) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        let user_json = serde_json::to_string(&session.user)?;
        fs::write(self.key_path(USER_KEY), user_json)?;
        fs::write(self.key_path(TOKEN_KEY), &session.token)?;
        Ok(())
    }

    /// Remove both keys without broadcasting. Used by the self-healing
    /// read path; the next guard evaluation settles the auth state.
    fn clear_storage(&self) {
        remove_key(&self.key_path(USER_KEY));
        remove_key(&self.key_path(TOKEN_KEY));
    }
}

/// Read one key, treating any I/O failure as "absent"
fn read_key(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(value) => Some(value),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            tracing::warn!("cannot read {}: {}", path.display(), e);
            None
        }
    }
}

/// Remove one key. Returns whether stored state changed.
fn remove_key(path: &Path) -> bool {
    match fs::remove_file(path) {
        Ok(()) => true,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
        Err(e) => {
            tracing::warn!("cannot remove {}: {}", path.display(), e);
            // The file may still exist; report a change so listeners re-check.
            true
        }
    }
}

/// Whether a raw bearer token is expired (or close enough to count).
/// Decode failures of any kind are "expired" - never an error.
fn token_is_expired(token: &str) -> bool {
    let Some(exp) = decode_expiry(token) else {
        return true;
    };
    let now = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs(),
        Err(_) => return true,
    };
    exp <= now + EXPIRY_MARGIN_SECS
}

/// Pull the `exp` claim out of a three-segment token without verifying the
/// signature - the client holds no key, expiry is all it may judge.
fn decode_expiry(token: &str) -> Option<u64> {
    let mut segments = token.split('.');
    let _header = segments.next()?;
    let payload = segments.next()?;
    segments.next()?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let claims: TokenClaims = serde_json::from_slice(&bytes).ok()?;
    claims.exp
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::Role;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    fn test_user() -> UserSummary {
        UserSummary {
            id: 1,
            email: "a@b.com".to_string(),
            name: "A".to_string(),
            role: Role::Student,
        }
    }

    /// Unsigned token with the given payload JSON, shaped like a real one
    fn raw_token(payload: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(b"{\"alg\":\"HS256\",\"typ\":\"JWT\"}");
        let body = URL_SAFE_NO_PAD.encode(payload.as_bytes());
        format!("{}.{}.sig", header, body)
    }

    fn now_secs() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    #[test]
    fn test_decode_expiry_reads_exp() {
        let token = raw_token("{\"exp\":12345,\"id\":1}");
        assert_eq!(decode_expiry(&token), Some(12345));
    }

    #[test]
    fn test_decode_expiry_rejects_garbage() {
        assert_eq!(decode_expiry("not-a-token"), None);
        assert_eq!(decode_expiry("only.two"), None);
        assert_eq!(decode_expiry(""), None);
        assert_eq!(decode_expiry("a.%%%.c"), None);
    }

    #[test]
    fn test_decode_expiry_missing_claim() {
        let token = raw_token("{\"id\":1}");
        assert_eq!(decode_expiry(&token), None);
    }

    #[test]
    fn test_token_far_future_not_expired() {
        let token = raw_token(&format!("{{\"exp\":{}}}", now_secs() + 3600));
        assert!(!token_is_expired(&token));
    }

    #[test]
    fn test_token_within_margin_expired() {
        let token = raw_token(&format!("{{\"exp\":{}}}", now_secs() + 10));
        assert!(token_is_expired(&token));
    }

    #[test]
    fn test_token_in_past_expired() {
        let token = raw_token(&format!("{{\"exp\":{}}}", now_secs() - 100));
        assert!(token_is_expired(&token));
    }

    #[test]
    fn test_malformed_token_expired() {
        assert!(token_is_expired("garbage"));
        assert!(token_is_expired(&raw_token("{\"id\":1}")));
    }

    #[test]
    fn test_login_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path());
        let session = Session {
            token: raw_token(&format!("{{\"exp\":{}}}", now_secs() + 3600)),
            user: test_user(),
        };

        store.login(&session);
        assert_eq!(store.get_user(), Some(session.user.clone()));
        assert_eq!(store.get_token(), Some(session.token.clone()));
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_logout_clears_everything() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path());
        store.login(&Session {
            token: "t".to_string(),
            user: test_user(),
        });

        store.logout();
        assert_eq!(store.get_user(), None);
        assert_eq!(store.get_token(), None);
        assert!(!store.is_authenticated());

        // idempotent
        store.logout();
        assert_eq!(store.get_user(), None);
    }

    #[test]
    fn test_corrupt_user_record_self_heals() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path());
        store.login(&Session {
            token: "t".to_string(),
            user: test_user(),
        });

        // Corrupt the user record behind the store's back
        fs::write(dir.path().join(USER_KEY), "{ not json").unwrap();

        assert_eq!(store.get_user(), None);
        // Self-healing cleared the token too
        assert_eq!(store.get_token(), None);
    }

    #[test]
    fn test_notify_on_login_and_real_logout_only() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path());
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        store.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.login(&Session {
            token: "t".to_string(),
            user: test_user(),
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        store.logout();
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        // No-op logout does not ring the bell again
        store.logout();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path());
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let id = store.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.unsubscribe(id);
        store.login(&Session {
            token: "t".to_string(),
            user: test_user(),
        });
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
