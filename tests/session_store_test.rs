//! Session store integration tests
//!
//! Exercises the persisted session lifecycle: login/read round-trips,
//! idempotent logout, the token expiry margin, and the self-healing
//! behavior on corrupt stored state.

mod common;

use common::{make_token, temp_store, test_user, valid_session};
use pretty_assertions::assert_eq;
use projecthub::egui_app::session::{Session, SessionStore, TOKEN_KEY, USER_KEY};

#[test]
fn test_login_then_read_back() {
    let (_dir, store) = temp_store();
    let session = valid_session();

    store.login(&session);

    assert_eq!(store.get_user(), Some(session.user.clone()));
    assert_eq!(store.get_token(), Some(session.token.clone()));
}

#[test]
fn test_fresh_store_has_no_session() {
    let (_dir, store) = temp_store();
    assert_eq!(store.get_user(), None);
    assert_eq!(store.get_token(), None);
    assert!(!store.is_authenticated());
    assert!(store.is_token_expired());
}

#[test]
fn test_session_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let session = valid_session();
    {
        let store = SessionStore::open(dir.path());
        store.login(&session);
    }

    // A new store over the same directory sees the previous session
    let store = SessionStore::open(dir.path());
    assert_eq!(store.get_user(), Some(session.user));
    assert!(store.is_authenticated());
}

#[test]
fn test_logout_clears_both_keys() {
    let (_dir, store) = temp_store();
    store.login(&valid_session());

    store.logout();

    assert_eq!(store.get_user(), None);
    assert_eq!(store.get_token(), None);
}

#[test]
fn test_logout_is_idempotent() {
    let (_dir, store) = temp_store();

    // No prior session: still fine
    store.logout();
    assert_eq!(store.get_user(), None);

    store.login(&valid_session());
    store.logout();
    store.logout();
    assert_eq!(store.get_user(), None);
    assert_eq!(store.get_token(), None);
}

#[test]
fn test_login_replaces_previous_session() {
    let (_dir, store) = temp_store();
    store.login(&valid_session());

    let mut replacement = valid_session();
    replacement.user.id = 2;
    replacement.user.email = "b@c.org".to_string();
    store.login(&replacement);

    assert_eq!(store.get_user(), Some(replacement.user));
}

#[test]
fn test_token_expiry_margin() {
    let (_dir, store) = temp_store();

    // Comfortably beyond the 30 s margin
    store.login(&Session {
        token: make_token(3600),
        user: test_user(),
    });
    assert!(!store.is_token_expired());

    // Inside the margin counts as expired already
    store.login(&Session {
        token: make_token(10),
        user: test_user(),
    });
    assert!(store.is_token_expired());

    // Long gone
    store.login(&Session {
        token: make_token(-3600),
        user: test_user(),
    });
    assert!(store.is_token_expired());
}

#[test]
fn test_malformed_token_is_expired() {
    let (_dir, store) = temp_store();
    store.login(&Session {
        token: "definitely-not-a-jwt".to_string(),
        user: test_user(),
    });
    assert!(store.is_token_expired());
    assert!(!store.is_authenticated());
}

#[test]
fn test_is_authenticated_requires_all_three() {
    // All three conditions hold
    let (dir, store) = temp_store();
    store.login(&valid_session());
    assert!(store.is_authenticated());

    // Token file missing
    std::fs::remove_file(dir.path().join(TOKEN_KEY)).unwrap();
    assert!(!store.is_authenticated());

    // User record missing
    let (dir, store) = temp_store();
    store.login(&valid_session());
    std::fs::remove_file(dir.path().join(USER_KEY)).unwrap();
    assert!(!store.is_authenticated());

    // Token expired
    let (_dir, store) = temp_store();
    store.login(&Session {
        token: make_token(-60),
        user: test_user(),
    });
    assert!(!store.is_authenticated());
}

#[test]
fn test_corrupt_user_record_clears_both_keys() {
    let (dir, store) = temp_store();
    store.login(&valid_session());

    // Corrupt the user record directly, bypassing the store
    std::fs::write(dir.path().join(USER_KEY), "{ not json }").unwrap();

    assert_eq!(store.get_user(), None);
    // Self-healing removed the token as well
    assert_eq!(store.get_token(), None);
    assert!(!store.is_authenticated());
}

#[test]
fn test_session_lifecycle_scenario() {
    let (dir, store) = temp_store();

    store.login(&Session {
        token: make_token(3600),
        user: test_user(),
    });
    assert!(store.is_authenticated());

    // The token's lifetime runs out
    std::fs::write(dir.path().join(TOKEN_KEY), make_token(-1)).unwrap();
    assert!(!store.is_authenticated());

    store.logout();
    assert_eq!(store.get_user(), None);
}
