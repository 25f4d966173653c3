//! Session guard integration tests
//!
//! The guard may only let an authenticated session through; every failed
//! check must force a logout so no stale session outlives it.

mod common;

use assert_matches::assert_matches;
use common::{make_token, temp_store, test_user, valid_session};
use projecthub::egui_app::guard::{GuardState, SessionGuard};
use projecthub::egui_app::session::Session;

#[test]
fn test_authorizes_valid_session() {
    let (_dir, store) = temp_store();
    store.login(&valid_session());

    let mut guard = SessionGuard::new();
    assert_matches!(guard.evaluate(&store), GuardState::Authorized);
    // Stable across repeated passes
    assert_matches!(guard.evaluate(&store), GuardState::Authorized);
}

#[test]
fn test_redirects_without_session() {
    let (_dir, store) = temp_store();
    let mut guard = SessionGuard::new();
    assert_matches!(guard.evaluate(&store), GuardState::Redirecting);
}

#[test]
fn test_expired_session_is_logged_out_and_redirected() {
    let (_dir, store) = temp_store();
    store.login(&Session {
        token: make_token(-60),
        user: test_user(),
    });

    let mut guard = SessionGuard::new();
    assert_matches!(guard.evaluate(&store), GuardState::Redirecting);

    // The forced logout removed the partially-valid session
    assert_eq!(store.get_user(), None);
    assert_eq!(store.get_token(), None);
}

#[test]
fn test_redirecting_is_terminal_for_the_pass() {
    let (_dir, store) = temp_store();
    let mut guard = SessionGuard::new();
    assert_matches!(guard.evaluate(&store), GuardState::Redirecting);

    // A session appearing mid-pass does not flip the verdict
    store.login(&valid_session());
    assert_matches!(guard.evaluate(&store), GuardState::Redirecting);
}

#[test]
fn test_invalidate_restarts_the_check() {
    let (_dir, store) = temp_store();
    let mut guard = SessionGuard::new();
    assert_matches!(guard.evaluate(&store), GuardState::Redirecting);

    store.login(&valid_session());
    guard.invalidate();
    assert_matches!(guard.state(), GuardState::Checking);
    assert_matches!(guard.evaluate(&store), GuardState::Authorized);
}

#[test]
fn test_auth_change_notification_drives_recheck() {
    let (_dir, store) = temp_store();
    store.login(&valid_session());

    let mut guard = SessionGuard::new();
    assert_matches!(guard.evaluate(&store), GuardState::Authorized);

    // Another part of the app logs out; the change listener invalidates
    store.logout();
    guard.invalidate();
    assert_matches!(guard.evaluate(&store), GuardState::Redirecting);
}
