//! Shared test helpers
//!
//! Token forging and temp-directory session stores. Tokens are minted with
//! the same crate and shape the backend uses (HS256, numeric `exp` and user
//! `id` claims), so the client decodes exactly what production hands it.
#![allow(dead_code)]

use jsonwebtoken::{encode, EncodingKey, Header};
use projecthub::egui_app::session::{Session, SessionStore};
use projecthub::shared::models::{Role, UserSummary};
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

pub const TEST_SECRET: &[u8] = b"test-secret";

#[derive(Debug, Serialize)]
struct Claims {
    id: i64,
    exp: u64,
}

pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock after epoch")
        .as_secs()
}

/// Mint a signed token whose `exp` sits `offset_secs` away from now
pub fn make_token(offset_secs: i64) -> String {
    let exp = (now_secs() as i64 + offset_secs).max(0) as u64;
    encode(
        &Header::default(),
        &Claims { id: 1, exp },
        &EncodingKey::from_secret(TEST_SECRET),
    )
    .expect("token encodes")
}

pub fn test_user() -> UserSummary {
    UserSummary {
        id: 1,
        email: "a@b.com".to_string(),
        name: "A".to_string(),
        role: Role::Student,
    }
}

/// A session whose token is valid for another hour
pub fn valid_session() -> Session {
    Session {
        token: make_token(3600),
        user: test_user(),
    }
}

/// Session store over a fresh temp directory. Keep the `TempDir` alive for
/// the duration of the test.
pub fn temp_store() -> (tempfile::TempDir, SessionStore) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = SessionStore::open(dir.path());
    (dir, store)
}
