//! egui Native Desktop App Module
//!
//! This module provides the native desktop application using egui/eframe
//! that connects to the ProjectHub backend.
//!
//! # Architecture
//!
//! The egui_app module is organized into focused submodules:
//!
//! - **`config`** - Configuration management (backend URL resolution)
//! - **`session`** - Persisted session store with change notification
//! - **`guard`** - Auth gate for protected views
//! - **`api`** - Backend API client
//! - **`types`** - Request/response payloads and app view states
//! - **`state`** - App state and pending-operation plumbing
//! - **`views`** - UI rendering
//! - **`theme`** - Color constants
//! - **`main`** - Application entry point (binary)
//!
//! # Session flow
//!
//! The session store is the single owner of the persisted credential; the
//! guard consults `is_authenticated()` on every pass through a protected
//! view and routes to the login view (after forcing a logout) when the
//! check fails. The API client reads the token through the store but never
//! writes it - the login flow in `state` persists a successful session.

pub mod api;
pub mod config;
pub mod guard;
pub mod session;
pub mod state;
pub mod theme;
pub mod types;
pub mod views;

// Re-export commonly used types
pub use api::ApiClient;
pub use config::Config;
pub use guard::{GuardState, SessionGuard};
pub use session::{Session, SessionStore};
pub use state::{AppState, AuthState};
pub use types::AppView;
