//! ProjectHub - Main Library
//!
//! ProjectHub is a native desktop client for a student-project management
//! backend: teachers create projects and schedule defenses, students form
//! groups, submit deliverables and receive grades. All business rules
//! (validation, grading, persistence) live in the external backend; this
//! crate owns the presentation layer and the client-side session mechanism.
//!
//! # Module Structure
//!
//! The library is organized into two main modules:
//!
//! - **`shared`** - Types used across the client
//!   - Domain transfer types (projects, groups, deliverables, evaluations)
//!   - Error types
//!   - Configuration
//!
//! - **`egui_app`** - Native desktop app (egui/eframe)
//!   - Session store and session guard
//!   - Backend API client
//!   - Views and app state
//!
//! # Session Mechanism
//!
//! Authentication state is cached locally so it survives restarts without a
//! server round trip, but a cached token is never trusted past its expiry:
//! every authentication check re-validates the token's `exp` claim. Corrupt
//! stored state is discarded, never repaired - the user re-authenticates.
//!
//! # Error Handling
//!
//! The library uses Rust's standard error handling:
//!
//! - `Result<T, E>` for fallible operations
//! - `Option<T>` for optional values
//! - Custom error types in `shared::error`

/// Shared types and data structures
pub mod shared;

/// egui native desktop app
pub mod egui_app;
