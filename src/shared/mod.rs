//! Shared Module
//!
//! This module contains types and data structures used throughout the
//! client. All types are designed for serialization and transmission over
//! HTTP - the backend owns the canonical records, the client only displays
//! them.

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Domain transfer types
pub mod models;

/// Re-export commonly used types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::{ApiError, StorageError};
pub use models::{Deliverable, Evaluation, Group, Project, Promotion, Role, UserSummary};
