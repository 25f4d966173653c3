//! Theme Module
//!
//! Color scheme for the ProjectHub desktop app: a dark slate base with an
//! indigo accent.

pub mod colors;

pub use colors::*;
