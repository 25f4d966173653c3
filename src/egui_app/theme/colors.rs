//! Color Constants
//!
//! All color constants used throughout the UI. Dark slate backgrounds with
//! an indigo accent.

use eframe::egui::Color32;

/// Main background - dark slate
pub const BG_DARK: Color32 = Color32::from_rgb(0x1A, 0x1D, 0x24);

/// Card/panel background - raised slate
pub const CARD_BG: Color32 = Color32::from_rgb(0x24, 0x28, 0x33);

/// Top bar background
pub const TOP_BAR_BG: Color32 = Color32::from_rgb(0x12, 0x14, 0x1A);

/// Accent for highlights and selected items - indigo
pub const ACCENT: Color32 = Color32::from_rgb(0x5B, 0x6C, 0xF0);

/// Primary action button fill
pub const BUTTON_PRIMARY: Color32 = Color32::from_rgb(0x4A, 0x58, 0xC7);

/// Secondary action button fill
pub const BUTTON_SECONDARY: Color32 = Color32::from_rgb(0x32, 0x38, 0x47);

/// Text on dark backgrounds
pub const TEXT_LIGHT: Color32 = Color32::from_rgb(0xE8, 0xEA, 0xF0);

/// Secondary text (muted)
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0x9A, 0xA1, 0xB0);

/// Error text
pub const ERROR: Color32 = Color32::from_rgb(0xE5, 0x5A, 0x5A);

/// Success text
pub const SUCCESS: Color32 = Color32::from_rgb(0x4C, 0xAF, 0x50);
