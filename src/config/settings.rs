//! User settings and preferences for Inkpad
//!
//! This module defines the `Settings` struct that holds all user-configurable
//! options, with serde support for JSON persistence.

use crate::editor::DEFAULT_AUTOSAVE_DELAY;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Theme Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Available color themes for the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

// ─────────────────────────────────────────────────────────────────────────────
// Window Size Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Window dimensions and position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSize {
    /// Window width in pixels
    pub width: f32,
    /// Window height in pixels
    pub height: f32,
    /// Window X position (optional, for restoring position)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// Window Y position (optional, for restoring position)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    /// Whether the window was maximized
    #[serde(default)]
    pub maximized: bool,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 1100.0,
            height: 720.0,
            x: None,
            y: None,
            maximized: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// User preferences and application settings.
///
/// This struct is serialized to JSON and persisted to the user's config directory.
/// All fields have sensible defaults via the `Default` trait and `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Appearance
    // ─────────────────────────────────────────────────────────────────────────
    /// Color theme (light, dark, or system)
    pub theme: Theme,

    /// Font size for the editor and preview (in points)
    pub font_size: f32,

    /// Whether the rendered preview pane is shown next to the editor
    pub show_preview: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // Editor Behavior
    // ─────────────────────────────────────────────────────────────────────────
    /// Quiet period after the last keystroke before edits are saved
    pub autosave_delay_ms: u64,

    // ─────────────────────────────────────────────────────────────────────────
    // Window State
    // ─────────────────────────────────────────────────────────────────────────
    /// Window size and position
    pub window_size: WindowSize,

    /// Split ratio for the editor/preview panes (0.0 to 1.0)
    pub split_ratio: f32,

    /// Width of the document list in pixels
    pub sidebar_width: f32,

    // ─────────────────────────────────────────────────────────────────────────
    // Export Settings
    // ─────────────────────────────────────────────────────────────────────────
    /// Last directory used for export
    pub last_export_directory: Option<PathBuf>,

    /// Whether to open exported HTML files after export
    pub open_after_export: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Appearance
            theme: Theme::default(),
            font_size: 14.0,
            show_preview: true,

            // Editor Behavior
            autosave_delay_ms: DEFAULT_AUTOSAVE_DELAY.as_millis() as u64,

            // Window State
            window_size: WindowSize::default(),
            split_ratio: 0.5,
            sidebar_width: 220.0,

            // Export Settings
            last_export_directory: None,
            open_after_export: false,
        }
    }
}

impl Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Validation Constants and Sanitization
    // ─────────────────────────────────────────────────────────────────────────

    /// Minimum allowed font size.
    pub const MIN_FONT_SIZE: f32 = 8.0;
    /// Maximum allowed font size.
    pub const MAX_FONT_SIZE: f32 = 72.0;
    /// Minimum window dimension.
    pub const MIN_WINDOW_SIZE: f32 = 200.0;
    /// Maximum window dimension.
    pub const MAX_WINDOW_SIZE: f32 = 10000.0;
    /// Minimum autosave delay in milliseconds.
    pub const MIN_AUTOSAVE_DELAY_MS: u64 = 50;
    /// Maximum autosave delay in milliseconds.
    pub const MAX_AUTOSAVE_DELAY_MS: u64 = 5000;
    /// Minimum sidebar width.
    pub const MIN_SIDEBAR_WIDTH: f32 = 140.0;
    /// Maximum sidebar width.
    pub const MAX_SIDEBAR_WIDTH: f32 = 480.0;

    /// The autosave quiet period.
    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }

    /// Sanitize settings by clamping values to valid ranges.
    ///
    /// This is useful after loading settings from a file that might have
    /// been manually edited with invalid values.
    pub fn sanitize(&mut self) {
        self.font_size = self
            .font_size
            .clamp(Self::MIN_FONT_SIZE, Self::MAX_FONT_SIZE);

        self.window_size.width = self
            .window_size
            .width
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);
        self.window_size.height = self
            .window_size
            .height
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);

        self.split_ratio = self.split_ratio.clamp(0.0, 1.0);

        self.sidebar_width = self
            .sidebar_width
            .clamp(Self::MIN_SIDEBAR_WIDTH, Self::MAX_SIDEBAR_WIDTH);

        self.autosave_delay_ms = self
            .autosave_delay_ms
            .clamp(Self::MIN_AUTOSAVE_DELAY_MS, Self::MAX_AUTOSAVE_DELAY_MS);

        // A remembered directory that no longer exists is forgotten
        if let Some(dir) = &self.last_export_directory {
            if !dir.is_dir() {
                self.last_export_directory = None;
            }
        }
    }

    /// Load settings and sanitize them to ensure validity.
    ///
    /// This is a convenience method that deserializes and then sanitizes.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();

        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.font_size, 14.0);
        assert!(settings.show_preview);
        assert_eq!(settings.autosave_delay_ms, 400);
        assert_eq!(settings.autosave_delay(), Duration::from_millis(400));
        assert_eq!(settings.split_ratio, 0.5);
        assert!(settings.last_export_directory.is_none());
        assert!(!settings.open_after_export);
    }

    #[test]
    fn test_theme_serialization() {
        assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        assert_eq!(serde_json::to_string(&Theme::System).unwrap(), "\"system\"");
    }

    #[test]
    fn test_theme_deserialization() {
        assert_eq!(
            serde_json::from_str::<Theme>("\"dark\"").unwrap(),
            Theme::Dark
        );
        assert!(serde_json::from_str::<Theme>("\"sepia\"").is_err());
    }

    #[test]
    fn test_settings_serialization_roundtrip() {
        let original = Settings {
            theme: Theme::System,
            autosave_delay_ms: 1000,
            ..Settings::default()
        };
        let json = serde_json::to_string_pretty(&original).unwrap();
        let deserialized: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_settings_deserialize_with_defaults() {
        // Minimal JSON - should fill in defaults
        let json = r#"{"theme": "dark"}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.font_size, 14.0);
        assert_eq!(settings.autosave_delay_ms, 400);
    }

    #[test]
    fn test_settings_deserialize_empty_json() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_window_size_default() {
        let size = WindowSize::default();
        assert!(size.x.is_none());
        assert!(size.y.is_none());
        assert!(!size.maximized);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Sanitization tests
    // ─────────────────────────────────────────────────────────────────────────
    #[test]
    fn test_sanitize_font_size() {
        let mut settings = Settings::default();
        settings.font_size = 4.0;
        settings.sanitize();
        assert_eq!(settings.font_size, Settings::MIN_FONT_SIZE);

        settings.font_size = 100.0;
        settings.sanitize();
        assert_eq!(settings.font_size, Settings::MAX_FONT_SIZE);
    }

    #[test]
    fn test_sanitize_autosave_delay() {
        let mut settings = Settings::default();
        settings.autosave_delay_ms = 0;
        settings.sanitize();
        assert_eq!(settings.autosave_delay_ms, Settings::MIN_AUTOSAVE_DELAY_MS);

        settings.autosave_delay_ms = 60_000;
        settings.sanitize();
        assert_eq!(settings.autosave_delay_ms, Settings::MAX_AUTOSAVE_DELAY_MS);
    }

    #[test]
    fn test_sanitize_split_ratio() {
        let mut settings = Settings::default();
        settings.split_ratio = -0.5;
        settings.sanitize();
        assert_eq!(settings.split_ratio, 0.0);

        settings.split_ratio = 1.5;
        settings.sanitize();
        assert_eq!(settings.split_ratio, 1.0);
    }

    #[test]
    fn test_sanitize_forgets_missing_export_directory() {
        let mut settings = Settings::default();
        settings.last_export_directory = Some(PathBuf::from("/definitely/not/a/real/dir"));
        settings.sanitize();
        assert!(settings.last_export_directory.is_none());
    }

    #[test]
    fn test_from_json_sanitized() {
        let json = r#"{"font_size": 4.0, "split_ratio": 2.0, "autosave_delay_ms": 10}"#;
        let settings = Settings::from_json_sanitized(json).unwrap();
        assert_eq!(settings.font_size, Settings::MIN_FONT_SIZE);
        assert_eq!(settings.split_ratio, 1.0);
        assert_eq!(settings.autosave_delay_ms, 50);
    }
}
