//! Theme System for Inkpad
//!
//! Light and dark palettes for the egui UI. The `Theme` enum in
//! `config::settings` (Light/Dark/System) selects which one is applied.
//!
//! - `manager.rs` - applies the selected theme to the egui context

pub mod manager;

pub use manager::ThemeManager;

use eframe::egui::{Color32, Rounding, Stroke, Visuals};

// ─────────────────────────────────────────────────────────────────────────────
// Palette
// ─────────────────────────────────────────────────────────────────────────────

/// Colors used by the sidebar and the preview pane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Main panel background
    pub background: Color32,
    /// Sidebar background
    pub sidebar: Color32,
    /// Highlight for the selected document
    pub selected: Color32,
    /// Heading text in the preview
    pub heading: Color32,
    /// Link text in the preview
    pub link: Color32,
    /// Background of code spans and blocks
    pub code_bg: Color32,
    /// Vertical bar beside block quotes
    pub quote_bar: Color32,
    /// Secondary text (timestamps, hints)
    pub muted: Color32,
    /// Destructive actions
    pub danger: Color32,
}

impl Palette {
    /// Light palette.
    pub fn light() -> Self {
        Self {
            background: Color32::from_rgb(255, 255, 255),
            sidebar: Color32::from_rgb(245, 245, 247),
            selected: Color32::from_rgb(219, 234, 254),
            heading: Color32::from_rgb(17, 24, 39),
            link: Color32::from_rgb(37, 99, 235),
            code_bg: Color32::from_rgb(243, 244, 246),
            quote_bar: Color32::from_rgb(209, 213, 219),
            muted: Color32::from_rgb(107, 114, 128),
            danger: Color32::from_rgb(220, 38, 38),
        }
    }

    /// Dark palette.
    pub fn dark() -> Self {
        Self {
            background: Color32::from_rgb(30, 30, 30),
            sidebar: Color32::from_rgb(24, 24, 27),
            selected: Color32::from_rgb(30, 58, 95),
            heading: Color32::from_rgb(243, 244, 246),
            link: Color32::from_rgb(96, 165, 250),
            code_bg: Color32::from_rgb(45, 45, 48),
            quote_bar: Color32::from_rgb(75, 85, 99),
            muted: Color32::from_rgb(156, 163, 175),
            danger: Color32::from_rgb(248, 113, 113),
        }
    }

    /// Palette matching the given egui visuals.
    pub fn for_visuals(visuals: &Visuals) -> Self {
        if visuals.dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }

    /// egui visuals built on this palette.
    pub fn to_visuals(&self, dark: bool) -> Visuals {
        let mut visuals = if dark {
            Visuals::dark()
        } else {
            Visuals::light()
        };

        visuals.panel_fill = self.background;
        visuals.window_fill = self.background;
        visuals.faint_bg_color = self.sidebar;
        visuals.code_bg_color = self.code_bg;
        visuals.hyperlink_color = self.link;
        visuals.error_fg_color = self.danger;
        visuals.selection.stroke = Stroke::new(1.0, self.link);
        visuals.window_rounding = Rounding::same(6.0);

        visuals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_for_visuals() {
        assert_eq!(Palette::for_visuals(&Visuals::dark()), Palette::dark());
        assert_eq!(Palette::for_visuals(&Visuals::light()), Palette::light());
    }

    #[test]
    fn test_to_visuals_keeps_mode() {
        assert!(Palette::dark().to_visuals(true).dark_mode);
        assert!(!Palette::light().to_visuals(false).dark_mode);
        assert_eq!(Palette::light().to_visuals(false).panel_fill, Palette::light().background);
    }
}
