//! Theme Manager for Inkpad
//!
//! Holds the theme preference and applies the matching visuals to the
//! egui context.

use eframe::egui::{Context, Visuals};
use log::{debug, info};

use super::Palette;
use crate::config::Theme;

/// Manages theme state and applies themes to the egui context.
#[derive(Debug, Clone)]
pub struct ThemeManager {
    /// Current theme setting (Light, Dark, or System)
    current_theme: Theme,
    /// Whether the theme needs to be reapplied
    needs_apply: bool,
    /// Last OS dark mode reported by eframe; `None` when unknown
    last_system_dark_mode: Option<bool>,
}

impl ThemeManager {
    /// Create a new ThemeManager with the given initial theme.
    pub fn new(theme: Theme) -> Self {
        info!("ThemeManager initialized with theme: {:?}", theme);
        Self {
            current_theme: theme,
            needs_apply: true,
            last_system_dark_mode: None,
        }
    }

    /// Get the current theme setting.
    pub fn current_theme(&self) -> Theme {
        self.current_theme
    }

    /// Set the theme and mark for reapplication.
    pub fn set_theme(&mut self, theme: Theme) {
        if self.current_theme != theme {
            info!("Theme changed from {:?} to {:?}", self.current_theme, theme);
            self.current_theme = theme;
            self.needs_apply = true;
        }
    }

    /// Cycle Light → Dark → System → Light.
    ///
    /// Returns the new theme.
    pub fn cycle(&mut self) -> Theme {
        let new_theme = match self.current_theme {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::System,
            Theme::System => Theme::Light,
        };
        self.set_theme(new_theme);
        new_theme
    }

    /// Check if the theme needs to be reapplied.
    pub fn needs_apply(&self) -> bool {
        self.needs_apply
    }

    /// Apply the current theme to the egui context.
    fn apply(&mut self, ctx: &Context) {
        let dark = self.resolve_dark();
        ctx.set_visuals(Self::visuals(dark));
        self.needs_apply = false;
        debug!("Applied theme: {:?} (dark: {})", self.current_theme, dark);
    }

    /// Apply the theme only if it changed or the system preference changed.
    ///
    /// `system_theme` is the OS preference as reported by eframe. eframe
    /// replaces the visuals with its own defaults when the OS theme changes,
    /// so a change reapplies the theme whatever the preference.
    ///
    /// Returns `true` if the theme was applied.
    pub fn apply_if_needed(&mut self, ctx: &Context, system_theme: Option<eframe::Theme>) -> bool {
        let system_dark = system_theme.map(|theme| theme == eframe::Theme::Dark);
        if self.last_system_dark_mode != system_dark {
            debug!("System dark mode changed to: {:?}", system_dark);
            self.last_system_dark_mode = system_dark;
            self.needs_apply = true;
        }

        if self.needs_apply {
            self.apply(ctx);
            true
        } else {
            false
        }
    }

    fn resolve_dark(&self) -> bool {
        match self.current_theme {
            Theme::Light => false,
            Theme::Dark => true,
            // Unknown OS preference falls back to eframe's default theme
            Theme::System => self.last_system_dark_mode.unwrap_or(true),
        }
    }

    /// egui visuals for a light or dark appearance.
    pub fn visuals(dark: bool) -> Visuals {
        if dark {
            Palette::dark().to_visuals(true)
        } else {
            Palette::light().to_visuals(false)
        }
    }

    /// Get a display label for the current theme.
    pub fn label(&self) -> &'static str {
        match self.current_theme {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::System => "System",
        }
    }

    /// Get an icon for the current theme.
    pub fn icon(&self) -> &'static str {
        match self.current_theme {
            Theme::Light => "☀",
            Theme::Dark => "🌙",
            Theme::System => "💻",
        }
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_manager_new() {
        let manager = ThemeManager::new(Theme::Dark);
        assert_eq!(manager.current_theme(), Theme::Dark);
        assert!(manager.needs_apply());
    }

    #[test]
    fn test_theme_manager_set_same_theme() {
        let mut manager = ThemeManager::new(Theme::Light);
        manager.needs_apply = false;

        manager.set_theme(Theme::Light);
        assert!(!manager.needs_apply());

        manager.set_theme(Theme::Dark);
        assert!(manager.needs_apply());
    }

    #[test]
    fn test_theme_manager_cycle() {
        let mut manager = ThemeManager::new(Theme::Light);
        assert_eq!(manager.cycle(), Theme::Dark);
        assert_eq!(manager.cycle(), Theme::System);
        assert_eq!(manager.cycle(), Theme::Light);
    }

    #[test]
    fn test_theme_manager_labels() {
        let mut manager = ThemeManager::new(Theme::Light);
        assert_eq!(manager.label(), "Light");
        assert_eq!(manager.icon(), "☀");

        manager.set_theme(Theme::System);
        assert_eq!(manager.label(), "System");
        assert_eq!(manager.icon(), "💻");
    }

    #[test]
    fn test_apply_clears_flag() {
        let ctx = Context::default();
        let mut manager = ThemeManager::new(Theme::Dark);
        assert!(manager.apply_if_needed(&ctx, None));
        assert!(ctx.style().visuals.dark_mode);
        assert!(!manager.apply_if_needed(&ctx, None));
    }

    #[test]
    fn test_system_theme_follows_os_not_current_visuals() {
        let ctx = Context::default();
        let mut manager = ThemeManager::new(Theme::Dark);
        manager.apply_if_needed(&ctx, Some(eframe::Theme::Light));
        assert!(ctx.style().visuals.dark_mode);

        manager.cycle();
        assert_eq!(manager.current_theme(), Theme::System);
        assert!(manager.apply_if_needed(&ctx, Some(eframe::Theme::Light)));
        assert!(!ctx.style().visuals.dark_mode);
    }

    #[test]
    fn test_os_change_reapplies_fixed_theme() {
        let ctx = Context::default();
        let mut manager = ThemeManager::new(Theme::Light);
        manager.apply_if_needed(&ctx, Some(eframe::Theme::Light));
        assert!(!manager.apply_if_needed(&ctx, Some(eframe::Theme::Light)));

        // eframe swaps in its own dark visuals on an OS change
        ctx.set_visuals(Visuals::dark());
        assert!(manager.apply_if_needed(&ctx, Some(eframe::Theme::Dark)));
        assert!(!ctx.style().visuals.dark_mode);
    }

    #[test]
    fn test_unknown_system_theme_defaults_to_dark() {
        let ctx = Context::default();
        let mut manager = ThemeManager::new(Theme::System);
        manager.apply_if_needed(&ctx, None);
        assert!(ctx.style().visuals.dark_mode);
    }
}
