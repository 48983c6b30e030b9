//! Main application module for Inkpad
//!
//! This module implements the eframe App trait for the main application,
//! handling window management, UI updates, and event processing.

use crate::config::{Settings, WindowSize};
use crate::export::{
    copy_html_to_clipboard, export_file_name, generate_html_document, sanitize_file_name,
    write_export,
};
use crate::files::{save_html_dialog, save_markdown_dialog};
use crate::state::{default_storage, AppState};
use crate::storage::DocumentStorage;
use crate::theme::{Palette, ThemeManager};
use crate::ui::{
    show_confirm_dialog, show_editor_view, DialogResult, DocumentList, EditorAction,
    EditorViewOptions,
};
use eframe::egui;
use log::{debug, info, warn};
use std::path::Path;
use std::time::Instant;

/// Application name shown in the window title.
pub const APP_NAME: &str = "Inkpad";

/// Returns "Title - Inkpad", or "Inkpad" if nothing is being edited.
fn format_window_title(title: Option<&str>) -> String {
    match title {
        Some("") => format!("Untitled - {}", APP_NAME),
        Some(title) => format!("{} - {}", title, APP_NAME),
        None => APP_NAME.to_string(),
    }
}

/// Keyboard shortcut actions that need to be deferred.
///
/// These actions are detected in the input handling closure and executed
/// afterwards to avoid borrow conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyboardAction {
    /// New document (Ctrl+N)
    New,
    /// Write pending edits now (Ctrl+S)
    Save,
    /// Export as Markdown (Ctrl+E)
    ExportMarkdown,
    /// Export as HTML (Ctrl+Shift+E)
    ExportHtml,
    /// Cycle theme (Ctrl+Shift+T)
    CycleTheme,
}

/// The main application struct that holds all state and implements eframe::App.
pub struct InkpadApp {
    /// Central application state
    state: AppState<Box<dyn DocumentStorage>>,
    /// Theme manager for handling theme switching
    theme_manager: ThemeManager,
    /// Document list sidebar
    document_list: DocumentList,
    /// Last known window size (for detecting changes)
    last_window_size: Option<egui::Vec2>,
    /// Last known window position (for detecting changes)
    last_window_pos: Option<egui::Pos2>,
    /// Last title sent to the viewport
    last_title: String,
    /// Application start time for timing toast messages
    start_time: Instant,
}

impl InkpadApp {
    /// Create a new InkpadApp instance.
    ///
    /// Opens the document slot, binds the editor to the active document and
    /// applies the saved theme preference.
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        info!("Initializing {}", APP_NAME);

        let state = AppState::new(default_storage(), settings);

        let mut theme_manager = ThemeManager::new(state.settings.theme);
        theme_manager.apply_if_needed(&cc.egui_ctx, cc.integration_info.system_theme);
        info!("Applied initial theme: {:?}", state.settings.theme);

        let document_list = DocumentList::new(state.settings.sidebar_width);

        Self {
            state,
            theme_manager,
            document_list,
            last_window_size: None,
            last_window_pos: None,
            last_title: String::new(),
            start_time: Instant::now(),
        }
    }

    /// Get elapsed time since app start in seconds.
    fn get_app_time(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    fn toast(&mut self, message: impl Into<String>, duration: f64) {
        let time = self.get_app_time();
        self.state.show_toast(message, time, duration);
    }

    /// Update window size in settings if changed.
    ///
    /// Returns `true` if the window state was updated.
    fn update_window_state(&mut self, ctx: &egui::Context) -> bool {
        let Some(rect) = ctx.input(|i| i.viewport().outer_rect) else {
            return false;
        };
        let current_size = rect.size();
        let current_pos = rect.min;

        let size_changed = self
            .last_window_size
            .map(|s| (s - current_size).length() > 1.0)
            .unwrap_or(true);
        let pos_changed = self
            .last_window_pos
            .map(|p| (p - current_pos).length() > 1.0)
            .unwrap_or(true);

        if !(size_changed || pos_changed) {
            return false;
        }

        self.last_window_size = Some(current_size);
        self.last_window_pos = Some(current_pos);
        let maximized = ctx.input(|i| i.viewport().maximized.unwrap_or(false));

        self.state.update_settings(|s| {
            s.window_size = WindowSize {
                width: current_size.x,
                height: current_size.y,
                x: Some(current_pos.x),
                y: Some(current_pos.y),
                maximized,
            };
        });
        debug!(
            "Window state updated: {}x{} at ({}, {}), maximized: {}",
            current_size.x, current_size.y, current_pos.x, current_pos.y, maximized
        );
        true
    }

    /// Get the window title based on current state.
    fn window_title(&self) -> String {
        let editor = &self.state.editor;
        format_window_title(editor.is_bound().then(|| editor.title()))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    fn render_ui(&mut self, ctx: &egui::Context, now: Instant, enabled: bool) {
        let palette = Palette::for_visuals(&ctx.style().visuals);

        self.render_status_bar(ctx, &palette, enabled);

        let sidebar = self.document_list.show(
            ctx,
            self.state.store.documents(),
            self.state.store.active_id(),
            &palette,
            enabled,
        );
        if let Some(width) = sidebar.new_width {
            self.state.update_settings(|s| s.sidebar_width = width);
        }
        if sidebar.create_requested {
            self.state.create_document();
        }
        if let Some(id) = sidebar.selected {
            self.state.select_document(&id);
        }
        if let Some(id) = sidebar.delete_requested {
            self.state.request_delete(&id);
        }

        let options = EditorViewOptions {
            font_size: self.state.settings.font_size,
            split_ratio: self.state.settings.split_ratio,
            show_preview: self.state.settings.show_preview,
        };
        let action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                ui.add_enabled_ui(enabled, |ui| {
                    show_editor_view(ui, &mut self.state.editor, options, &palette, now)
                })
                .inner
            })
            .inner;

        match action {
            Some(EditorAction::ExportMarkdown) => self.handle_export_markdown(),
            Some(EditorAction::ExportHtml) => self.handle_export_html(ctx),
            Some(EditorAction::CopyHtml) => self.handle_copy_as_html(),
            Some(EditorAction::Delete) => self.state.request_delete_active(),
            Some(EditorAction::CreateDocument) => {
                self.state.create_document();
            }
            None => {}
        }
    }

    fn render_status_bar(&mut self, ctx: &egui::Context, palette: &Palette, enabled: bool) {
        let mut cycle_theme = false;
        let mut show_preview = self.state.settings.show_preview;

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.add_enabled_ui(enabled, |ui| {
                ui.horizontal(|ui| {
                    let count = self.state.store.len();
                    ui.label(
                        egui::RichText::new(format!(
                            "{} document{}",
                            count,
                            if count == 1 { "" } else { "s" }
                        ))
                        .color(palette.muted),
                    );

                    ui.separator();
                    let status = if self.state.editor.has_unsaved_changes() {
                        "Editing…"
                    } else if self.state.store.last_save_failed() {
                        "Not saved"
                    } else {
                        "Saved"
                    };
                    ui.label(egui::RichText::new(status).color(palette.muted));

                    if let Some(toast) = &self.state.ui.toast_message {
                        ui.separator();
                        ui.label(egui::RichText::new(toast).italics());
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let theme_label = format!(
                            "{} {}",
                            self.theme_manager.icon(),
                            self.theme_manager.label()
                        );
                        if ui
                            .button(theme_label)
                            .on_hover_text("Cycle theme (Ctrl+Shift+T)")
                            .clicked()
                        {
                            cycle_theme = true;
                        }
                        ui.checkbox(&mut show_preview, "Preview");
                    });
                });
            });
        });

        if show_preview != self.state.settings.show_preview {
            self.state.update_settings(|s| s.show_preview = show_preview);
        }
        if cycle_theme {
            self.handle_cycle_theme();
        }
    }

    /// Show the pending confirmation, if any, and act on the answer.
    fn render_confirm_dialog(&mut self, ctx: &egui::Context) {
        if !self.state.ui.show_confirm_dialog {
            return;
        }
        let palette = Palette::for_visuals(&ctx.style().visuals);
        let message = self.state.ui.confirm_dialog_message.clone();

        match show_confirm_dialog(ctx, "Delete document", &message, "Delete", &palette) {
            DialogResult::Confirmed => {
                self.state.handle_confirmed_action();
                self.toast("Document deleted", 2.0);
            }
            DialogResult::Cancelled => self.state.cancel_pending_action(),
            DialogResult::None => {}
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Keyboard Shortcuts
    // ─────────────────────────────────────────────────────────────────────────

    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        let action = ctx.input(|i| {
            if !i.modifiers.ctrl {
                return None;
            }

            // Ctrl+Shift+E: Export HTML (check first since it's more specific)
            if i.modifiers.shift && i.key_pressed(egui::Key::E) {
                debug!("Keyboard shortcut: Ctrl+Shift+E (Export HTML)");
                return Some(KeyboardAction::ExportHtml);
            }

            // Ctrl+Shift+T: Cycle Theme
            if i.modifiers.shift && i.key_pressed(egui::Key::T) {
                debug!("Keyboard shortcut: Ctrl+Shift+T (Cycle Theme)");
                return Some(KeyboardAction::CycleTheme);
            }

            // Ctrl+E: Export Markdown
            if i.key_pressed(egui::Key::E) {
                debug!("Keyboard shortcut: Ctrl+E (Export Markdown)");
                return Some(KeyboardAction::ExportMarkdown);
            }

            // Ctrl+S: Save
            if i.key_pressed(egui::Key::S) {
                debug!("Keyboard shortcut: Ctrl+S (Save)");
                return Some(KeyboardAction::Save);
            }

            // Ctrl+N: New document
            if i.key_pressed(egui::Key::N) {
                debug!("Keyboard shortcut: Ctrl+N (New)");
                return Some(KeyboardAction::New);
            }

            None
        });

        match action {
            Some(KeyboardAction::New) => {
                self.state.create_document();
            }
            Some(KeyboardAction::Save) => {
                if self.state.flush_edits() {
                    self.toast("Saved", 1.5);
                }
            }
            Some(KeyboardAction::ExportMarkdown) => self.handle_export_markdown(),
            Some(KeyboardAction::ExportHtml) => self.handle_export_html(ctx),
            Some(KeyboardAction::CycleTheme) => self.handle_cycle_theme(),
            None => {}
        }
    }

    fn handle_cycle_theme(&mut self) {
        let theme = self.theme_manager.cycle();
        self.state.update_settings(|s| s.theme = theme);
        let label = format!("Theme: {}", self.theme_manager.label());
        self.toast(label, 1.5);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Export Handlers
    // ─────────────────────────────────────────────────────────────────────────

    /// Remember the directory of an exported file for the next dialog.
    fn remember_export_directory(&mut self, path: &Path) {
        if let Some(parent) = path.parent() {
            let parent = parent.to_path_buf();
            self.state
                .update_settings(|s| s.last_export_directory = Some(parent));
        }
    }

    /// Handle exporting the current document as a Markdown file.
    fn handle_export_markdown(&mut self) {
        let Some(export) = self.state.editor.export() else {
            self.toast("No document to export", 2.0);
            return;
        };

        let initial_dir = self.state.settings.last_export_directory.clone();
        let Some(path) = save_markdown_dialog(initial_dir.as_deref(), &export.suggested_file_name())
        else {
            debug!("Markdown export cancelled");
            return;
        };

        match write_export(&path, &export.contents) {
            Ok(()) => {
                self.remember_export_directory(&path);
                self.toast(format!("Exported to {}", path.display()), 2.5);
            }
            Err(e) => {
                warn!("Markdown export failed: {}", e);
                self.toast(format!("Export failed: {}", e), 3.0);
            }
        }
    }

    /// Handle exporting the current document as an HTML file.
    fn handle_export_html(&mut self, ctx: &egui::Context) {
        if !self.state.editor.is_bound() {
            self.toast("No document to export", 2.0);
            return;
        }

        let title = self.state.editor.title().to_string();
        let default_name = sanitize_file_name(&export_file_name(&title, "html"));
        let initial_dir = self.state.settings.last_export_directory.clone();

        let Some(path) = save_html_dialog(initial_dir.as_deref(), &default_name) else {
            debug!("HTML export cancelled");
            return;
        };

        let dark = ctx.style().visuals.dark_mode;
        let html = generate_html_document(self.state.editor.content(), &title, dark);

        match write_export(&path, html.as_bytes()) {
            Ok(()) => {
                self.remember_export_directory(&path);
                self.toast(format!("Exported to {}", path.display()), 2.5);

                if self.state.settings.open_after_export {
                    if let Err(e) = open::that(&path) {
                        warn!("Failed to open exported file: {}", e);
                    }
                }
            }
            Err(e) => {
                warn!("HTML export failed: {}", e);
                self.toast(format!("Export failed: {}", e), 3.0);
            }
        }
    }

    /// Handle copying the current document as HTML to clipboard.
    fn handle_copy_as_html(&mut self) {
        if !self.state.editor.is_bound() {
            self.toast("No document to copy", 2.0);
            return;
        }

        match copy_html_to_clipboard(self.state.editor.content()) {
            Ok(()) => {
                info!("Copied HTML to clipboard");
                self.toast("HTML copied to clipboard", 2.0);
            }
            Err(e) => {
                warn!("Failed to copy HTML to clipboard: {}", e);
                self.toast(format!("Copy failed: {}", e), 3.0);
            }
        }
    }
}

impl eframe::App for InkpadApp {
    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        // Apply theme if needed (handles System theme changes)
        self.theme_manager
            .apply_if_needed(ctx, frame.info().system_theme);

        // Write edits whose quiet period has passed
        let now = Instant::now();
        self.state.poll_autosave(now);

        // Update toast message (clear if expired)
        let current_time = self.get_app_time();
        self.state.update_toast(current_time);

        let title = self.window_title();
        if title != self.last_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.last_title = title;
        }

        // Track window size/position changes for persistence
        self.update_window_state(ctx);

        // The confirmation dialog is modal: nothing else reacts while it is open
        let modal_open = self.state.ui.show_confirm_dialog;
        if !modal_open {
            self.handle_keyboard_shortcuts(ctx);
        }

        self.render_ui(ctx, now, !modal_open);
        self.render_confirm_dialog(ctx);

        // Wake up when the autosave is due, even without input
        if let Some(remaining) = self.state.editor.autosave_remaining(Instant::now()) {
            ctx.request_repaint_after(remaining);
        }
        if let Some(expires_at) = self.state.ui.toast_expires_at {
            let remaining = (expires_at - self.get_app_time()).max(0.0);
            ctx.request_repaint_after(std::time::Duration::from_secs_f64(remaining));
        }
    }

    /// Called when the application is about to close.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application exiting");
        self.state.shutdown();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_title() {
        assert_eq!(format_window_title(None), "Inkpad");
        assert_eq!(format_window_title(Some("Plan")), "Plan - Inkpad");
        assert_eq!(format_window_title(Some("")), "Untitled - Inkpad");
    }

    #[test]
    fn test_window_title_keeps_blank_title() {
        assert_eq!(format_window_title(Some("  ")), "   - Inkpad");
    }
}
