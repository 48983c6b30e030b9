//! Editor View Component
//!
//! The central panel: title field and toolbar on top, the Markdown text
//! area on the left and the rendered preview on the right. When no
//! document is bound an empty-state hint is shown instead.

use crate::editor::EditorPanel;
use crate::preview::MarkdownView;
use crate::theme::Palette;
use eframe::egui::{self, RichText, ScrollArea, TextEdit, Ui};
use std::time::Instant;

/// Shown when there is no document to edit.
pub const EMPTY_STATE_MESSAGE: &str = "No document selected. Create a new document.";

/// Toolbar actions requested by the editor view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    ExportMarkdown,
    ExportHtml,
    CopyHtml,
    Delete,
    CreateDocument,
}

/// Layout options for the editor view.
#[derive(Debug, Clone, Copy)]
pub struct EditorViewOptions {
    pub font_size: f32,
    pub split_ratio: f32,
    pub show_preview: bool,
}

/// Show the editor view for `editor`.
///
/// Returns the toolbar action clicked this frame, if any.
pub fn show_editor_view(
    ui: &mut Ui,
    editor: &mut EditorPanel,
    options: EditorViewOptions,
    palette: &Palette,
    now: Instant,
) -> Option<EditorAction> {
    if !editor.is_bound() {
        return show_empty_state(ui, palette);
    }

    let mut action = None;

    // ─────────────────────────────────────────────────────────────────────
    // Title + toolbar
    // ─────────────────────────────────────────────────────────────────────
    ui.horizontal(|ui| {
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let delete = egui::Button::new(RichText::new("🗑 Delete").color(palette.danger));
            if ui.add(delete).on_hover_text("Delete this document").clicked() {
                action = Some(EditorAction::Delete);
            }
            if ui
                .button("📋 Copy HTML")
                .on_hover_text("Copy rendered HTML to the clipboard")
                .clicked()
            {
                action = Some(EditorAction::CopyHtml);
            }
            if ui
                .button("🌐 Export HTML")
                .on_hover_text("Export as HTML (Ctrl+Shift+E)")
                .clicked()
            {
                action = Some(EditorAction::ExportHtml);
            }
            if ui
                .button("⬇ Export .md")
                .on_hover_text("Export as Markdown (Ctrl+E)")
                .clicked()
            {
                action = Some(EditorAction::ExportMarkdown);
            }

            editor.edit_title(now, |title| {
                ui.add(
                    TextEdit::singleline(title)
                        .hint_text("Title")
                        .font(egui::FontId::proportional(options.font_size + 4.0))
                        .desired_width(ui.available_width()),
                )
                .changed()
            });
        });
    });
    ui.separator();

    // ─────────────────────────────────────────────────────────────────────
    // Text area | preview
    // ─────────────────────────────────────────────────────────────────────
    let available = ui.available_size();
    let editor_width = if options.show_preview {
        (available.x * options.split_ratio).max(120.0)
    } else {
        available.x
    };

    ui.horizontal_top(|ui| {
        ui.allocate_ui(egui::vec2(editor_width, available.y), |ui| {
            ScrollArea::vertical()
                .id_source("editor_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    editor.edit_content(now, |content| {
                        ui.add(
                            TextEdit::multiline(content)
                                .code_editor()
                                .font(egui::FontId::monospace(options.font_size))
                                .desired_width(f32::INFINITY)
                                .desired_rows(30)
                                .hint_text("Write Markdown here…"),
                        )
                        .changed()
                    });
                });
        });

        if options.show_preview {
            ui.separator();
            ui.vertical(|ui| {
                ScrollArea::vertical()
                    .id_source("preview_scroll")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        MarkdownView::new(editor.preview_blocks())
                            .font_size(options.font_size)
                            .show(ui);
                    });
            });
        }
    });

    action
}

fn show_empty_state(ui: &mut Ui, palette: &Palette) -> Option<EditorAction> {
    let mut action = None;
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.35);
        ui.label(RichText::new(EMPTY_STATE_MESSAGE).color(palette.muted).size(16.0));
        ui.add_space(8.0);
        if ui.button("➕ New document").clicked() {
            action = Some(EditorAction::CreateDocument);
        }
    });
    action
}
