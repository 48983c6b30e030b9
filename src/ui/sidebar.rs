//! Document List Sidebar Component
//!
//! Left side panel with a "New" button and one row per document showing
//! its title, last modification time and a delete button.

use crate::document::Document;
use crate::theme::Palette;
use eframe::egui::{self, RichText, ScrollArea, Sense, Ui, Vec2};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Minimum width for the sidebar.
const MIN_PANEL_WIDTH: f32 = 140.0;

/// Maximum width for the sidebar.
const MAX_PANEL_WIDTH: f32 = 480.0;

/// Height of each document row.
const ROW_HEIGHT: f32 = 40.0;

// ─────────────────────────────────────────────────────────────────────────────
// DocumentListOutput
// ─────────────────────────────────────────────────────────────────────────────

/// Output from the document list indicating user actions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentListOutput {
    /// The "New" button was clicked
    pub create_requested: bool,
    /// Id of the document row that was clicked
    pub selected: Option<String>,
    /// Id of the document whose delete button was clicked
    pub delete_requested: Option<String>,
    /// New panel width if resized
    pub new_width: Option<f32>,
}

// ─────────────────────────────────────────────────────────────────────────────
// DocumentList
// ─────────────────────────────────────────────────────────────────────────────

/// The document list side panel.
#[derive(Debug, Clone)]
pub struct DocumentList {
    width: f32,
}

impl DocumentList {
    /// Create a sidebar with the given initial width.
    pub fn new(width: f32) -> Self {
        Self {
            width: width.clamp(MIN_PANEL_WIDTH, MAX_PANEL_WIDTH),
        }
    }

    /// Show the sidebar.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        documents: &[Document],
        active_id: Option<&str>,
        palette: &Palette,
        enabled: bool,
    ) -> DocumentListOutput {
        let mut output = DocumentListOutput::default();

        let panel = egui::SidePanel::left("document_list")
            .resizable(true)
            .default_width(self.width)
            .width_range(MIN_PANEL_WIDTH..=MAX_PANEL_WIDTH)
            .frame(
                egui::Frame::none()
                    .fill(palette.sidebar)
                    .inner_margin(egui::Margin::same(6.0)),
            )
            .show(ctx, |ui| {
                ui.add_enabled_ui(enabled, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("Documents").strong());
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui
                                .button("➕ New")
                                .on_hover_text("New document (Ctrl+N)")
                                .clicked()
                            {
                                output.create_requested = true;
                            }
                        });
                    });
                    ui.separator();

                    if documents.is_empty() {
                        ui.label(RichText::new("No documents").italics().color(palette.muted));
                        return;
                    }

                    ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .show(ui, |ui| {
                            for document in documents {
                                let is_active = active_id == Some(document.id.as_str());
                                Self::render_row(ui, document, is_active, palette, &mut output);
                            }
                        });
                });
            });

        // The outer rect includes the frame margin, matching `default_width`
        let panel_width = panel.response.rect.width();
        if (panel_width - self.width).abs() > 1.0 {
            self.width = panel_width;
            output.new_width = Some(panel_width);
        }

        output
    }

    fn render_row(
        ui: &mut Ui,
        document: &Document,
        is_active: bool,
        palette: &Palette,
        output: &mut DocumentListOutput,
    ) {
        let row_width = ui.available_width();
        let (row_rect, row_response) =
            ui.allocate_exact_size(Vec2::new(row_width, ROW_HEIGHT), Sense::click());

        if is_active {
            ui.painter().rect_filled(row_rect, 4.0, palette.selected);
        } else if row_response.hovered() {
            ui.painter()
                .rect_filled(row_rect, 4.0, palette.selected.gamma_multiply(0.5));
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }

        let text_color = ui.visuals().text_color();
        let painter = ui.painter_at(row_rect.shrink(2.0));
        let text_left = row_rect.left_top() + Vec2::new(8.0, 4.0);

        painter.text(
            text_left,
            egui::Align2::LEFT_TOP,
            document.display_title(),
            egui::FontId::proportional(14.0),
            text_color,
        );
        painter.text(
            text_left + Vec2::new(0.0, 18.0),
            egui::Align2::LEFT_TOP,
            document.updated_at_label(),
            egui::FontId::proportional(10.5),
            palette.muted,
        );

        // Delete button over the right end of the row
        let button_rect = egui::Rect::from_center_size(
            egui::pos2(row_rect.right() - 14.0, row_rect.center().y),
            Vec2::splat(20.0),
        );
        let deleted = ui
            .put(
                button_rect,
                egui::Button::new(RichText::new("×").color(palette.danger)).frame(false),
            )
            .on_hover_text("Delete document")
            .clicked();
        if deleted {
            output.delete_requested = Some(document.id.clone());
        }

        if row_response.clicked() && !deleted {
            output.selected = Some(document.id.clone());
        }
    }
}
