//! Modal confirmation dialog.
//!
//! A dimmed overlay swallows clicks to everything behind it while the
//! dialog waits for an answer. Enter confirms and Escape cancels.

use crate::theme::Palette;
use eframe::egui::{self, Color32, Key, RichText};

/// Result from showing a confirmation dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResult {
    /// No answer yet (dialog still open)
    None,
    /// The user declined
    Cancelled,
    /// The user accepted
    Confirmed,
}

/// Show a yes/no confirmation for a destructive action.
///
/// `confirm_label` names the action on the confirming button.
pub fn show_confirm_dialog(
    ctx: &egui::Context,
    title: &str,
    message: &str,
    confirm_label: &str,
    palette: &Palette,
) -> DialogResult {
    let mut result = DialogResult::None;

    if ctx.input(|i| i.key_pressed(Key::Escape)) {
        return DialogResult::Cancelled;
    }
    if ctx.input(|i| i.key_pressed(Key::Enter)) {
        return DialogResult::Confirmed;
    }

    // Semi-transparent overlay
    let screen_rect = ctx.screen_rect();
    let overlay_color = if ctx.style().visuals.dark_mode {
        Color32::from_rgba_unmultiplied(0, 0, 0, 180)
    } else {
        Color32::from_rgba_unmultiplied(0, 0, 0, 120)
    };

    egui::Area::new(egui::Id::new("confirm_overlay"))
        .order(egui::Order::Middle)
        .fixed_pos(screen_rect.min)
        .show(ctx, |ui| {
            ui.allocate_response(screen_rect.size(), egui::Sense::click());
            ui.painter().rect_filled(screen_rect, 0.0, overlay_color);
        });

    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .order(egui::Order::Foreground)
        .frame(
            egui::Frame::window(&ctx.style())
                .fill(palette.background)
                .stroke(egui::Stroke::new(1.0, palette.quote_bar))
                .rounding(8.0),
        )
        .show(ctx, |ui| {
            ui.set_min_width(320.0);
            ui.add_space(8.0);
            ui.label(message);
            ui.add_space(12.0);

            ui.horizontal(|ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let confirm = egui::Button::new(RichText::new(confirm_label).color(Color32::WHITE))
                        .fill(palette.danger);
                    if ui.add(confirm).clicked() {
                        result = DialogResult::Confirmed;
                    }

                    ui.add_space(8.0);

                    if ui.button("Cancel").clicked() {
                        result = DialogResult::Cancelled;
                    }
                });
            });

            ui.add_space(4.0);
        });

    result
}
