//! egui widget for the preview pane.

use super::blocks::{Block, ListItem, Span, TableRow};
use crate::theme::Palette;
use eframe::egui::{self, RichText, Stroke, Ui};

/// Heading sizes relative to the body font, H1 through H6.
const HEADING_SCALE: [f32; 6] = [2.0, 1.6, 1.35, 1.15, 1.0, 0.9];

/// Left indent for nested content (quotes, list bodies).
const INDENT: f32 = 14.0;

/// Draws a preview block tree.
///
/// # Example
///
/// ```ignore
/// let blocks = cache.blocks(&content);
/// MarkdownView::new(blocks).font_size(14.0).show(ui);
/// ```
pub struct MarkdownView<'a> {
    blocks: &'a [Block],
    font_size: f32,
}

impl<'a> MarkdownView<'a> {
    /// Create a view over `blocks`.
    pub fn new(blocks: &'a [Block]) -> Self {
        Self {
            blocks,
            font_size: 14.0,
        }
    }

    /// Body font size in points.
    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Draw the blocks into `ui`.
    pub fn show(self, ui: &mut Ui) {
        let mut painter = BlockPainter {
            palette: Palette::for_visuals(ui.visuals()),
            font_size: self.font_size,
            tables: 0,
        };
        for block in self.blocks {
            painter.block(ui, block);
        }
    }
}

struct BlockPainter {
    palette: Palette,
    font_size: f32,
    /// Counter for unique grid ids
    tables: usize,
}

impl BlockPainter {
    fn block(&mut self, ui: &mut Ui, block: &Block) {
        match block {
            Block::Heading { level, spans } => {
                let index = usize::from((*level).clamp(1, 6) - 1);
                let size = self.font_size * HEADING_SCALE[index];
                ui.add_space(size * 0.3);
                self.spans(ui, spans, size, true);
            }
            Block::Paragraph(spans) => self.spans(ui, spans, self.font_size, false),
            Block::CodeBlock { literal, .. } => {
                egui::Frame::none()
                    .fill(self.palette.code_bg)
                    .inner_margin(8.0)
                    .rounding(4.0)
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.label(
                            RichText::new(literal.trim_end_matches('\n'))
                                .monospace()
                                .size(self.font_size * 0.9),
                        );
                    });
            }
            Block::Quote(inner) => {
                let response = ui.horizontal(|ui| {
                    ui.add_space(INDENT);
                    ui.vertical(|ui| {
                        for block in inner {
                            self.block(ui, block);
                        }
                    });
                });
                let rect = response.response.rect;
                ui.painter().vline(
                    rect.left() + 3.0,
                    rect.y_range(),
                    Stroke::new(3.0, self.palette.quote_bar),
                );
            }
            Block::List { start, items } => self.list(ui, *start, items),
            Block::Table(rows) => self.table(ui, rows),
            Block::Rule => {
                ui.separator();
            }
            Block::Html(source) => {
                ui.label(
                    RichText::new(source.trim_end())
                        .monospace()
                        .color(self.palette.muted),
                );
            }
            Block::Footnote { name, blocks } => {
                ui.horizontal_top(|ui| {
                    ui.label(
                        RichText::new(format!("[{}]", name))
                            .size(self.font_size * 0.85)
                            .color(self.palette.muted),
                    );
                    ui.vertical(|ui| {
                        for block in blocks {
                            self.block(ui, block);
                        }
                    });
                });
            }
        }
        ui.add_space(self.font_size * 0.5);
    }

    fn list(&mut self, ui: &mut Ui, start: Option<usize>, items: &[ListItem]) {
        for (index, item) in items.iter().enumerate() {
            let marker = match (item.task, start) {
                (Some(true), _) => "☑".to_string(),
                (Some(false), _) => "☐".to_string(),
                (None, Some(first)) => format!("{}.", first + index),
                (None, None) => "•".to_string(),
            };
            ui.horizontal_top(|ui| {
                ui.add_space(INDENT * 0.5);
                ui.label(RichText::new(marker).size(self.font_size));
                ui.vertical(|ui| {
                    for block in &item.blocks {
                        self.block(ui, block);
                    }
                });
            });
        }
    }

    fn table(&mut self, ui: &mut Ui, rows: &[TableRow]) {
        self.tables += 1;
        egui::Grid::new(("preview-table", self.tables))
            .striped(true)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                for row in rows {
                    for cell in &row.cells {
                        self.spans(ui, cell, self.font_size, row.header);
                    }
                    ui.end_row();
                }
            });
    }

    fn spans(&self, ui: &mut Ui, spans: &[Span], size: f32, emphasized: bool) {
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            for span in spans {
                let text = self.rich_text(span, size, emphasized);
                match &span.link {
                    Some(url) => {
                        ui.hyperlink_to(text, url);
                    }
                    None => {
                        ui.label(text);
                    }
                }
            }
        });
    }

    fn rich_text(&self, span: &Span, size: f32, emphasized: bool) -> RichText {
        let mut text = RichText::new(&span.text).size(size);
        if emphasized {
            text = text.strong().color(self.palette.heading);
        }
        if span.style.strong {
            text = text.strong();
        }
        if span.style.emphasis {
            text = text.italics();
        }
        if span.style.strikethrough {
            text = text.strikethrough();
        }
        if span.style.code {
            text = text.code();
        }
        if span.link.is_some() {
            text = text.color(self.palette.link).underline();
        }
        text
    }
}
