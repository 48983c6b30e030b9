//! Conversion of the comrak AST into an owned block tree.
//!
//! The tree only keeps what the preview pane draws: block structure and
//! styled inline spans. It owns its strings so it can be cached across
//! frames without holding on to a comrak arena.

use super::comrak_options;
use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena};

/// Inline styling flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanStyle {
    pub strong: bool,
    pub emphasis: bool,
    pub strikethrough: bool,
    pub code: bool,
}

/// A run of text with uniform styling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
    /// Link target when the span is part of a link
    pub link: Option<String>,
}

/// One list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// `Some(checked)` for task list items
    pub task: Option<bool>,
    pub blocks: Vec<Block>,
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub header: bool,
    pub cells: Vec<Vec<Span>>,
}

/// A block-level element of the preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, spans: Vec<Span> },
    Paragraph(Vec<Span>),
    CodeBlock { info: String, literal: String },
    Quote(Vec<Block>),
    /// `start` is `Some` for ordered lists
    List { start: Option<usize>, items: Vec<ListItem> },
    Table(Vec<TableRow>),
    Rule,
    /// Raw HTML, shown as source
    Html(String),
    Footnote { name: String, blocks: Vec<Block> },
}

/// Parse Markdown into preview blocks.
pub fn parse_blocks(markdown: &str) -> Vec<Block> {
    let arena = Arena::new();
    let options = comrak_options();
    let root = parse_document(&arena, markdown, &options);
    collect_blocks(root)
}

fn collect_blocks<'a>(node: &'a AstNode<'a>) -> Vec<Block> {
    let mut blocks = Vec::new();
    for child in node.children() {
        convert_block(child, &mut blocks);
    }
    blocks
}

fn convert_block<'a>(node: &'a AstNode<'a>, out: &mut Vec<Block>) {
    let value = node.data.borrow().value.clone();
    match value {
        NodeValue::Paragraph => out.push(Block::Paragraph(collect_spans(node))),
        NodeValue::Heading(heading) => out.push(Block::Heading {
            level: heading.level,
            spans: collect_spans(node),
        }),
        NodeValue::CodeBlock(code) => out.push(Block::CodeBlock {
            info: code.info,
            literal: code.literal,
        }),
        NodeValue::BlockQuote => out.push(Block::Quote(collect_blocks(node))),
        NodeValue::List(list) => {
            let start = match list.list_type {
                ListType::Bullet => None,
                ListType::Ordered => Some(list.start),
            };
            let items = node
                .children()
                .map(|item| {
                    let task = match &item.data.borrow().value {
                        NodeValue::TaskItem(mark) => {
                            Some(matches!(mark, Some('x') | Some('X')))
                        }
                        _ => None,
                    };
                    ListItem {
                        task,
                        blocks: collect_blocks(item),
                    }
                })
                .collect();
            out.push(Block::List { start, items });
        }
        NodeValue::Table(_) => {
            let rows = node
                .children()
                .map(|row| {
                    let header = matches!(row.data.borrow().value, NodeValue::TableRow(true));
                    TableRow {
                        header,
                        cells: row.children().map(collect_spans).collect(),
                    }
                })
                .collect();
            out.push(Block::Table(rows));
        }
        NodeValue::ThematicBreak => out.push(Block::Rule),
        NodeValue::HtmlBlock(html) => out.push(Block::Html(html.literal)),
        NodeValue::FootnoteDefinition(def) => out.push(Block::Footnote {
            name: def.name,
            blocks: collect_blocks(node),
        }),
        _ => {
            for child in node.children() {
                convert_block(child, out);
            }
        }
    }
}

fn collect_spans<'a>(node: &'a AstNode<'a>) -> Vec<Span> {
    let mut spans = Vec::new();
    for child in node.children() {
        convert_inline(child, SpanStyle::default(), None, &mut spans);
    }
    spans
}

fn push_span(out: &mut Vec<Span>, text: &str, style: SpanStyle, link: Option<&str>) {
    if text.is_empty() {
        return;
    }
    // Merge with the previous span when nothing but the text differs.
    if let Some(last) = out.last_mut() {
        if last.style == style && last.link.as_deref() == link {
            last.text.push_str(text);
            return;
        }
    }
    out.push(Span {
        text: text.to_string(),
        style,
        link: link.map(str::to_string),
    });
}

fn convert_inline<'a>(
    node: &'a AstNode<'a>,
    style: SpanStyle,
    link: Option<&str>,
    out: &mut Vec<Span>,
) {
    let value = node.data.borrow().value.clone();
    let recurse = |style: SpanStyle, link: Option<&str>, out: &mut Vec<Span>| {
        for child in node.children() {
            convert_inline(child, style, link, out);
        }
    };

    match value {
        NodeValue::Text(text) => push_span(out, &text, style, link),
        NodeValue::Code(code) => push_span(
            out,
            &code.literal,
            SpanStyle {
                code: true,
                ..style
            },
            link,
        ),
        NodeValue::SoftBreak => push_span(out, " ", style, link),
        NodeValue::LineBreak => push_span(out, "\n", style, link),
        NodeValue::Emph => recurse(
            SpanStyle {
                emphasis: true,
                ..style
            },
            link,
            out,
        ),
        NodeValue::Strong => recurse(
            SpanStyle {
                strong: true,
                ..style
            },
            link,
            out,
        ),
        NodeValue::Strikethrough => recurse(
            SpanStyle {
                strikethrough: true,
                ..style
            },
            link,
            out,
        ),
        NodeValue::Link(target) => recurse(style, Some(target.url.as_str()), out),
        NodeValue::Image(image) => {
            push_span(out, "🖼 ", style, Some(image.url.as_str()));
            recurse(
                SpanStyle {
                    emphasis: true,
                    ..style
                },
                Some(image.url.as_str()),
                out,
            );
        }
        NodeValue::HtmlInline(html) => push_span(
            out,
            &html,
            SpanStyle {
                code: true,
                ..style
            },
            link,
        ),
        NodeValue::FootnoteReference(reference) => {
            push_span(out, &format!("[{}]", reference.name), style, link)
        }
        _ => recurse(style, link, out),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(spans: &[Span]) -> String {
        spans.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_heading_and_paragraph() {
        let blocks = parse_blocks("## Hello\n\nworld");
        assert_eq!(blocks.len(), 2);
        match &blocks[0] {
            Block::Heading { level, spans } => {
                assert_eq!(*level, 2);
                assert_eq!(plain(spans), "Hello");
            }
            other => panic!("expected heading, got {:?}", other),
        }
        assert!(matches!(&blocks[1], Block::Paragraph(spans) if plain(spans) == "world"));
    }

    #[test]
    fn test_inline_styles() {
        let blocks = parse_blocks("a **b** *c* `d` ~~e~~");
        let Block::Paragraph(spans) = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(plain(spans), "a b c d e");
        assert!(spans.iter().any(|s| s.text == "b" && s.style.strong));
        assert!(spans.iter().any(|s| s.text == "c" && s.style.emphasis));
        assert!(spans.iter().any(|s| s.text == "d" && s.style.code));
        assert!(spans.iter().any(|s| s.text == "e" && s.style.strikethrough));
    }

    #[test]
    fn test_adjacent_plain_text_is_merged() {
        let blocks = parse_blocks("one\ntwo");
        let Block::Paragraph(spans) = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "one two");
    }

    #[test]
    fn test_link_target() {
        let blocks = parse_blocks("[site](https://example.com)");
        let Block::Paragraph(spans) = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(spans[0].text, "site");
        assert_eq!(spans[0].link.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_lists_and_tasks() {
        let blocks = parse_blocks("3. three\n4. four\n\n- [ ] open\n- [x] done");
        match &blocks[0] {
            Block::List { start, items } => {
                assert_eq!(*start, Some(3));
                assert_eq!(items.len(), 2);
                assert!(items[0].task.is_none());
            }
            other => panic!("expected ordered list, got {:?}", other),
        }
        match &blocks[1] {
            Block::List { start, items } => {
                assert!(start.is_none());
                assert_eq!(items[0].task, Some(false));
                assert_eq!(items[1].task, Some(true));
            }
            other => panic!("expected task list, got {:?}", other),
        }
    }

    #[test]
    fn test_code_block_quote_rule_table() {
        let md = "```rust\nfn main() {}\n```\n\n> quoted\n\n---\n\n| h |\n|---|\n| c |\n";
        let blocks = parse_blocks(md);
        assert!(matches!(
            &blocks[0],
            Block::CodeBlock { info, literal } if info == "rust" && literal == "fn main() {}\n"
        ));
        assert!(matches!(&blocks[1], Block::Quote(inner) if inner.len() == 1));
        assert!(matches!(&blocks[2], Block::Rule));
        match &blocks[3] {
            Block::Table(rows) => {
                assert_eq!(rows.len(), 2);
                assert!(rows[0].header);
                assert!(!rows[1].header);
                assert_eq!(plain(&rows[1].cells[0]), "c");
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_document() {
        assert!(parse_blocks("").is_empty());
    }
}
