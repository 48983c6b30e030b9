//! HTML Export Generation
//!
//! This module generates complete HTML documents from markdown content,
//! with inlined CSS for standalone viewing.

use crate::preview::render_html;
use crate::theme::Palette;

// ─────────────────────────────────────────────────────────────────────────────
// HTML Generation
// ─────────────────────────────────────────────────────────────────────────────

/// Generate a complete HTML document from markdown content.
///
/// # Arguments
///
/// * `markdown` - The markdown source text
/// * `title` - Document title; empty titles use "Untitled"
/// * `dark` - Whether to style the page with the dark palette
pub fn generate_html_document(markdown: &str, title: &str, dark: bool) -> String {
    let palette = if dark {
        Palette::dark()
    } else {
        Palette::light()
    };
    let doc_title = if title.is_empty() {
        "Untitled"
    } else {
        title
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="generator" content="Inkpad">
    <title>{title}</title>
    <style>
{base_css}

{theme_css}
    </style>
</head>
<body>
    <article class="markdown-body">
{body}
    </article>
</body>
</html>"#,
        title = html_escape(doc_title),
        base_css = BASE_CSS,
        theme_css = generate_theme_css(&palette, dark),
        body = render_html(markdown),
    )
}

/// Generate an HTML fragment (no doctype, head, etc.) for the clipboard.
pub fn generate_html_fragment(markdown: &str) -> String {
    render_html(markdown)
}

// ─────────────────────────────────────────────────────────────────────────────
// CSS Generation
// ─────────────────────────────────────────────────────────────────────────────

/// Base CSS for markdown rendering (layout, typography).
const BASE_CSS: &str = r#"
/* Reset and base styles */
*, *::before, *::after {
    box-sizing: border-box;
}

body {
    margin: 0;
    padding: 0;
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Noto Sans', Helvetica, Arial, sans-serif;
    font-size: 16px;
    line-height: 1.6;
}

/* Article container */
.markdown-body {
    max-width: 900px;
    margin: 0 auto;
    padding: 32px 24px;
}

/* Headings */
.markdown-body h1,
.markdown-body h2,
.markdown-body h3,
.markdown-body h4,
.markdown-body h5,
.markdown-body h6 {
    margin-top: 24px;
    margin-bottom: 16px;
    font-weight: 600;
    line-height: 1.25;
}

.markdown-body h1 { font-size: 2em; border-bottom: 1px solid; padding-bottom: 0.3em; }
.markdown-body h2 { font-size: 1.5em; border-bottom: 1px solid; padding-bottom: 0.3em; }
.markdown-body h3 { font-size: 1.25em; }
.markdown-body h4 { font-size: 1em; }
.markdown-body h5 { font-size: 0.875em; }
.markdown-body h6 { font-size: 0.85em; }

/* Paragraphs */
.markdown-body p {
    margin-top: 0;
    margin-bottom: 16px;
}

/* Links */
.markdown-body a {
    text-decoration: none;
}

.markdown-body a:hover {
    text-decoration: underline;
}

/* Lists */
.markdown-body ul,
.markdown-body ol {
    margin-top: 0;
    margin-bottom: 16px;
    padding-left: 2em;
}

.markdown-body li {
    margin-bottom: 4px;
}

.markdown-body li + li {
    margin-top: 4px;
}

/* Task lists */
.markdown-body ul.contains-task-list {
    list-style-type: none;
    padding-left: 0;
}

.markdown-body .task-list-item {
    padding-left: 1.5em;
    position: relative;
}

.markdown-body .task-list-item input[type="checkbox"] {
    position: absolute;
    left: 0;
    top: 0.3em;
}

/* Blockquotes */
.markdown-body blockquote {
    margin: 0 0 16px 0;
    padding: 0 1em;
    border-left: 4px solid;
}

.markdown-body blockquote > :first-child {
    margin-top: 0;
}

.markdown-body blockquote > :last-child {
    margin-bottom: 0;
}

/* Code */
.markdown-body code {
    font-family: 'JetBrains Mono', 'Fira Code', 'Consolas', 'Monaco', monospace;
    font-size: 0.9em;
    padding: 0.2em 0.4em;
    border-radius: 4px;
}

.markdown-body pre {
    margin-top: 0;
    margin-bottom: 16px;
    padding: 16px;
    overflow: auto;
    border-radius: 6px;
    line-height: 1.45;
}

.markdown-body pre code {
    padding: 0;
    background: transparent;
    border-radius: 0;
    font-size: 0.875em;
}

/* Tables */
.markdown-body table {
    border-collapse: collapse;
    width: 100%;
    margin-bottom: 16px;
}

.markdown-body th,
.markdown-body td {
    padding: 8px 12px;
    border: 1px solid;
}

.markdown-body th {
    font-weight: 600;
    text-align: left;
}

.markdown-body tr:nth-child(even) td {
    background-color: rgba(128, 128, 128, 0.05);
}

/* Horizontal rule */
.markdown-body hr {
    height: 2px;
    margin: 24px 0;
    border: none;
}

/* Images */
.markdown-body img {
    max-width: 100%;
    height: auto;
    border-radius: 4px;
}

/* Strong and emphasis */
.markdown-body strong {
    font-weight: 600;
}

.markdown-body em {
    font-style: italic;
}

/* Strikethrough */
.markdown-body del {
    text-decoration: line-through;
}
"#;

/// Generate palette-specific CSS.
fn generate_theme_css(palette: &Palette, dark: bool) -> String {
    format!(
        r#"
/* Theme colors */
:root {{
    color-scheme: {color_scheme};
}}

body {{
    background-color: {bg};
}}

.markdown-body h1,
.markdown-body h2,
.markdown-body h3,
.markdown-body h4,
.markdown-body h5,
.markdown-body h6 {{
    color: {heading};
}}

.markdown-body h1,
.markdown-body h2,
.markdown-body th,
.markdown-body td {{
    border-color: {border};
}}

.markdown-body a {{
    color: {link};
}}

.markdown-body blockquote {{
    color: {muted};
    border-left-color: {border};
}}

.markdown-body code,
.markdown-body pre {{
    background-color: {code_bg};
}}

.markdown-body hr {{
    background-color: {border};
}}
"#,
        color_scheme = if dark { "dark" } else { "light" },
        bg = color32_to_css(palette.background),
        heading = color32_to_css(palette.heading),
        border = color32_to_css(palette.quote_bar),
        link = color32_to_css(palette.link),
        muted = color32_to_css(palette.muted),
        code_bg = color32_to_css(palette.code_bg),
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Utility Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Convert Color32 to CSS color string.
fn color32_to_css(color: eframe::egui::Color32) -> String {
    format!("rgb({}, {}, {})", color.r(), color.g(), color.b())
}

/// HTML-escape a string.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_html_document() {
        let html = generate_html_document("# Test\n\nParagraph text.", "Test Doc", false);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Test Doc</title>"));
        assert!(html.contains("<article class=\"markdown-body\">"));
        assert!(html.contains("<h1>Test</h1>"));
        assert!(html.contains("color-scheme: light"));
    }

    #[test]
    fn test_document_title_is_escaped() {
        let html = generate_html_document("", "<b>&</b>", true);
        assert!(html.contains("<title>&lt;b&gt;&amp;&lt;/b&gt;</title>"));
        assert!(html.contains("color-scheme: dark"));
    }

    #[test]
    fn test_empty_title_uses_untitled() {
        let html = generate_html_document("body", "", false);
        assert!(html.contains("<title>Untitled</title>"));

        let html = generate_html_document("body", "  ", false);
        assert!(html.contains("<title>  </title>"));
    }

    #[test]
    fn test_generate_html_fragment() {
        let html = generate_html_fragment("**Bold** and *italic*");
        assert!(!html.contains("<!DOCTYPE"));
        assert!(html.contains("<strong>Bold</strong>"));
        assert!(html.contains("<em>italic</em>"));
    }

    #[test]
    fn test_color32_to_css() {
        let color = eframe::egui::Color32::from_rgb(255, 128, 64);
        assert_eq!(color32_to_css(color), "rgb(255, 128, 64)");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("Hello"), "Hello");
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("\"quoted\""), "&quot;quoted&quot;");
    }
}
