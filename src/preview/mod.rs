//! Live preview for Inkpad
//!
//! The preview converts the editor's Markdown into HTML (the canonical
//! rendered form, also used for export and clipboard) and into a small
//! owned block tree that the egui preview pane draws. Both are memoized on
//! the content so typing elsewhere does not re-render.
//!
//! # Architecture
//!
//! - `blocks.rs` - comrak AST → owned `Block` tree
//! - `view.rs` - egui widget drawing a `Block` tree

mod blocks;
mod view;

pub use blocks::{parse_blocks, Block};
pub use view::MarkdownView;

use comrak::{markdown_to_html, Options};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// comrak options shared by the HTML renderer and the block parser.
pub(crate) fn comrak_options() -> Options {
    let mut options = Options::default();

    // GitHub-flavoured extensions
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;

    // Raw HTML is omitted from the output
    options.render.unsafe_ = false;

    options
}

/// Render Markdown to an HTML fragment.
pub fn render_html(markdown: &str) -> String {
    markdown_to_html(markdown, &comrak_options())
}

fn content_hash(markdown: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    markdown.hash(&mut hasher);
    hasher.finish()
}

// ─────────────────────────────────────────────────────────────────────────────
// Preview Cache
// ─────────────────────────────────────────────────────────────────────────────

/// Memoized rendering of the most recent content.
#[derive(Debug, Default)]
pub struct PreviewCache {
    /// Hash of the content the cached output was built from
    content_hash: Option<u64>,
    html: String,
    blocks: Vec<Block>,
    /// Number of times the content was actually rendered
    renders: usize,
}

impl PreviewCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-render if `markdown` differs from the cached source.
    pub fn refresh(&mut self, markdown: &str) {
        let hash = content_hash(markdown);
        if self.content_hash == Some(hash) {
            return;
        }
        self.html = render_html(markdown);
        self.blocks = parse_blocks(markdown);
        self.content_hash = Some(hash);
        self.renders += 1;
    }

    /// HTML for `markdown`, rendering only when it changed.
    pub fn html(&mut self, markdown: &str) -> &str {
        self.refresh(markdown);
        &self.html
    }

    /// Block tree for `markdown`, rendering only when it changed.
    pub fn blocks(&mut self, markdown: &str) -> &[Block] {
        self.refresh(markdown);
        &self.blocks
    }

    /// How many times the cache re-rendered.
    pub fn render_count(&self) -> usize {
        self.renders
    }

    /// Forget the cached output.
    pub fn invalidate(&mut self) {
        self.content_hash = None;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_heading_and_paragraph() {
        let html = render_html("# Title\n\nSome *text*.");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>text</em>"));
    }

    #[test]
    fn test_render_gfm_extensions() {
        let html = render_html("~~gone~~\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\n- [x] done");
        assert!(html.contains("<del>gone</del>"));
        assert!(html.contains("<table>"));
        assert!(html.contains("checkbox"));
    }

    #[test]
    fn test_raw_html_is_not_passed_through() {
        let html = render_html("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_html(""), "");
    }

    #[test]
    fn test_cache_renders_once_per_content() {
        let mut cache = PreviewCache::new();
        let first = cache.html("# One").to_string();
        cache.html("# One");
        cache.blocks("# One");
        assert_eq!(cache.render_count(), 1);

        let second = cache.html("# Two").to_string();
        assert_eq!(cache.render_count(), 2);
        assert_ne!(first, second);
    }

    #[test]
    fn test_cache_invalidate() {
        let mut cache = PreviewCache::new();
        cache.refresh("text");
        cache.invalidate();
        cache.refresh("text");
        assert_eq!(cache.render_count(), 2);
    }
}
