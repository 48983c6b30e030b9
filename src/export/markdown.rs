//! Markdown export
//!
//! Builds the file a document is exported as: the title as a level-1
//! heading, a blank line, then the raw content.

use regex::Regex;
use std::sync::OnceLock;

/// MIME type of exported Markdown files.
pub const MARKDOWN_MIME: &str = "text/markdown";

/// File stem used when the title is empty.
pub const FALLBACK_FILE_STEM: &str = "document";

/// Characters that cannot appear in file names on common platforms.
static INVALID_FILE_CHARS: OnceLock<Regex> = OnceLock::new();

fn invalid_file_chars() -> &'static Regex {
    INVALID_FILE_CHARS.get_or_init(|| {
        Regex::new(r#"[<>:"/\\|?*\x00-\x1F]"#).expect("valid file name regex")
    })
}

/// Export file name for `title` with the given extension.
///
/// An empty title falls back to `document`.
pub fn export_file_name(title: &str, extension: &str) -> String {
    let stem = if title.is_empty() {
        FALLBACK_FILE_STEM
    } else {
        title
    };
    format!("{}.{}", stem, extension)
}

/// Replace characters that are not allowed in file names with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    invalid_file_chars().replace_all(name, "_").into_owned()
}

/// A document rendered as a downloadable Markdown file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownExport {
    /// `<title or "document">.md`
    pub file_name: String,
    /// `# <title>\n\n<content>` as UTF-8
    pub contents: Vec<u8>,
}

impl MarkdownExport {
    /// Build the export for a title and content pair.
    pub fn new(title: &str, content: &str) -> Self {
        Self {
            file_name: export_file_name(title, "md"),
            contents: format!("# {}\n\n{}", title, content).into_bytes(),
        }
    }

    /// MIME type of the payload.
    pub fn mime_type(&self) -> &'static str {
        MARKDOWN_MIME
    }

    /// File name safe to offer in a save dialog.
    pub fn suggested_file_name(&self) -> String {
        sanitize_file_name(&self.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_notes() {
        let export = MarkdownExport::new("Notes", "Hello");
        assert_eq!(export.contents, b"# Notes\n\nHello".to_vec());
        assert_eq!(export.file_name, "Notes.md");
        assert_eq!(export.mime_type(), "text/markdown");
    }

    #[test]
    fn test_empty_title_falls_back() {
        let export = MarkdownExport::new("", "body");
        assert_eq!(export.file_name, "document.md");
        assert_eq!(export.contents, b"# \n\nbody".to_vec());
    }

    #[test]
    fn test_empty_content() {
        let export = MarkdownExport::new("Draft", "");
        assert_eq!(String::from_utf8(export.contents).unwrap(), "# Draft\n\n");
    }

    #[test]
    fn test_suggested_file_name_is_sanitized() {
        let export = MarkdownExport::new("a/b: c?", "");
        assert_eq!(export.file_name, "a/b: c?.md");
        assert_eq!(export.suggested_file_name(), "a_b_ c_.md");
    }

    #[test]
    fn test_export_file_name_extension() {
        assert_eq!(export_file_name("Notes", "html"), "Notes.html");
        assert_eq!(export_file_name("", "html"), "document.html");
    }
}
