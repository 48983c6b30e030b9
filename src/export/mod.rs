//! Document Export Module for Inkpad
//!
//! # Supported Export Formats
//!
//! - **Markdown File**: `# <title>` heading followed by the raw content
//! - **HTML File**: Complete HTML document with inlined CSS
//! - **Clipboard HTML**: Rendered HTML fragment for pasting in other apps
//!
//! # Architecture
//!
//! - `markdown.rs` - Markdown export payload and file naming
//! - `html.rs` - HTML document generation
//! - `clipboard.rs` - Platform clipboard operations

pub mod clipboard;
pub mod html;
pub mod markdown;

pub use clipboard::copy_html_to_clipboard;
pub use html::generate_html_document;
pub use markdown::{export_file_name, sanitize_file_name, MarkdownExport};

use crate::error::{Error, Result};
use log::info;
use std::fs;
use std::path::Path;

/// Write exported bytes to `path`, replacing any existing file.
pub fn write_export(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!("Exported {} bytes to {}", contents.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_export() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let export = MarkdownExport::new("Notes", "Hello");
        let path = dir.path().join(&export.file_name);

        write_export(&path, &export.contents).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "# Notes\n\nHello");
    }

    #[test]
    fn test_write_export_missing_directory() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("missing").join("out.md");

        let result = write_export(&path, b"x");

        assert!(matches!(result, Err(Error::FileWrite { .. })));
    }
}
