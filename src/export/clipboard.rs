//! Clipboard Operations for HTML Export
//!
//! Copies the rendered HTML of a document to the system clipboard using the
//! arboard crate. The Markdown source is offered as the plain-text
//! alternative so plain editors still receive something useful.

#![allow(clippy::enum_variant_names)]

use super::html::generate_html_fragment;
use arboard::Clipboard;
use log::{debug, warn};

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Error
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur during clipboard operations.
#[derive(Debug)]
pub enum ClipboardError {
    /// Failed to access clipboard
    AccessError(String),
    /// Failed to set clipboard content
    WriteError(String),
}

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipboardError::AccessError(msg) => write!(f, "Clipboard access error: {}", msg),
            ClipboardError::WriteError(msg) => write!(f, "Clipboard write error: {}", msg),
        }
    }
}

impl std::error::Error for ClipboardError {}

impl From<arboard::Error> for ClipboardError {
    fn from(err: arboard::Error) -> Self {
        ClipboardError::WriteError(err.to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Operations
// ─────────────────────────────────────────────────────────────────────────────

/// Render `markdown` and copy the HTML to the clipboard.
///
/// On platforms that support an HTML clipboard format, apps like email
/// clients and word processors paste the formatted content. Where setting
/// HTML fails, the HTML source is copied as plain text instead.
pub fn copy_html_to_clipboard(markdown: &str) -> Result<(), ClipboardError> {
    let html = generate_html_fragment(markdown);
    let mut clipboard =
        Clipboard::new().map_err(|e| ClipboardError::AccessError(e.to_string()))?;

    match clipboard.set_html(html.as_str(), Some(markdown)) {
        Ok(()) => {
            debug!("Copied {} bytes of HTML to clipboard", html.len());
            Ok(())
        }
        Err(e) => {
            warn!("HTML clipboard format unavailable ({}), copying as text", e);
            clipboard.set_text(html)?;
            Ok(())
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clipboard_error_display() {
        let err = ClipboardError::AccessError("no display".to_string());
        assert_eq!(err.to_string(), "Clipboard access error: no display");
    }

    #[test]
    fn test_clipboard_error_write() {
        let err = ClipboardError::WriteError("write failed".to_string());
        assert!(err.to_string().contains("write failed"));
    }

    // Actual clipboard tests require a display/clipboard context
    // which isn't typically available in CI environments.
}
