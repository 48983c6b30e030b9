//! Native file dialog integration using the rfd crate
//!
//! Export actions "download" through a native save dialog pre-filled with
//! the suggested file name.

use rfd::FileDialog;
use std::path::{Path, PathBuf};

/// File extension filters for exported file types.
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];
const HTML_EXTENSIONS: &[&str] = &["html", "htm"];

/// Opens a native save dialog for a Markdown export.
///
/// Returns `Some(PathBuf)` if a location was selected, `None` if cancelled.
pub fn save_markdown_dialog(initial_dir: Option<&Path>, default_name: &str) -> Option<PathBuf> {
    save_dialog(
        "Export Markdown",
        ("Markdown Files", MARKDOWN_EXTENSIONS),
        initial_dir,
        default_name,
    )
}

/// Opens a native save dialog for an HTML export.
///
/// Returns `Some(PathBuf)` if a location was selected, `None` if cancelled.
pub fn save_html_dialog(initial_dir: Option<&Path>, default_name: &str) -> Option<PathBuf> {
    save_dialog(
        "Export HTML",
        ("HTML Files", HTML_EXTENSIONS),
        initial_dir,
        default_name,
    )
}

fn save_dialog(
    title: &str,
    (filter_name, extensions): (&str, &[&str]),
    initial_dir: Option<&Path>,
    default_name: &str,
) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title(title)
        .add_filter(filter_name, extensions)
        .add_filter("All Files", &["*"])
        .set_file_name(default_name);

    if let Some(dir) = initial_dir {
        dialog = dialog.set_directory(dir);
    }

    dialog.save_file()
}
