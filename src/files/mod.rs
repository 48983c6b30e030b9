//! File operations module for Inkpad
//!
//! This module provides the native save dialogs used by the export actions.

pub mod dialogs;

pub use dialogs::{save_html_dialog, save_markdown_dialog};
