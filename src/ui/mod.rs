//! UI components for Inkpad
//!
//! This module contains the widgets drawn by the application shell.

mod dialogs;
mod editor_view;
mod sidebar;

pub use dialogs::{show_confirm_dialog, DialogResult};
pub use editor_view::{show_editor_view, EditorAction, EditorViewOptions};
pub use sidebar::DocumentList;
