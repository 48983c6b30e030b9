//! Application state management for Inkpad
//!
//! This module defines the central `AppState` struct that ties the document
//! store to the editor panel and holds settings and UI state. It contains
//! no drawing code, so every user action can be driven from tests.

use crate::config::{save_config_silent, Settings};
use crate::document::DocumentUpdate;
use crate::editor::EditorPanel;
use crate::storage::{DocumentStorage, FileStorage, MemoryStorage};
use crate::store::DocumentStore;
use log::{debug, info, warn};
use std::time::Instant;

// ─────────────────────────────────────────────────────────────────────────────
// UI State
// ─────────────────────────────────────────────────────────────────────────────

/// UI-related state flags.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Whether a confirmation dialog is open
    pub show_confirm_dialog: bool,
    /// Message for the confirmation dialog
    pub confirm_dialog_message: String,
    /// Pending action after confirmation
    pub pending_action: Option<PendingAction>,
    /// Temporary toast message (shown in the status bar)
    pub toast_message: Option<String>,
    /// When the toast message should expire (as seconds since app start)
    pub toast_expires_at: Option<f64>,
    /// Set when a document save failed and the user has not been told yet
    pub save_failure_unreported: bool,
}

/// Actions that need confirmation before execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    /// Delete a document
    DeleteDocument { id: String, title: String },
}

// ─────────────────────────────────────────────────────────────────────────────
// Application State
// ─────────────────────────────────────────────────────────────────────────────

/// Central application state struct.
///
/// The editor is always bound to the store's active document. Any action
/// that changes which document is active first flushes the editor's
/// unsaved edits into the store.
#[derive(Debug)]
pub struct AppState<S: DocumentStorage> {
    /// Documents and the active selection
    pub store: DocumentStore<S>,
    /// Edit state for the active document
    pub editor: EditorPanel,
    /// User settings (loaded from config)
    pub settings: Settings,
    /// UI-related state
    pub ui: UiState,
    /// Whether settings have been modified and need saving
    settings_dirty: bool,
}

/// Open the document slot in the platform data directory.
///
/// Falls back to an in-memory slot when no data directory exists, so the
/// app still runs (without persistence across restarts).
pub fn default_storage() -> Box<dyn DocumentStorage> {
    match FileStorage::default_location() {
        Ok(storage) => {
            info!("Document storage at {}", storage.path().display());
            Box::new(storage)
        }
        Err(e) => {
            warn!("{}. Documents will not be kept after exit.", e);
            Box::new(MemoryStorage::new())
        }
    }
}

impl<S: DocumentStorage> AppState<S> {
    /// Load the store from `storage` and bind the editor to its active document.
    pub fn new(storage: S, settings: Settings) -> Self {
        let store = DocumentStore::load(storage);
        let editor = EditorPanel::new(settings.autosave_delay());

        let mut state = Self {
            store,
            editor,
            settings,
            ui: UiState::default(),
            settings_dirty: false,
        };
        state.sync_editor();
        state
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Editor ↔ Store
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply editor updates to the store.
    ///
    /// Returns `false` if any resulting save failed.
    fn apply_updates(&mut self, updates: Vec<DocumentUpdate>) -> bool {
        let mut saved = true;
        for update in updates {
            self.store.apply(update);
            saved &= !self.note_save_result();
        }
        saved
    }

    /// Record a failed save so the UI can report it. Returns whether it failed.
    fn note_save_result(&mut self) -> bool {
        let failed = self.store.last_save_failed();
        if failed {
            self.ui.save_failure_unreported = true;
        }
        failed
    }

    /// Rebind the editor if the active document changed.
    fn sync_editor(&mut self) {
        if self.editor.document_id() == self.store.active_id() {
            return;
        }
        let flushed = match self.store.active_document() {
            Some(document) => self.editor.bind(document),
            None => self.editor.unbind(),
        };
        self.apply_updates(flushed);
    }

    /// Save the editor's edits if its quiet period has passed.
    ///
    /// Returns `true` if anything was written.
    pub fn poll_autosave(&mut self, now: Instant) -> bool {
        let updates = self.editor.poll(now);
        if updates.is_empty() {
            return false;
        }
        debug!("Autosaving {} field(s)", updates.len());
        self.apply_updates(updates);
        true
    }

    /// Save the editor's edits right away.
    ///
    /// Returns `true` if anything was written.
    pub fn flush_edits(&mut self) -> bool {
        let updates = self.editor.flush();
        if updates.is_empty() {
            return false;
        }
        self.apply_updates(updates);
        true
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Document Actions
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a document, select it and start editing it.
    pub fn create_document(&mut self) -> String {
        self.flush_edits();
        let id = self.store.create();
        self.note_save_result();
        self.sync_editor();
        id
    }

    /// Select the document with `id`.
    pub fn select_document(&mut self, id: &str) -> bool {
        if self.store.active_id() == Some(id) {
            return false;
        }
        self.flush_edits();
        let changed = self.store.select(id);
        self.sync_editor();
        changed
    }

    /// Ask for confirmation before deleting the document with `id`.
    ///
    /// Unknown ids are ignored.
    pub fn request_delete(&mut self, id: &str) {
        let Some(document) = self.store.get(id) else {
            return;
        };
        let title = document.display_title().to_string();
        self.ui.confirm_dialog_message =
            format!("Delete \"{}\"? This cannot be undone.", title);
        self.ui.pending_action = Some(PendingAction::DeleteDocument {
            id: id.to_string(),
            title,
        });
        self.ui.show_confirm_dialog = true;
    }

    /// Ask for confirmation before deleting the document being edited.
    pub fn request_delete_active(&mut self) {
        if let Some(id) = self.editor.document_id().map(str::to_string) {
            self.request_delete(&id);
        }
    }

    /// Delete the document with `id` without asking.
    fn delete_document(&mut self, id: &str) -> bool {
        if self.editor.document_id() == Some(id) {
            self.editor.discard();
        } else {
            self.flush_edits();
        }
        let removed = self.store.delete(id);
        self.note_save_result();
        self.sync_editor();
        removed
    }

    /// Handle a confirmed pending action.
    pub fn handle_confirmed_action(&mut self) {
        if let Some(action) = self.ui.pending_action.take() {
            match action {
                PendingAction::DeleteDocument { id, title } => {
                    info!("Deleting \"{}\"", title);
                    self.delete_document(&id);
                }
            }
        }
        self.ui.show_confirm_dialog = false;
        self.ui.confirm_dialog_message.clear();
    }

    /// Cancel the pending action.
    pub fn cancel_pending_action(&mut self) {
        self.ui.pending_action = None;
        self.ui.show_confirm_dialog = false;
        self.ui.confirm_dialog_message.clear();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Settings Management
    // ─────────────────────────────────────────────────────────────────────────

    /// Update settings and mark as dirty.
    pub fn update_settings<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Settings),
    {
        f(&mut self.settings);
        self.settings.sanitize();
        self.editor.set_autosave_delay(self.settings.autosave_delay());
        self.settings_dirty = true;
    }

    /// Save settings to config file if modified.
    ///
    /// Returns `true` if settings were saved.
    pub fn save_settings_if_dirty(&mut self) -> bool {
        if self.settings_dirty {
            if save_config_silent(&self.settings) {
                self.settings_dirty = false;
                info!("Settings saved");
                return true;
            }
            warn!("Failed to save settings");
        }
        false
    }

    /// Prepare state for application shutdown.
    ///
    /// Writes pending edits and saves settings.
    pub fn shutdown(&mut self) {
        self.flush_edits();
        self.settings_dirty = true;
        self.save_settings_if_dirty();
        info!("AppState shutdown complete");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // UI State Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Show a temporary toast message (disappears after duration).
    ///
    /// `current_time` should be the current app time in seconds.
    /// `duration` is how long to show the message in seconds.
    pub fn show_toast(&mut self, message: impl Into<String>, current_time: f64, duration: f64) {
        self.ui.toast_message = Some(message.into());
        self.ui.toast_expires_at = Some(current_time + duration);
    }

    /// Update toast state - clears expired toasts and reports save failures.
    ///
    /// Call this each frame with the current time.
    pub fn update_toast(&mut self, current_time: f64) {
        if std::mem::take(&mut self.ui.save_failure_unreported) {
            self.show_toast("Could not save documents", current_time, 4.0);
            return;
        }
        if let Some(expires_at) = self.ui.toast_expires_at {
            if current_time >= expires_at {
                self.ui.toast_message = None;
                self.ui.toast_expires_at = None;
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::WELCOME_TITLE;
    use crate::storage::{decode_documents, MemoryStorage};
    use std::time::Duration;

    fn new_state() -> (AppState<MemoryStorage>, MemoryStorage) {
        let slot = MemoryStorage::new();
        let state = AppState::new(slot.clone(), Settings::default());
        (state, slot)
    }

    fn stored_titles(slot: &MemoryStorage) -> Vec<String> {
        let raw = slot.contents().unwrap();
        decode_documents(&raw)
            .unwrap()
            .into_iter()
            .map(|d| d.title)
            .collect()
    }

    #[test]
    fn test_first_run_binds_editor_to_welcome() {
        let (state, slot) = new_state();
        assert_eq!(state.editor.title(), WELCOME_TITLE);
        assert_eq!(state.editor.document_id(), state.store.active_id());
        assert_eq!(stored_titles(&slot), vec![WELCOME_TITLE.to_string()]);
    }

    #[test]
    fn test_autosave_reaches_storage_after_quiet_period() {
        let (mut state, slot) = new_state();
        let now = Instant::now();
        state.editor.set_title(now, "Plans");

        assert!(!state.poll_autosave(now + Duration::from_millis(100)));
        assert_eq!(stored_titles(&slot), vec![WELCOME_TITLE.to_string()]);

        assert!(state.poll_autosave(now + Duration::from_millis(400)));
        assert_eq!(stored_titles(&slot), vec!["Plans".to_string()]);
    }

    #[test]
    fn test_flush_edits_writes_before_quiet_period() {
        let (mut state, slot) = new_state();
        state.editor.set_title(Instant::now(), "Last words");

        assert!(state.flush_edits());
        assert_eq!(stored_titles(&slot), vec!["Last words".to_string()]);
        assert!(!state.editor.is_autosave_pending());
        assert!(!state.flush_edits());
    }

    #[test]
    fn test_create_flushes_and_switches() {
        let (mut state, slot) = new_state();
        let welcome_id = state.store.active_id().unwrap().to_string();
        state.editor.set_content(Instant::now(), "draft");

        let id = state.create_document();

        assert_eq!(state.store.active_id(), Some(id.as_str()));
        assert_eq!(state.editor.document_id(), Some(id.as_str()));
        assert_eq!(state.editor.title(), "Untitled");
        assert_eq!(state.store.get(&welcome_id).unwrap().content, "draft");
        assert_eq!(stored_titles(&slot), vec!["Untitled", WELCOME_TITLE]);
    }

    #[test]
    fn test_select_flushes_pending_edit_to_previous_document() {
        let (mut state, _slot) = new_state();
        let welcome_id = state.store.active_id().unwrap().to_string();
        let new_id = state.create_document();
        state.editor.set_content(Instant::now(), "unsaved");

        assert!(state.select_document(&welcome_id));

        assert_eq!(state.store.get(&new_id).unwrap().content, "unsaved");
        assert_eq!(state.editor.document_id(), Some(welcome_id.as_str()));
        assert!(!state.editor.is_autosave_pending());
    }

    #[test]
    fn test_select_unknown_or_same_document() {
        let (mut state, _slot) = new_state();
        let active = state.store.active_id().unwrap().to_string();
        assert!(!state.select_document(&active));
        assert!(!state.select_document("missing"));
        assert_eq!(state.store.active_id(), Some(active.as_str()));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let (mut state, _slot) = new_state();
        state.request_delete_active();

        assert!(state.ui.show_confirm_dialog);
        assert!(state.ui.confirm_dialog_message.contains(WELCOME_TITLE));
        assert_eq!(state.store.len(), 1);

        state.cancel_pending_action();
        assert!(!state.ui.show_confirm_dialog);
        assert!(state.ui.pending_action.is_none());
        assert_eq!(state.store.len(), 1);
    }

    #[test]
    fn test_confirmed_delete_of_only_document() {
        let (mut state, slot) = new_state();
        state.editor.set_content(Instant::now(), "doomed");
        state.request_delete_active();
        state.handle_confirmed_action();

        assert!(state.store.is_empty());
        assert!(state.store.active_id().is_none());
        assert!(!state.editor.is_bound());
        assert!(stored_titles(&slot).is_empty());
    }

    #[test]
    fn test_deleting_active_rebinds_to_first_remaining() {
        let (mut state, _slot) = new_state();
        let welcome_id = state.store.active_id().unwrap().to_string();
        let first = state.create_document();

        state.request_delete(&first);
        state.handle_confirmed_action();

        assert_eq!(state.store.active_id(), Some(welcome_id.as_str()));
        assert_eq!(state.editor.document_id(), Some(welcome_id.as_str()));
    }

    #[test]
    fn test_deleting_other_document_keeps_edits() {
        let (mut state, _slot) = new_state();
        let welcome_id = state.store.active_id().unwrap().to_string();
        let active = state.create_document();
        state.editor.set_content(Instant::now(), "keep me");

        state.request_delete(&welcome_id);
        state.handle_confirmed_action();

        assert_eq!(state.store.active_id(), Some(active.as_str()));
        assert_eq!(state.store.get(&active).unwrap().content, "keep me");
    }

    #[test]
    fn test_request_delete_unknown_id_is_ignored() {
        let (mut state, _slot) = new_state();
        state.request_delete("missing");
        assert!(!state.ui.show_confirm_dialog);
    }

    #[test]
    fn test_save_failure_is_reported_once() {
        let (mut state, slot) = new_state();
        slot.set_read_only(true);

        state.create_document();
        assert!(state.ui.save_failure_unreported);

        state.update_toast(0.0);
        assert_eq!(
            state.ui.toast_message.as_deref(),
            Some("Could not save documents")
        );
        assert!(!state.ui.save_failure_unreported);

        state.update_toast(10.0);
        assert!(state.ui.toast_message.is_none());
    }

    #[test]
    fn test_update_settings_changes_autosave_delay() {
        let (mut state, _slot) = new_state();
        state.update_settings(|s| s.autosave_delay_ms = 10);
        assert_eq!(state.settings.autosave_delay_ms, 50);
        assert_eq!(state.editor.autosave_delay(), Duration::from_millis(50));
    }

    #[test]
    fn test_toast_expires() {
        let (mut state, _slot) = new_state();
        state.show_toast("Saved", 1.0, 2.0);
        state.update_toast(2.0);
        assert!(state.ui.toast_message.is_some());
        state.update_toast(3.0);
        assert!(state.ui.toast_message.is_none());
    }
}
