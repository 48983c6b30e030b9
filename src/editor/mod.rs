//! Editor panel for Inkpad
//!
//! The `EditorPanel` holds the transient edit state of the one document
//! being edited: title and content mirrors that the text widgets write
//! into, plus the values last handed to the store. Edits start the
//! autosave timer; when it expires, each field that differs from its
//! baseline becomes one `DocumentUpdate`.
//!
//! The panel never touches the store directly. Every method that can
//! produce writes returns them, and the caller applies them.

mod debounce;

pub use debounce::{Debouncer, DEFAULT_AUTOSAVE_DELAY};

use crate::document::{Document, DocumentPatch, DocumentUpdate};
use crate::export::MarkdownExport;
use crate::preview::{Block, PreviewCache};
use log::debug;
use std::time::{Duration, Instant};

/// Edit state for the bound document.
#[derive(Debug, Default)]
pub struct EditorPanel {
    /// Id of the bound document
    document_id: Option<String>,
    /// Title as currently typed
    title: String,
    /// Content as currently typed
    content: String,
    /// Title last emitted to the store
    saved_title: String,
    /// Content last emitted to the store
    saved_content: String,
    autosave: Debouncer,
    preview: PreviewCache,
}

impl EditorPanel {
    /// Create an unbound panel with the given autosave delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            autosave: Debouncer::new(delay),
            ..Default::default()
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Binding
    // ─────────────────────────────────────────────────────────────────────────

    /// Bind the panel to `document`.
    ///
    /// Binding the already bound document does nothing. Otherwise unsaved
    /// edits of the previous document are returned as updates and the
    /// mirrors are reset to the new document's stored values.
    pub fn bind(&mut self, document: &Document) -> Vec<DocumentUpdate> {
        if self.document_id.as_deref() == Some(document.id.as_str()) {
            return Vec::new();
        }

        let flushed = self.flush();
        debug!("Editor bound to document {}", document.id);

        self.document_id = Some(document.id.clone());
        self.title = document.title.clone();
        self.content = document.content.clone();
        self.saved_title = document.title.clone();
        self.saved_content = document.content.clone();
        flushed
    }

    /// Release the bound document, returning its unsaved edits.
    pub fn unbind(&mut self) -> Vec<DocumentUpdate> {
        let flushed = self.flush();
        self.discard();
        flushed
    }

    /// Release the bound document and drop its unsaved edits.
    pub fn discard(&mut self) {
        self.autosave.cancel();
        self.document_id = None;
        self.title.clear();
        self.content.clear();
        self.saved_title.clear();
        self.saved_content.clear();
    }

    /// Id of the bound document.
    pub fn document_id(&self) -> Option<&str> {
        self.document_id.as_deref()
    }

    /// Whether a document is bound.
    pub fn is_bound(&self) -> bool {
        self.document_id.is_some()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Editing
    // ─────────────────────────────────────────────────────────────────────────

    /// The title mirror.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The content mirror.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Let `edit` modify the title mirror in place.
    ///
    /// `edit` returns whether it changed the text; if so the autosave timer
    /// restarts at `now`.
    pub fn edit_title(&mut self, now: Instant, edit: impl FnOnce(&mut String) -> bool) -> bool {
        let changed = self.is_bound() && edit(&mut self.title);
        if changed {
            self.autosave.schedule(now);
        }
        changed
    }

    /// Let `edit` modify the content mirror in place.
    ///
    /// `edit` returns whether it changed the text; if so the autosave timer
    /// restarts at `now`.
    pub fn edit_content(&mut self, now: Instant, edit: impl FnOnce(&mut String) -> bool) -> bool {
        let changed = self.is_bound() && edit(&mut self.content);
        if changed {
            self.autosave.schedule(now);
        }
        changed
    }

    /// Replace the title mirror.
    pub fn set_title(&mut self, now: Instant, title: impl Into<String>) {
        let title = title.into();
        self.edit_title(now, |current| {
            if *current == title {
                return false;
            }
            *current = title;
            true
        });
    }

    /// Replace the content mirror.
    pub fn set_content(&mut self, now: Instant, content: impl Into<String>) {
        let content = content.into();
        self.edit_content(now, |current| {
            if *current == content {
                return false;
            }
            *current = content;
            true
        });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Autosave
    // ─────────────────────────────────────────────────────────────────────────

    /// Emit pending updates if the quiet period has passed at `now`.
    pub fn poll(&mut self, now: Instant) -> Vec<DocumentUpdate> {
        if self.autosave.fire(now) {
            self.pending_updates()
        } else {
            Vec::new()
        }
    }

    /// Cancel the timer and emit pending updates right away.
    pub fn flush(&mut self) -> Vec<DocumentUpdate> {
        self.autosave.cancel();
        self.pending_updates()
    }

    /// One update per field that differs from its baseline, title first.
    fn pending_updates(&mut self) -> Vec<DocumentUpdate> {
        let Some(id) = self.document_id.clone() else {
            return Vec::new();
        };

        let mut updates = Vec::new();
        if self.title != self.saved_title {
            self.saved_title = self.title.clone();
            updates.push(DocumentUpdate {
                id: id.clone(),
                patch: DocumentPatch::title(self.title.clone()),
            });
        }
        if self.content != self.saved_content {
            self.saved_content = self.content.clone();
            updates.push(DocumentUpdate {
                id,
                patch: DocumentPatch::content(self.content.clone()),
            });
        }
        updates
    }

    /// Whether the mirrors hold edits not yet emitted.
    pub fn has_unsaved_changes(&self) -> bool {
        self.title != self.saved_title || self.content != self.saved_content
    }

    /// Whether the autosave timer is running.
    pub fn is_autosave_pending(&self) -> bool {
        self.autosave.is_pending()
    }

    /// Time until the autosave fires, `None` when idle.
    pub fn autosave_remaining(&self, now: Instant) -> Option<Duration> {
        self.autosave.remaining(now)
    }

    /// Change the autosave quiet period.
    pub fn set_autosave_delay(&mut self, delay: Duration) {
        self.autosave.set_delay(delay);
    }

    /// The autosave quiet period.
    pub fn autosave_delay(&self) -> Duration {
        self.autosave.delay()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Preview & Export
    // ─────────────────────────────────────────────────────────────────────────

    /// Rendered HTML of the content mirror.
    pub fn preview_html(&mut self) -> &str {
        self.preview.html(&self.content)
    }

    /// Block tree of the content mirror, for the preview pane.
    pub fn preview_blocks(&mut self) -> &[Block] {
        self.preview.blocks(&self.content)
    }

    /// Markdown export of the mirrors, `None` when nothing is bound.
    pub fn export(&self) -> Option<MarkdownExport> {
        self.is_bound()
            .then(|| MarkdownExport::new(&self.title, &self.content))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
