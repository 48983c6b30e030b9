//! Document store for Inkpad
//!
//! This module defines the `DocumentStore`, the authoritative list of
//! documents plus the currently selected one. Every mutation rewrites the
//! whole list into the storage slot.
//!
//! # Invariants
//!
//! - Documents are kept in display order, newest created first.
//! - The active id is either `None` or the id of a document in the list.
//! - Unknown ids passed to `update` or `delete` are ignored.

use crate::document::{Document, DocumentPatch, DocumentUpdate};
use crate::storage::DocumentStorage;
use log::{debug, info, warn};

/// The document list, the active selection and the slot they persist to.
#[derive(Debug)]
pub struct DocumentStore<S: DocumentStorage> {
    /// Documents in display order
    documents: Vec<Document>,
    /// Id of the selected document
    active_id: Option<String>,
    /// Persistent slot
    storage: S,
    /// Whether the most recent save failed
    last_save_failed: bool,
}

impl<S: DocumentStorage> DocumentStore<S> {
    /// Load the document list from `storage`.
    ///
    /// An empty slot is seeded with the welcome document, which is saved
    /// right away. A slot that cannot be read or decoded yields an empty
    /// list; the failure is logged and not reported further.
    pub fn load(storage: S) -> Self {
        let mut store = Self {
            documents: Vec::new(),
            active_id: None,
            storage,
            last_save_failed: false,
        };

        match store.storage.load() {
            Ok(Some(documents)) => {
                info!("Document store loaded with {} document(s)", documents.len());
                store.documents = documents;
            }
            Ok(None) => {
                info!("No stored documents, seeding welcome document");
                store.documents.push(Document::welcome());
                store.persist();
            }
            Err(e) => {
                warn!("Failed to load documents: {}. Starting with an empty list.", e);
            }
        }

        store.active_id = store.documents.first().map(|d| d.id.clone());
        store
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// All documents in display order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the store holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Id of the selected document.
    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    /// The selected document.
    pub fn active_document(&self) -> Option<&Document> {
        self.active_id.as_deref().and_then(|id| self.get(id))
    }

    /// Look up a document by id.
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    /// Whether the last write to the slot failed.
    pub fn last_save_failed(&self) -> bool {
        self.last_save_failed
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Create an untitled document at the top of the list and select it.
    ///
    /// Returns the new document's id.
    pub fn create(&mut self) -> String {
        let document = Document::untitled();
        let id = document.id.clone();
        debug!("Creating document {}", id);

        self.documents.insert(0, document);
        self.active_id = Some(id.clone());
        self.persist();
        id
    }

    /// Merge `patch` into the document with `id`.
    ///
    /// Returns `false` when no such document exists; the list is still
    /// persisted.
    pub fn update(&mut self, id: &str, patch: DocumentPatch) -> bool {
        let found = match self.documents.iter_mut().find(|d| d.id == id) {
            Some(document) => {
                document.apply(patch);
                debug!("Updated document {}", id);
                true
            }
            None => {
                debug!("Ignoring update for unknown document {}", id);
                false
            }
        };
        self.persist();
        found
    }

    /// Apply an update produced by the editor.
    pub fn apply(&mut self, update: DocumentUpdate) -> bool {
        self.update(&update.id, update.patch)
    }

    /// Remove the document with `id`.
    ///
    /// If it was selected, the selection moves to the first remaining
    /// document (or to nothing). Returns `false` for an unknown id.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.documents.len();
        self.documents.retain(|d| d.id != id);
        let removed = self.documents.len() != before;

        if removed {
            info!("Deleted document {}", id);
            if self.active_id.as_deref() == Some(id) {
                self.active_id = self.documents.first().map(|d| d.id.clone());
            }
        } else {
            debug!("Ignoring delete for unknown document {}", id);
        }

        self.persist();
        removed
    }

    /// Select the document with `id`.
    ///
    /// Returns `true` if the selection changed.
    pub fn select(&mut self, id: &str) -> bool {
        if self.active_id.as_deref() == Some(id) || self.get(id).is_none() {
            return false;
        }
        self.active_id = Some(id.to_string());
        true
    }

    /// Write the complete list to the slot, replacing what was there.
    ///
    /// Returns `true` on success. Failures are logged; the in-memory list
    /// stays authoritative.
    pub fn persist(&mut self) -> bool {
        match self.storage.save(&self.documents) {
            Ok(()) => {
                self.last_save_failed = false;
                true
            }
            Err(e) => {
                warn!("Failed to save documents: {}", e);
                self.last_save_failed = true;
                false
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
