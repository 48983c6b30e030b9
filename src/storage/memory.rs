//! In-memory document slot.

use super::{decode_documents, encode_documents, DocumentStorage};
use crate::document::Document;
use crate::error::{Error, Result};
use std::cell::{Cell, RefCell};
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

/// A document slot kept in memory.
///
/// Clones share the same slot, so a test can hand one handle to the store
/// and inspect the raw stored text through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Rc<RefCell<Option<String>>>,
    read_only: Rc<Cell<bool>>,
}

impl MemoryStorage {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot that already holds `raw`.
    pub fn with_contents(raw: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.set_contents(raw);
        storage
    }

    /// Raw slot contents, if anything was stored.
    pub fn contents(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    /// Overwrite the raw slot contents.
    pub fn set_contents(&self, raw: impl Into<String>) {
        *self.slot.borrow_mut() = Some(raw.into());
    }

    /// Remove everything from the slot.
    pub fn clear(&self) {
        *self.slot.borrow_mut() = None;
    }

    /// Make every subsequent save fail.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }
}

impl DocumentStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<Document>>> {
        match self.slot.borrow().as_deref() {
            Some(raw) => decode_documents(raw).map(Some),
            None => Ok(None),
        }
    }

    fn save(&mut self, documents: &[Document]) -> Result<()> {
        if self.read_only.get() {
            return Err(Error::StorageWrite {
                path: PathBuf::from("<memory>"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "slot is read-only"),
            });
        }
        let raw = encode_documents(documents)?;
        *self.slot.borrow_mut() = Some(raw);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_slot_loads_none() {
        let storage = MemoryStorage::new();
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn test_clones_share_the_slot() {
        let observer = MemoryStorage::new();
        let mut writer = observer.clone();
        writer.save(&[Document::welcome()]).unwrap();

        let loaded = observer.load().unwrap().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "Welcome");
    }

    #[test]
    fn test_malformed_contents_fail_to_load() {
        let storage = MemoryStorage::with_contents("not json");
        assert!(storage.load().is_err());
    }

    #[test]
    fn test_read_only_slot_rejects_saves() {
        let mut storage = MemoryStorage::new();
        storage.set_read_only(true);
        assert!(storage.save(&[]).is_err());
        assert!(storage.contents().is_none());
    }
}
