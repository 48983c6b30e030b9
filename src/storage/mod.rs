//! Document storage for Inkpad
//!
//! The whole document list lives in a single slot and is always written as
//! one JSON array (`[{id, title, content, updatedAt}, ...]`). The slot is
//! abstracted behind [`DocumentStorage`] so the store can run against a file
//! on disk or an in-memory slot.
//!
//! # Architecture
//!
//! - `file.rs` - JSON file in the platform data directory
//! - `memory.rs` - shared in-memory slot

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::document::Document;
use crate::error::{Error, Result};

/// A persistent slot holding the complete document list.
pub trait DocumentStorage {
    /// Read the slot.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet and an error when
    /// the slot exists but cannot be read or decoded.
    fn load(&self) -> Result<Option<Vec<Document>>>;

    /// Replace the slot contents with `documents`.
    fn save(&mut self, documents: &[Document]) -> Result<()>;
}

impl<S: DocumentStorage + ?Sized> DocumentStorage for Box<S> {
    fn load(&self) -> Result<Option<Vec<Document>>> {
        (**self).load()
    }

    fn save(&mut self, documents: &[Document]) -> Result<()> {
        (**self).save(documents)
    }
}

/// Serialize a document list into the slot format.
pub fn encode_documents(documents: &[Document]) -> Result<String> {
    serde_json::to_string(documents).map_err(Error::StorageEncode)
}

/// Parse the slot format back into a document list.
pub fn decode_documents(raw: &str) -> Result<Vec<Document>> {
    serde_json::from_str(raw).map_err(Error::StorageFormat)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Document> {
        vec![
            Document {
                id: "b".to_string(),
                title: "Second".to_string(),
                content: "two\n\n- item".to_string(),
                updated_at: 20,
            },
            Document {
                id: "a".to_string(),
                title: "First".to_string(),
                content: String::new(),
                updated_at: 10,
            },
        ]
    }

    #[test]
    fn test_encode_decode_preserves_order_and_fields() {
        let docs = sample();
        let raw = encode_documents(&docs).unwrap();
        assert_eq!(decode_documents(&raw).unwrap(), docs);
    }

    #[test]
    fn test_decode_rejects_non_array() {
        let result = decode_documents(r#"{"id": "a"}"#);
        assert!(matches!(result, Err(Error::StorageFormat(_))));
    }

    #[test]
    fn test_decode_rejects_missing_fields() {
        let result = decode_documents(r#"[{"id": "a", "title": "t"}]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_empty_array() {
        assert!(decode_documents("[]").unwrap().is_empty());
    }
}
