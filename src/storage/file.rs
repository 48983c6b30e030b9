//! Document slot backed by a JSON file.
//!
//! The slot lives in the platform-specific data directory:
//! - **Windows**: `%APPDATA%\inkpad\documents.json`
//! - **macOS**: `~/Library/Application Support/inkpad/documents.json`
//! - **Linux**: `~/.local/share/inkpad/documents.json`

use super::{decode_documents, encode_documents, DocumentStorage};
use crate::document::Document;
use crate::error::{Error, Result};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Application name used for the data directory
const APP_NAME: &str = "inkpad";

/// Document slot file name
const DOCUMENTS_FILE_NAME: &str = "documents.json";

/// Temporary file name used during atomic writes
const DOCUMENTS_TEMP_NAME: &str = "documents.json.tmp";

/// Get the platform-specific data directory for the application.
///
/// # Errors
///
/// Returns `Error::DataDirNotFound` if the directory cannot be determined.
pub fn get_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(Error::DataDirNotFound)
}

/// A document slot stored as a single JSON file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Use the given file as the slot.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Use `documents.json` in the platform data directory.
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(get_data_dir()?.join(DOCUMENTS_FILE_NAME)))
    }

    /// Path of the slot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_file_name(DOCUMENTS_TEMP_NAME)
    }
}

impl DocumentStorage for FileStorage {
    fn load(&self) -> Result<Option<Vec<Document>>> {
        if !self.path.exists() {
            debug!("No document slot at {}", self.path.display());
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| Error::StorageRead {
            path: self.path.clone(),
            source: e,
        })?;

        if contents.trim().is_empty() {
            debug!("Document slot at {} is empty", self.path.display());
            return Ok(None);
        }

        let documents = decode_documents(&contents).map_err(|e| {
            warn!(
                "Document slot at {} contains invalid data: {}",
                self.path.display(),
                e
            );
            e
        })?;

        info!(
            "Loaded {} document(s) from {}",
            documents.len(),
            self.path.display()
        );
        Ok(Some(documents))
    }

    /// Write the list through a temporary file, then rename over the slot.
    fn save(&mut self, documents: &[Document]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!("Creating data directory: {}", parent.display());
                fs::create_dir_all(parent).map_err(|e| Error::StorageWrite {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let json = encode_documents(documents)?;
        let temp_path = self.temp_path();

        fs::write(&temp_path, json).map_err(|e| Error::StorageWrite {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, &self.path).map_err(|e| Error::StorageWrite {
            path: self.path.clone(),
            source: e,
        })?;

        debug!(
            "Saved {} document(s) to {}",
            documents.len(),
            self.path.display()
        );
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
