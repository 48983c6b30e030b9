//! Document model for Inkpad
//!
//! A `Document` is one note: an opaque id, a title, Markdown content and
//! the time of its last modification. The serialized field names match the
//! storage slot format (`id`, `title`, `content`, `updatedAt`).

use chrono::{Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title given to documents created with the "new document" action.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Title of the document seeded on first run.
pub const WELCOME_TITLE: &str = "Welcome";

/// Content of the document seeded on first run.
pub const WELCOME_CONTENT: &str =
    "# Welcome\n\nThis is your first document. Edit this Markdown on the left.";

/// Current time as milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Generate a fresh, collision-resistant document id.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Document
// ─────────────────────────────────────────────────────────────────────────────

/// A single Markdown note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique id, immutable once created
    pub id: String,
    /// Display title
    pub title: String,
    /// Markdown source
    pub content: String,
    /// Last modification time (milliseconds since the Unix epoch)
    #[serde(rename = "updatedAt")]
    pub updated_at: i64,
}

impl Document {
    /// Create a document with a freshly generated id and the current time.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            title: title.into(),
            content: content.into(),
            updated_at: now_millis(),
        }
    }

    /// Create an empty document with the default title.
    pub fn untitled() -> Self {
        Self::new(DEFAULT_TITLE, "")
    }

    /// Create the demo document shown on first run.
    pub fn welcome() -> Self {
        Self::new(WELCOME_TITLE, WELCOME_CONTENT)
    }

    /// Title for list display; an empty title shows as "Untitled".
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            DEFAULT_TITLE
        } else {
            &self.title
        }
    }

    /// Modification time rendered in the local time zone.
    pub fn updated_at_label(&self) -> String {
        match Local.timestamp_millis_opt(self.updated_at).single() {
            Some(time) => time.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => String::from("—"),
        }
    }

    /// Merge the fields set in `patch` and refresh the timestamp.
    pub fn apply(&mut self, patch: DocumentPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        self.updated_at = now_millis();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Partial Updates
// ─────────────────────────────────────────────────────────────────────────────

/// Partial update for a document; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl DocumentPatch {
    /// Patch that only replaces the title.
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: None,
        }
    }

    /// Patch that only replaces the content.
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            title: None,
            content: Some(content.into()),
        }
    }

    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// A patch addressed to a specific document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpdate {
    pub id: String,
    pub patch: DocumentPatch,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
