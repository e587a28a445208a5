//! Folder and note records as seen on the wire.
//!
//! Identifiers are opaque strings; Joplin uses 32-character lowercase
//! hex, but nothing here depends on that beyond the link format in
//! [`crate::link`].

use serde::{Deserialize, Serialize};

/// A folder in the note collection. Folders form a forest via
/// `parent_id`; `None` marks a top-level folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub title: String,
    pub parent_id: Option<String>,
}

impl Folder {
    /// Whether this folder sits at the top level of the collection.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// A note record. `parent_id` is the id of the containing folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub parent_id: String,
    #[serde(default)]
    pub body: String,
}

/// Request to create a new note. The storage backend assigns the id.
#[derive(Debug, Clone, Serialize)]
pub struct NewNote {
    pub title: String,
    pub parent_id: String,
}
