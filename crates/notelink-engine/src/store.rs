//! The note-storage collaborator interface.
//!
//! The engine never touches storage directly; every read and mutation
//! goes through [`NoteStore`]. Implementations own pagination: the
//! two listing calls return the complete snapshot, fully drained,
//! because the pipeline does not stream.

use async_trait::async_trait;

use notelink_core::{Folder, NewNote, Note, Result};

/// Remote note storage, CRUD plus listing.
///
/// Failures propagate as-is and abort the run; the engine performs no
/// retries. A body update is a single call, so a note is never left
/// partially spliced.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// All folders in the collection, every page drained.
    async fn list_folders(&self) -> Result<Vec<Folder>>;

    /// All notes in the collection, every page drained.
    async fn list_notes(&self) -> Result<Vec<Note>>;

    /// Current body text of one note.
    async fn note_body(&self, id: &str) -> Result<String>;

    /// Create a note and return the id storage assigned to it.
    async fn create_note(&self, req: NewNote) -> Result<String>;

    /// Replace a note's body.
    async fn update_note_body(&self, id: &str, body: &str) -> Result<()>;

    /// Delete a note.
    async fn delete_note(&self, id: &str) -> Result<()>;
}
