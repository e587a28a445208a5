//! In-memory note store for deterministic testing.
//!
//! Behaves like a tiny storage backend: created notes get sequential
//! 32-character ids, reads and writes hit a shared map, and every
//! mutating call is counted so tests can assert that a second engine
//! run changes nothing.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use notelink_core::{Error, Folder, NewNote, Note, Result};

use crate::store::NoteStore;

/// Mock note store for testing.
#[derive(Debug, Default)]
pub struct MockNoteStore {
    state: Mutex<MockState>,
}

#[derive(Debug, Default)]
struct MockState {
    folders: Vec<Folder>,
    notes: BTreeMap<String, Note>,
    next_id: u64,
    creates: u64,
    updates: u64,
    deletes: u64,
    fail_updates: bool,
}

impl MockNoteStore {
    /// Create an empty mock store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a folder. `parent` of `None` makes it top-level.
    pub fn with_folder(self, id: &str, title: &str, parent: Option<&str>) -> Self {
        self.state.lock().unwrap().folders.push(Folder {
            id: id.into(),
            title: title.into(),
            parent_id: parent.map(Into::into),
        });
        self
    }

    /// Add a note with an explicit id and body.
    pub fn with_note(self, id: &str, title: &str, parent: &str, body: &str) -> Self {
        self.state.lock().unwrap().notes.insert(
            id.into(),
            Note {
                id: id.into(),
                title: title.into(),
                parent_id: parent.into(),
                body: body.into(),
            },
        );
        self
    }

    /// Make every `update_note_body` call fail, for testing that
    /// storage errors abort the run.
    pub fn with_failing_updates(self) -> Self {
        self.state.lock().unwrap().fail_updates = true;
        self
    }

    /// Snapshot of all surviving notes, ordered by id.
    pub fn notes(&self) -> Vec<Note> {
        self.state.lock().unwrap().notes.values().cloned().collect()
    }

    /// Look up one note by id.
    pub fn note(&self, id: &str) -> Option<Note> {
        self.state.lock().unwrap().notes.get(id).cloned()
    }

    /// Find a note by title under a given parent folder.
    pub fn note_titled(&self, parent: &str, title: &str) -> Option<Note> {
        self.state
            .lock()
            .unwrap()
            .notes
            .values()
            .find(|n| n.parent_id == parent && n.title == title)
            .cloned()
    }

    pub fn create_count(&self) -> u64 {
        self.state.lock().unwrap().creates
    }

    pub fn update_count(&self) -> u64 {
        self.state.lock().unwrap().updates
    }

    pub fn delete_count(&self) -> u64 {
        self.state.lock().unwrap().deletes
    }

    /// Zero the mutation counters, keeping the stored data. Useful
    /// between two runs in an idempotence test.
    pub fn reset_counters(&self) {
        let mut state = self.state.lock().unwrap();
        state.creates = 0;
        state.updates = 0;
        state.deletes = 0;
    }
}

#[async_trait]
impl NoteStore for MockNoteStore {
    async fn list_folders(&self) -> Result<Vec<Folder>> {
        Ok(self.state.lock().unwrap().folders.clone())
    }

    async fn list_notes(&self) -> Result<Vec<Note>> {
        Ok(self.notes())
    }

    async fn note_body(&self, id: &str) -> Result<String> {
        self.state
            .lock()
            .unwrap()
            .notes
            .get(id)
            .map(|n| n.body.clone())
            .ok_or_else(|| Error::NotFound(format!("note {id}")))
    }

    async fn create_note(&self, req: NewNote) -> Result<String> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        state.creates += 1;
        let id = format!("{:032x}", state.next_id);
        state.notes.insert(
            id.clone(),
            Note {
                id: id.clone(),
                title: req.title,
                parent_id: req.parent_id,
                body: String::new(),
            },
        );
        Ok(id)
    }

    async fn update_note_body(&self, id: &str, body: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_updates {
            return Err(Error::Request("simulated update failure".to_string()));
        }
        let note = state
            .notes
            .get_mut(id)
            .ok_or_else(|| Error::NotFound(format!("note {id}")))?;
        note.body = body.to_string();
        state.updates += 1;
        Ok(())
    }

    async fn delete_note(&self, id: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state
            .notes
            .remove(id)
            .ok_or_else(|| Error::NotFound(format!("note {id}")))?;
        state.deletes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_created_ids_are_valid_link_targets() {
        let store = MockNoteStore::new();
        let id = store
            .create_note(NewNote {
                title: "~/A".into(),
                parent_id: "a".into(),
            })
            .await
            .unwrap();

        assert_eq!(id.len(), notelink_core::NOTE_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn test_created_ids_are_unique() {
        let store = MockNoteStore::new();
        let req = || NewNote {
            title: "t".into(),
            parent_id: "p".into(),
        };
        let a = store.create_note(req()).await.unwrap();
        let b = store.create_note(req()).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_update_then_read_body() {
        let store = MockNoteStore::new().with_note("n1", "t", "p", "old");
        store.update_note_body("n1", "new").await.unwrap();
        assert_eq!(store.note_body("n1").await.unwrap(), "new");
        assert_eq!(store.update_count(), 1);
    }

    #[tokio::test]
    async fn test_delete_missing_note_is_an_error() {
        let store = MockNoteStore::new();
        assert!(store.delete_note("ghost").await.is_err());
    }

    #[tokio::test]
    async fn test_failing_updates() {
        let store = MockNoteStore::new()
            .with_note("n1", "t", "p", "old")
            .with_failing_updates();
        assert!(store.update_note_body("n1", "new").await.is_err());
    }
}
