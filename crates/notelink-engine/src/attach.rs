//! Distributing notes into the folder tree.

use tracing::{debug, trace};

use notelink_core::{link, Note, Result};

use crate::store::NoteStore;
use crate::tree::FolderNode;

/// What fell out of attachment.
#[derive(Debug, Default)]
pub struct AttachOutcome {
    /// Notes whose parent folder matched no tree node. Left alone by
    /// the rest of the pipeline; surfaced here for diagnosis.
    pub orphaned: Vec<Note>,
    /// Anchor candidates beyond the first per folder, deleted from
    /// storage.
    pub duplicates_deleted: u64,
}

/// Attach every note to the tree node of its exact containing folder.
///
/// Notes titled exactly `<prefix><folder-title>` are anchor
/// candidates: the first one encountered becomes the node's anchor,
/// every further one is deleted from storage. All other notes land in
/// the node's `notes` map. Notes matching no node are returned as
/// orphans, never an error.
pub async fn attach_notes(
    root: &mut FolderNode,
    notes: Vec<Note>,
    store: &dyn NoteStore,
) -> Result<AttachOutcome> {
    let mut remaining = notes;
    let mut duplicates = Vec::new();
    attach_into(root, &mut remaining, &mut duplicates);

    for id in &duplicates {
        debug!(note_id = %id, "deleting duplicate anchor note");
        store.delete_note(id).await?;
    }

    for note in &remaining {
        trace!(note_id = %note.id, parent_id = %note.parent_id, "note has no folder in tree");
    }

    Ok(AttachOutcome {
        orphaned: remaining,
        duplicates_deleted: duplicates.len() as u64,
    })
}

fn attach_into(node: &mut FolderNode, remaining: &mut Vec<Note>, duplicates: &mut Vec<String>) {
    if !node.is_synthetic_root() {
        let anchor_name = link::anchor_title(&node.folder.title);

        let mut i = 0;
        while i < remaining.len() {
            if remaining[i].parent_id != node.folder.id {
                i += 1;
                continue;
            }
            let note = remaining.swap_remove(i);

            if note.title == anchor_name {
                if node.anchor_note_id.is_none() {
                    node.anchor_note_id = Some(note.id);
                } else {
                    duplicates.push(note.id);
                }
            } else {
                node.notes.insert(note.id.clone(), note);
            }
        }
    }

    for child in node.children.values_mut() {
        attach_into(child, remaining, duplicates);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genealogy::folder_genealogy;
    use crate::mock::MockNoteStore;
    use crate::tree::build_tree;
    use notelink_core::Folder;

    fn folder(id: &str, title: &str, parent: Option<&str>) -> Folder {
        Folder {
            id: id.into(),
            title: title.into(),
            parent_id: parent.map(Into::into),
        }
    }

    fn note(id: &str, title: &str, parent: &str) -> Note {
        Note {
            id: id.into(),
            title: title.into(),
            parent_id: parent.into(),
            body: String::new(),
        }
    }

    fn tree_of(folders: &[Folder]) -> FolderNode {
        let genealogies: Vec<_> = folders
            .iter()
            .map(|f| folder_genealogy(f, folders))
            .collect();
        build_tree(&genealogies)
    }

    #[tokio::test]
    async fn test_notes_land_in_their_exact_folder() {
        let folders = vec![folder("a", "A", None), folder("b", "B", Some("a"))];
        let mut tree = tree_of(&folders);
        let store = MockNoteStore::new();

        let notes = vec![note("n1", "one", "a"), note("n2", "two", "b")];
        let outcome = attach_notes(&mut tree, notes, &store).await.unwrap();

        assert!(outcome.orphaned.is_empty());
        assert!(tree.children["a"].notes.contains_key("n1"));
        assert!(tree.children["a"].children["b"].notes.contains_key("n2"));
        assert!(!tree.children["a"].notes.contains_key("n2"));
    }

    #[tokio::test]
    async fn test_first_anchor_candidate_wins() {
        let folders = vec![folder("a", "A", None)];
        let mut tree = tree_of(&folders);
        let store = MockNoteStore::new().with_note("x1", "~/A", "a", "");

        let notes = vec![note("x1", "~/A", "a")];
        attach_notes(&mut tree, notes, &store).await.unwrap();

        assert_eq!(tree.children["a"].anchor_note_id.as_deref(), Some("x1"));
        assert!(tree.children["a"].notes.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_anchor_candidates_deleted() {
        let folders = vec![folder("a", "A", None)];
        let mut tree = tree_of(&folders);
        let store = MockNoteStore::new()
            .with_note("x1", "~/A", "a", "")
            .with_note("x2", "~/A", "a", "");

        let notes = vec![note("x1", "~/A", "a"), note("x2", "~/A", "a")];
        let outcome = attach_notes(&mut tree, notes, &store).await.unwrap();

        assert_eq!(outcome.duplicates_deleted, 1);
        assert_eq!(store.delete_count(), 1);
        let anchor = tree.children["a"].anchor_note_id.clone().unwrap();
        assert!(anchor == "x1" || anchor == "x2");
        // Exactly one candidate survives in storage.
        assert_eq!(
            store
                .notes()
                .iter()
                .filter(|n| n.title == "~/A" && n.parent_id == "a")
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn test_orphaned_notes_are_returned_not_attached() {
        let folders = vec![folder("a", "A", None)];
        let mut tree = tree_of(&folders);
        let store = MockNoteStore::new();

        let notes = vec![note("n1", "lost", "nowhere")];
        let outcome = attach_notes(&mut tree, notes, &store).await.unwrap();

        assert_eq!(outcome.orphaned.len(), 1);
        assert_eq!(outcome.orphaned[0].id, "n1");
        assert!(tree.children["a"].notes.is_empty());
    }

    #[tokio::test]
    async fn test_misnamed_anchor_like_note_stays_ordinary_here() {
        // A "~/Wrong" note under folder A is not an anchor candidate
        // for A; the reconciler deals with it.
        let folders = vec![folder("a", "A", None)];
        let mut tree = tree_of(&folders);
        let store = MockNoteStore::new();

        let notes = vec![note("n1", "~/Wrong", "a")];
        attach_notes(&mut tree, notes, &store).await.unwrap();

        assert!(tree.children["a"].anchor_note_id.is_none());
        assert!(tree.children["a"].notes.contains_key("n1"));
    }
}
