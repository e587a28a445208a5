//! Anchor-note reconciliation: exactly one valid anchor per folder.

use std::future::Future;
use std::pin::Pin;

use tracing::debug;

use notelink_core::{link, NewNote, Result};

use crate::store::NoteStore;
use crate::tree::FolderNode;

/// Counters for what reconciliation changed.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReconcileStats {
    /// Anchor notes created for folders that had none.
    pub anchors_created: u64,
    /// Anchor-like notes (prefix-titled but not this folder's anchor
    /// name) deleted from storage.
    pub misnamed_deleted: u64,
}

/// Ensure every real folder node has exactly one anchor note.
///
/// Per node: any ordinary note whose title carries the anchor prefix
/// is a stray anchor (wrong name for this folder) and is deleted from
/// storage and dropped from the node, so no later stage writes to a
/// deleted id. If the node has no anchor, one is created with the
/// folder's anchor name and the returned id recorded. The synthetic
/// root is skipped; only real folders get anchors.
pub async fn reconcile_anchors(
    root: &mut FolderNode,
    store: &dyn NoteStore,
) -> Result<ReconcileStats> {
    let mut stats = ReconcileStats::default();
    visit(root, store, &mut stats).await?;
    Ok(stats)
}

fn visit<'a>(
    node: &'a mut FolderNode,
    store: &'a dyn NoteStore,
    stats: &'a mut ReconcileStats,
) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
    Box::pin(async move {
        if !node.is_synthetic_root() {
            let misnamed: Vec<String> = node
                .notes
                .values()
                .filter(|n| n.title.starts_with(link::ANCHOR_PREFIX))
                .map(|n| n.id.clone())
                .collect();

            for id in misnamed {
                debug!(folder_id = %node.folder.id, note_id = %id, "deleting misnamed anchor note");
                store.delete_note(&id).await?;
                node.notes.remove(&id);
                stats.misnamed_deleted += 1;
            }

            if node.anchor_note_id.is_none() {
                let title = link::anchor_title(&node.folder.title);
                let id = store
                    .create_note(NewNote {
                        title,
                        parent_id: node.folder.id.clone(),
                    })
                    .await?;
                debug!(folder_id = %node.folder.id, note_id = %id, "created anchor note");
                node.anchor_note_id = Some(id);
                stats.anchors_created += 1;
            }
        }

        for child in node.children.values_mut() {
            visit(child, store, stats).await?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attach::attach_notes;
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

    async fn reconciled_tree(store: &MockNoteStore) -> (FolderNode, ReconcileStats) {
        let folders = store.list_folders().await.unwrap();
        let genealogies: Vec<_> = folders
            .iter()
            .map(|f| folder_genealogy(f, &folders))
            .collect();
        let mut tree = build_tree(&genealogies);
        let notes = store.list_notes().await.unwrap();
        attach_notes(&mut tree, notes, store).await.unwrap();
        let stats = reconcile_anchors(&mut tree, store).await.unwrap();
        (tree, stats)
    }

    #[tokio::test]
    async fn test_missing_anchor_is_created() {
        let store = MockNoteStore::new().with_folder("a", "A", None);
        let (tree, stats) = reconciled_tree(&store).await;

        assert_eq!(stats.anchors_created, 1);
        let anchor_id = tree.children["a"].anchor_note_id.clone().unwrap();
        let anchor = store.note(&anchor_id).unwrap();
        assert_eq!(anchor.title, "~/A");
        assert_eq!(anchor.parent_id, "a");
    }

    #[tokio::test]
    async fn test_existing_anchor_is_kept() {
        let store = MockNoteStore::new()
            .with_folder("a", "A", None)
            .with_note("x1", "~/A", "a", "");
        let (tree, stats) = reconciled_tree(&store).await;

        assert_eq!(stats.anchors_created, 0);
        assert_eq!(store.create_count(), 0);
        assert_eq!(tree.children["a"].anchor_note_id.as_deref(), Some("x1"));
    }

    #[tokio::test]
    async fn test_misnamed_anchor_is_deleted_and_dropped_from_node() {
        let store = MockNoteStore::new()
            .with_folder("a", "A", None)
            .with_note("x1", "~/A", "a", "")
            .with_note("bad", "~/Elsewhere", "a", "");
        let (tree, stats) = reconciled_tree(&store).await;

        assert_eq!(stats.misnamed_deleted, 1);
        assert!(store.note("bad").is_none());
        assert!(!tree.children["a"].notes.contains_key("bad"));
    }

    #[tokio::test]
    async fn test_every_folder_gets_an_anchor() {
        let store = MockNoteStore::new()
            .with_folder("a", "A", None)
            .with_folder("b", "B", Some("a"))
            .with_folder("c", "C", Some("b"));
        let (tree, stats) = reconciled_tree(&store).await;

        assert_eq!(stats.anchors_created, 3);
        let a = &tree.children["a"];
        let b = &a.children["b"];
        let c = &b.children["c"];
        assert!(a.anchor_note_id.is_some());
        assert!(b.anchor_note_id.is_some());
        assert!(c.anchor_note_id.is_some());
    }

    #[tokio::test]
    async fn test_synthetic_root_never_gets_an_anchor() {
        let store = MockNoteStore::new().with_folder("a", "A", None);
        let (tree, _) = reconciled_tree(&store).await;
        assert!(tree.anchor_note_id.is_none());
    }
}
