//! The in-memory folder tree.
//!
//! Built fresh each run and discarded afterwards; nothing here is
//! persisted. Each node exclusively owns its children and its notes,
//! so traversal is plain structural recursion.

use std::collections::HashMap;

use notelink_core::{Folder, Note};

/// One folder in the reconstructed hierarchy.
#[derive(Debug)]
pub struct FolderNode {
    pub folder: Folder,
    /// Child nodes keyed by folder id.
    pub children: HashMap<String, FolderNode>,
    /// Ordinary notes belonging to this folder, keyed by note id.
    pub notes: HashMap<String, Note>,
    /// The folder's anchor note, once resolved.
    pub anchor_note_id: Option<String>,
}

impl FolderNode {
    fn new(folder: Folder) -> Self {
        Self {
            folder,
            children: HashMap::new(),
            notes: HashMap::new(),
            anchor_note_id: None,
        }
    }

    /// The non-persisted top-level node owning all root folders.
    /// It has no backing folder and never receives an anchor note.
    pub fn synthetic_root() -> Self {
        Self::new(Folder {
            id: String::new(),
            title: String::new(),
            parent_id: None,
        })
    }

    pub fn is_synthetic_root(&self) -> bool {
        self.folder.id.is_empty()
    }

    /// Total number of real folder nodes in this subtree.
    pub fn folder_count(&self) -> usize {
        let own = usize::from(!self.is_synthetic_root());
        own + self
            .children
            .values()
            .map(FolderNode::folder_count)
            .sum::<usize>()
    }
}

/// Merge every genealogy into a single tree under the synthetic root.
///
/// Each genealogy is inserted as a root-to-leaf path; chains sharing
/// a prefix converge on the same nodes, so the result is independent
/// of the order genealogies are processed in.
pub fn build_tree(genealogies: &[Vec<&Folder>]) -> FolderNode {
    let mut root = FolderNode::synthetic_root();
    for genealogy in genealogies {
        insert_path(&mut root, genealogy);
    }
    root
}

fn insert_path(node: &mut FolderNode, path: &[&Folder]) {
    let Some((head, rest)) = path.split_first() else {
        return;
    };
    let child = node
        .children
        .entry(head.id.clone())
        .or_insert_with(|| FolderNode::new((*head).clone()));
    insert_path(child, rest);
}
