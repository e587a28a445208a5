//! Ancestor-chain resolution for a single folder.

use notelink_core::Folder;

/// The ancestor chain of `folder`, ordered root first, `folder` last.
///
/// The walk stops when the current folder has no parent id, or when
/// the parent id matches no record in `folders` (a dangling reference
/// makes the chain root there rather than failing). A folder already
/// present in the chain also stops the walk, so corrupted parent
/// pointers forming a cycle terminate instead of hanging.
pub fn folder_genealogy<'a>(folder: &'a Folder, folders: &'a [Folder]) -> Vec<&'a Folder> {
    let mut chain = vec![folder];

    loop {
        let tail = chain[chain.len() - 1];
        let Some(parent_id) = tail.parent_id.as_deref() else {
            break;
        };
        let Some(parent) = folders.iter().find(|f| f.id == parent_id) else {
            break;
        };
        if chain.iter().any(|seen| seen.id == parent.id) {
            break;
        }
        chain.push(parent);
    }

    chain.reverse();
    chain
}
