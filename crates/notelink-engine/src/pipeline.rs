//! The end-to-end anchor-link run.

use tracing::{info, warn};

use notelink_core::{link, Folder, Result};

use crate::attach::attach_notes;
use crate::genealogy::folder_genealogy;
use crate::reconcile::reconcile_anchors;
use crate::rewrite::rewrite_links;
use crate::store::NoteStore;
use crate::tree::build_tree;

/// What a run saw and changed. On a converged collection a second run
/// reports zero creations, deletions, appends, and relinks.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunReport {
    /// Folders in the snapshot (after dropping unlinkable titles).
    pub folders: u64,
    /// Folders skipped because their title contains `[` or `]`.
    pub unlinkable_folders: u64,
    /// Notes in the snapshot.
    pub notes: u64,
    /// Notes whose parent folder matched no tree node.
    pub orphaned_notes: u64,
    /// Duplicate anchor candidates deleted during attachment.
    pub duplicate_anchors_deleted: u64,
    /// Misnamed anchor-like notes deleted during reconciliation.
    pub misnamed_notes_deleted: u64,
    /// Anchor notes created.
    pub anchors_created: u64,
    /// Ordinary notes that gained their first anchor link.
    pub bodies_appended: u64,
    /// Ordinary notes with stale links corrected.
    pub bodies_relinked: u64,
}

impl RunReport {
    /// Whether the run changed anything beyond regenerating anchor
    /// bodies (which are rewritten every run).
    pub fn converged(&self) -> bool {
        self.duplicate_anchors_deleted == 0
            && self.misnamed_notes_deleted == 0
            && self.anchors_created == 0
            && self.bodies_appended == 0
            && self.bodies_relinked == 0
    }
}

/// Run the full pipeline once against `store`.
///
/// Strictly sequential: snapshot, genealogies, tree merge, note
/// attachment, anchor reconciliation, body rewriting. Any storage
/// failure aborts the run; anomalies the spec recovers locally
/// (dangling parents, orphaned notes) are counted, not fatal.
pub async fn auto_link(store: &dyn NoteStore) -> Result<RunReport> {
    let mut report = RunReport::default();

    let all_folders = store.list_folders().await?;
    let folders: Vec<Folder> = all_folders
        .into_iter()
        .filter(|f| {
            if link::title_is_linkable(&f.title) {
                true
            } else {
                warn!(folder_id = %f.id, title = %f.title, "folder title cannot be linked, skipping");
                report.unlinkable_folders += 1;
                false
            }
        })
        .collect();
    let notes = store.list_notes().await?;
    report.folders = folders.len() as u64;
    report.notes = notes.len() as u64;
    info!(
        stage = "snapshot",
        folder_count = report.folders,
        note_count = report.notes,
        "snapshot loaded"
    );

    let genealogies: Vec<Vec<&Folder>> = folders
        .iter()
        .map(|f| folder_genealogy(f, &folders))
        .collect();
    let mut tree = build_tree(&genealogies);
    info!(stage = "tree", folder_count = tree.folder_count() as u64, "folder tree built");

    let attach = attach_notes(&mut tree, notes, store).await?;
    report.orphaned_notes = attach.orphaned.len() as u64;
    report.duplicate_anchors_deleted = attach.duplicates_deleted;
    if report.orphaned_notes > 0 {
        warn!(
            stage = "attach",
            orphan_count = report.orphaned_notes,
            "notes excluded, parent folder not in tree"
        );
    }
    info!(
        stage = "attach",
        deleted = attach.duplicates_deleted,
        "notes attached"
    );

    let reconciled = reconcile_anchors(&mut tree, store).await?;
    report.anchors_created = reconciled.anchors_created;
    report.misnamed_notes_deleted = reconciled.misnamed_deleted;
    info!(
        stage = "reconcile",
        created = reconciled.anchors_created,
        deleted = reconciled.misnamed_deleted,
        "anchors reconciled"
    );

    let rewritten = rewrite_links(&tree, store).await?;
    report.bodies_appended = rewritten.bodies_appended;
    report.bodies_relinked = rewritten.bodies_relinked;
    info!(
        stage = "rewrite",
        updated = rewritten.bodies_appended + rewritten.bodies_relinked,
        "note bodies linked"
    );

    Ok(report)
}
