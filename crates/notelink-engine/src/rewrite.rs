//! Note-body rewriting: one correct anchor link per note.

use std::future::Future;
use std::pin::Pin;

use tracing::trace;

use notelink_core::{link, Error, Result};

use crate::store::NoteStore;
use crate::tree::FolderNode;

/// Counters for what rewriting touched.
#[derive(Debug, Default, Clone, Copy)]
pub struct RewriteStats {
    /// Anchor-note bodies written (regenerated every run).
    pub anchors_rewritten: u64,
    /// Ordinary notes that had no anchor link and got one appended.
    pub bodies_appended: u64,
    /// Ordinary notes with at least one stale link spliced in place.
    pub bodies_relinked: u64,
}

/// Walk the reconciled tree and rewrite bodies.
///
/// Anchor-note bodies are fully owned by this system and overwritten
/// unconditionally: the root sentinel for top-level folders, a link
/// to the parent folder's anchor everywhere else. Ordinary notes keep
/// their content; only their anchor link is appended or spliced.
pub async fn rewrite_links(root: &FolderNode, store: &dyn NoteStore) -> Result<RewriteStats> {
    let mut stats = RewriteStats::default();
    for child in root.children.values() {
        visit(root, child, store, &mut stats).await?;
    }
    Ok(stats)
}

fn visit<'a>(
    parent: &'a FolderNode,
    node: &'a FolderNode,
    store: &'a dyn NoteStore,
    stats: &'a mut RewriteStats,
) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
    Box::pin(async move {
        let anchor_id = node
            .anchor_note_id
            .as_deref()
            .ok_or_else(|| missing_anchor(&node.folder.id))?;

        let anchor_body = if parent.is_synthetic_root() {
            link::ROOT_SENTINEL.to_string()
        } else {
            let parent_anchor = parent
                .anchor_note_id
                .as_deref()
                .ok_or_else(|| missing_anchor(&parent.folder.id))?;
            link::format_link(&link::anchor_title(&parent.folder.title), parent_anchor)
        };
        store.update_note_body(anchor_id, &anchor_body).await?;
        stats.anchors_rewritten += 1;

        let link_name = link::anchor_title(&node.folder.title);
        for note in node.notes.values() {
            let body = store.note_body(&note.id).await?;
            match plan_rewrite(&body, &link_name, anchor_id)? {
                BodyEdit::Unchanged => {
                    trace!(note_id = %note.id, "anchor link already correct");
                }
                BodyEdit::Append(new_body) => {
                    store.update_note_body(&note.id, &new_body).await?;
                    stats.bodies_appended += 1;
                }
                BodyEdit::Relink(new_body) => {
                    store.update_note_body(&note.id, &new_body).await?;
                    stats.bodies_relinked += 1;
                }
            }
        }

        for child in node.children.values() {
            visit(node, child, store, stats).await?;
        }
        Ok(())
    })
}

fn missing_anchor(folder_id: &str) -> Error {
    Error::Internal(format!(
        "folder {folder_id} reached rewriting without an anchor note"
    ))
}

/// The rewrite decision for one note body.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum BodyEdit {
    /// Every anchor link already points at the right target.
    Unchanged,
    /// No anchor link present; the correct one is appended after a
    /// horizontal rule.
    Append(String),
    /// At least one stale link spliced in place.
    Relink(String),
}

/// Compute the new body for a note that must link to
/// `(link_name, link_id)`.
///
/// Stale occurrences are replaced by character-offset splicing:
/// edits are collected from the match positions on the original text
/// and applied highest offset first so earlier offsets stay valid.
/// Any inconsistency between the matches and the text aborts with
/// [`Error::LinkOffsets`] instead of risking a corrupted splice.
pub(crate) fn plan_rewrite(body: &str, link_name: &str, link_id: &str) -> Result<BodyEdit> {
    let wanted = link::format_link(link_name, link_id);

    let matches = link::scan_links(body);
    if matches.is_empty() {
        return Ok(BodyEdit::Append(format!("{body}\n\n***\n{wanted}")));
    }

    verify_offsets(body, &matches)?;

    let stale: Vec<&link::LinkMatch> = matches
        .iter()
        .filter(|m| !(m.name == link_name && m.id == link_id))
        .collect();
    if stale.is_empty() {
        return Ok(BodyEdit::Unchanged);
    }

    let mut new_body = body.to_string();
    for m in stale.iter().rev() {
        new_body.replace_range(m.start..m.end, &wanted);
    }
    Ok(BodyEdit::Relink(new_body))
}

/// Sanity-check match offsets against the text they were computed
/// from: in bounds, on char boundaries, strictly increasing and
/// non-overlapping, and each span reproducing its own link text.
fn verify_offsets(body: &str, matches: &[link::LinkMatch]) -> Result<()> {
    let mut prev_end = 0;
    for m in matches {
        if m.start < prev_end || m.end > body.len() || m.start >= m.end {
            return Err(Error::LinkOffsets(format!(
                "match span {}..{} out of order or out of bounds (body len {})",
                m.start,
                m.end,
                body.len()
            )));
        }
        let span = body.get(m.start..m.end).ok_or_else(|| {
            Error::LinkOffsets(format!("match span {}..{} splits a character", m.start, m.end))
        })?;
        if span != link::format_link(&m.name, &m.id) {
            return Err(Error::LinkOffsets(format!(
                "match span {}..{} does not reproduce its link",
                m.start, m.end
            )));
        }
        prev_end = m.end;
    }
    Ok(())
}
