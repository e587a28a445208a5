//! The anchor-link markdown format.
//!
//! An anchor note is named `<prefix><folder-title>` and is referenced
//! from other notes as `[<prefix><title>](:/<32-char-id>)`. The
//! pattern only works for folder titles that contain neither `[` nor
//! `]`; [`title_is_linkable`] is the boundary check callers use to
//! skip such folders instead of emitting a malformed link.

use regex::Regex;

/// Marker prefix identifying anchor-note titles and link display text.
pub const ANCHOR_PREFIX: &str = "~/";

/// Body given to anchor notes of top-level folders, which have no
/// parent anchor to link to.
pub const ROOT_SENTINEL: &str = "This is a root node";

/// Length of a note identifier as it appears in a link target.
pub const NOTE_ID_LEN: usize = 32;

/// The anchor-note title for a folder.
pub fn anchor_title(folder_title: &str) -> String {
    format!("{ANCHOR_PREFIX}{folder_title}")
}

/// A markdown link to an anchor note.
///
/// `name` must already carry the anchor prefix (see [`anchor_title`]).
pub fn format_link(name: &str, note_id: &str) -> String {
    format!("[{name}](:/{note_id})")
}

/// Whether a folder title can appear in a link without breaking the
/// markdown pattern.
pub fn title_is_linkable(title: &str) -> bool {
    !title.contains('[') && !title.contains(']')
}

/// One anchor-link occurrence found in a note body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMatch {
    /// Byte offset of the opening `[` in the scanned body.
    pub start: usize,
    /// Byte offset one past the closing `)`.
    pub end: usize,
    /// Display text, including the anchor prefix.
    pub name: String,
    /// The 32-character note id the link points to.
    pub id: String,
}

/// Find every anchor-link occurrence in a note body, in document order.
pub fn scan_links(body: &str) -> Vec<LinkMatch> {
    let pattern = format!(
        r"\[({}[^\[\]]*)\]\(:/([a-z0-9]{{{}}})\)",
        regex::escape(ANCHOR_PREFIX),
        NOTE_ID_LEN
    );
    let re = Regex::new(&pattern).unwrap();

    re.captures_iter(body)
        .map(|caps| {
            let whole = caps.get(0).unwrap();
            LinkMatch {
                start: whole.start(),
                end: whole.end(),
                name: caps[1].to_string(),
                id: caps[2].to_string(),
            }
        })
        .collect()
}
