//! Structured logging field names for notelink.
//!
//! Every crate logs with these field names so a single run can be
//! filtered stage by stage.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Run aborted, storage write failed |
//! | WARN  | Recoverable anomaly (unlinkable title, orphaned note) |
//! | INFO  | Stage completions, run summary |
//! | DEBUG | Per-folder decisions (anchor created, duplicate deleted) |
//! | TRACE | Per-note body scanning detail |

/// Pipeline stage emitting the event.
/// Values: "snapshot", "genealogy", "tree", "attach", "reconcile", "rewrite"
pub const STAGE: &str = "stage";

/// Folder id being operated on.
pub const FOLDER_ID: &str = "folder_id";

/// Note id being operated on.
pub const NOTE_ID: &str = "note_id";

/// Number of folders in the snapshot.
pub const FOLDER_COUNT: &str = "folder_count";

/// Number of notes in the snapshot.
pub const NOTE_COUNT: &str = "note_count";

/// Notes whose parent folder is not in the tree.
pub const ORPHAN_COUNT: &str = "orphan_count";

/// Anchor notes created this run.
pub const CREATED: &str = "created";

/// Notes deleted this run (duplicate or misnamed anchors).
pub const DELETED: &str = "deleted";

/// Note bodies written this run.
pub const UPDATED: &str = "updated";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
