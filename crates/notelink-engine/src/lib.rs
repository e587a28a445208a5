//! # notelink-engine
//!
//! The anchor-link pipeline: rebuild the folder tree from a flat
//! snapshot, attach notes, reconcile anchor notes, and rewrite note
//! bodies so every note links to its folder's anchor.
//!
//! Stages run strictly in sequence, each consuming the previous
//! stage's output:
//!
//! 1. [`genealogy`] — root-to-folder ancestor chains
//! 2. [`tree`] — trie-merge of all chains under a synthetic root
//! 3. [`attach`] — distribute notes into their exact folders
//! 4. [`reconcile`] — exactly one anchor note per folder
//! 5. [`rewrite`] — one correct anchor link per note body
//!
//! [`pipeline::auto_link`] wires them together against any
//! [`store::NoteStore`] implementation.

pub mod attach;
pub mod genealogy;
pub mod mock;
pub mod pipeline;
pub mod reconcile;
pub mod rewrite;
pub mod store;
pub mod tree;

pub use attach::{attach_notes, AttachOutcome};
pub use genealogy::folder_genealogy;
pub use mock::MockNoteStore;
pub use pipeline::{auto_link, RunReport};
pub use reconcile::{reconcile_anchors, ReconcileStats};
pub use rewrite::{rewrite_links, RewriteStats};
pub use store::NoteStore;
pub use tree::{build_tree, FolderNode};
