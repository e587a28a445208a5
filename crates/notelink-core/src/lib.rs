//! # notelink-core
//!
//! Core types and abstractions for the notelink anchor-link engine.
//!
//! This crate provides the folder/note records, the markdown link
//! format, and the error type that the other notelink crates depend on.

pub mod error;
pub mod link;
pub mod logging;
pub mod models;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use link::{
    anchor_title, format_link, scan_links, title_is_linkable, LinkMatch, ANCHOR_PREFIX,
    NOTE_ID_LEN, ROOT_SENTINEL,
};
pub use models::{Folder, NewNote, Note};
