//! # notelink-joplin
//!
//! Joplin Data API implementation of the engine's note-storage
//! collaborator, plus the configuration it runs with. The API is the
//! local HTTP service Joplin exposes when its Web Clipper service is
//! enabled (token-authenticated, paginated).

pub mod client;
pub mod config;

pub use client::JoplinClient;
pub use config::JoplinConfig;
