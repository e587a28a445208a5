//! Joplin Data API client.
//!
//! Implements [`NoteStore`] over Joplin's local HTTP API. Listing
//! endpoints are paginated with `{ items, has_more }` envelopes; both
//! are drained completely before returning, because the engine
//! requires a full snapshot up front.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use notelink_core::{Error, Folder, NewNote, Note, Result};
use notelink_engine::NoteStore;

use crate::config::JoplinConfig;

/// Timeout for any single API request (seconds).
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP client for the Joplin Data API.
pub struct JoplinClient {
    http: Client,
    config: JoplinConfig,
}

/// Pagination envelope wrapping every listing response.
#[derive(Debug, Deserialize)]
struct Page<T> {
    items: Vec<T>,
    #[serde(default)]
    has_more: bool,
}

/// Folder as Joplin serializes it: top-level folders carry an empty
/// `parent_id`, not a missing one.
#[derive(Debug, Deserialize)]
struct FolderItem {
    id: String,
    title: String,
    #[serde(default)]
    parent_id: String,
}

#[derive(Debug, Deserialize)]
struct NoteItem {
    id: String,
    title: String,
    #[serde(default)]
    parent_id: String,
    #[serde(default)]
    body: String,
}

#[derive(Debug, Deserialize)]
struct NoteBody {
    #[serde(default)]
    body: String,
}

#[derive(Debug, Deserialize)]
struct CreatedNote {
    id: String,
}

#[derive(Debug, Serialize)]
struct BodyUpdate<'a> {
    body: &'a str,
}

fn optional_parent(raw: String) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw)
    }
}

impl From<FolderItem> for Folder {
    fn from(item: FolderItem) -> Self {
        Folder {
            id: item.id,
            title: item.title,
            parent_id: optional_parent(item.parent_id),
        }
    }
}

impl From<NoteItem> for Note {
    fn from(item: NoteItem) -> Self {
        Note {
            id: item.id,
            title: item.title,
            parent_id: item.parent_id,
            body: item.body,
        }
    }
}

impl JoplinClient {
    /// Create a client for the given configuration.
    pub fn new(config: JoplinConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Config(format!("building HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Fetch every page of a listing endpoint.
    async fn drain_pages<T: DeserializeOwned>(&self, path: &str, fields: &str) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page: u32 = 1;

        loop {
            let response = self
                .http
                .get(self.endpoint(path))
                .query(&[
                    ("token", self.config.token.as_str()),
                    ("fields", fields),
                    ("page", &page.to_string()),
                    ("limit", &self.config.page_limit.to_string()),
                ])
                .send()
                .await?;
            let response = ok_or_error(path, response).await?;
            let envelope: Page<T> = response.json().await?;

            items.extend(envelope.items);
            if !envelope.has_more {
                break;
            }
            page += 1;
        }

        debug!(path, pages = page, count = items.len(), "drained listing");
        Ok(items)
    }
}

async fn ok_or_error(context: &str, response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let detail = response.text().await.unwrap_or_default();
    Err(Error::Request(format!("{context}: HTTP {status}: {detail}")))
}

#[async_trait]
impl NoteStore for JoplinClient {
    async fn list_folders(&self) -> Result<Vec<Folder>> {
        let items: Vec<FolderItem> = self.drain_pages("folders", "id,title,parent_id").await?;
        Ok(items.into_iter().map(Into::into).collect())
    }

    async fn list_notes(&self) -> Result<Vec<Note>> {
        let items: Vec<NoteItem> = self.drain_pages("notes", "id,title,parent_id,body").await?;
        Ok(items.into_iter().map(Into::into).collect())
    }

    async fn note_body(&self, id: &str) -> Result<String> {
        let path = format!("notes/{id}");
        let response = self
            .http
            .get(self.endpoint(&path))
            .query(&[
                ("token", self.config.token.as_str()),
                ("fields", "body"),
            ])
            .send()
            .await?;
        let response = ok_or_error(&path, response).await?;
        let note: NoteBody = response.json().await?;
        Ok(note.body)
    }

    async fn create_note(&self, req: NewNote) -> Result<String> {
        let response = self
            .http
            .post(self.endpoint("notes"))
            .query(&[("token", self.config.token.as_str())])
            .json(&req)
            .send()
            .await?;
        let response = ok_or_error("notes", response).await?;
        let created: CreatedNote = response.json().await?;
        Ok(created.id)
    }

    async fn update_note_body(&self, id: &str, body: &str) -> Result<()> {
        let path = format!("notes/{id}");
        let response = self
            .http
            .put(self.endpoint(&path))
            .query(&[("token", self.config.token.as_str())])
            .json(&BodyUpdate { body })
            .send()
            .await?;
        ok_or_error(&path, response).await?;
        Ok(())
    }

    async fn delete_note(&self, id: &str) -> Result<()> {
        let path = format!("notes/{id}");
        let response = self
            .http
            .delete(self.endpoint(&path))
            .query(&[("token", self.config.token.as_str())])
            .send()
            .await?;
        ok_or_error(&path, response).await?;
        Ok(())
    }
}
