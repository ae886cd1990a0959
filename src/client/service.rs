//! Typed note operations over the HTTP adapter.

use async_trait::async_trait;
use tracing::info;

use super::http::HttpClient;
use crate::config::ClientConfig;
use crate::entity::{Note, NoteDraft, PageRequest, PageResult};
use crate::error::Result;

/// The remote notes operations the cache and session depend on.
#[async_trait]
pub trait NotesApi: Send + Sync {
    async fn fetch_notes(&self, request: &PageRequest) -> Result<PageResult>;

    async fn create_note(&self, draft: &NoteDraft) -> Result<Note>;

    async fn delete_note(&self, id: &str) -> Result<Note>;
}

/// NoteHub-backed implementation of [`NotesApi`]. No retries.
#[derive(Debug, Clone)]
pub struct NoteService {
    http: HttpClient,
}

impl NoteService {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    /// Fetch one page. `search` is trimmed and left out when blank.
    pub async fn fetch_page(
        &self,
        page: u32,
        per_page: u32,
        search: Option<&str>,
    ) -> Result<PageResult> {
        self.fetch_notes(&PageRequest::new(page, per_page, search))
            .await
    }
}

#[async_trait]
impl NotesApi for NoteService {
    async fn fetch_notes(&self, request: &PageRequest) -> Result<PageResult> {
        self.http.list(&request.query_pairs()).await
    }

    async fn create_note(&self, draft: &NoteDraft) -> Result<Note> {
        let note = self.http.create(draft).await?;
        info!(id = %note.id, tag = %note.tag, "created note");
        Ok(note)
    }

    async fn delete_note(&self, id: &str) -> Result<Note> {
        let note = self.http.delete(id).await?;
        info!(id = %note.id, "deleted note");
        Ok(note)
    }
}
