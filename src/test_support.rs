//! In-memory `NotesApi` used by unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Semaphore;

use crate::client::NotesApi;
use crate::entity::{Note, NoteDraft, NoteTag, PageRequest, PageResult};
use crate::error::{NotehubError, Result};

#[derive(Default)]
pub(crate) struct FakeApi {
    notes: Mutex<Vec<Note>>,
    next_id: AtomicU64,
    fetches: Mutex<Vec<PageRequest>>,
    fetch_error: Mutex<Option<NotehubError>>,
    create_error: Mutex<Option<NotehubError>>,
    gates: Mutex<HashMap<Option<String>, Arc<Semaphore>>>,
}

pub(crate) fn note(id: &str, title: &str) -> Note {
    let now = Utc::now();
    Note {
        id: id.to_string(),
        title: title.to_string(),
        content: None,
        tag: NoteTag::Todo,
        created_at: now,
        updated_at: now,
    }
}

impl FakeApi {
    pub(crate) fn with_notes(count: u64) -> Self {
        let api = FakeApi::default();
        {
            let mut notes = api.notes.lock().unwrap();
            for i in 1..=count {
                notes.push(note(&i.to_string(), &format!("Note {}", i)));
            }
        }
        api.next_id.store(count + 1, Ordering::SeqCst);
        api
    }

    pub(crate) fn fetch_count(&self) -> usize {
        self.fetches.lock().unwrap().len()
    }

    pub(crate) fn fetches(&self) -> Vec<PageRequest> {
        self.fetches.lock().unwrap().clone()
    }

    pub(crate) fn fail_fetches(&self, error: Option<NotehubError>) {
        *self.fetch_error.lock().unwrap() = error;
    }

    pub(crate) fn fail_creates(&self, error: Option<NotehubError>) {
        *self.create_error.lock().unwrap() = error;
    }

    /// Hold the next fetch for `search` until a permit is added.
    pub(crate) fn gate(&self, search: Option<&str>) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        self.gates
            .lock()
            .unwrap()
            .insert(search.map(str::to_string), Arc::clone(&gate));
        gate
    }

    fn page_for(&self, request: &PageRequest) -> Result<PageResult> {
        if let Some(err) = self.fetch_error.lock().unwrap().clone() {
            return Err(err);
        }

        let notes = self.notes.lock().unwrap();
        let matching: Vec<Note> = notes
            .iter()
            .filter(|n| match &request.search {
                Some(term) => n.title.to_lowercase().contains(&term.to_lowercase()),
                None => true,
            })
            .cloned()
            .collect();

        let per_page = request.per_page as usize;
        let total_pages = matching.len().div_ceil(per_page) as u32;
        let page_notes = matching
            .iter()
            .skip((request.page as usize - 1) * per_page)
            .take(per_page)
            .cloned()
            .collect();

        Ok(PageResult {
            notes: page_notes,
            total_pages,
            page: request.page,
            per_page: request.per_page,
            total_notes: matching.len() as u32,
        })
    }
}

#[async_trait]
impl NotesApi for FakeApi {
    async fn fetch_notes(&self, request: &PageRequest) -> Result<PageResult> {
        self.fetches.lock().unwrap().push(request.clone());

        // the response reflects the server at send time, even if it is held
        let response = self.page_for(request);
        let gate = self.gates.lock().unwrap().remove(&request.search);
        if let Some(gate) = gate {
            let _permit = gate.acquire().await.expect("gate closed");
        }
        response
    }

    async fn create_note(&self, draft: &NoteDraft) -> Result<Note> {
        if let Some(err) = self.create_error.lock().unwrap().clone() {
            return Err(err);
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
        let mut created = note(&id, &draft.title);
        created.content = draft.content.clone();
        created.tag = draft.tag;
        self.notes.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn delete_note(&self, id: &str) -> Result<Note> {
        let mut notes = self.notes.lock().unwrap();
        match notes.iter().position(|n| n.id == id) {
            Some(pos) => Ok(notes.remove(pos)),
            None => Err(NotehubError::NotFound(id.to_string())),
        }
    }
}
