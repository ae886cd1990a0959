//! One user-facing notes view: UI state, search debouncer and list cache.

use std::mem;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, warn};

use super::state::UiState;
use super::view::{ListView, ModalView, PaginationView, Screen};
use crate::cache::{QueryCache, QueryKey, QueryState};
use crate::client::NotesApi;
use crate::config::ClientConfig;
use crate::entity::{Note, NoteDraft};
use crate::error::Result;
use crate::search::Debouncer;

struct SessionState {
    ui: UiState,
    debouncer: Debouncer<String>,
    /// Last read state applied, tagged with the key it belongs to.
    display: Option<(QueryKey, QueryState)>,
    submitting: bool,
    form_error: Option<String>,
}

impl SessionState {
    fn active_key(&self) -> QueryKey {
        QueryKey::notes(self.ui.current_page, self.debouncer.value())
    }
}

/// Drives the notes list the way the browser client does.
///
/// Methods take `&self` so reads for different keys can overlap. A read only
/// updates the displayed list if its key is still the active key when it
/// resolves.
pub struct Session<A> {
    cache: QueryCache<A>,
    inner: Mutex<SessionState>,
}

impl<A: NotesApi + 'static> Session<A> {
    pub fn new(api: A, config: &ClientConfig) -> Self {
        Self::with_cache(
            QueryCache::with_api(Arc::new(api), config.per_page),
            config.debounce,
        )
    }

    pub fn with_cache(cache: QueryCache<A>, debounce: Duration) -> Self {
        Self {
            cache,
            inner: Mutex::new(SessionState {
                ui: UiState::default(),
                debouncer: Debouncer::new(String::new(), debounce),
                display: None,
                submitting: false,
                form_error: None,
            }),
        }
    }

    pub fn cache(&self) -> &QueryCache<A> {
        &self.cache
    }

    pub async fn ui(&self) -> UiState {
        self.inner.lock().await.ui.clone()
    }

    /// Key of the read that currently drives the list.
    pub async fn active_key(&self) -> QueryKey {
        self.inner.lock().await.active_key()
    }

    /// Record a keystroke in the search box.
    ///
    /// The page goes back to 1 immediately; the search term used for reads
    /// only changes once the debouncer settles.
    pub async fn type_search(&self, value: &str) {
        let mut state = self.inner.lock().await;
        state.ui = mem::take(&mut state.ui).with_search(value);
        state.debouncer.input(value.to_string(), Instant::now());
    }

    /// Settle the search term if the debounce window has elapsed at `now`.
    pub async fn poll_search(&self, now: Instant) -> Option<String> {
        self.inner.lock().await.debouncer.poll(now)
    }

    /// Wait until the search input has been stable for the debounce window.
    ///
    /// Returns the new term, or `None` if nothing was pending or the final
    /// value matched the previous term.
    pub async fn settle_search(&self) -> Option<String> {
        loop {
            let deadline = self.inner.lock().await.debouncer.deadline()?;
            sleep_until(deadline).await;

            let mut state = self.inner.lock().await;
            if let Some(term) = state.debouncer.poll(Instant::now()) {
                debug!(term = %term, "search settled");
                return Some(term);
            }
            if !state.debouncer.is_pending() {
                return None;
            }
        }
    }

    pub async fn set_page(&self, page: u32) {
        let mut state = self.inner.lock().await;
        state.ui = mem::take(&mut state.ui).with_page(page);
    }

    pub async fn open_modal(&self) {
        let mut state = self.inner.lock().await;
        state.ui = mem::take(&mut state.ui).open_modal();
    }

    pub async fn close_modal(&self) {
        let mut state = self.inner.lock().await;
        state.ui = mem::take(&mut state.ui).close_modal();
        state.form_error = None;
    }

    /// Show a form error without submitting, e.g. for input rejected
    /// before it could become a draft. Opens the form if it was closed.
    pub async fn reject_form(&self, message: impl Into<String>) {
        let mut state = self.inner.lock().await;
        state.ui = mem::take(&mut state.ui).open_modal();
        state.form_error = Some(message.into());
    }

    /// Read the active key and show the result if the key is still active.
    ///
    /// Returns whether the result was applied.
    pub async fn refresh(&self) -> bool {
        let key = self.active_key().await;
        let handle = self.cache.start(&key).await;
        if let Some(state) = self.cache.snapshot(&key).await {
            self.apply(&key, state).await;
        }

        let outcome = self.cache.finish(handle).await;
        if !outcome.current {
            // the mutation that invalidated this key refetches it
            warn!(?key, "discarding response that predates an invalidation");
            return false;
        }
        let state = match outcome.result {
            Ok(page) => QueryState::success(page),
            Err(err) => QueryState::failed(err),
        };
        self.apply(&key, state).await
    }

    async fn apply(&self, key: &QueryKey, read: QueryState) -> bool {
        let mut state = self.inner.lock().await;
        if state.active_key() != *key {
            warn!(?key, "discarding response for inactive key");
            return false;
        }
        state.display = Some((key.clone(), read));
        true
    }

    /// Submit the create form. Success closes the form and refreshes the
    /// list; failure keeps the form open with the error shown.
    pub async fn submit_create(&self, draft: &NoteDraft) -> Result<Note> {
        {
            let mut state = self.inner.lock().await;
            state.submitting = true;
            state.form_error = None;
        }

        match self.cache.create(draft).await {
            Ok(note) => {
                {
                    let mut state = self.inner.lock().await;
                    state.submitting = false;
                    state.ui = mem::take(&mut state.ui).close_modal();
                }
                self.refresh().await;
                Ok(note)
            }
            Err(err) => {
                warn!(error = %err, "create failed");
                let mut state = self.inner.lock().await;
                state.submitting = false;
                state.form_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Delete a note and refresh the list. Errors go back to the caller only.
    pub async fn delete_note(&self, id: &str) -> Result<Note> {
        let note = self.cache.delete(id).await?;
        self.refresh().await;
        Ok(note)
    }

    /// Current frame.
    pub async fn screen(&self) -> Screen {
        let state = self.inner.lock().await;
        let active = state.active_key();

        let read = match &state.display {
            None => None,
            Some((key, read)) if *key == active => Some(read.clone()),
            // the key moved on and its read has not started yet
            Some(_) => Some(QueryState::pending()),
        };
        let total_pages = read
            .as_ref()
            .and_then(QueryState::data)
            .map(|page| page.total_pages)
            .unwrap_or(0);

        let modal = if state.ui.is_modal_open() {
            ModalView::Open {
                submitting: state.submitting,
                error: state.form_error.clone(),
            }
        } else {
            ModalView::Closed
        };

        Screen {
            search_query: state.ui.search_query.clone(),
            pagination: PaginationView::new(total_pages, state.ui.current_page),
            list: ListView::from_state(read.as_ref()),
            modal,
        }
    }
}
