use std::collections::HashMap;
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::client::NotesApi;
use crate::config::DEFAULT_PER_PAGE;
use crate::entity::{Note, NoteDraft, PageRequest, PageResult};
use crate::error::{NotehubError, Result};
use crate::search::normalize_search;

/// Namespace every notes listing is cached under.
pub const NOTES_NAMESPACE: &str = "notes";

/// Listings kept before idle entries are evicted.
pub const DEFAULT_MAX_ENTRIES: usize = 64;

type SharedFetch = Shared<BoxFuture<'static, Result<PageResult>>>;

/// Identifies one list read: namespace, page and settled search term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub namespace: String,
    pub page: u32,
    pub search: Option<String>,
}

impl QueryKey {
    pub fn notes(page: u32, search: &str) -> Self {
        Self {
            namespace: NOTES_NAMESPACE.to_string(),
            page: page.max(1),
            search: normalize_search(search),
        }
    }

    pub fn to_request(&self, per_page: u32) -> PageRequest {
        PageRequest::new(self.page, per_page, self.search.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryStatus {
    Pending,
    Success(PageResult),
    Error(NotehubError),
}

/// Observable state of one cache entry.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    pub status: QueryStatus,
    /// A request for this key is in flight.
    pub is_fetching: bool,
    /// The entry was invalidated and will refetch on the next read.
    pub is_stale: bool,
}

impl QueryState {
    pub fn pending() -> Self {
        Self {
            status: QueryStatus::Pending,
            is_fetching: true,
            is_stale: false,
        }
    }

    pub fn success(page: PageResult) -> Self {
        Self {
            status: QueryStatus::Success(page),
            is_fetching: false,
            is_stale: false,
        }
    }

    pub fn failed(err: NotehubError) -> Self {
        Self {
            status: QueryStatus::Error(err),
            is_fetching: false,
            is_stale: false,
        }
    }

    pub fn data(&self) -> Option<&PageResult> {
        match &self.status {
            QueryStatus::Success(data) => Some(data),
            _ => None,
        }
    }
}

#[derive(Default)]
struct CacheEntry {
    data: Option<PageResult>,
    error: Option<NotehubError>,
    stale: bool,
    in_flight: Option<(u64, SharedFetch)>,
    /// Bumped on every invalidation.
    generation: u64,
    last_used: u64,
}

impl CacheEntry {
    fn fresh_data(&self) -> Option<&PageResult> {
        if self.stale || self.error.is_some() {
            return None;
        }
        self.data.as_ref()
    }

    fn state(&self) -> QueryState {
        let status = match (&self.in_flight, &self.error, &self.data) {
            (Some(_), _, Some(data)) => QueryStatus::Success(data.clone()),
            (Some(_), _, None) => QueryStatus::Pending,
            (None, Some(err), _) => QueryStatus::Error(err.clone()),
            (None, None, Some(data)) => QueryStatus::Success(data.clone()),
            (None, None, None) => QueryStatus::Pending,
        };
        QueryState {
            status,
            is_fetching: self.in_flight.is_some(),
            is_stale: self.stale,
        }
    }
}

#[derive(Default)]
struct Entries {
    by_key: HashMap<QueryKey, CacheEntry>,
    next_fetch_id: u64,
    clock: u64,
}

impl Entries {
    /// Evict least recently used idle entries until one more fits.
    fn make_room(&mut self, max_entries: usize) {
        while self.by_key.len() >= max_entries {
            let oldest = self
                .by_key
                .iter()
                .filter(|(_, entry)| entry.in_flight.is_none())
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => {
                    debug!(?key, "evicting cache entry");
                    self.by_key.remove(&key);
                }
                None => break,
            }
        }
    }
}

/// A read that has been registered with the cache but not yet awaited.
pub struct ReadHandle {
    key: QueryKey,
    generation: u64,
    kind: ReadKind,
}

enum ReadKind {
    Cached(PageResult),
    InFlight(u64, SharedFetch),
}

/// Result of a finished read.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadOutcome {
    pub result: Result<PageResult>,
    /// False when the key was invalidated or evicted while the request was in
    /// flight. Such a result predates a mutation and must not be shown.
    pub current: bool,
}

/// Key-addressed store of list reads with request deduplication and
/// namespace invalidation.
///
/// A response is only ever written into the entry of the key that requested
/// it, and only if the entry has not been invalidated since the request
/// started. Idle entries beyond `max_entries` are evicted, least recently
/// used first.
pub struct QueryCache<A> {
    api: Arc<A>,
    per_page: u32,
    max_entries: usize,
    entries: Mutex<Entries>,
}

impl<A: NotesApi + 'static> QueryCache<A> {
    pub fn new(api: A) -> Self {
        Self::with_api(Arc::new(api), DEFAULT_PER_PAGE)
    }

    pub fn with_api(api: Arc<A>, per_page: u32) -> Self {
        Self {
            api,
            per_page: per_page.max(1),
            max_entries: DEFAULT_MAX_ENTRIES,
            entries: Mutex::new(Entries::default()),
        }
    }

    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries.max(1);
        self
    }

    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Read a key, fetching only when no fresh data is cached.
    pub async fn read(&self, key: &QueryKey) -> Result<PageResult> {
        let handle = self.start(key).await;
        self.finish(handle).await.result
    }

    /// Register a read. Joins an in-flight request for the same key instead
    /// of starting a second one.
    pub async fn start(&self, key: &QueryKey) -> ReadHandle {
        let mut entries = self.entries.lock().await;
        if !entries.by_key.contains_key(key) {
            entries.make_room(self.max_entries);
        }
        entries.clock += 1;
        let now = entries.clock;
        let fetch_id = entries.next_fetch_id;

        let entry = entries.by_key.entry(key.clone()).or_default();
        entry.last_used = now;
        let generation = entry.generation;

        if let Some(data) = entry.fresh_data() {
            debug!(?key, "cache hit");
            return ReadHandle {
                key: key.clone(),
                generation,
                kind: ReadKind::Cached(data.clone()),
            };
        }

        if let Some((id, fetch)) = &entry.in_flight {
            debug!(?key, "joining in-flight read");
            return ReadHandle {
                key: key.clone(),
                generation,
                kind: ReadKind::InFlight(*id, fetch.clone()),
            };
        }

        debug!(?key, "cache miss, fetching");
        let fetch = self.fetch(key);
        entry.in_flight = Some((fetch_id, fetch.clone()));
        entries.next_fetch_id += 1;

        ReadHandle {
            key: key.clone(),
            generation,
            kind: ReadKind::InFlight(fetch_id, fetch),
        }
    }

    /// Await a registered read and record its outcome.
    pub async fn finish(&self, handle: ReadHandle) -> ReadOutcome {
        let (fetch_id, fetch) = match handle.kind {
            ReadKind::Cached(data) => {
                return ReadOutcome {
                    result: Ok(data),
                    current: true,
                }
            }
            ReadKind::InFlight(id, fetch) => (id, fetch),
        };

        let result = fetch.await;

        let mut entries = self.entries.lock().await;
        let mut current = false;
        if let Some(entry) = entries.by_key.get_mut(&handle.key) {
            current = entry.generation == handle.generation;
            let owner = matches!(&entry.in_flight, Some((id, _)) if *id == fetch_id);
            if owner {
                entry.in_flight = None;
                match &result {
                    Ok(data) => {
                        entry.data = Some(data.clone());
                        entry.error = None;
                        entry.stale = false;
                    }
                    Err(err) => {
                        debug!(key = ?handle.key, error = %err, "read failed");
                        entry.error = Some(err.clone());
                    }
                }
            }
        }
        if !current {
            debug!(key = ?handle.key, "read outlived an invalidation");
        }

        ReadOutcome { result, current }
    }

    fn fetch(&self, key: &QueryKey) -> SharedFetch {
        let api = Arc::clone(&self.api);
        let request = key.to_request(self.per_page);
        async move { api.fetch_notes(&request).await }
            .boxed()
            .shared()
    }

    /// Current state of a key, or `None` if it was never read.
    pub async fn snapshot(&self, key: &QueryKey) -> Option<QueryState> {
        let entries = self.entries.lock().await;
        entries.by_key.get(key).map(CacheEntry::state)
    }

    /// Mark every entry in `namespace` stale. In-flight requests are detached
    /// so their responses cannot overwrite the entry. Returns the number of
    /// entries marked.
    pub async fn invalidate(&self, namespace: &str) -> usize {
        let mut entries = self.entries.lock().await;
        let mut marked = 0;
        for (key, entry) in entries.by_key.iter_mut() {
            if key.namespace == namespace {
                entry.stale = true;
                entry.in_flight = None;
                entry.generation += 1;
                marked += 1;
            }
        }
        debug!(namespace, marked, "invalidated cache entries");
        marked
    }

    pub async fn remove(&self, key: &QueryKey) -> bool {
        self.entries.lock().await.by_key.remove(key).is_some()
    }

    pub async fn clear(&self) {
        self.entries.lock().await.by_key.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.by_key.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Create a note, then invalidate the notes listings.
    ///
    /// On failure nothing in the cache changes.
    pub async fn create(&self, draft: &NoteDraft) -> Result<Note> {
        let note = self.api.create_note(draft).await?;
        let marked = self.invalidate(NOTES_NAMESPACE).await;
        info!(id = %note.id, marked, "note created, listings invalidated");
        Ok(note)
    }

    /// Delete a note, then invalidate the notes listings.
    pub async fn delete(&self, id: &str) -> Result<Note> {
        let note = self.api.delete_note(id).await?;
        let marked = self.invalidate(NOTES_NAMESPACE).await;
        info!(id = %note.id, marked, "note deleted, listings invalidated");
        Ok(note)
    }
}
