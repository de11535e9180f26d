//! Paginated Pokedex list with a client-side cache and search.
//!
//! [`ListModel`] holds the state and every transition on it; it never does
//! I/O. [`PokemonListController`] drives the model against a
//! [`PokemonGateway`] and publishes an immutable [`ListState`] snapshot to
//! subscribers after every change.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::config::{PokedexConfig, DEFAULT_PAGE_SIZE};
use crate::errors::GatewayResult;
use crate::gateway::{PokemonGateway, PokemonListDto};
use crate::mapper::{EntryMapper, PokedexListEntry};

/// Shown to the user for any failed page load.
pub const LOAD_ERROR_MESSAGE: &str = "Something went wrong while loading the Pokedex";

const SNAPSHOT_CHANNEL_CAPACITY: usize = 16;

/// Where the next page starts and whether there is one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageCursor {
    pub page: u32,
    pub page_size: u32,
    /// Unknown until the first page has loaded.
    pub total_count: Option<u32>,
    pub end_reached: bool,
}

impl PageCursor {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 0,
            page_size,
            total_count: None,
            end_reached: false,
        }
    }

    pub fn offset(&self) -> u32 {
        self.page.saturating_mul(self.page_size)
    }

    fn advance(&mut self, total_count: u32) {
        self.page += 1;
        self.total_count = Some(total_count);
        self.end_reached = self.offset() >= total_count;
    }
}

/// Arguments for one list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u32,
    pub offset: u32,
}

/// What a call to `load_next_page` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page arrived. `skipped` counts malformed or already-cached records.
    Loaded { added: usize, skipped: usize },
    /// No request was issued: a load was in flight or the end was reached.
    Skipped,
    /// The request failed; state is as it was before the call.
    Failed,
}

/// Immutable view of the list, handed to front-ends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListState {
    /// The displayed list: the whole cache, or the search result.
    pub entries: Vec<PokedexListEntry>,
    pub cached_count: usize,
    pub page: u32,
    pub page_size: u32,
    pub total_count: Option<u32>,
    pub end_reached: bool,
    pub is_loading: bool,
    pub load_error: Option<String>,
    pub query: String,
}

#[derive(Debug, Clone)]
pub struct ListModel {
    mapper: EntryMapper,
    cache: Vec<PokedexListEntry>,
    known_numbers: HashSet<u32>,
    displayed: Vec<PokedexListEntry>,
    cursor: PageCursor,
    is_loading: bool,
    load_error: Option<String>,
    query: String,
}

impl ListModel {
    pub fn new(page_size: u32, mapper: EntryMapper) -> Self {
        Self {
            mapper,
            cache: Vec::new(),
            known_numbers: HashSet::new(),
            displayed: Vec::new(),
            cursor: PageCursor::new(page_size),
            is_loading: false,
            load_error: None,
            query: String::new(),
        }
    }

    pub fn cache(&self) -> &[PokedexListEntry] {
        &self.cache
    }

    pub fn displayed(&self) -> &[PokedexListEntry] {
        &self.displayed
    }

    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Mark a load as started and return what to fetch, or `None` when a
    /// load is already running or there are no more pages.
    pub fn begin_load(&mut self) -> Option<PageRequest> {
        if self.is_loading || self.cursor.end_reached {
            return None;
        }
        self.is_loading = true;
        Some(PageRequest {
            limit: self.cursor.page_size,
            offset: self.cursor.offset(),
        })
    }

    /// Apply the response of the request returned by `begin_load`.
    pub fn finish_load(&mut self, result: GatewayResult<PokemonListDto>) -> LoadOutcome {
        self.is_loading = false;

        let page = match result {
            Ok(page) => page,
            Err(err) => {
                warn!(error = %err, page = self.cursor.page, "failed to load Pokedex page");
                self.load_error = Some(LOAD_ERROR_MESSAGE.to_string());
                return LoadOutcome::Failed;
            }
        };

        let mut added = 0;
        let mut skipped = 0;
        for raw in &page.results {
            let entry = match self.mapper.map(raw) {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(name = %raw.name, error = %err, "skipping list entry");
                    skipped += 1;
                    continue;
                }
            };
            if !self.known_numbers.insert(entry.number) {
                debug!(number = entry.number, "entry already cached");
                skipped += 1;
                continue;
            }
            self.cache.push(entry.clone());
            self.displayed.push(entry);
            added += 1;
        }

        self.cursor.advance(page.count);
        self.load_error = None;
        info!(
            page = self.cursor.page,
            added,
            cached = self.cache.len(),
            total = page.count,
            end_reached = self.cursor.end_reached,
            "loaded Pokedex page"
        );
        LoadOutcome::Loaded { added, skipped }
    }

    /// Abandon an in-flight load without touching the cache or cursor.
    pub fn cancel_load(&mut self) {
        self.is_loading = false;
    }

    /// Filter the displayed list. An empty query shows the whole cache.
    pub fn search(&mut self, query: &str) {
        self.query = query.to_string();
        if query.is_empty() {
            self.displayed = self.cache.clone();
            return;
        }

        let needle = query.trim();
        let needle_lower = needle.to_lowercase();
        self.displayed = self
            .cache
            .iter()
            .filter(|entry| {
                entry.name.to_lowercase().contains(&needle_lower)
                    || entry.number.to_string() == needle
            })
            .cloned()
            .collect();
    }

    /// True when the row at `visible_index` is the last (or past the last)
    /// displayed row and another page may be requested.
    pub fn should_load_more(&self, visible_index: usize) -> bool {
        visible_index.saturating_add(1) >= self.displayed.len()
            && !self.is_loading
            && !self.cursor.end_reached
    }

    pub fn snapshot(&self) -> ListState {
        ListState {
            entries: self.displayed.clone(),
            cached_count: self.cache.len(),
            page: self.cursor.page,
            page_size: self.cursor.page_size,
            total_count: self.cursor.total_count,
            end_reached: self.cursor.end_reached,
            is_loading: self.is_loading,
            load_error: self.load_error.clone(),
            query: self.query.clone(),
        }
    }
}

/// Drives a [`ListModel`] against a gateway, one page at a time.
pub struct PokemonListController<G> {
    gateway: Arc<G>,
    model: Mutex<ListModel>,
    updates: broadcast::Sender<ListState>,
}

impl<G: PokemonGateway> PokemonListController<G> {
    pub fn new(gateway: Arc<G>, page_size: u32, mapper: EntryMapper) -> Self {
        let (updates, _) = broadcast::channel(SNAPSHOT_CHANNEL_CAPACITY);
        Self {
            gateway,
            model: Mutex::new(ListModel::new(page_size, mapper)),
            updates,
        }
    }

    pub fn with_defaults(gateway: Arc<G>) -> Self {
        Self::new(gateway, DEFAULT_PAGE_SIZE, EntryMapper::default())
    }

    pub fn from_config(gateway: Arc<G>, config: &PokedexConfig) -> Self {
        Self::new(
            gateway,
            config.page_size,
            EntryMapper::new(config.sprite_template.clone()),
        )
    }

    /// Fetch the next page and append it to the cache.
    ///
    /// At most one request is in flight per controller; calls made while one
    /// is running, or after the last page, return [`LoadOutcome::Skipped`]
    /// without touching the network.
    pub async fn load_next_page(&self) -> LoadOutcome {
        let request = {
            let mut model = self.model.lock();
            model.begin_load()
        };
        let Some(request) = request else {
            debug!("page load skipped");
            return LoadOutcome::Skipped;
        };
        self.publish();

        debug!(limit = request.limit, offset = request.offset, "requesting Pokedex page");
        let mut guard = LoadingGuard {
            model: &self.model,
            updates: &self.updates,
            armed: true,
        };
        let result = self
            .gateway
            .fetch_pokemon_list(request.limit, request.offset)
            .await;
        guard.armed = false;

        let outcome = self.model.lock().finish_load(result);
        self.publish();
        outcome
    }

    pub fn search(&self, query: &str) {
        self.model.lock().search(query);
        self.publish();
    }

    pub fn should_load_more(&self, visible_index: usize) -> bool {
        self.model.lock().should_load_more(visible_index)
    }

    /// Look up a cached entry by Pokedex number.
    pub fn find_cached(&self, number: u32) -> Option<PokedexListEntry> {
        self.model
            .lock()
            .cache()
            .iter()
            .find(|entry| entry.number == number)
            .cloned()
    }

    pub fn snapshot(&self) -> ListState {
        self.model.lock().snapshot()
    }

    /// Receive a [`ListState`] after every change made from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<ListState> {
        self.updates.subscribe()
    }

    fn publish(&self) {
        let snapshot = self.model.lock().snapshot();
        // No subscribers is not an error.
        let _ = self.updates.send(snapshot);
    }
}

/// Clears the loading flag if a load future is dropped before it finishes.
struct LoadingGuard<'a> {
    model: &'a Mutex<ListModel>,
    updates: &'a broadcast::Sender<ListState>,
    armed: bool,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            let snapshot = {
                let mut model = self.model.lock();
                model.cancel_load();
                model.snapshot()
            };
            debug!("page load cancelled");
            let _ = self.updates.send(snapshot);
        }
    }
}
