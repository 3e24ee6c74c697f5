use tracing::{debug, info, warn};

use crate::backend::ResultItem;
use crate::error::{AppError, AppResult};
use crate::history::HistoryEntry;

use super::engine::{FetchEvent, FetchMode, FetchRequest};
use super::pagination::Pagination;
use super::store::ResultStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    Search { query: String },
    GotoPage { page: usize },
    Clear,
    RestoreFromHistory { entry: HistoryEntry },
}

/// Work the caller must carry out after a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEffect {
    Fetch(FetchRequest),
    PushHistory(HistoryEntry),
    ReplaceHistory(HistoryEntry),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Loading,
    Loaded,
    Errored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingFetch {
    token: u64,
    mode: FetchMode,
    record_history: bool,
}

#[derive(Debug, Clone)]
pub struct SearchState {
    query: String,
    results: ResultStore,
    /// Query whose first batch filled `results`.
    loaded_query: Option<String>,
    page: usize,
    offset: usize,
    loading: bool,
    error: Option<String>,
    pagination: Pagination,
    latest_token: u64,
    pending: Option<PendingFetch>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new(Pagination::default())
    }
}

impl SearchState {
    pub fn new(pagination: Pagination) -> Self {
        Self {
            query: String::new(),
            results: ResultStore::default(),
            loaded_query: None,
            page: 1,
            offset: 0,
            loading: false,
            error: None,
            pagination,
            latest_token: 0,
            pending: None,
        }
    }

    pub fn apply(&mut self, action: SearchAction) -> AppResult<Vec<SearchEffect>> {
        match action {
            SearchAction::Search { query } => Ok(self.search(&query)),
            SearchAction::GotoPage { page } => self.goto_page(page),
            SearchAction::Clear => Ok(self.clear()),
            SearchAction::RestoreFromHistory { entry } => Ok(self.restore(entry)),
        }
    }

    fn search(&mut self, query: &str) -> Vec<SearchEffect> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        info!(query, "search");
        self.query = query.to_string();
        self.page = 1;
        self.offset = 0;
        self.error = None;
        vec![self.issue(FetchMode::Replace, 0, true)]
    }

    fn goto_page(&mut self, page: usize) -> AppResult<Vec<SearchEffect>> {
        let max_page = self.max_page();
        if max_page == 0 {
            return Err(AppError::invalid_argument("no results to paginate"));
        }
        if !self.results_current() {
            let loaded = self.loaded_query.as_deref().unwrap_or_default();
            return Err(AppError::unsupported(format!(
                "results shown are for \"{loaded}\"; search \"{}\" again first",
                self.query
            )));
        }
        if page < 1 || page > max_page {
            return Err(AppError::invalid_argument(format!(
                "page {page} is out of range 1..={max_page}"
            )));
        }
        if page == self.page {
            return Ok(Vec::new());
        }

        debug!(from = self.page, to = page, "goto page");
        self.page = page;
        let mut effects = vec![SearchEffect::PushHistory(self.history_entry())];
        effects.extend(self.continue_if_needed());
        Ok(effects)
    }

    fn clear(&mut self) -> Vec<SearchEffect> {
        info!("clear search");
        self.reset();
        vec![SearchEffect::ReplaceHistory(HistoryEntry::root())]
    }

    fn restore(&mut self, entry: HistoryEntry) -> Vec<SearchEffect> {
        let Some(query) = entry.query.filter(|query| !query.trim().is_empty()) else {
            self.reset();
            return Vec::new();
        };

        info!(query = %query, page = entry.page, "restore from history");
        self.query = query;
        self.page = entry.page.max(1);
        self.offset = 0;
        self.error = None;
        vec![self.issue(FetchMode::Replace, 0, false)]
    }

    fn reset(&mut self) {
        self.query.clear();
        self.results.clear();
        self.loaded_query = None;
        self.page = 1;
        self.offset = 0;
        self.loading = false;
        self.error = None;
        self.pending = None;
        self.latest_token = self.latest_token.wrapping_add(1);
    }

    fn issue(&mut self, mode: FetchMode, offset: usize, record_history: bool) -> SearchEffect {
        self.latest_token = self.latest_token.wrapping_add(1);
        self.offset = offset;
        self.loading = true;
        self.pending = Some(PendingFetch {
            token: self.latest_token,
            mode,
            record_history,
        });
        SearchEffect::Fetch(FetchRequest {
            token: self.latest_token,
            query: self.query.clone(),
            offset,
            limit: self.pagination.batch_limit(offset),
            mode,
        })
    }

    /// Issues the next batch while the current page is not covered. Bounded by
    /// the page itself and by `max_offset`.
    fn continue_if_needed(&mut self) -> Option<SearchEffect> {
        if self.pending.is_some() || !self.results_current() {
            return None;
        }
        let loaded = self.results.len();
        if !self
            .pagination
            .needs_more(self.page, loaded, self.results.total_hits())
        {
            return None;
        }
        debug!(page = self.page, offset = loaded, "continuation fetch");
        Some(self.issue(FetchMode::Append, loaded, false))
    }

    /// Folds a fetch completion into the state. Completions for anything but
    /// the latest request are dropped.
    pub fn on_fetch_event(&mut self, event: FetchEvent) -> Vec<SearchEffect> {
        let token = event.token();
        let pending = match self.pending {
            Some(pending) if pending.token == token && token == self.latest_token => pending,
            _ => {
                debug!(token, latest = self.latest_token, "dropping stale completion");
                return Vec::new();
            }
        };
        self.pending = None;
        self.loading = false;

        match event {
            FetchEvent::Completed { batch, .. } => {
                let total = batch.resolved_total();
                match pending.mode {
                    FetchMode::Replace => {
                        self.results.replace(batch.items, total);
                        self.loaded_query = Some(self.query.clone());
                    }
                    FetchMode::Append => {
                        let kept = self.results.append(batch.items, total);
                        if kept == 0 {
                            warn!(loaded = self.results.len(), "continuation returned nothing");
                            self.results.mark_exhausted();
                        }
                    }
                }
                self.error = None;

                let max_page = self.max_page();
                self.page = if max_page == 0 {
                    1
                } else {
                    self.page.clamp(1, max_page)
                };
                debug!(
                    loaded = self.results.len(),
                    total = self.results.total_hits(),
                    page = self.page,
                    "fetch applied"
                );

                let mut effects = Vec::new();
                if pending.record_history {
                    effects.push(SearchEffect::PushHistory(self.history_entry()));
                }
                effects.extend(self.continue_if_needed());
                effects
            }
            FetchEvent::Failed { message, .. } => {
                self.error = Some(message);
                Vec::new()
            }
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn total_hits(&self) -> usize {
        self.results.total_hits()
    }

    pub fn results(&self) -> &[ResultItem] {
        self.results.items()
    }

    /// Whether the loaded results belong to the current query. False after a
    /// new search or restore failed and the previous results are still held.
    pub fn results_current(&self) -> bool {
        self.loaded_query.as_deref() == Some(self.query.as_str())
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn latest_token(&self) -> u64 {
        self.latest_token
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn phase(&self) -> SearchPhase {
        if self.loading {
            SearchPhase::Loading
        } else if self.error.is_some() {
            SearchPhase::Errored
        } else if self.query.is_empty() {
            SearchPhase::Idle
        } else {
            SearchPhase::Loaded
        }
    }

    pub fn max_page(&self) -> usize {
        self.pagination.max_page(self.results.total_hits())
    }

    pub fn page_items(&self) -> &[ResultItem] {
        self.pagination.page_slice(self.results.items(), self.page)
    }

    /// Index of the first item of the current page within all results.
    pub fn page_start(&self) -> usize {
        self.pagination
            .slice_bounds(self.page, self.results.len())
            .0
    }

    pub fn page_window(&self) -> Vec<usize> {
        self.pagination
            .page_window(self.page, self.max_page())
            .collect()
    }

    pub fn has_prev(&self) -> bool {
        self.pagination.has_prev(self.page)
    }

    pub fn has_next(&self) -> bool {
        self.pagination.has_next(self.page, self.max_page())
    }

    pub fn history_entry(&self) -> HistoryEntry {
        HistoryEntry::search(self.query.clone(), self.page)
    }
}
