use std::collections::VecDeque;

use tracing::info;

use crate::error::AppResult;
use crate::history::{HistoryEntry, HistoryState};
use crate::search::{FetchEvent, FetchRequest, Pagination, SearchAction, SearchEffect, SearchState};

/// Search state plus the navigation history it is mirrored into.
///
/// Effects produced by the search reducer are applied here: history effects
/// immediately, fetches queued until the caller drains them.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    search: SearchState,
    history: HistoryState,
    pending_fetches: VecDeque<FetchRequest>,
}

impl SearchSession {
    pub fn new(pagination: Pagination) -> Self {
        Self {
            search: SearchState::new(pagination),
            history: HistoryState::default(),
            pending_fetches: VecDeque::new(),
        }
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn history(&self) -> &HistoryState {
        &self.history
    }

    pub fn location(&self) -> String {
        self.history.location()
    }

    pub fn apply(&mut self, action: SearchAction) -> AppResult<()> {
        let effects = self.search.apply(action)?;
        self.apply_effects(effects);
        Ok(())
    }

    pub fn on_fetch_event(&mut self, event: FetchEvent) {
        let effects = self.search.on_fetch_event(event);
        self.apply_effects(effects);
    }

    /// Restores the startup location without adding a history entry.
    pub fn restore_initial(&mut self, entry: HistoryEntry) -> AppResult<()> {
        info!(location = %entry.location(), "initial location");
        self.history.replace(entry.clone());
        self.apply(SearchAction::RestoreFromHistory { entry })
    }

    /// Navigates to a location as a new history entry.
    pub fn open_location(&mut self, entry: HistoryEntry) -> AppResult<()> {
        info!(location = %entry.location(), "open location");
        self.history.push(entry.clone());
        self.apply(SearchAction::RestoreFromHistory { entry })
    }

    /// Returns `false` when there is nothing to go back to.
    pub fn history_back(&mut self) -> AppResult<bool> {
        let Some(entry) = self.history.back().cloned() else {
            return Ok(false);
        };
        info!(location = %entry.location(), "history back");
        self.apply(SearchAction::RestoreFromHistory { entry })?;
        Ok(true)
    }

    /// Returns `false` when there is nothing to go forward to.
    pub fn history_forward(&mut self) -> AppResult<bool> {
        let Some(entry) = self.history.forward().cloned() else {
            return Ok(false);
        };
        info!(location = %entry.location(), "history forward");
        self.apply(SearchAction::RestoreFromHistory { entry })?;
        Ok(true)
    }

    pub fn has_pending_fetches(&self) -> bool {
        !self.pending_fetches.is_empty()
    }

    pub fn take_fetch_requests(&mut self) -> Vec<FetchRequest> {
        self.pending_fetches.drain(..).collect()
    }

    fn apply_effects(&mut self, effects: Vec<SearchEffect>) {
        for effect in effects {
            match effect {
                SearchEffect::Fetch(request) => self.pending_fetches.push_back(request),
                SearchEffect::PushHistory(entry) => self.history.push(entry),
                SearchEffect::ReplaceHistory(entry) => self.history.replace(entry),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SearchSession;
    use crate::backend::{ResultItem, SearchBatch};
    use crate::history::HistoryEntry;
    use crate::search::{FetchEvent, Pagination, SearchAction};

    fn complete_all(session: &mut SearchSession, total: usize) {
        for request in session.take_fetch_requests() {
            let end = (request.offset + request.limit).min(total);
            let items = (request.offset..end)
                .map(|i| ResultItem::titled(format!("{} {}", request.query, i + 1)))
                .collect();
            session.on_fetch_event(FetchEvent::Completed {
                token: request.token,
                batch: SearchBatch {
                    items,
                    total_hits: Some(total),
                },
            });
        }
    }

    fn search(session: &mut SearchSession, query: &str) {
        session
            .apply(SearchAction::Search {
                query: query.to_string(),
            })
            .expect("search should apply");
    }

    #[test]
    fn completed_search_is_pushed_to_history() {
        let mut session = SearchSession::new(Pagination::default());
        search(&mut session, "cat");
        assert_eq!(session.location(), "/");

        complete_all(&mut session, 25);
        assert_eq!(session.location(), "?query=cat&page=1");
        assert!(session.history().can_go_back());
    }

    #[test]
    fn page_navigation_pushes_and_back_restores_with_refetch() {
        let mut session = SearchSession::new(Pagination::default());
        search(&mut session, "dog");
        complete_all(&mut session, 25);
        session
            .apply(SearchAction::GotoPage { page: 2 })
            .expect("goto should apply");
        assert_eq!(session.location(), "?query=dog&page=2");
        search(&mut session, "bird");
        complete_all(&mut session, 5);
        assert_eq!(session.location(), "?query=bird&page=1");

        assert!(session.history_back().expect("back should apply"));
        assert_eq!(session.location(), "?query=dog&page=2");
        assert_eq!(session.search().query(), "dog");
        assert_eq!(session.search().page(), 2);
        let requests = session.take_fetch_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].offset, 0);
        assert_eq!(session.history().forward_len(), 1);
    }

    #[test]
    fn restore_does_not_push_history() {
        let mut session = SearchSession::new(Pagination::default());
        search(&mut session, "dog");
        complete_all(&mut session, 25);
        session
            .apply(SearchAction::GotoPage { page: 2 })
            .expect("goto should apply");
        session.history_back().expect("back should apply");
        complete_all(&mut session, 25);

        assert_eq!(session.location(), "?query=dog&page=1");
        assert_eq!(session.history().forward_len(), 1);
        assert!(session.history_forward().expect("forward should apply"));
        complete_all(&mut session, 25);
        assert_eq!(session.search().page(), 2);
        assert!(!session.history().can_go_forward());
    }

    #[test]
    fn back_to_root_resets_search() {
        let mut session = SearchSession::new(Pagination::default());
        search(&mut session, "cat");
        complete_all(&mut session, 3);

        assert!(session.history_back().expect("back should apply"));
        assert_eq!(session.location(), "/");
        assert_eq!(session.search().query(), "");
        assert!(session.search().results().is_empty());
        assert!(!session.has_pending_fetches());
        assert!(!session.history_back().expect("back should apply"));
    }

    #[test]
    fn clear_replaces_current_entry_with_root() {
        let mut session = SearchSession::new(Pagination::default());
        search(&mut session, "cat");
        complete_all(&mut session, 3);
        let back_len = session.history().back_len();

        session
            .apply(SearchAction::Clear)
            .expect("clear should apply");
        assert_eq!(session.location(), "/");
        assert_eq!(session.history().back_len(), back_len);
    }

    #[test]
    fn initial_restore_replaces_instead_of_pushing() {
        let mut session = SearchSession::new(Pagination::default());
        session
            .restore_initial(HistoryEntry::search("dog", 2))
            .expect("restore should apply");
        assert_eq!(session.location(), "?query=dog&page=2");
        assert!(!session.history().can_go_back());

        complete_all(&mut session, 25);
        assert_eq!(session.search().page(), 2);
        assert!(!session.history().can_go_back());
    }

    #[test]
    fn open_location_is_a_new_entry() {
        let mut session = SearchSession::new(Pagination::default());
        session
            .open_location(HistoryEntry::parse_location("?query=owl&page=1"))
            .expect("open should apply");
        assert_eq!(session.history().back_len(), 1);
        assert_eq!(session.take_fetch_requests().len(), 1);
    }
}
