use std::sync::Arc;

use crate::backend::SearchBackend;
use crate::config::Config;
use crate::error::AppResult;
use crate::history::HistoryEntry;
use crate::search::{FetchEngine, Pagination};
use crate::session::SearchSession;
use crate::ui::ScreenView;

use super::state::AppState;

pub struct App {
    pub state: AppState,
    pub session: SearchSession,
    pub config: Config,
    pub(super) engine: FetchEngine,
}

impl App {
    pub fn new(backend: Arc<dyn SearchBackend>) -> AppResult<Self> {
        let config = Config::load()?;
        Self::new_with_config(config, backend)
    }

    pub fn new_with_config(config: Config, backend: Arc<dyn SearchBackend>) -> AppResult<Self> {
        let pagination = Pagination::from_config(&config.pagination);
        Ok(Self {
            state: AppState::default(),
            session: SearchSession::new(pagination),
            config,
            engine: FetchEngine::new(backend)?,
        })
    }

    pub fn backend_name(&self) -> &'static str {
        self.engine.backend().name()
    }

    /// Applies the location the app was started with. The root location is
    /// already current and needs no work.
    pub fn restore_initial(&mut self, entry: HistoryEntry) -> AppResult<()> {
        if entry.is_root() {
            return Ok(());
        }
        self.session.restore_initial(entry)?;
        self.flush_fetches();
        Ok(())
    }

    /// Hands queued fetch requests to the engine.
    pub(crate) fn flush_fetches(&mut self) -> usize {
        let requests = self.session.take_fetch_requests();
        let count = requests.len();
        for request in requests {
            self.engine.submit(request);
        }
        count
    }

    pub(crate) fn screen_view(&self) -> ScreenView<'_> {
        let search = self.session.search();
        let items = search.page_items();
        let article_url = items
            .get(self.state.selected)
            .and_then(|item| self.engine.backend().article_url(item));

        ScreenView {
            mode: self.state.mode,
            prompt: self.state.prompt.value(),
            prompt_cursor: self.state.prompt.cursor(),
            query: search.query(),
            items,
            first_index: search.page_start(),
            selected: self.state.selected,
            phase: search.phase(),
            error: search.error(),
            page: search.page(),
            max_page: search.max_page(),
            page_window: search.page_window(),
            has_prev: search.has_prev(),
            has_next: search.has_next(),
            total_hits: search.total_hits(),
            location: self.session.location(),
            backend: self.backend_name(),
            message: &self.state.status.message,
            article_url,
        }
    }
}
