use ratatui::Frame;
use ratatui::widgets::Clear;

use crate::app::Mode;
use crate::backend::ResultItem;
use crate::search::SearchPhase;

use super::chrome::draw_chrome;
use super::layout::split_layout;
use super::overlay::{draw_loading_overlay, draw_prompt};
use super::results::{draw_pagination, draw_results};

/// Everything a frame needs, borrowed from app and search state.
#[derive(Debug, Clone)]
pub struct ScreenView<'a> {
    pub mode: Mode,
    pub prompt: &'a str,
    pub prompt_cursor: usize,
    pub query: &'a str,
    pub items: &'a [ResultItem],
    /// Index of `items[0]` within all results.
    pub first_index: usize,
    pub selected: usize,
    pub phase: SearchPhase,
    pub error: Option<&'a str>,
    pub page: usize,
    pub max_page: usize,
    pub page_window: Vec<usize>,
    pub has_prev: bool,
    pub has_next: bool,
    pub total_hits: usize,
    pub location: String,
    pub backend: &'static str,
    pub message: &'a str,
    pub article_url: Option<String>,
}

impl ScreenView<'_> {
    /// Zero results render no pagination bar.
    pub fn pagination_visible(&self) -> bool {
        self.max_page > 0 && self.error.is_none()
    }
}

pub fn draw_screen(frame: &mut Frame<'_>, view: &ScreenView<'_>) {
    let layout = split_layout(frame.area(), view.pagination_visible());
    frame.render_widget(Clear, frame.area());

    draw_prompt(frame, layout.prompt, view);
    draw_results(frame, layout.results, view);
    if view.pagination_visible() {
        draw_pagination(frame, layout.pagination, view);
    }
    draw_chrome(frame, layout.status, view);

    if view.phase == SearchPhase::Loading && view.items.is_empty() {
        draw_loading_overlay(frame, layout.results, view.query);
    }
}
