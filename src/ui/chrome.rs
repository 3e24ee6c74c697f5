use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Paragraph, Wrap};

use crate::search::SearchPhase;

use super::screen::ScreenView;

pub fn draw_chrome(frame: &mut Frame<'_>, area: Rect, view: &ScreenView<'_>) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let status = Paragraph::new(status_text(view))
        .style(Style::default().bg(Color::Rgb(30, 30, 35)))
        .wrap(Wrap { trim: true });
    let top = Rect::new(area.x, area.y, area.width, 1);
    frame.render_widget(status, top);

    if area.height < 2 {
        return;
    }
    let detail = detail_text(view);
    let bottom = Rect::new(area.x, area.y + 1, area.width, area.height - 1);
    frame.render_widget(
        Paragraph::new(detail)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true }),
        bottom,
    );
}

pub(crate) fn status_text(view: &ScreenView<'_>) -> String {
    let state = match view.phase {
        SearchPhase::Idle => "ready".to_string(),
        SearchPhase::Loading => "loading...".to_string(),
        SearchPhase::Errored => "error".to_string(),
        SearchPhase::Loaded if view.max_page == 0 => "no results".to_string(),
        SearchPhase::Loaded => format!(
            "page {}/{} | {} hits",
            view.page, view.max_page, view.total_hits
        ),
    };
    format!(
        "{} | {} | {} | {}",
        view.mode.label(),
        view.location,
        state,
        view.backend
    )
}

/// The latest status message, or the link of the selected result.
pub(crate) fn detail_text(view: &ScreenView<'_>) -> String {
    if !view.message.is_empty() {
        return view.message.to_string();
    }
    view.article_url.clone().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    use crate::app::Mode;
    use crate::search::SearchPhase;
    use crate::ui::screen::ScreenView;

    use super::{detail_text, draw_chrome, status_text};

    fn view() -> ScreenView<'static> {
        ScreenView {
            mode: Mode::Normal,
            prompt: "",
            prompt_cursor: 0,
            query: "cat",
            items: &[],
            first_index: 0,
            selected: 0,
            phase: SearchPhase::Loaded,
            error: None,
            page: 2,
            max_page: 3,
            page_window: vec![1, 2, 3],
            has_prev: true,
            has_next: true,
            total_hits: 25,
            location: "?query=cat&page=2".to_string(),
            backend: "wikipedia",
            message: "",
            article_url: Some("https://en.wikipedia.org/wiki/Cat".to_string()),
        }
    }

    #[test]
    fn status_shows_mode_location_and_page() {
        assert_eq!(
            status_text(&view()),
            "NORMAL | ?query=cat&page=2 | page 2/3 | 25 hits | wikipedia"
        );

        let loading = ScreenView {
            phase: SearchPhase::Loading,
            mode: Mode::Search,
            ..view()
        };
        assert_eq!(
            status_text(&loading),
            "SEARCH | ?query=cat&page=2 | loading... | wikipedia"
        );
    }

    #[test]
    fn detail_prefers_message_over_article_url() {
        assert_eq!(detail_text(&view()), "https://en.wikipedia.org/wiki/Cat");
        let with_message = ScreenView {
            message: "page 2/3",
            ..view()
        };
        assert_eq!(detail_text(&with_message), "page 2/3");
    }

    #[test]
    fn chrome_draws_in_a_single_row_without_panic() {
        let mut terminal =
            Terminal::new(TestBackend::new(20, 1)).expect("test terminal should initialize");
        terminal
            .draw(|frame| draw_chrome(frame, Rect::new(0, 0, 20, 1), &view()))
            .expect("draw should pass");
    }
}
