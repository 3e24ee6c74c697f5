use std::convert::Infallible;
use std::io;
use std::sync::Arc;

use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::{Rect, Size};
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::backend::{ResultItem, SearchBatch};
use crate::command::apply_fetch_event;
use crate::config::Config;
use crate::search::{FetchEvent, SearchAction};

use super::super::terminal_session::TerminalSurface;
use super::NumberedBackend;

struct TestTerminalSurface {
    terminal: Terminal<TestBackend>,
}

impl TestTerminalSurface {
    fn new(width: u16, height: u16) -> io::Result<Self> {
        let terminal = infallible_to_io(Terminal::new(TestBackend::new(width, height)))?;
        Ok(Self { terminal })
    }

    fn screen_text(&self) -> String {
        let buffer = self.terminal.backend().buffer();
        let area = buffer.area;
        let mut text = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }
}

impl TerminalSurface for TestTerminalSurface {
    fn size(&self) -> io::Result<Size> {
        infallible_to_io(self.terminal.size())
    }

    fn draw<F>(&mut self, render: F) -> io::Result<()>
    where
        F: FnOnce(&mut Frame<'_>),
    {
        infallible_to_io(self.terminal.draw(render)).map(|_| ())
    }
}

fn infallible_to_io<T>(result: Result<T, Infallible>) -> io::Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(err) => match err {},
    }
}

#[test]
fn terminal_surface_supports_size_and_draw() {
    let mut session = TestTerminalSurface::new(80, 24).expect("test terminal should initialize");
    let size = session.size().expect("size should resolve");
    assert_eq!(size, Size::new(80, 24));

    session
        .draw(|frame| {
            frame.render_widget(Paragraph::new("ok"), Rect::new(0, 0, 2, 1));
        })
        .expect("draw should succeed");
}

#[test]
fn render_frame_draws_loaded_results_and_chrome() {
    let mut app = App::new_with_config(Config::default(), Arc::new(NumberedBackend { total: 25 }))
        .expect("app should initialize");
    app.session
        .apply(SearchAction::Search {
            query: "cat".to_string(),
        })
        .expect("search should apply");
    let request = app
        .session
        .take_fetch_requests()
        .pop()
        .expect("search should queue a fetch");
    let items = (0..request.limit.min(25))
        .map(|i| ResultItem::titled(format!("cat {}", i + 1)))
        .collect();
    apply_fetch_event(
        &mut app.state,
        &mut app.session,
        FetchEvent::Completed {
            token: request.token,
            batch: SearchBatch {
                items,
                total_hits: Some(25),
            },
        },
    )
    .expect("current completion should apply");
    app.state.status.message.clear();

    let mut session = TestTerminalSurface::new(60, 20).expect("test terminal should initialize");
    app.render_frame(&mut session).expect("render should succeed");

    let screen = session.screen_text();
    assert!(screen.contains("1. cat 1"));
    assert!(screen.contains("NORMAL"));
    assert!(screen.contains("?query=cat&page=1"));
    assert!(screen.contains("https://example.test/cat_1"));
}
