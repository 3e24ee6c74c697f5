use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::Mode;

use super::layout::centered_rect;
use super::screen::ScreenView;

pub fn draw_loading_overlay(frame: &mut Frame<'_>, area: Rect, query: &str) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let popup_width = area.width.min(40);
    let popup_height = area.height.min(3);
    let popup = centered_rect(area, popup_width, popup_height);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title("Loading")
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Yellow));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let message = Paragraph::new(format!("Searching \"{query}\"..."))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White));
    frame.render_widget(message, inner);
}

pub fn draw_prompt(frame: &mut Frame<'_>, area: Rect, view: &ScreenView<'_>) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let line = match view.mode {
        Mode::Search => build_prompt_input_line("/", view.prompt, view.prompt_cursor, area.width as usize),
        Mode::Command => build_prompt_input_line(":", view.prompt, view.prompt_cursor, area.width as usize),
        Mode::Normal if view.query.is_empty() => Line::from(Span::styled(
            " / search",
            Style::default().fg(Color::DarkGray),
        )),
        Mode::Normal => Line::from(vec![
            Span::styled(" / ", Style::default().fg(Color::DarkGray)),
            Span::raw(view.query.to_string()),
        ]),
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Draws the input with a software caret so the terminal cursor never has to
/// be positioned.
fn build_prompt_input_line(prefix: &str, input: &str, cursor: usize, width: usize) -> Line<'static> {
    let prefix_spans = vec![
        Span::raw(" ".to_string()),
        Span::styled(format!("{prefix} "), Style::default().fg(Color::White)),
    ];
    let prefix_width = 1 + prefix.chars().count() + 1;
    let max_text_width = width.saturating_sub(prefix_width);

    let chars: Vec<char> = input.chars().collect();
    let char_count = chars.len();
    let cursor = cursor.min(char_count);

    let mut start = 0usize;
    if max_text_width > 0 {
        if cursor >= max_text_width {
            start = cursor.saturating_sub(max_text_width.saturating_sub(1));
        }
        if start > char_count {
            start = char_count;
        }
    } else {
        start = char_count;
    }

    let text_width = max_text_width.max(1);
    let end = (start + text_width).min(char_count);
    let mut visible: Vec<char> = chars[start..end].to_vec();
    if visible.len() < text_width {
        visible.extend(std::iter::repeat_n(' ', text_width - visible.len()));
    }

    let caret_idx = cursor
        .saturating_sub(start)
        .min(text_width.saturating_sub(1));

    let mut spans = prefix_spans;
    for (idx, ch) in visible.into_iter().enumerate() {
        if idx == caret_idx {
            spans.push(Span::styled(ch.to_string(), Style::default().add_modifier(Modifier::REVERSED)));
        } else {
            spans.push(Span::raw(ch.to_string()));
        }
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;
    use ratatui::style::Modifier;

    use super::{build_prompt_input_line, draw_loading_overlay};

    #[test]
    fn prompt_highlights_caret_on_character() {
        let line = build_prompt_input_line("/", "abc", 1, 12);
        assert_eq!(line.spans[1].content.as_ref(), "/ ");
        assert_eq!(line.spans[3].content.as_ref(), "b");
        assert!(
            line.spans[3]
                .style
                .add_modifier
                .contains(Modifier::REVERSED)
        );
    }

    #[test]
    fn prompt_highlights_trailing_space_at_end_cursor() {
        let line = build_prompt_input_line(":", "abc", 3, 12);
        assert_eq!(line.spans[5].content.as_ref(), " ");
        assert!(
            line.spans[5]
                .style
                .add_modifier
                .contains(Modifier::REVERSED)
        );
    }

    #[test]
    fn prompt_scrolls_long_input_to_keep_caret_visible() {
        let line = build_prompt_input_line("/", "abcdefghij", 10, 8);
        let text: String = line.spans.iter().map(|span| span.content.as_ref()).collect();
        assert_eq!(text, " / ghij ");
    }

    #[test]
    fn loading_overlay_handles_tiny_areas_without_panic() {
        let backend = TestBackend::new(30, 10);
        let mut terminal = Terminal::new(backend).expect("test terminal should initialize");
        terminal
            .draw(|frame| {
                draw_loading_overlay(frame, Rect::new(0, 0, 30, 10), "あい");
                draw_loading_overlay(frame, Rect::new(0, 0, 1, 1), "cat");
            })
            .expect("draw should pass");
    }
}
