use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use unicode_width::UnicodeWidthChar;

use crate::backend::ResultItem;
use crate::search::SearchPhase;

use super::screen::ScreenView;
use super::snippet::{SnippetSegment, sanitize_snippet};

const SNIPPET_INDENT: &str = "     ";
const MAX_SNIPPET_LINES: usize = 2;

pub fn draw_results(frame: &mut Frame<'_>, area: Rect, view: &ScreenView<'_>) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    if let Some(error) = view.error {
        let message = Paragraph::new(vec![
            Line::from(Span::styled(
                " Search failed",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(" {error}"),
                Style::default().fg(Color::Red),
            )),
        ])
        .wrap(Wrap { trim: false });
        frame.render_widget(message, area);
        return;
    }

    if view.items.is_empty() {
        let hint = match (view.phase, view.query.is_empty()) {
            (SearchPhase::Loading, _) => return,
            (_, true) => " Press / to search articles.".to_string(),
            (_, false) => format!(" No results for \"{}\".", view.query),
        };
        frame.render_widget(
            Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
            area,
        );
        return;
    }

    let width = area.width as usize;
    let mut lines = Vec::new();
    let mut selected_span = (0, 0);
    for (idx, item) in view.items.iter().enumerate() {
        let selected = idx == view.selected;
        let item_lines = build_item_lines(item, view.first_index + idx + 1, selected, width);
        if selected {
            selected_span = (lines.len(), item_lines.len());
        }
        lines.extend(item_lines);
        lines.push(Line::default());
    }

    let scroll = scroll_offset(selected_span, area.height as usize);
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), area);
}

pub fn draw_pagination(frame: &mut Frame<'_>, area: Rect, view: &ScreenView<'_>) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let line = build_pagination_line(view.page, &view.page_window, view.has_prev, view.has_next);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

pub(crate) fn build_pagination_line(
    page: usize,
    window: &[usize],
    has_prev: bool,
    has_next: bool,
) -> Line<'static> {
    let enabled = Style::default().fg(Color::White);
    let disabled = Style::default().fg(Color::DarkGray);

    let mut spans = vec![Span::styled(
        "←",
        if has_prev { enabled } else { disabled },
    )];
    for number in window {
        spans.push(Span::raw(" "));
        let style = if *number == page {
            Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            enabled
        };
        spans.push(Span::styled(format!(" {number} "), style));
    }
    spans.push(Span::raw(" "));
    spans.push(Span::styled(
        "→",
        if has_next { enabled } else { disabled },
    ));
    Line::from(spans)
}

fn build_item_lines(
    item: &ResultItem,
    number: usize,
    selected: bool,
    width: usize,
) -> Vec<Line<'static>> {
    let marker = if selected {
        Span::styled(" ┃ ", Style::default().fg(Color::White))
    } else {
        Span::raw("   ")
    };
    let title_style = if selected {
        Style::default()
            .add_modifier(Modifier::BOLD)
            .bg(Color::Rgb(45, 45, 50))
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let mut lines = vec![Line::from(vec![
        marker,
        Span::styled(format!("{number}. "), Style::default().fg(Color::DarkGray)),
        Span::styled(item.title.clone(), title_style),
    ])];

    let mut segments = item
        .snippet
        .as_deref()
        .map(sanitize_snippet)
        .unwrap_or_default();
    if let Some(content) = item.content.as_deref() {
        let content = sanitize_snippet(content);
        if !content.is_empty() && !segments.is_empty() {
            segments.push(SnippetSegment {
                text: " ".to_string(),
                highlighted: false,
            });
        }
        segments.extend(content.into_iter().map(|segment| SnippetSegment {
            highlighted: false,
            ..segment
        }));
    }

    let text_width = width.saturating_sub(SNIPPET_INDENT.len()).max(1);
    for row in wrap_segments(&segments, text_width, MAX_SNIPPET_LINES) {
        let mut spans = vec![Span::raw(SNIPPET_INDENT)];
        spans.extend(row.into_iter().map(|segment| {
            let style = if segment.highlighted {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Span::styled(segment.text, style)
        }));
        lines.push(Line::from(spans));
    }
    lines
}

/// Greedy wrap by display width, at most `max_rows` rows. A truncated last row
/// ends with an ellipsis.
pub(crate) fn wrap_segments(
    segments: &[SnippetSegment],
    width: usize,
    max_rows: usize,
) -> Vec<Vec<SnippetSegment>> {
    let mut rows: Vec<Vec<SnippetSegment>> = Vec::new();
    let mut row: Vec<SnippetSegment> = Vec::new();
    let mut row_width = 0usize;

    for segment in segments {
        for ch in segment.text.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if row_width + ch_width > width {
                rows.push(std::mem::take(&mut row));
                row_width = 0;
                if rows.len() == max_rows {
                    truncate_with_ellipsis(rows.last_mut(), width);
                    return rows;
                }
                if ch == ' ' {
                    continue;
                }
            }
            push_char(&mut row, ch, segment.highlighted);
            row_width += ch_width;
        }
    }
    if !row.is_empty() && rows.len() < max_rows {
        rows.push(row);
    }
    rows
}

fn push_char(row: &mut Vec<SnippetSegment>, ch: char, highlighted: bool) {
    match row.last_mut() {
        Some(last) if last.highlighted == highlighted => last.text.push(ch),
        _ => row.push(SnippetSegment {
            text: ch.to_string(),
            highlighted,
        }),
    }
}

fn truncate_with_ellipsis(row: Option<&mut Vec<SnippetSegment>>, width: usize) {
    let Some(row) = row else {
        return;
    };
    let used: usize = row
        .iter()
        .flat_map(|segment| segment.text.chars())
        .map(|ch| ch.width().unwrap_or(0))
        .sum();
    if used + 1 > width
        && let Some(last) = row.last_mut()
    {
        last.text.pop();
    }
    push_char(row, '…', false);
}

/// First visible line so the selected item fits on screen.
fn scroll_offset((start, len): (usize, usize), height: usize) -> u16 {
    if height == 0 {
        return 0;
    }
    let end = start + len;
    let offset = end.saturating_sub(height).min(start);
    u16::try_from(offset).unwrap_or(u16::MAX)
}
