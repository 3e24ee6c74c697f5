use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiLayout {
    pub prompt: Rect,
    pub results: Rect,
    pub pagination: Rect,
    pub status: Rect,
}

/// Splits the screen top to bottom: prompt, results, pagination bar, status.
///
/// The pagination row collapses when there is nothing to paginate.
pub fn split_layout(area: Rect, pagination_visible: bool) -> UiLayout {
    let pagination_height = if pagination_visible { 1 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(pagination_height),
            Constraint::Length(2),
        ])
        .split(area);

    UiLayout {
        prompt: chunks[0],
        results: chunks[1],
        pagination: chunks[2],
        status: chunks[3],
    }
}

pub(crate) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.max(1).min(area.width);
    let height = height.max(1).min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
