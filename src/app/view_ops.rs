use crate::error::AppResult;
use crate::ui;

use super::core::App;
use super::terminal_session::TerminalSurface;

impl App {
    pub(super) fn render_frame(&self, session: &mut impl TerminalSurface) -> AppResult<()> {
        let view = self.screen_view();
        session.draw(|frame| ui::draw_screen(frame, &view))?;
        Ok(())
    }
}
