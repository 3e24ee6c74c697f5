pub(crate) struct UiActor {
    needs_redraw: bool,
}

impl UiActor {
    pub(crate) fn new() -> Self {
        Self { needs_redraw: true }
    }

    pub(crate) fn mark_redraw(&mut self) {
        self.needs_redraw = true;
    }

    pub(crate) fn clear_redraw(&mut self) {
        self.needs_redraw = false;
    }

    pub(crate) fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }
}
