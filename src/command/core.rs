use crate::app::{AppState, Mode};
use crate::error::{AppError, AppResult};
use crate::history::HistoryEntry;
use crate::search::SearchAction;
use crate::session::SearchSession;

use super::types::{ActionId, CommandOutcome};

pub(crate) fn submit_search(
    app: &mut AppState,
    session: &mut SearchSession,
    query: &str,
) -> AppResult<CommandOutcome> {
    app.status.last_action_id = Some(ActionId::SubmitSearch);
    if query.trim().is_empty() {
        app.status.message = "search query is empty".to_string();
        return Ok(CommandOutcome::Noop);
    }

    session.apply(SearchAction::Search {
        query: query.to_string(),
    })?;
    app.status.message = format!("searching for \"{}\"...", session.search().query());
    Ok(CommandOutcome::Applied)
}

pub(crate) fn next_page(app: &mut AppState, session: &mut SearchSession) -> AppResult<CommandOutcome> {
    app.status.last_action_id = Some(ActionId::NextPage);
    let Some(max_page) = resolve_max_page(app, session)? else {
        return Ok(CommandOutcome::Noop);
    };

    let page = session.search().page();
    if !session.search().has_next() {
        app.status.message = format!("already at last page ({page}/{max_page})");
        return Ok(CommandOutcome::Noop);
    }
    move_to_page(app, session, page + 1, max_page)
}

pub(crate) fn prev_page(app: &mut AppState, session: &mut SearchSession) -> AppResult<CommandOutcome> {
    app.status.last_action_id = Some(ActionId::PrevPage);
    let Some(max_page) = resolve_max_page(app, session)? else {
        return Ok(CommandOutcome::Noop);
    };

    let page = session.search().page();
    if !session.search().has_prev() {
        app.status.message = "already at first page (1)".to_string();
        return Ok(CommandOutcome::Noop);
    }
    move_to_page(app, session, page - 1, max_page)
}

pub(crate) fn first_page(app: &mut AppState, session: &mut SearchSession) -> AppResult<CommandOutcome> {
    app.status.last_action_id = Some(ActionId::FirstPage);
    let Some(max_page) = resolve_max_page(app, session)? else {
        return Ok(CommandOutcome::Noop);
    };

    if session.search().page() == 1 {
        app.status.message = "already at first page (1)".to_string();
        return Ok(CommandOutcome::Noop);
    }
    move_to_page(app, session, 1, max_page)
}

pub(crate) fn last_page(app: &mut AppState, session: &mut SearchSession) -> AppResult<CommandOutcome> {
    app.status.last_action_id = Some(ActionId::LastPage);
    let Some(max_page) = resolve_max_page(app, session)? else {
        return Ok(CommandOutcome::Noop);
    };

    if session.search().page() == max_page {
        app.status.message = format!("already at last page ({max_page}/{max_page})");
        return Ok(CommandOutcome::Noop);
    }
    move_to_page(app, session, max_page, max_page)
}

pub(crate) fn goto_page(
    app: &mut AppState,
    session: &mut SearchSession,
    page: usize,
) -> AppResult<CommandOutcome> {
    app.status.last_action_id = Some(ActionId::GotoPage);
    let Some(max_page) = resolve_max_page(app, session)? else {
        return Ok(CommandOutcome::Noop);
    };

    if page < 1 {
        return Err(AppError::invalid_argument("page number must be >= 1"));
    }
    if page > max_page {
        return Err(AppError::invalid_argument(format!(
            "page number exceeds last page ({max_page})"
        )));
    }
    if session.search().page() == page {
        app.status.message = format!("already at page {page}/{max_page}");
        return Ok(CommandOutcome::Noop);
    }
    move_to_page(app, session, page, max_page)
}

pub(crate) fn clear_search(
    app: &mut AppState,
    session: &mut SearchSession,
) -> AppResult<CommandOutcome> {
    app.status.last_action_id = Some(ActionId::ClearSearch);
    session.apply(SearchAction::Clear)?;
    app.selected = 0;
    app.status.message = "search cleared".to_string();
    Ok(CommandOutcome::Applied)
}

pub(crate) fn history_back(
    app: &mut AppState,
    session: &mut SearchSession,
) -> AppResult<CommandOutcome> {
    app.status.last_action_id = Some(ActionId::HistoryBack);
    if !session.history_back()? {
        app.status.message = "no previous history entry".to_string();
        return Ok(CommandOutcome::Noop);
    }
    app.status.message = format!("back to {}", session.location());
    Ok(CommandOutcome::Applied)
}

pub(crate) fn history_forward(
    app: &mut AppState,
    session: &mut SearchSession,
) -> AppResult<CommandOutcome> {
    app.status.last_action_id = Some(ActionId::HistoryForward);
    if !session.history_forward()? {
        app.status.message = "no next history entry".to_string();
        return Ok(CommandOutcome::Noop);
    }
    app.status.message = format!("forward to {}", session.location());
    Ok(CommandOutcome::Applied)
}

pub(crate) fn open_location(
    app: &mut AppState,
    session: &mut SearchSession,
    location: &str,
) -> AppResult<CommandOutcome> {
    app.status.last_action_id = Some(ActionId::OpenLocation);
    let entry = HistoryEntry::parse_location(location);
    session.open_location(entry)?;
    app.status.message = format!("opened {}", session.location());
    Ok(CommandOutcome::Applied)
}

pub(crate) fn select_next(app: &mut AppState, session: &SearchSession) -> CommandOutcome {
    app.status.last_action_id = Some(ActionId::SelectNext);
    let page_len = session.search().page_items().len();
    if page_len == 0 || app.selected + 1 >= page_len {
        return CommandOutcome::Noop;
    }
    app.selected += 1;
    app.status.message.clear();
    CommandOutcome::Applied
}

pub(crate) fn select_prev(app: &mut AppState, session: &SearchSession) -> CommandOutcome {
    app.status.last_action_id = Some(ActionId::SelectPrev);
    if app.selected == 0 || session.search().page_items().is_empty() {
        return CommandOutcome::Noop;
    }
    app.selected -= 1;
    app.status.message.clear();
    CommandOutcome::Applied
}

pub(crate) fn open_prompt(
    app: &mut AppState,
    mode: Mode,
    seed: &str,
    action_id: ActionId,
) -> CommandOutcome {
    app.status.last_action_id = Some(action_id);
    if app.mode == mode {
        return CommandOutcome::Noop;
    }
    app.open_prompt(mode, seed);
    CommandOutcome::Applied
}

fn move_to_page(
    app: &mut AppState,
    session: &mut SearchSession,
    page: usize,
    max_page: usize,
) -> AppResult<CommandOutcome> {
    session.apply(SearchAction::GotoPage { page })?;
    app.status.message = if session.search().is_loading() {
        format!("page {page}/{max_page} (loading more results...)")
    } else {
        format!("page {page}/{max_page}")
    };
    Ok(CommandOutcome::Applied)
}

/// `None` means navigation is temporarily blocked by an in-flight fetch.
fn resolve_max_page(app: &mut AppState, session: &SearchSession) -> AppResult<Option<usize>> {
    if session.search().is_loading() {
        app.status.message = "still loading results".to_string();
        return Ok(None);
    }

    if let Some(error) = session.search().error()
        && !session.search().results_current()
    {
        return Err(AppError::unsupported(format!(
            "last search failed ({error}); search again to paginate"
        )));
    }

    let max_page = session.search().max_page();
    if max_page > 0 {
        return Ok(Some(max_page));
    }
    Err(AppError::unsupported("no results to paginate"))
}
