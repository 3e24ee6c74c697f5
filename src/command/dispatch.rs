use tracing::debug;

use crate::app::{AppState, Mode};
use crate::error::AppResult;
use crate::event::{AppEvent, NavReason};
use crate::search::{FetchEvent, SearchPhase};
use crate::session::SearchSession;

use super::core::{
    clear_search, first_page, goto_page, history_back, history_forward, last_page, next_page,
    open_location, open_prompt, prev_page, select_next, select_prev, submit_search,
};
use super::types::{ActionId, Command, CommandOutcome};

#[derive(Debug, Clone)]
pub struct CommandDispatchResult {
    pub outcome: CommandOutcome,
    pub emitted_events: Vec<AppEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ViewSnapshot {
    query: String,
    page: usize,
    mode: Mode,
}

impl ViewSnapshot {
    fn capture(app: &AppState, session: &SearchSession) -> Self {
        Self {
            query: session.search().query().to_string(),
            page: session.search().page(),
            mode: app.mode,
        }
    }
}

pub fn dispatch(
    app: &mut AppState,
    cmd: Command,
    session: &mut SearchSession,
) -> AppResult<CommandDispatchResult> {
    let before = ViewSnapshot::capture(app, session);
    let dispatched_command = cmd.clone();
    let action_id = dispatched_command.action_id();
    debug!(command = action_id.as_str(), "dispatch");

    let outcome = match cmd {
        Command::SubmitSearch { query } => {
            let outcome = submit_search(app, session, &query)?;
            app.close_prompt();
            Ok(outcome)
        }
        Command::NextPage => next_page(app, session),
        Command::PrevPage => prev_page(app, session),
        Command::FirstPage => first_page(app, session),
        Command::LastPage => last_page(app, session),
        Command::GotoPage { page } => goto_page(app, session, page),
        Command::ClearSearch => clear_search(app, session),
        Command::HistoryBack => history_back(app, session),
        Command::HistoryForward => history_forward(app, session),
        Command::OpenLocation { location } => open_location(app, session, &location),
        Command::OpenSearch => {
            let seed = session.search().query().to_string();
            Ok(open_prompt(app, Mode::Search, &seed, ActionId::OpenSearch))
        }
        Command::OpenCommandLine => Ok(open_prompt(
            app,
            Mode::Command,
            "",
            ActionId::OpenCommandLine,
        )),
        Command::SelectNext => Ok(select_next(app, session)),
        Command::SelectPrev => Ok(select_prev(app, session)),
        Command::Cancel => {
            app.close_prompt();
            app.status.last_action_id = Some(ActionId::Cancel);
            app.status.message = "canceled current mode".to_string();
            Ok(CommandOutcome::Applied)
        }
        Command::Quit => {
            app.status.last_action_id = Some(ActionId::Quit);
            app.status.message = "quit requested".to_string();
            Ok(CommandOutcome::QuitRequested)
        }
    }?;

    let mut emitted_events =
        collect_transition_events(app, session, &before, derive_nav_reason(&dispatched_command, session));
    emitted_events.push(AppEvent::CommandExecuted {
        id: action_id,
        outcome,
    });

    Ok(CommandDispatchResult {
        outcome,
        emitted_events,
    })
}

/// Folds a fetch completion into the session and reports what changed.
///
/// Returns `None` for stale completions, which leave the view untouched.
pub fn apply_fetch_event(
    app: &mut AppState,
    session: &mut SearchSession,
    event: FetchEvent,
) -> Option<Vec<AppEvent>> {
    if event.token() != session.search().latest_token() {
        session.on_fetch_event(event);
        return None;
    }

    let before = ViewSnapshot::capture(app, session);
    session.on_fetch_event(event);

    let search = session.search();
    match search.phase() {
        SearchPhase::Errored => {
            app.status.last_action_id = Some(ActionId::FetchFailed);
            app.status.message = search.error().unwrap_or("fetch failed").to_string();
        }
        SearchPhase::Loading => {
            app.status.last_action_id = Some(ActionId::FetchComplete);
            app.status.message = format!("loading more results ({} loaded)", search.results().len());
        }
        SearchPhase::Loaded | SearchPhase::Idle => {
            app.status.last_action_id = Some(ActionId::FetchComplete);
            app.status.message = format!(
                "{} results for \"{}\"",
                search.total_hits(),
                search.query()
            );
        }
    }
    app.clamp_selection(search.page_items().len());

    let reason = NavReason::Search(search.query().to_string());
    Some(collect_transition_events(app, session, &before, reason))
}

/// Reacts to events emitted by a previous dispatch.
pub fn handle_app_event(app: &mut AppState, event: &AppEvent) {
    match event {
        AppEvent::PageChanged { .. } => app.selected = 0,
        AppEvent::ModeChanged { from, to } => {
            debug!(from = from.label(), to = to.label(), "mode changed");
        }
        AppEvent::CommandExecuted { id, outcome } => {
            debug!(command = id.as_str(), ?outcome, "command executed");
        }
    }
}

fn collect_transition_events(
    app: &AppState,
    session: &SearchSession,
    before: &ViewSnapshot,
    reason: NavReason,
) -> Vec<AppEvent> {
    let after = ViewSnapshot::capture(app, session);
    let mut events = Vec::new();
    if after.page != before.page || after.query != before.query {
        events.push(AppEvent::PageChanged {
            from: before.page,
            to: after.page,
            reason,
        });
    }

    if after.mode != before.mode {
        events.push(AppEvent::ModeChanged {
            from: before.mode,
            to: after.mode,
        });
    }
    events
}

fn derive_nav_reason(command: &Command, session: &SearchSession) -> NavReason {
    match command {
        Command::NextPage | Command::PrevPage => NavReason::Step,
        Command::FirstPage | Command::LastPage | Command::GotoPage { .. } => NavReason::Jump,
        Command::SubmitSearch { .. } | Command::ClearSearch => {
            NavReason::Search(session.search().query().to_string())
        }
        Command::HistoryBack | Command::HistoryForward | Command::OpenLocation { .. } => {
            NavReason::History
        }
        _ => NavReason::Jump,
    }
}
