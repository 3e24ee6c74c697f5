use tracing::{info, warn};

use crate::command::{
    ActionId, CommandOutcome, apply_fetch_event, dispatch, handle_app_event,
};
use crate::error::AppResult;
use crate::event::DomainEvent;
use crate::search::FetchEngine;

use super::actors::UiActor;
use super::core::App;
use super::event_bus::EventBus;
use super::terminal_session::{TerminalSession, TerminalSurface};

struct LoopRuntime {
    ui_actor: UiActor,
    session: TerminalSession,
    bus: EventBus,
}

enum WaitEvent {
    Event(DomainEvent),
    Closed,
}

enum LoopControl {
    Continue,
    Break,
}

impl App {
    pub async fn run(&mut self) -> AppResult<()> {
        let mut runtime = self.initialize_loop_runtime()?;
        info!(backend = self.backend_name(), "event loop started");

        let result = self.drive(&mut runtime).await;

        runtime.bus.shutdown();
        runtime.session.restore()?;
        info!("event loop stopped");
        result
    }

    fn initialize_loop_runtime(&mut self) -> AppResult<LoopRuntime> {
        let session = TerminalSession::enter()?;
        if let Ok(size) = session.size() {
            info!(width = size.width, height = size.height, "terminal ready");
        }
        let mut bus = EventBus::new();
        bus.spawn_input();
        let submitted = self.flush_fetches();
        if submitted > 0 {
            info!(submitted, "initial fetch submitted");
        }

        Ok(LoopRuntime {
            ui_actor: UiActor::new(),
            session,
            bus,
        })
    }

    async fn drive(&mut self, runtime: &mut LoopRuntime) -> AppResult<()> {
        loop {
            if runtime.ui_actor.needs_redraw() {
                self.render_frame(&mut runtime.session)?;
                runtime.ui_actor.clear_redraw();
            }

            let waited = wait_next_event(&mut runtime.bus, &mut self.engine).await;
            if matches!(self.handle_waited_event(waited, runtime), LoopControl::Break) {
                return Ok(());
            }
        }
    }

    fn handle_waited_event(&mut self, waited: WaitEvent, runtime: &mut LoopRuntime) -> LoopControl {
        match waited {
            WaitEvent::Event(DomainEvent::Input(event)) => {
                let outcome = self.handle_input_event(event);
                if outcome.quit_requested {
                    return LoopControl::Break;
                }
                if outcome.redraw {
                    runtime.ui_actor.mark_redraw();
                }
                if let Some(command) = outcome.command {
                    runtime.bus.publish(DomainEvent::Command(command));
                }
            }
            WaitEvent::Event(DomainEvent::InputError(message)) => {
                self.state.status.last_action_id = Some(ActionId::Input);
                self.state.status.message = format!("input error: {message}");
                runtime.ui_actor.mark_redraw();
            }
            WaitEvent::Event(DomainEvent::Command(command)) => {
                let id = command.action_id();
                match dispatch(&mut self.state, command, &mut self.session) {
                    Ok(result) => {
                        for event in result.emitted_events {
                            runtime.bus.publish(DomainEvent::App(event));
                        }
                        if result.outcome == CommandOutcome::QuitRequested {
                            return LoopControl::Break;
                        }
                    }
                    Err(err) => {
                        warn!(command = id.as_str(), error = %err, "command failed");
                        self.state.status.last_action_id = Some(id);
                        self.state.status.message = err.to_string();
                    }
                }
                self.flush_fetches();
                runtime.ui_actor.mark_redraw();
            }
            WaitEvent::Event(DomainEvent::App(event)) => {
                handle_app_event(&mut self.state, &event);
                runtime.ui_actor.mark_redraw();
            }
            WaitEvent::Event(DomainEvent::Fetch(event)) => {
                if let Some(events) = apply_fetch_event(&mut self.state, &mut self.session, event) {
                    for event in events {
                        runtime.bus.publish(DomainEvent::App(event));
                    }
                    runtime.ui_actor.mark_redraw();
                }
                self.flush_fetches();
            }
            WaitEvent::Closed => return LoopControl::Break,
        }
        LoopControl::Continue
    }
}

async fn wait_next_event(bus: &mut EventBus, engine: &mut FetchEngine) -> WaitEvent {
    tokio::select! {
        biased;
        maybe_loop = bus.recv() => {
            match maybe_loop {
                Some(event) => WaitEvent::Event(event),
                None => WaitEvent::Closed,
            }
        },
        maybe_fetch = engine.recv_event() => {
            match maybe_fetch {
                Some(event) => WaitEvent::Event(DomainEvent::Fetch(event)),
                None => WaitEvent::Closed,
            }
        },
    }
}
