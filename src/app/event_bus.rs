use crossterm::event::EventStream;
use futures_util::StreamExt;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::event::DomainEvent;

/// Single queue for everything the UI task reacts to, fed by the terminal
/// input task and by the loop itself.
pub(crate) struct EventBus {
    tx: UnboundedSender<DomainEvent>,
    rx: UnboundedReceiver<DomainEvent>,
    tasks: Vec<JoinHandle<()>>,
}

impl EventBus {
    pub(crate) fn new() -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            tx,
            rx,
            tasks: Vec::new(),
        }
    }

    /// Starts forwarding terminal input onto the bus.
    pub(crate) fn spawn_input(&mut self) {
        self.tasks.push(spawn_input_task(self.tx.clone()));
    }

    pub(crate) fn publish(&self, event: DomainEvent) {
        if self.tx.send(event).is_err() {
            debug!("event bus closed; dropping event");
        }
    }

    pub(crate) async fn recv(&mut self) -> Option<DomainEvent> {
        self.rx.recv().await
    }

    pub(crate) fn shutdown(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

fn spawn_input_task(tx: UnboundedSender<DomainEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut input_stream = EventStream::new();
        while let Some(event) = input_stream.next().await {
            let loop_event = match event {
                Ok(event) => DomainEvent::Input(event),
                Err(err) => {
                    warn!(error = %err, "terminal input error");
                    DomainEvent::InputError(err.to_string())
                }
            };
            if tx.send(loop_event).is_err() {
                return;
            }
        }
        debug!("terminal input stream ended");
    })
}
