use std::future::Future;
use std::sync::Arc;

use tokio::runtime::{Builder, Handle, Runtime};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::backend::{SearchBackend, SearchBatch};
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// First batch of a search; replaces the loaded results.
    Replace,
    /// Continuation batch; appended to the loaded results.
    Append,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub token: u64,
    pub query: String,
    pub offset: usize,
    pub limit: usize,
    pub mode: FetchMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchEvent {
    Completed { token: u64, batch: SearchBatch },
    Failed { token: u64, message: String },
}

impl FetchEvent {
    pub fn token(&self) -> u64 {
        match self {
            Self::Completed { token, .. } | Self::Failed { token, .. } => *token,
        }
    }
}

/// Runs backend fetches as background tasks and reports their completions.
///
/// Requests are never canceled; callers fence stale completions by token.
pub struct FetchEngine {
    backend: Arc<dyn SearchBackend>,
    event_tx: UnboundedSender<FetchEvent>,
    event_rx: UnboundedReceiver<FetchEvent>,
    runtime: FetchRuntime,
    submitted: u64,
}

struct FetchRuntime {
    _owned: Option<Runtime>,
    handle: Handle,
}

impl FetchRuntime {
    fn new() -> AppResult<Self> {
        if let Ok(handle) = Handle::try_current() {
            return Ok(Self {
                _owned: None,
                handle,
            });
        }

        let runtime = Builder::new_multi_thread()
            .enable_all()
            .thread_name("wpg-fetch")
            .build()
            .map_err(|source| {
                AppError::io_with_context(source, "failed to start fetch runtime")
            })?;
        let handle = runtime.handle().clone();
        Ok(Self {
            _owned: Some(runtime),
            handle,
        })
    }

    fn spawn<F>(&self, task: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.handle.spawn(task)
    }
}

impl FetchEngine {
    pub fn new(backend: Arc<dyn SearchBackend>) -> AppResult<Self> {
        let (event_tx, event_rx) = unbounded_channel();
        Ok(Self {
            backend,
            event_tx,
            event_rx,
            runtime: FetchRuntime::new()?,
            submitted: 0,
        })
    }

    pub fn backend(&self) -> &Arc<dyn SearchBackend> {
        &self.backend
    }

    pub fn submitted(&self) -> u64 {
        self.submitted
    }

    pub fn submit(&mut self, request: FetchRequest) {
        self.submitted = self.submitted.saturating_add(1);
        debug!(
            token = request.token,
            offset = request.offset,
            limit = request.limit,
            mode = ?request.mode,
            "submitting fetch"
        );

        let backend = Arc::clone(&self.backend);
        let event_tx = self.event_tx.clone();
        self.runtime.spawn(async move {
            let event = match backend
                .fetch(&request.query, request.offset, request.limit)
                .await
            {
                Ok(batch) => FetchEvent::Completed {
                    token: request.token,
                    batch,
                },
                Err(err) => {
                    warn!(token = request.token, error = %err, "fetch failed");
                    FetchEvent::Failed {
                        token: request.token,
                        message: err.to_string(),
                    }
                }
            };
            let _ = event_tx.send(event);
        });
    }

    /// Waits for the next completion.
    pub async fn recv_event(&mut self) -> Option<FetchEvent> {
        self.event_rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::{FetchEngine, FetchEvent, FetchMode, FetchRequest};
    use crate::backend::{ResultItem, SearchBackend, SearchBatch};
    use crate::error::{AppError, AppResult};

    struct StubBackend;

    #[async_trait]
    impl SearchBackend for StubBackend {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn fetch(&self, query: &str, offset: usize, _limit: usize) -> AppResult<SearchBatch> {
            if query == "slow" {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            if query == "broken" {
                return Err(AppError::fetch(500, "boom"));
            }
            Ok(SearchBatch {
                items: vec![ResultItem::titled(format!("{query}@{offset}"))],
                total_hits: Some(1),
            })
        }
    }

    fn request(token: u64, query: &str) -> FetchRequest {
        FetchRequest {
            token,
            query: query.to_string(),
            offset: 0,
            limit: 10,
            mode: FetchMode::Replace,
        }
    }

    #[tokio::test]
    async fn completed_fetch_is_reported_with_its_token() {
        let mut engine = FetchEngine::new(Arc::new(StubBackend)).expect("engine should start");
        engine.submit(request(3, "cat"));

        let event = engine.recv_event().await.expect("event should arrive");
        assert_eq!(event.token(), 3);
        let FetchEvent::Completed { batch, .. } = event else {
            panic!("expected a completion event");
        };
        assert_eq!(batch.items[0].title, "cat@0");
        assert_eq!(engine.submitted(), 1);
    }

    #[tokio::test]
    async fn failed_fetch_carries_display_message() {
        let mut engine = FetchEngine::new(Arc::new(StubBackend)).expect("engine should start");
        engine.submit(request(1, "broken"));

        let event = engine.recv_event().await.expect("event should arrive");
        assert_eq!(
            event,
            FetchEvent::Failed {
                token: 1,
                message: "API fetch failed: 500 boom".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn overlapping_fetches_may_complete_out_of_order() {
        let mut engine = FetchEngine::new(Arc::new(StubBackend)).expect("engine should start");
        engine.submit(request(1, "slow"));
        engine.submit(request(2, "fast"));

        let first = engine.recv_event().await.expect("event should arrive");
        let second = engine.recv_event().await.expect("event should arrive");
        assert_eq!(first.token(), 2);
        assert_eq!(second.token(), 1);
    }

    #[test]
    fn engine_starts_its_own_runtime_outside_tokio() {
        let mut engine = FetchEngine::new(Arc::new(StubBackend)).expect("engine should start");
        engine.submit(request(5, "dog"));

        let waiter = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("waiter runtime should build");
        let event = waiter
            .block_on(engine.recv_event())
            .expect("event should arrive");
        assert_eq!(event.token(), 5);
    }
}
