use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::client::{LookupError, TrackingBackend};
use crate::config::DeployMode;
use crate::normalize::{NormalizedResult, normalize};

pub const GENERIC_ERROR: &str = "Something went wrong! Please contact site administrator";

/// The one piece of shared mutable state: written from request
/// completions, read by the render loop.
#[derive(Debug, Default)]
pub struct SearchState {
    pub fetching: bool,
    pub error: Option<String>,
    pub result: Option<NormalizedResult>,
}

/// Turns a committed query into a single outstanding remote lookup and
/// tracks loading/error/result state. Requests are never cancelled on
/// the wire; instead each search takes a monotonically increasing token
/// and completions with a stale token are discarded, so the last
/// committed query wins regardless of response arrival order.
pub struct QueryController<B> {
    backend: B,
    mode: DeployMode,
    committed: Mutex<Option<String>>,
    state: Arc<Mutex<SearchState>>,
    token_counter: AtomicU64,
    latest_token: AtomicU64,
}

impl<B: TrackingBackend> QueryController<B> {
    pub fn new(backend: B, mode: DeployMode) -> Self {
        Self {
            backend,
            mode,
            committed: Mutex::new(None),
            state: Arc::new(Mutex::new(SearchState::default())),
            token_counter: AtomicU64::new(0),
            latest_token: AtomicU64::new(0),
        }
    }

    /// Shared handle to the loading/error/result state.
    pub fn state(&self) -> Arc<Mutex<SearchState>> {
        self.state.clone()
    }

    /// Record a debounced commit. Takes effect on the next `search`.
    pub fn commit(&self, query: String) {
        let mut committed = self.committed.lock().expect("committed query lock poisoned");
        *committed = Some(query);
    }

    pub fn committed(&self) -> Option<String> {
        self.committed
            .lock()
            .expect("committed query lock poisoned")
            .clone()
    }

    /// Look up the committed query. A missing or empty committed query
    /// is a no-op: no request, no state change.
    pub async fn search(&self) {
        let Some(query) = self.committed() else {
            return;
        };
        if query.is_empty() {
            return;
        }

        let token = self.token_counter.fetch_add(1, Ordering::SeqCst) + 1;
        self.latest_token.store(token, Ordering::SeqCst);

        {
            let mut state = self.state.lock().expect("search state lock poisoned");
            state.error = None;
            state.fetching = true;
        }

        let outcome = self.backend.track(&query).await;

        let stale = self.latest_token.load(Ordering::SeqCst) != token;
        let mut state = self.state.lock().expect("search state lock poisoned");
        // Loading clears on every completion; only the result/error
        // writes are gated on token freshness.
        state.fetching = false;

        if stale {
            return;
        }

        match outcome {
            Ok(raw) => {
                // Empty-after-filter responses are ignored, keeping the
                // previous result on screen.
                if let Some(normalized) = normalize(raw) {
                    state.result = Some(normalized);
                }
            }
            Err(err) => {
                state.error = Some(self.describe_error(err));
            }
        }
    }

    fn describe_error(&self, err: LookupError) -> String {
        match self.mode {
            DeployMode::Production => GENERIC_ERROR.to_string(),
            DeployMode::Development => match err {
                LookupError::Server(message) => message,
                LookupError::Transport(description) => description,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Address, Party, StatusEvent, TrackingResult};
    use std::collections::VecDeque;
    use tokio::sync::oneshot;

    fn single_status(display: &str) -> TrackingResult {
        TrackingResult {
            statuses: vec![StatusEvent {
                id: "1".to_string(),
                request_id: "QCE24608DE3".to_string(),
                status_display: display.to_string(),
                status_description: String::new(),
                date_updated: "2024-01-01".to_string(),
            }],
            consignee: Party {
                address: Address {
                    city: "Quezon City".to_string(),
                    zip_code: "1100".to_string(),
                },
            },
            shipper: Party {
                address: Address {
                    city: "Makati".to_string(),
                    zip_code: "1200".to_string(),
                },
            },
        }
    }

    /// Backend whose responses are released by the test, so completion
    /// order can be forced.
    struct GatedBackend {
        gates: Mutex<VecDeque<oneshot::Receiver<Result<TrackingResult, LookupError>>>>,
    }

    #[async_trait::async_trait]
    impl TrackingBackend for GatedBackend {
        async fn track(&self, _query: &str) -> Result<TrackingResult, LookupError> {
            let gate = self
                .gates
                .lock()
                .expect("gates lock poisoned")
                .pop_front()
                .expect("no gate scripted");
            gate.await
                .map_err(|_| LookupError::Transport("gate dropped".to_string()))?
        }
    }

    fn displayed(controller: &QueryController<GatedBackend>) -> Option<String> {
        let state = controller.state();
        let state = state.lock().expect("search state lock poisoned");
        state
            .result
            .as_ref()
            .map(|r| r.latest().status_display.clone())
    }

    #[tokio::test]
    async fn stale_completion_is_discarded() {
        let (tx1, rx1) = oneshot::channel();
        let (tx2, rx2) = oneshot::channel();
        let backend = GatedBackend {
            gates: Mutex::new(VecDeque::from([rx1, rx2])),
        };
        let controller = Arc::new(QueryController::new(backend, DeployMode::Development));

        controller.commit("FIRST".to_string());
        let c = controller.clone();
        let first = tokio::spawn(async move { c.search().await });
        tokio::task::yield_now().await;

        controller.commit("SECOND".to_string());
        let c = controller.clone();
        let second = tokio::spawn(async move { c.search().await });
        tokio::task::yield_now().await;

        // The newer search completes first, then the superseded one
        // straggles in. The straggler must not overwrite the result.
        tx2.send(Ok(single_status("Delivered"))).expect("gate 2 send");
        second.await.expect("second search panicked");
        assert_eq!(displayed(&controller).as_deref(), Some("Delivered"));

        tx1.send(Ok(single_status("In Transit"))).expect("gate 1 send");
        first.await.expect("first search panicked");
        assert_eq!(displayed(&controller).as_deref(), Some("Delivered"));
    }

    #[tokio::test]
    async fn stale_error_is_discarded() {
        let (tx1, rx1) = oneshot::channel();
        let (tx2, rx2) = oneshot::channel();
        let backend = GatedBackend {
            gates: Mutex::new(VecDeque::from([rx1, rx2])),
        };
        let controller = Arc::new(QueryController::new(backend, DeployMode::Development));

        controller.commit("FIRST".to_string());
        let c = controller.clone();
        let first = tokio::spawn(async move { c.search().await });
        tokio::task::yield_now().await;

        controller.commit("SECOND".to_string());
        let c = controller.clone();
        let second = tokio::spawn(async move { c.search().await });
        tokio::task::yield_now().await;

        tx2.send(Ok(single_status("Delivered"))).expect("gate 2 send");
        second.await.expect("second search panicked");

        tx1.send(Err(LookupError::Transport("timed out".to_string())))
            .expect("gate 1 send");
        first.await.expect("first search panicked");

        let state = controller.state();
        let state = state.lock().expect("search state lock poisoned");
        assert!(state.error.is_none());
        assert!(!state.fetching);
    }
}
