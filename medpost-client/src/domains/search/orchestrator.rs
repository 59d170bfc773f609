//! Runtime around the pure search update function.
//!
//! Every input runs [`update`] under the state lock and the returned
//! [`SearchTask`] is carried out before the lock is released, so timers and
//! generations can never disagree. The only suspension points are the
//! debounce sleep and the HTTP call.

use std::sync::{Arc, Weak};

use medpost_model::{Category, SearchRequest};
use parking_lot::Mutex;
use tokio::sync::watch;

use super::debounce::ScheduledSearch;
use super::messages::Message;
use super::service::SearchService;
use super::types::{SearchPhase, SearchSnapshot, SearchState};
use super::update::{SearchTask, update};
use crate::infra::runtime_config::RuntimeConfig;
use crate::infra::services::api::ApiService;
use crate::infra::session::SessionContext;

/// Debounced, race-free category search.
///
/// Cheap to clone; clones share state. Inputs spawn Tokio tasks, so they
/// must be called from within a Tokio runtime.
#[derive(Debug, Clone)]
pub struct SearchOrchestrator {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    state: Mutex<SearchState>,
    pending: Mutex<Option<ScheduledSearch>>,
    service: SearchService,
    snapshots: watch::Sender<SearchSnapshot>,
}

impl SearchOrchestrator {
    pub fn new(
        api: Arc<dyn ApiService>,
        session: SessionContext,
        runtime: &RuntimeConfig,
    ) -> Self {
        let state = SearchState::new(session.role(), runtime);
        let (snapshots, _) = watch::channel(state.snapshot());

        log::debug!(
            "[Search] Orchestrator ready for {:?}; categories {:?}, loading policy {}",
            session,
            state.allowed_categories,
            state.loading_policy
        );

        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(state),
                pending: Mutex::new(None),
                service: SearchService::new(api, session),
                snapshots,
            }),
        }
    }

    pub fn set_query(&self, text: impl Into<String>) {
        self.send(Message::UpdateQuery(text.into()));
    }

    /// Switch tabs. Categories outside the viewer's role are ignored.
    pub fn set_category(&self, category: Category) {
        self.send(Message::SetCategory(category));
    }

    pub fn set_endorsed_only(&self, endorsed_only: bool) {
        self.send(Message::SetEndorsedOnly(endorsed_only));
    }

    /// Search a resolved city immediately and remember it for tab switches.
    pub fn use_location(&self, city: impl Into<String>) {
        self.send(Message::UseLocation(city.into()));
    }

    pub fn clear(&self) {
        self.send(Message::ClearSearch);
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        self.inner.state.lock().snapshot()
    }

    /// Receives every committed change to the snapshot.
    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.inner.snapshots.subscribe()
    }

    pub fn empty_state_message(&self) -> Option<String> {
        self.snapshot().empty_state_message()
    }

    pub fn session(&self) -> &SessionContext {
        self.inner.service.session()
    }

    /// Wait until the latest input has settled or gone idle.
    pub async fn settled(&self) -> SearchSnapshot {
        let mut receiver = self.subscribe();
        match receiver
            .wait_for(|snapshot| {
                matches!(snapshot.phase, SearchPhase::Idle | SearchPhase::Settled)
            })
            .await
        {
            Ok(snapshot) => snapshot.clone(),
            Err(_) => self.snapshot(),
        }
    }

    fn send(&self, message: Message) {
        if let Some((generation, request)) = Inner::apply(&self.inner, message) {
            let inner = Arc::clone(&self.inner);
            tokio::spawn(async move {
                inner.execute(generation, request).await;
            });
        }
    }
}

impl Inner {
    /// Run one message through `update` and carry out its timer effects.
    /// A dispatch is handed back to the caller to await.
    fn apply(this: &Arc<Self>, message: Message) -> Option<(u64, SearchRequest)> {
        let mut state = this.state.lock();
        log::trace!("[Search] {}", message.name());

        let task = update(&mut state, message);
        let dispatch = match task {
            SearchTask::None => None,
            SearchTask::CancelPending => {
                this.cancel_pending();
                None
            }
            SearchTask::Debounce { generation, delay } => {
                this.cancel_pending();
                let weak = Arc::downgrade(this);
                let timer = ScheduledSearch::spawn(generation, delay, move || {
                    Self::fire(weak, generation)
                });
                *this.pending.lock() = Some(timer);
                None
            }
            SearchTask::Dispatch {
                generation,
                request,
            } => {
                this.cancel_pending();
                log::info!(
                    "[Search] Dispatching {} search '{}' (generation {})",
                    request.category,
                    request.text,
                    generation
                );
                Some((generation, request))
            }
        };

        let snapshot = state.snapshot();
        this.snapshots.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });

        dispatch
    }

    async fn fire(weak: Weak<Self>, generation: u64) {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        if let Some((generation, request)) =
            Self::apply(&inner, Message::SearchDebounced { generation })
        {
            inner.execute(generation, request).await;
        }
    }

    async fn execute(self: &Arc<Self>, generation: u64, request: SearchRequest) {
        let message = match self.service.search_with_metrics(&request).await {
            Ok(results) => Message::ResultsReceived {
                generation,
                results,
            },
            Err(e) => Message::SearchFailed {
                generation,
                error: e.user_message(),
            },
        };
        Self::apply(self, message);
    }

    fn cancel_pending(&self) {
        if let Some(timer) = self.pending.lock().take()
            && !timer.cancel()
            && timer.has_fired()
        {
            log::trace!(
                "[Search] Timer for generation {} already fired",
                timer.generation()
            );
        }
    }
}
