use std::{
    borrow::Cow,
    future::Future,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use tokio::{
    sync::{Notify, watch},
    task::JoinHandle,
    time::timeout,
};

use crate::{
    Config, Envelope, Error, Event, Middleware, Result, Thunk, query::RecordedEvents,
};

type MiddlewareChain<S, E> = Arc<Vec<Arc<dyn Middleware<S, E>>>>;

/// A state-container stand-in that records every event dispatched to it.
///
/// The store never applies reducers: the initial state is captured once and
/// handed to thunks and middleware as a read-only snapshot. Plain events are
/// appended to the recorded sequence in submission order; thunks are run
/// with the store itself so their nested dispatches land in the same record.
///
/// `MockStore` is a cheap handle. Clones share the recorded sequence, which
/// is how thunks dispatch into the store that ran them. Build a new store for
/// every test case.
///
/// # Example
///
/// ```rust
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// use std::sync::Arc;
/// use mockstore::{create_mock_store, MockStore, auth::{AuthEvent, AuthState}};
///
/// let store = create_mock_store::<AuthState, AuthEvent>(AuthState::default());
/// store.dispatch(AuthEvent::LoginRequest);
///
/// store
///     .dispatch_thunk(|store: MockStore<AuthState, AuthEvent>, _: Arc<AuthState>| async move {
///         store.dispatch(AuthEvent::SetLoadingFalse);
///     })
///     .await;
///
/// assert_eq!(store.kinds(), ["LOGIN_REQUEST", "SET_LOADING_FALSE"]);
/// # }
/// ```
pub struct MockStore<S, E: Event> {
    inner: Arc<Inner<S, E>>,
    middleware: MiddlewareChain<S, E>,
}

struct Inner<S, E: Event> {
    state: Arc<S>,
    records: Mutex<Vec<Envelope<E>>>,
    recorded: Notify,
    pending: Arc<watch::Sender<usize>>,
    config: Config,
}

/// Counts one spawned thunk as pending until dropped, even on panic.
struct PendingGuard(Arc<watch::Sender<usize>>);

impl PendingGuard {
    fn new(pending: Arc<watch::Sender<usize>>) -> Self {
        pending.send_modify(|n| *n += 1);
        Self(pending)
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.send_modify(|n| *n -= 1);
    }
}

impl<S, E: Event> Clone for MockStore<S, E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            middleware: self.middleware.clone(),
        }
    }
}

/// Create a store around `initial_state` with the default [`Config`].
pub fn create_mock_store<S, E>(initial_state: S) -> MockStore<S, E>
where
    S: Send + Sync + 'static,
    E: Event,
{
    MockStore::new(initial_state)
}

impl<S, E> MockStore<S, E>
where
    S: Send + Sync + 'static,
    E: Event,
{
    pub fn new(initial_state: S) -> Self {
        Self::with_config(initial_state, Config::default())
    }

    pub fn with_config(initial_state: S, config: Config) -> Self {
        let inner = Inner {
            state: Arc::new(initial_state),
            records: Mutex::new(Vec::with_capacity(config.initial_capacity)),
            recorded: Notify::new(),
            pending: Arc::new(watch::Sender::new(0)),
            config,
        };
        Self {
            inner: Arc::new(inner),
            middleware: Arc::new(Vec::new()),
        }
    }

    /// Append a middleware step to this handle's chain.
    ///
    /// Handles cloned afterwards (including the ones given to thunks) share
    /// the chain; handles cloned before don't see the new step.
    pub fn with_middleware<M>(mut self, middleware: M) -> Self
    where
        M: Middleware<S, E>,
    {
        let mut chain: Vec<_> = self.middleware.iter().cloned().collect();
        chain.push(Arc::new(middleware));
        self.middleware = Arc::new(chain);
        self
    }

    /// Record a plain event and return it unchanged.
    ///
    /// The event goes through the middleware chain first; what comes out of
    /// the chain is what gets recorded.
    pub fn dispatch(&self, event: E) -> E {
        let mut processed = Some(event.clone());
        for step in self.middleware.iter() {
            processed = match processed {
                Some(e) => step.process(&self.inner.state, e),
                None => break,
            };
        }

        match processed {
            Some(e) => self.record(e),
            None => tracing::debug!(kind = %event.kind(), "event dropped by middleware"),
        }
        event
    }

    /// Run a thunk with this store and the current state snapshot.
    ///
    /// Returns whatever the thunk returns. Await it before inspecting the
    /// recorded sequence: events dispatched after a simulated delay only
    /// show up once the future has completed.
    pub fn dispatch_thunk<T>(
        &self,
        thunk: T,
    ) -> impl Future<Output = T::Output> + Send + use<S, E, T>
    where
        T: Thunk<S, E>,
    {
        tracing::debug!(thunk = std::any::type_name::<T>(), "thunk dispatched");
        thunk.run(self.clone(), self.state())
    }

    /// Run a thunk as a background task tracked by this store.
    ///
    /// The synchronous part of the thunk runs before this returns. Use
    /// [`settle`](Self::settle) to wait for every spawned thunk.
    pub fn spawn_thunk<T>(&self, thunk: T) -> JoinHandle<T::Output>
    where
        T: Thunk<S, E> + 'static,
        T::Output: 'static,
    {
        let guard = PendingGuard::new(self.inner.pending.clone());
        let fut = self.dispatch_thunk(thunk);
        tokio::spawn(async move {
            let _guard = guard;
            fut.await
        })
    }

    /// Wait until every thunk started with [`spawn_thunk`](Self::spawn_thunk)
    /// has finished, bounded by [`Config::settle_timeout`].
    ///
    /// Thunks spawned while waiting are waited for too. Timing out leaves
    /// them running; concurrent calls wait independently.
    pub async fn settle(&self) -> Result {
        let limit = self.inner.config.settle_timeout;
        let mut pending = self.inner.pending.subscribe();
        let waited = timeout(limit, async {
            // The sender lives as long as `self`, so this never errs.
            let _ = pending.wait_for(|n| *n == 0).await;
        })
        .await;

        waited.map_err(|_| {
            let recorded = self.len();
            tracing::warn!(?limit, recorded, pending = self.pending(), "thunks did not settle");
            Error::SettleTimeout(limit, recorded)
        })
    }

    /// Wait until the recorded sequence satisfies `condition`, bounded by
    /// [`Config::settle_timeout`].
    ///
    /// The condition is checked immediately and then after every record.
    pub async fn settle_on<F>(&self, condition: F) -> Result
    where
        F: Fn(&RecordedEvents<E>) -> bool,
    {
        let limit = self.inner.config.settle_timeout;
        let wait = async {
            loop {
                let notified = self.inner.recorded.notified();
                tokio::pin!(notified);
                notified.as_mut().enable();
                if condition(&self.recorded_events()) {
                    return;
                }
                notified.await;
            }
        };

        timeout(limit, wait).await.map_err(|_| {
            let recorded = self.len();
            tracing::warn!(?limit, recorded, "settle condition not met");
            Error::SettleTimeout(limit, recorded)
        })
    }
}

impl<S, E: Event> MockStore<S, E> {
    /// Snapshot of the state captured at construction.
    pub fn state(&self) -> Arc<S> {
        self.inner.state.clone()
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Read-only snapshot of the recorded sequence.
    ///
    /// Later dispatches don't affect a snapshot already taken.
    pub fn recorded_events(&self) -> RecordedEvents<E> {
        RecordedEvents::new(Arc::new(self.records().clone()))
    }

    /// The recorded events without their metadata, in submission order.
    pub fn events(&self) -> Vec<E> {
        self.records().iter().map(|e| e.event().clone()).collect()
    }

    /// Kinds of the recorded events, in submission order.
    pub fn kinds(&self) -> Vec<Cow<'static, str>> {
        self.records().iter().map(|e| e.kind()).collect()
    }

    /// Number of spawned thunks that haven't finished yet.
    pub fn pending(&self) -> usize {
        *self.inner.pending.borrow()
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    /// Forget everything recorded so far. Sequence numbers restart at 0.
    pub fn reset(&self) {
        self.records().clear();
    }

    fn record(&self, event: E) {
        {
            let mut records = self.records();
            let seq = records.len();
            tracing::trace!(seq, kind = %event.kind(), "event recorded");
            records.push(Envelope::new(event, seq));
        }
        self.inner.recorded.notify_waiters();
    }

    fn records(&self) -> MutexGuard<'_, Vec<Envelope<E>>> {
        self.inner
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
