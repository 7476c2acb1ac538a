use std::fmt;

use crate::{
    Config, Event, FakeService, Middleware, MockStore, Result, Thunk,
    query::{EventMatcher, RecordedEvents},
};

/// Drives one thunk against a fresh [`MockStore`] and compares what it
/// dispatched with what a test expects.
///
/// Build one harness per test case; nothing is shared between harnesses.
///
/// # Example
///
/// ```rust
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> mockstore::Result {
/// use mockstore::{Harness, auth::{self, AuthEvent, AuthState, Credentials, LoginResponse}};
///
/// let test = Harness::<AuthState, AuthEvent>::new(AuthState::default());
/// let service = test.fake_service(LoginResponse::second_factor_satisfied(), false);
///
/// test.run(auth::login(Credentials::new("ada", "hunter2"), service)).await?;
///
/// test.expect_sequence(["LOGIN_REQUEST", "LOGIN_FAILURE"])?;
/// # Ok(())
/// # }
/// ```
pub struct Harness<S, E: Event> {
    store: MockStore<S, E>,
}

impl<S, E> Harness<S, E>
where
    S: Send + Sync + 'static,
    E: Event,
{
    pub fn new(initial_state: S) -> Self {
        Self::with_config(initial_state, Config::default())
    }

    pub fn with_config(initial_state: S, config: Config) -> Self {
        Self {
            store: MockStore::with_config(initial_state, config),
        }
    }

    /// Install a middleware on the store before running anything.
    pub fn with_middleware<M>(mut self, middleware: M) -> Self
    where
        M: Middleware<S, E>,
    {
        self.store = self.store.with_middleware(middleware);
        self
    }

    pub fn store(&self) -> &MockStore<S, E> {
        &self.store
    }

    pub fn config(&self) -> &Config {
        self.store.config()
    }

    /// A fake service using this harness's configured delay.
    pub fn fake_service<T>(&self, result: T, succeeds: bool) -> FakeService<T>
    where
        T: Clone + fmt::Debug + Send + Sync + 'static,
    {
        FakeService::new(result, succeeds).with_config(self.config())
    }

    /// Spawn `thunk` on the store and wait until it, and any thunk it
    /// spawned, settled.
    ///
    /// Fails with [`Error::SettleTimeout`](crate::Error::SettleTimeout) if
    /// that takes longer than [`Config::settle_timeout`]; the thunk keeps
    /// running and its later events are still recorded. A panicking thunk
    /// surfaces as [`Error::ThunkJoin`](crate::Error::ThunkJoin).
    pub async fn run<T>(&self, thunk: T) -> Result<T::Output>
    where
        T: Thunk<S, E> + 'static,
        T::Output: 'static,
    {
        let handle = self.store.spawn_thunk(thunk);
        self.store.settle().await?;
        Ok(handle.await?)
    }

    pub fn events(&self) -> RecordedEvents<E> {
        self.store.recorded_events()
    }

    /// See [`RecordedEvents::expect_sequence`].
    pub fn expect_sequence<M>(&self, expected: impl IntoIterator<Item = M>) -> Result
    where
        M: Into<EventMatcher<E>>,
    {
        self.events().expect_sequence(expected)
    }

    /// See [`RecordedEvents::expect_contains_in_order`].
    pub fn expect_contains_in_order<M>(&self, expected: impl IntoIterator<Item = M>) -> Result
    where
        M: Into<EventMatcher<E>>,
    {
        self.events().expect_contains_in_order(expected)
    }

    /// See [`RecordedEvents::expect_contains_all`].
    pub fn expect_contains_all<M>(&self, expected: impl IntoIterator<Item = M>) -> Result
    where
        M: Into<EventMatcher<E>>,
    {
        self.events().expect_contains_all(expected)
    }

    /// Compare the recorded events with `expected` by structural equality.
    pub fn expect_events(&self, expected: impl IntoIterator<Item = E>) -> Result
    where
        E: PartialEq,
    {
        self.expect_sequence(expected.into_iter().map(EventMatcher::event))
    }
}
