use std::{future::Future, sync::Arc};

use crate::{Event, MockStore};

/// A unit of asynchronous business logic run by a [`MockStore`].
///
/// The store hands the thunk a handle to itself (for nested dispatches) and
/// the current state snapshot. Whatever the thunk's future resolves to is
/// handed back to the caller of
/// [`dispatch_thunk`](MockStore::dispatch_thunk).
///
/// Closures taking `(MockStore<S, E>, Arc<S>)` and returning a `Send` future
/// are thunks. Work done in the closure body, before the future is built,
/// happens synchronously at dispatch time; everything inside the future
/// happens when it is awaited.
pub trait Thunk<S, E: Event>: Send {
    type Output: Send;

    fn run(self, store: MockStore<S, E>, state: Arc<S>)
    -> impl Future<Output = Self::Output> + Send;
}

impl<S, E, F, Fut> Thunk<S, E> for F
where
    E: Event,
    F: FnOnce(MockStore<S, E>, Arc<S>) -> Fut + Send,
    Fut: Future + Send,
    Fut::Output: Send,
{
    type Output = Fut::Output;

    fn run(
        self,
        store: MockStore<S, E>,
        state: Arc<S>,
    ) -> impl Future<Output = Self::Output> + Send {
        self(store, state)
    }
}
