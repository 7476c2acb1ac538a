use crate::Event;

/// A step applied to every plain event before the store records it.
///
/// Middleware sees the store's state snapshot and the submitted event, and
/// returns the event to record (possibly rewritten) or `None` to drop it.
/// Middleware runs in registration order; the first `None` stops the chain.
///
/// Any `Fn(&S, E) -> Option<E>` closure is a middleware:
///
/// ```rust
/// use mockstore::{MockStore, auth::{AuthEvent, AuthState}};
///
/// let store = MockStore::<AuthState, AuthEvent>::new(AuthState::default())
///     .with_middleware(|_: &AuthState, e: AuthEvent| match e {
///         AuthEvent::Navigate { .. } => None,
///         other => Some(other),
///     });
/// ```
pub trait Middleware<S, E: Event>: Send + Sync + 'static {
    fn process(&self, state: &S, event: E) -> Option<E>;
}

impl<S, E, F> Middleware<S, E> for F
where
    E: Event,
    F: Fn(&S, E) -> Option<E> + Send + Sync + 'static,
{
    fn process(&self, state: &S, event: E) -> Option<E> {
        self(state, event)
    }
}
