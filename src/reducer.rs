use crate::Event;

/// A pure, total state transition `(state, event) -> state'`.
///
/// Reducers are verified by the harness, never run by the
/// [`MockStore`](crate::MockStore). Implementations must:
/// - have no side effects
/// - return `state` unchanged for event kinds they don't handle
/// - produce [`initial_state`](Reducer::initial_state) when called without a state
pub trait Reducer {
    type State: Default + Clone;
    type Event: Event;

    fn reduce(&self, state: &Self::State, event: &Self::Event) -> Self::State;

    fn initial_state(&self) -> Self::State {
        Self::State::default()
    }

    /// Reduce starting from `state`, or from the initial state when there is none.
    fn reduce_or_init(&self, state: Option<&Self::State>, event: &Self::Event) -> Self::State {
        match state {
            Some(state) => self.reduce(state, event),
            None => self.reduce(&self.initial_state(), event),
        }
    }

    /// Fold a sequence of events, such as a store's recorded events, starting
    /// from the initial state.
    fn replay<'a, I>(&self, events: I) -> Self::State
    where
        I: IntoIterator<Item = &'a Self::Event>,
        Self::Event: 'a,
    {
        events
            .into_iter()
            .fold(self.initial_state(), |state, event| self.reduce(&state, event))
    }
}
