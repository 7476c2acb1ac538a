use std::{borrow::Cow, rc::Rc};

use crate::{Envelope, Event, EventId, query::EventRecords};

type Filter<E> = Rc<dyn Fn(&Envelope<E>) -> bool>;

/// A filtered view over a recorded sequence.
///
/// Filters narrow the view and can be chained in any order; every filter
/// must accept an entry for it to be kept. Nothing is evaluated until one of
/// the reading methods (`count`, `first`, `events`, ...) is called, and the
/// underlying snapshot is never modified.
///
/// ```ignore
/// let channels = store.recorded_events()
///     .query()
///     .of_kind("STORE_CONTACT_CHANNELS")
///     .after(&request)
///     .count();
/// ```
#[derive(Clone)]
pub struct EventQuery<E: Event> {
    records: EventRecords<E>,
    filters: Vec<Filter<E>>,
}

impl<E: Event> EventQuery<E> {
    pub(crate) fn new(records: EventRecords<E>) -> Self {
        Self {
            records,
            filters: Vec::new(),
        }
    }

    fn filter(mut self, keep: impl Fn(&Envelope<E>) -> bool + 'static) -> Self {
        self.filters.push(Rc::new(keep));
        self
    }

    fn selected(&self) -> impl Iterator<Item = &Envelope<E>> {
        self.records
            .iter()
            .filter(|entry| self.filters.iter().all(|keep| keep(entry)))
    }

    pub fn count(&self) -> usize {
        self.selected().count()
    }

    pub fn is_empty(&self) -> bool {
        self.selected().next().is_none()
    }

    pub fn first(&self) -> Option<Envelope<E>> {
        self.selected().next().cloned()
    }

    pub fn last(&self) -> Option<Envelope<E>> {
        self.selected().last().cloned()
    }

    /// The selected events, without their metadata.
    pub fn events(&self) -> Vec<E> {
        self.selected().map(|entry| entry.event().clone()).collect()
    }

    /// True if every selected entry satisfies `predicate` (vacuously true
    /// when nothing is selected).
    pub fn all(&self, predicate: impl Fn(&Envelope<E>) -> bool) -> bool {
        self.selected().all(predicate)
    }

    pub fn any(&self, predicate: impl Fn(&Envelope<E>) -> bool) -> bool {
        self.selected().any(predicate)
    }

    /// Keep entries whose kind is `kind`.
    pub fn of_kind(self, kind: impl Into<Cow<'static, str>>) -> Self {
        let kind = kind.into();
        self.filter(move |entry| entry.kind() == kind)
    }

    /// Keep the entry recorded with `id`.
    pub fn with_id(self, id: EventId) -> Self {
        self.filter(move |entry| entry.id() == id)
    }

    /// Keep entries whose event is accepted by `predicate`.
    ///
    /// ```ignore
    /// let navigations = recorded.query()
    ///     .matching_event(|e| matches!(e, AuthEvent::Navigate { .. }))
    ///     .count();
    /// ```
    pub fn matching_event(self, predicate: impl Fn(&E) -> bool + 'static) -> Self {
        self.filter(move |entry| predicate(entry.event()))
    }

    /// Keep entries recorded after `entry`.
    pub fn after(self, entry: &Envelope<E>) -> Self {
        let seq = entry.seq();
        self.filter(move |e| e.seq() > seq)
    }

    /// Keep entries recorded before `entry`.
    pub fn before(self, entry: &Envelope<E>) -> Self {
        let seq = entry.seq();
        self.filter(move |e| e.seq() < seq)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum TestEvent {
        Tick(u32),
        Done,
    }

    impl Event for TestEvent {
        fn kind(&self) -> Cow<'static, str> {
            Cow::Borrowed(match self {
                TestEvent::Tick(_) => "TICK",
                TestEvent::Done => "DONE",
            })
        }
    }

    fn records() -> EventRecords<TestEvent> {
        let events = [
            TestEvent::Tick(1),
            TestEvent::Tick(2),
            TestEvent::Done,
            TestEvent::Tick(3),
        ];
        Arc::new(
            events
                .into_iter()
                .enumerate()
                .map(|(seq, e)| Envelope::new(e, seq))
                .collect(),
        )
    }

    #[test]
    fn filters_by_kind() {
        let query = EventQuery::new(records());
        assert_eq!(query.clone().of_kind("TICK").count(), 3);
        assert_eq!(query.of_kind("DONE").count(), 1);
    }

    #[test]
    fn filters_by_position() {
        let query = EventQuery::new(records());
        let done = query.clone().of_kind("DONE").first().unwrap();

        assert_eq!(query.clone().after(&done).events(), [TestEvent::Tick(3)]);
        assert_eq!(
            query.before(&done).events(),
            [TestEvent::Tick(1), TestEvent::Tick(2)]
        );
    }

    #[test]
    fn filters_compose() {
        let query = EventQuery::new(records())
            .of_kind("TICK")
            .matching_event(|e| matches!(e, TestEvent::Tick(n) if n % 2 == 1));

        assert_eq!(query.events(), [TestEvent::Tick(1), TestEvent::Tick(3)]);
        assert!(query.all(|e| e.kind() == "TICK"));
        assert_eq!(query.last().map(|e| e.seq()), Some(3));
    }

    #[test]
    fn empty_query_results() {
        let query = EventQuery::new(records()).of_kind("MISSING");
        assert!(query.is_empty());
        assert!(query.first().is_none());
        assert!(!query.any(|_| true));
    }

    #[test]
    fn with_id_picks_one_entry() {
        let records = records();
        let id = records[1].id();
        let query = EventQuery::new(records).with_id(id);
        assert_eq!(query.count(), 1);
        assert_eq!(query.first().map(|e| e.into_event()), Some(TestEvent::Tick(2)));
    }
}
