use std::{borrow::Cow, ops::Index};

use crate::{
    Envelope, Error, Event, EventId, Result,
    query::{EventMatcher, EventQuery, EventRecords},
};

/// A read-only snapshot of a store's recorded sequence.
///
/// Comparisons come in three flavours:
/// - [`sequence`](Self::sequence): exactly these events, in this order
/// - [`contains_in_order`](Self::contains_in_order): these events appear in
///   this order, possibly with others in between
/// - [`contains_all`](Self::contains_all): these events appear, in any order
///
/// Each has an `expect_*` twin returning [`Error::SequenceMismatch`] with both
/// sides spelled out, handy with `?` in tests returning `Result`.
#[derive(Debug, Clone)]
pub struct RecordedEvents<E: Event> {
    records: EventRecords<E>,
}

impl<E: Event> RecordedEvents<E> {
    pub(crate) fn new(records: EventRecords<E>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Envelope<E>> {
        self.records.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Envelope<E>> {
        self.records.get(index)
    }

    pub fn first(&self) -> Option<&Envelope<E>> {
        self.records.first()
    }

    pub fn last(&self) -> Option<&Envelope<E>> {
        self.records.last()
    }

    /// The events without their metadata.
    pub fn events(&self) -> Vec<E> {
        self.iter().map(|e| e.event().clone()).collect()
    }

    pub fn kinds(&self) -> Vec<Cow<'static, str>> {
        self.iter().map(|e| e.kind()).collect()
    }

    pub fn ids(&self) -> Vec<EventId> {
        self.iter().map(|e| e.id()).collect()
    }

    /// Start a filtered query over this snapshot.
    pub fn query(&self) -> EventQuery<E> {
        EventQuery::new(self.records.clone())
    }

    /// Exactly the expected events, in the expected order.
    pub fn sequence<M>(&self, expected: impl IntoIterator<Item = M>) -> bool
    where
        M: Into<EventMatcher<E>>,
    {
        let expected = matchers(expected);
        expected.len() == self.len()
            && self
                .records
                .iter()
                .zip(&expected)
                .all(|(entry, matcher)| matcher.matches(entry))
    }

    /// The expected events appear in this order, possibly interleaved with
    /// other events.
    pub fn contains_in_order<M>(&self, expected: impl IntoIterator<Item = M>) -> bool
    where
        M: Into<EventMatcher<E>>,
    {
        let mut pending = matchers(expected).into_iter().peekable();
        for entry in self.records.iter() {
            match pending.peek() {
                Some(matcher) if matcher.matches(entry) => {
                    pending.next();
                }
                Some(_) => {}
                None => break,
            }
        }
        pending.peek().is_none()
    }

    /// Every expected event appears, in any order. Each expected event needs
    /// its own recorded event: two identical matchers need two occurrences.
    pub fn contains_all<M>(&self, expected: impl IntoIterator<Item = M>) -> bool
    where
        M: Into<EventMatcher<E>>,
    {
        let expected = matchers(expected);
        let candidates: Vec<Vec<usize>> = expected
            .iter()
            .map(|m| {
                self.records
                    .iter()
                    .enumerate()
                    .filter(|(_, entry)| m.matches(entry))
                    .map(|(i, _)| i)
                    .collect()
            })
            .collect();

        // Bipartite matching of matchers to entries via augmenting paths.
        let mut owner: Vec<Option<usize>> = vec![None; self.len()];
        (0..expected.len()).all(|m| {
            let mut visited = vec![false; self.len()];
            assign(m, &candidates, &mut owner, &mut visited)
        })
    }

    pub fn expect_sequence<M>(&self, expected: impl IntoIterator<Item = M>) -> Result
    where
        M: Into<EventMatcher<E>>,
    {
        let expected = matchers(expected);
        self.check(self.sequence(expected.iter().cloned()), &expected)
    }

    pub fn expect_contains_in_order<M>(&self, expected: impl IntoIterator<Item = M>) -> Result
    where
        M: Into<EventMatcher<E>>,
    {
        let expected = matchers(expected);
        self.check(self.contains_in_order(expected.iter().cloned()), &expected)
    }

    pub fn expect_contains_all<M>(&self, expected: impl IntoIterator<Item = M>) -> Result
    where
        M: Into<EventMatcher<E>>,
    {
        let expected = matchers(expected);
        self.check(self.contains_all(expected.iter().cloned()), &expected)
    }

    fn check(&self, ok: bool, expected: &[EventMatcher<E>]) -> Result {
        if ok {
            return Ok(());
        }
        Err(Error::SequenceMismatch {
            expected: format!("{expected:?}"),
            actual: format!("{:?}", self.events()),
        })
    }
}

impl<E: Event> Index<usize> for RecordedEvents<E> {
    type Output = Envelope<E>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.records[index]
    }
}

fn matchers<E: Event, M: Into<EventMatcher<E>>>(
    expected: impl IntoIterator<Item = M>,
) -> Vec<EventMatcher<E>> {
    expected.into_iter().map(Into::into).collect()
}

fn assign(
    matcher: usize,
    candidates: &[Vec<usize>],
    owner: &mut [Option<usize>],
    visited: &mut [bool],
) -> bool {
    for &entry in &candidates[matcher] {
        if visited[entry] {
            continue;
        }
        visited[entry] = true;
        let free = match owner[entry] {
            None => true,
            Some(other) => assign(other, candidates, owner, visited),
        };
        if free {
            owner[entry] = Some(matcher);
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum TestEvent {
        Start,
        Step(u8),
        Stop,
    }

    impl Event for TestEvent {
        fn kind(&self) -> Cow<'static, str> {
            Cow::Borrowed(match self {
                TestEvent::Start => "START",
                TestEvent::Step(_) => "STEP",
                TestEvent::Stop => "STOP",
            })
        }
    }

    fn recorded(events: &[TestEvent]) -> RecordedEvents<TestEvent> {
        RecordedEvents::new(Arc::new(
            events
                .iter()
                .cloned()
                .enumerate()
                .map(|(seq, e)| Envelope::new(e, seq))
                .collect(),
        ))
    }

    fn sample() -> RecordedEvents<TestEvent> {
        recorded(&[
            TestEvent::Start,
            TestEvent::Step(1),
            TestEvent::Step(2),
            TestEvent::Stop,
        ])
    }

    #[test]
    fn sequence_is_exact_and_ordered() {
        let events = sample();
        assert!(events.sequence(["START", "STEP", "STEP", "STOP"]));
        assert!(!events.sequence(["START", "STEP", "STOP"]));
        assert!(!events.sequence(["STEP", "START", "STEP", "STOP"]));
    }

    #[test]
    fn sequence_of_nothing_matches_empty_record() {
        let events = recorded(&[]);
        assert!(events.sequence(Vec::<EventMatcher<TestEvent>>::new()));
        assert!(!sample().sequence(Vec::<EventMatcher<TestEvent>>::new()));
    }

    #[test]
    fn contains_in_order_allows_gaps() {
        let events = sample();
        assert!(events.contains_in_order(["START", "STOP"]));
        assert!(events.contains_in_order([
            EventMatcher::event(TestEvent::Step(1)),
            EventMatcher::event(TestEvent::Step(2)),
        ]));
        assert!(!events.contains_in_order([
            EventMatcher::event(TestEvent::Step(2)),
            EventMatcher::event(TestEvent::Step(1)),
        ]));
    }

    #[test]
    fn contains_all_ignores_order() {
        let events = sample();
        assert!(events.contains_all(["STOP", "START"]));
        assert!(events.contains_all([
            EventMatcher::event(TestEvent::Step(2)),
            EventMatcher::event(TestEvent::Step(1)),
        ]));
    }

    #[test]
    fn contains_all_needs_distinct_occurrences() {
        let events = sample();
        assert!(events.contains_all(["STEP", "STEP"]));
        assert!(!events.contains_all(["STOP", "STOP"]));
    }

    #[test]
    fn contains_all_reassigns_overlapping_matchers() {
        let events = sample();
        // A greedy pass would give Step(1) to the broad matcher first.
        let any_step =
            EventMatcher::<TestEvent>::matching_event(|e| matches!(e, TestEvent::Step(_)));
        let step_one = EventMatcher::event(TestEvent::Step(1));
        assert!(events.contains_all([any_step, step_one]));
    }

    #[test]
    fn expect_reports_both_sides() {
        let err = sample().expect_sequence(["START"]).unwrap_err();
        match err {
            Error::SequenceMismatch { expected, actual } => {
                assert_eq!(expected, "[START]");
                assert!(actual.contains("Step(2)"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(sample().expect_contains_all(["STOP"]).is_ok());
        assert!(sample().expect_contains_in_order(["STOP", "START"]).is_err());
    }

    #[test]
    fn index_and_accessors() {
        let events = sample();
        assert_eq!(events[3].event(), &TestEvent::Stop);
        assert_eq!(events.kinds(), ["START", "STEP", "STEP", "STOP"]);
        assert_eq!(events.get(9).map(|e| e.seq()), None);
    }
}
