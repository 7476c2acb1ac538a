//! Event matching for sequence comparisons.

use std::{borrow::Cow, fmt, sync::Arc};

use crate::{Envelope, Event, EventId};

type MatchFn<E> = Arc<dyn Fn(&Envelope<E>) -> bool + Send + Sync>;

/// A matcher for one expected event in a sequence comparison.
///
/// `EventMatcher` can match events by:
/// - Kind (the event discriminator)
/// - Structural equality with an expected event
/// - Recorded ID
/// - Custom predicate
///
/// # Example
///
/// ```ignore
/// use mockstore::query::EventMatcher;
///
/// let matcher = EventMatcher::kind("LOGIN_REQUEST");
/// let matcher = EventMatcher::event(AuthEvent::LoginFailure);
/// let matcher =
///     EventMatcher::<AuthEvent>::matching_event(|e| matches!(e, AuthEvent::Navigate { .. }));
///
/// // &str converts into a kind matcher
/// let matcher: EventMatcher<AuthEvent> = "LOGIN_FAILURE".into();
/// ```
pub struct EventMatcher<E: Event> {
    matcher: MatchFn<E>,
    description: Cow<'static, str>,
}

impl<E: Event> Clone for EventMatcher<E> {
    fn clone(&self) -> Self {
        Self {
            matcher: self.matcher.clone(),
            description: self.description.clone(),
        }
    }
}

impl<E: Event> fmt::Debug for EventMatcher<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

impl<E: Event> EventMatcher<E> {
    /// Match events by their kind.
    pub fn kind(kind: impl Into<Cow<'static, str>>) -> Self {
        let kind: Cow<'static, str> = kind.into();
        Self {
            description: kind.clone(),
            matcher: Arc::new(move |entry| entry.kind() == kind),
        }
    }

    /// Match events by their recorded ID.
    pub fn id(id: EventId) -> Self {
        Self {
            matcher: Arc::new(move |entry| entry.id() == id),
            description: Cow::Owned(format!("#{id}")),
        }
    }

    /// Match events equal to `expected`, payload included.
    pub fn event(expected: E) -> Self
    where
        E: PartialEq,
    {
        Self {
            description: Cow::Owned(format!("{expected:?}")),
            matcher: Arc::new(move |entry| *entry.event() == expected),
        }
    }

    /// Match events using a custom predicate on the recorded entry.
    pub fn matching<F>(predicate: F) -> Self
    where
        F: Fn(&Envelope<E>) -> bool + Send + Sync + 'static,
    {
        Self {
            matcher: Arc::new(predicate),
            description: Cow::Borrowed("<predicate>"),
        }
    }

    /// Match events using a custom predicate on the event itself.
    pub fn matching_event<F>(predicate: F) -> Self
    where
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        Self {
            matcher: Arc::new(move |entry| predicate(entry.event())),
            description: Cow::Borrowed("<event predicate>"),
        }
    }

    /// Replace the text used for this matcher in mismatch reports.
    pub fn described_as(mut self, description: impl Into<Cow<'static, str>>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns true if the given entry matches this matcher.
    pub fn matches(&self, entry: &Envelope<E>) -> bool {
        (self.matcher)(entry)
    }
}

// Allow &str to be used directly as a kind matcher
impl<E: Event> From<&'static str> for EventMatcher<E> {
    fn from(kind: &'static str) -> Self {
        EventMatcher::kind(kind)
    }
}

// Allow String to be used as a kind matcher
impl<E: Event> From<String> for EventMatcher<E> {
    fn from(kind: String) -> Self {
        EventMatcher::kind(kind)
    }
}

// Allow EventId to be used directly as an id matcher
impl<E: Event> From<EventId> for EventMatcher<E> {
    fn from(id: EventId) -> Self {
        EventMatcher::id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum TestEvent {
        Ping,
        Pong(u8),
    }

    impl Event for TestEvent {
        fn kind(&self) -> Cow<'static, str> {
            Cow::Borrowed(match self {
                TestEvent::Ping => "PING",
                TestEvent::Pong(_) => "PONG",
            })
        }
    }

    fn make_entry(event: TestEvent) -> Envelope<TestEvent> {
        Envelope::new(event, 0)
    }

    #[test]
    fn kind_matcher_matches_by_kind() {
        let entry = make_entry(TestEvent::Ping);
        assert!(EventMatcher::kind("PING").matches(&entry));
        assert!(!EventMatcher::kind("PONG").matches(&entry));
    }

    #[test]
    fn id_matcher_matches_by_id() {
        let entry = make_entry(TestEvent::Ping);
        let id = entry.id();

        assert!(EventMatcher::id(id).matches(&entry));
        assert!(!EventMatcher::id(id.wrapping_add(1)).matches(&entry));
    }

    #[test]
    fn event_matcher_compares_payload() {
        let entry = make_entry(TestEvent::Pong(3));

        assert!(EventMatcher::event(TestEvent::Pong(3)).matches(&entry));
        assert!(!EventMatcher::event(TestEvent::Pong(4)).matches(&entry));
    }

    #[test]
    fn matching_event_uses_predicate() {
        let entry = make_entry(TestEvent::Pong(9));

        let matcher = EventMatcher::<TestEvent>::matching_event(|e| {
            matches!(e, TestEvent::Pong(n) if *n > 5)
        });
        assert!(matcher.matches(&entry));

        let matcher = EventMatcher::<TestEvent>::matching_event(|e| matches!(e, TestEvent::Ping));
        assert!(!matcher.matches(&entry));
    }

    #[test]
    fn from_str_creates_kind_matcher() {
        let entry = make_entry(TestEvent::Ping);
        let matcher: EventMatcher<TestEvent> = "PING".into();
        assert!(matcher.matches(&entry));
        assert_eq!(format!("{matcher:?}"), "PING");
    }

    #[test]
    fn described_as_overrides_debug_output() {
        let matcher: EventMatcher<TestEvent> =
            EventMatcher::matching_event(|_| true).described_as("anything");
        assert_eq!(format!("{matcher:?}"), "anything");
    }
}
