use crate::{Event, EventId, Meta};

/// A recorded event plus the metadata the store attached when recording it.
///
/// - `event`: the user-defined event implementing `Event`.
/// - `meta`: [`Meta`] carrying the arrival index, id and timestamp.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Envelope<E: Event> {
    meta: Meta,
    event: E,
}

impl<E: Event> Envelope<E> {
    /// Wrap an event recorded at position `seq`.
    pub fn new(event: E, seq: usize) -> Self {
        Self {
            meta: Meta::new(seq),
            event,
        }
    }

    #[inline]
    pub fn event(&self) -> &E {
        &self.event
    }

    #[inline]
    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    #[inline]
    pub fn id(&self) -> EventId {
        self.meta.id()
    }

    #[inline]
    pub fn seq(&self) -> usize {
        self.meta.seq()
    }

    /// The discriminator of the wrapped event.
    #[inline]
    pub fn kind(&self) -> std::borrow::Cow<'static, str> {
        self.event.kind()
    }

    pub fn into_event(self) -> E {
        self.event
    }
}
