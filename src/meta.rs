use std::time::SystemTime;

use uuid::Uuid;

use crate::EventId;

/// Metadata attached to every recorded event.
///
/// - `seq`: arrival index within the store that recorded the event, starting at 0.
/// - `id`: unique identifier of the recorded entry.
/// - `timestamp`: record time in nanoseconds since Unix epoch (truncated to `u64`).
///
/// Ordering questions should use `seq`: two events dispatched back to back can
/// share a timestamp on coarse clocks, but never a sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Meta {
    seq: usize,
    id: EventId,
    timestamp: u64,
}

impl Meta {
    /// Construct metadata for the event at position `seq`.
    pub fn new(seq: usize) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self {
            seq,
            id: Uuid::new_v4().as_u128(),
            timestamp,
        }
    }

    /// Position of the event in the recorded sequence.
    pub fn seq(&self) -> usize {
        self.seq
    }

    /// Unique identifier for this entry.
    pub fn id(&self) -> EventId {
        self.id
    }

    /// Timestamp in nanoseconds since Unix epoch (u64 truncation).
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }
}
