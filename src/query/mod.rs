//! Inspecting and comparing what a [`MockStore`](crate::MockStore) recorded.
//!
//! # Example
//!
//! ```ignore
//! let recorded = store.recorded_events();
//!
//! // Exact, order-sensitive
//! recorded.expect_sequence(["LOGIN_REQUEST", "LOGIN_FAILURE"])?;
//!
//! // Order-insensitive "contains"
//! assert!(recorded.contains_all([EventMatcher::event(AuthEvent::LoginFailure)]));
//!
//! // Or use EventQuery for anything else
//! let navigations = recorded.query()
//!     .of_kind("NAVIGATE")
//!     .after(&recorded[0])
//!     .count();
//! ```

mod event_matcher;
mod event_query;
mod recorded_events;

pub use event_matcher::EventMatcher;
pub use event_query::EventQuery;
pub use recorded_events::RecordedEvents;

use std::sync::Arc;

use crate::Envelope;

pub(crate) type EventRecords<E> = Arc<Vec<Envelope<E>>>;
