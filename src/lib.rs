//! mockstore - Mock store harness for asynchronous action creators
//!
//! A small test utility for the "thunk" pattern: business logic that calls a
//! remote service and dispatches a sequence of events depending on the
//! outcome. The harness provides:
//!
//! - [`FakeService`]: a canned result delivered after a fixed delay
//! - [`MockStore`]: records every dispatched event, in order, and runs thunks
//! - [`Harness`]: runs a thunk until it settles and compares what was recorded
//! - [`Reducer`]: the pure `(state, event) -> state` contract reducers are tested against
//!
//! See [`auth`] for a complete two-factor login example.

mod config;
mod envelope;
mod error;
mod event;
mod harness;
mod meta;
mod middleware;
mod reducer;
mod service;
mod store;
mod thunk;

#[cfg(feature = "recorder")]
mod recorder;

pub mod auth;
pub mod query;

pub use config::Config;
pub use envelope::Envelope;
pub use error::{Error, Rejection};
pub use event::Event;
pub use harness::Harness;
pub use meta::Meta;
pub use middleware::Middleware;
pub use reducer::Reducer;
pub use service::{FakeService, Outcome, Service, make_fake_service};
pub use store::{MockStore, create_mock_store};
pub use thunk::Thunk;

#[cfg(feature = "recorder")]
pub use recorder::Recorder;

#[cfg(feature = "macros")]
pub use mockstore_macros::Event;

pub type Result<T = ()> = std::result::Result<T, Error>;
pub type EventId = u128;
