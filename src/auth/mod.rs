//! Two-factor login: the reference subject for the harness.
//!
//! - [`login`] is the action creator under test: it dispatches a request,
//!   calls the injected [`Service`](crate::Service), and turns the outcome
//!   into events.
//! - [`AuthReducer`] folds those events into [`AuthState`].
//!
//! Scenario tests live in `tests/login.rs` and `tests/reducer.rs`.

mod events;
mod login;
mod reducer;

pub use events::{
    AuthEvent, LOGIN_FAILURE, LOGIN_REQUEST, LOGIN_SUCCESS, NAVIGATE, SET_LOADING_FALSE,
    STORE_CONTACT_CHANNELS,
};
pub use login::{Credentials, LoginResponse, LoginStage, SELECT_OTP_DELIVERY_ROUTE, login};
pub use reducer::{AuthReducer, AuthState, LOGIN_FAILURE_MESSAGE};
