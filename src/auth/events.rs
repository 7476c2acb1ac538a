use std::borrow::Cow;

use crate::Event;

pub const LOGIN_REQUEST: &str = "LOGIN_REQUEST";
pub const STORE_CONTACT_CHANNELS: &str = "STORE_CONTACT_CHANNELS";
pub const SET_LOADING_FALSE: &str = "SET_LOADING_FALSE";
pub const LOGIN_SUCCESS: &str = "LOGIN_SUCCESS";
pub const LOGIN_FAILURE: &str = "LOGIN_FAILURE";
pub const NAVIGATE: &str = "NAVIGATE";

/// Everything the login flow can dispatch.
///
/// `Navigate` belongs to the router, not to authentication, so
/// [`AuthReducer`](super::AuthReducer) leaves the state alone for it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AuthEvent {
    LoginRequest,
    StoreContactChannels { contact_channels: Vec<String> },
    SetLoadingFalse,
    LoginSuccess,
    LoginFailure,
    Navigate { to: String },
}

impl AuthEvent {
    pub fn store_contact_channels<I, S>(channels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AuthEvent::StoreContactChannels {
            contact_channels: channels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn navigate(to: impl Into<String>) -> Self {
        AuthEvent::Navigate { to: to.into() }
    }
}

impl Event for AuthEvent {
    fn kind(&self) -> Cow<'static, str> {
        Cow::Borrowed(match self {
            AuthEvent::LoginRequest => LOGIN_REQUEST,
            AuthEvent::StoreContactChannels { .. } => STORE_CONTACT_CHANNELS,
            AuthEvent::SetLoadingFalse => SET_LOADING_FALSE,
            AuthEvent::LoginSuccess => LOGIN_SUCCESS,
            AuthEvent::LoginFailure => LOGIN_FAILURE,
            AuthEvent::Navigate { .. } => NAVIGATE,
        })
    }
}
