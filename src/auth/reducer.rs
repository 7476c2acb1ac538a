use crate::Reducer;

use super::AuthEvent;

/// Message stored in [`AuthState::auth_error`] after a failed login.
pub const LOGIN_FAILURE_MESSAGE: &str =
    "Login failed. Please check your credentials and try again.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AuthState {
    pub contact_channels: Vec<String>,
    pub is_authenticated: bool,
    pub auth_error: Option<String>,
    pub is_loading: bool,
}

/// Each event kind updates an isolated part of [`AuthState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthReducer;

impl Reducer for AuthReducer {
    type State = AuthState;
    type Event = AuthEvent;

    fn reduce(&self, state: &AuthState, event: &AuthEvent) -> AuthState {
        match event {
            AuthEvent::LoginRequest => AuthState {
                is_loading: true,
                ..state.clone()
            },
            AuthEvent::StoreContactChannels { contact_channels } => AuthState {
                contact_channels: contact_channels.clone(),
                ..state.clone()
            },
            AuthEvent::SetLoadingFalse => AuthState {
                is_loading: false,
                ..state.clone()
            },
            AuthEvent::LoginSuccess => AuthState {
                is_authenticated: true,
                auth_error: None,
                is_loading: false,
                ..state.clone()
            },
            AuthEvent::LoginFailure => AuthState {
                auth_error: Some(LOGIN_FAILURE_MESSAGE.to_string()),
                is_loading: false,
                ..state.clone()
            },
            AuthEvent::Navigate { .. } => state.clone(),
        }
    }
}
