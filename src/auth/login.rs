use std::{fmt, sync::Arc};

use crate::{MockStore, Service, Thunk};

use super::{AuthEvent, AuthState};

/// Where the user picks how to receive a one-time password.
pub const SELECT_OTP_DELIVERY_ROUTE: &str = "/select-otp-delivery";

#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// How far the login got, as reported by the auth service.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoginStage {
    /// Password accepted; a one-time password still has to be delivered.
    FirstFactorRequired,
    /// Both factors accepted.
    SecondFactorSatisfied,
    /// Anything else the service may answer with.
    Unrecognized(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoginResponse {
    pub stage: LoginStage,
    /// Where a one-time password can be sent (phone numbers, emails).
    pub contact_channels: Vec<String>,
}

impl LoginResponse {
    pub fn first_factor_required<I, S>(channels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stage: LoginStage::FirstFactorRequired,
            contact_channels: channels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn second_factor_satisfied() -> Self {
        Self::with_stage(LoginStage::SecondFactorSatisfied)
    }

    pub fn with_stage(stage: LoginStage) -> Self {
        Self {
            stage,
            contact_channels: Vec::new(),
        }
    }
}

/// Log in with `credentials` against `service`.
///
/// Dispatches `LOGIN_REQUEST` as soon as the thunk is dispatched, then, once
/// the service answers:
/// - first factor required: `STORE_CONTACT_CHANNELS`, `SET_LOADING_FALSE` and
///   a `NAVIGATE` to [`SELECT_OTP_DELIVERY_ROUTE`], in that order
/// - second factor satisfied: `LOGIN_SUCCESS`
/// - unrecognized stage: nothing
/// - service failure: a single `LOGIN_FAILURE`; the error itself is dropped
///
/// The thunk never fails.
pub fn login<Svc>(
    credentials: Credentials,
    service: Svc,
) -> impl Thunk<AuthState, AuthEvent, Output = ()>
where
    Svc: Service<Credentials, Response = LoginResponse>,
{
    move |store: MockStore<AuthState, AuthEvent>, _: Arc<AuthState>| {
        tracing::debug!(username = %credentials.username, "login requested");
        store.dispatch(AuthEvent::LoginRequest);

        async move {
            match service.request(credentials).await {
                Ok(response) => on_response(&store, response),
                Err(_) => {
                    store.dispatch(AuthEvent::LoginFailure);
                }
            }
        }
    }
}

fn on_response(store: &MockStore<AuthState, AuthEvent>, response: LoginResponse) {
    match response.stage {
        LoginStage::FirstFactorRequired => {
            store.dispatch(AuthEvent::StoreContactChannels {
                contact_channels: response.contact_channels,
            });
            store.dispatch(AuthEvent::SetLoadingFalse);
            store.dispatch(AuthEvent::navigate(SELECT_OTP_DELIVERY_ROUTE));
        }
        LoginStage::SecondFactorSatisfied => {
            store.dispatch(AuthEvent::LoginSuccess);
        }
        // TODO: decide with product whether an unknown stage should end in LOGIN_FAILURE.
        LoginStage::Unrecognized(stage) => {
            tracing::warn!(%stage, "unrecognized login stage, nothing dispatched");
        }
    }
}
