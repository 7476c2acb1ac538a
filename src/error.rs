use std::{fmt, time::Duration};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("settle condition not met within {0:?}: {1} events recorded")]
    SettleTimeout(Duration, usize),

    #[error("recorded events don't match: expected {expected}, got {actual}")]
    SequenceMismatch { expected: String, actual: String },

    #[error("Thunk task join error: {0}")]
    ThunkJoin(#[from] tokio::task::JoinError),

    #[error("IO Error: {0}")]
    IOError(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The failure half of a fake service outcome, carrying the canned value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("fake service rejected the call with {0:?}")]
pub struct Rejection<T: fmt::Debug>(pub T);

impl<T: fmt::Debug> Rejection<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}
