//! Dispatch error definitions.

use std::time::Duration;

use thiserror::Error;

use crate::http::response::LocalApiResponse;

/// Errors that can end a local API dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Method or path could not form a request. The handler never ran.
    #[error("invalid local API request: {0}")]
    Construction(#[from] axum::http::Error),

    /// The handler finished with a failure status. The response is kept so
    /// callers can inspect whatever was written.
    #[error("bad http status for local API response: {}", .0.status_code())]
    BadStatus(Box<LocalApiResponse>),

    /// The handler did not finish before the deadline.
    #[error("local API request timed out after {0:?}")]
    Timeout(Duration),

    /// The worker thread could not be started.
    #[error("failed to spawn local API worker: {0}")]
    Spawn(#[source] std::io::Error),

    /// The worker ended without delivering a response.
    #[error("local API worker exited without a response")]
    WorkerAborted,
}

impl DispatchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, DispatchError::Timeout(_))
    }

    pub fn is_bad_status(&self) -> bool {
        matches!(self, DispatchError::BadStatus(_))
    }

    /// The captured response, present only for `BadStatus`.
    pub fn response(&self) -> Option<&LocalApiResponse> {
        match self {
            DispatchError::BadStatus(response) => Some(response.as_ref()),
            _ => None,
        }
    }

    pub fn into_response(self) -> Option<LocalApiResponse> {
        match self {
            DispatchError::BadStatus(response) => Some(*response),
            _ => None,
        }
    }
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;
