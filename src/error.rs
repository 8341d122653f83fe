//! Client Errors
//!
//! Every failure a controller can report. Nothing here is fatal to the page;
//! the application state turns each error into a notice.

use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Sign-in rejected by the server
    #[error("Login failed")]
    Auth,

    /// Missing required field, or sign-up rejected
    #[error("{0}")]
    Validation(String),

    /// Any non-2xx response. `action` reads like "fetch notes".
    #[error("Failed to {action}")]
    RequestFailed { action: String, status: u16 },

    /// Operation needs an open item but none is open
    #[error("No {0} selected")]
    NoSelection(&'static str),

    /// The request never produced a status (network down, CORS, ...)
    #[error("Network error: {0}")]
    Transport(String),

    /// Body was not the JSON we expected
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn request_failed(action: impl Into<String>, status: u16) -> Self {
        ClientError::RequestFailed { action: action.into(), status }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::RequestFailed { status: 404, .. })
    }

    /// 401/403 on a bearer request usually means the stored token expired
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::RequestFailed { status: 401 | 403, .. })
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}
