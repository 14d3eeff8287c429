//! Error types shared by the REST collaborators.
//!
//! Screens flatten every variant into a single user-facing message through
//! `Display`; the variants only exist so tests and logs can tell them apart.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, ...).
    #[error("request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status code.
    #[error("API returned status: {status}{}", .message.as_deref().map(|m| format!(" ({m})")).unwrap_or_default())]
    Status { status: u16, message: Option<String> },

    /// The response body could not be decoded into the expected shape.
    #[error("failed to parse {what}: {reason}")]
    Decode { what: &'static str, reason: String },

    /// The backend accepted the request but reported `success: false`.
    #[error("{0}")]
    Rejected(String),

    /// No API base URL was configured for the session.
    #[error("missing API base URL")]
    MissingBaseUrl,
}

impl ApiError {
    pub fn status(status: u16) -> Self {
        Self::Status {
            status,
            message: None,
        }
    }

    pub fn decode(what: &'static str, reason: impl ToString) -> Self {
        Self::Decode {
            what,
            reason: reason.to_string(),
        }
    }
}

impl From<crate::http::HttpError> for ApiError {
    fn from(err: crate::http::HttpError) -> Self {
        Self::Transport(err.message)
    }
}

/// A typed API result.
pub type ApiResult<T> = Result<T, ApiError>;
