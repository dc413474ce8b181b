//! Error taxonomy for the portal client.

use thiserror::Error;

/// Fallback message shown when nothing better could be extracted.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong!";

/// Errors produced by the portal client.
#[derive(Debug, Error, Clone)]
pub enum PortalError {
    /// Local input validation failed before any network call was made.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The held credential was rejected (401). Triggers session teardown.
    #[error("Unauthorized - credential rejected by the backend")]
    Unauthorized,

    /// The backend answered with a non-2xx status and a message body.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The request never produced a response.
    #[error("Network error: {message}")]
    Network { message: String },

    /// The response body could not be parsed into the expected type.
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// The credential store failed to read or write.
    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl PortalError {
    /// True when this error means the session must be torn down.
    pub fn needs_reauth(&self) -> bool {
        matches!(self, PortalError::Unauthorized)
    }

    /// The toast-facing message. Server/network/decode failures collapse to
    /// the same user-visible contract; only the log detail distinguishes them.
    pub fn user_message(&self) -> String {
        match self {
            PortalError::Validation { message } => message.clone(),
            PortalError::Server { message, .. } if !message.is_empty() => message.clone(),
            PortalError::Network { message } if !message.is_empty() => message.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for PortalError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            PortalError::Decode {
                message: err.to_string(),
            }
        } else {
            PortalError::Network {
                message: err.to_string(),
            }
        }
    }
}

impl From<rusqlite::Error> for PortalError {
    fn from(err: rusqlite::Error) -> Self {
        PortalError::Storage {
            message: err.to_string(),
        }
    }
}
