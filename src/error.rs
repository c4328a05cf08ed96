//! Error types for the Popbill SDK.
//!
//! Every dispatched call fails with exactly one of four kinds: transport,
//! protocol, authentication, or a provider-reported API error. Construction
//! of a client can additionally fail with a configuration error.

use thiserror::Error;

/// Result type for Popbill operations.
pub type Result<T> = std::result::Result<T, PopbillError>;

/// Code reported for requests rejected before they leave the client.
pub const CLIENT_ERROR_CODE: i64 = -99999999;

/// Errors that can occur when using the Popbill SDK.
#[derive(Error, Debug)]
pub enum PopbillError {
    /// Network failure or timeout before any response was received.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body could not be parsed.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Authentication was rejected, even after re-issuing the session token.
    #[error("Authentication rejected: [{code}] {message}")]
    Auth {
        /// Error code reported with the rejection.
        code: i64,
        /// Human-readable message.
        message: String,
    },

    /// Business-rule rejection reported by Popbill.
    #[error("API error: [{code}] {message}")]
    Api {
        /// Provider error code (negative).
        code: i64,
        /// Human-readable message.
        message: String,
    },

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification of a [`PopbillError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// See [`PopbillError::Transport`].
    Transport,
    /// See [`PopbillError::Protocol`].
    Protocol,
    /// See [`PopbillError::Auth`].
    Auth,
    /// See [`PopbillError::Api`].
    Api,
    /// See [`PopbillError::Config`].
    Config,
}

impl PopbillError {
    /// Build a client-side rejection with [`CLIENT_ERROR_CODE`].
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        PopbillError::Api {
            code: CLIENT_ERROR_CODE,
            message: message.into(),
        }
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PopbillError::Transport(_) => ErrorKind::Transport,
            PopbillError::Protocol(_) => ErrorKind::Protocol,
            PopbillError::Auth { .. } => ErrorKind::Auth,
            PopbillError::Api { .. } => ErrorKind::Api,
            PopbillError::Config(_) => ErrorKind::Config,
        }
    }

    /// Returns true if the caller may safely re-invoke the same call.
    ///
    /// Only transport failures qualify; the request never produced a response.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PopbillError::Transport(_))
    }

    /// Returns true if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, PopbillError::Auth { .. })
    }

    /// Returns true if the transport failure was a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, PopbillError::Transport(e) if e.is_timeout())
    }

    /// Returns the provider error code if available.
    pub fn code(&self) -> Option<i64> {
        match self {
            PopbillError::Auth { code, .. } | PopbillError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns the provider message if available.
    pub fn message(&self) -> Option<&str> {
        match self {
            PopbillError::Auth { message, .. } | PopbillError::Api { message, .. } => {
                Some(message)
            }
            _ => None,
        }
    }
}
