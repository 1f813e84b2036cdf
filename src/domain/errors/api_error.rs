//! Errors returned by the streaming backend and the auth workflow.

use thiserror::Error;

/// Backend and authentication error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    #[error("invalid credentials: {reason}")]
    InvalidCredentials { reason: String },

    #[error("not authenticated: {message}")]
    Unauthorized { message: String },

    #[error("access denied: {message}")]
    Forbidden { message: String },

    #[error("resource not found: {resource}")]
    NotFound { resource: String },

    #[error("request rejected: {message}")]
    Validation { message: String },

    #[error("no authentication token available")]
    NoTokenAvailable,

    #[error("network error: {message}")]
    NetworkError { message: String },

    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("session storage error: {0}")]
    Storage(#[from] super::StorageError),

    #[error("unexpected error: {message}")]
    Unexpected { message: String },
}

impl ApiError {
    /// Creates invalid credentials error.
    #[must_use]
    pub fn invalid_credentials(reason: impl Into<String>) -> Self {
        Self::InvalidCredentials {
            reason: reason.into(),
        }
    }

    /// Creates unauthorized error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Creates forbidden error.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Creates not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Creates validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }

    /// Creates server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether the user action may succeed if simply tried again later.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::RateLimited { .. } | Self::Server { .. }
        )
    }

    /// Returns whether the stored session is no longer usable.
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthorized { .. } | Self::NoTokenAvailable)
    }

    /// Returns whether error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::NetworkError { .. } | Self::RateLimited { .. })
    }

    /// Message suitable for showing to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidCredentials { .. } => "Email or password is incorrect.".to_string(),
            Self::Unauthorized { .. } | Self::NoTokenAvailable => {
                "Your session has expired. Please log in again.".to_string()
            }
            Self::Forbidden { .. } => "You do not have permission to do that.".to_string(),
            Self::NotFound { .. } => "The requested item could not be found.".to_string(),
            Self::Validation { message } => message.clone(),
            Self::NetworkError { .. } | Self::RateLimited { .. } | Self::Server { .. } => {
                "The service is unavailable. Please try again later.".to_string()
            }
            Self::Storage(_) | Self::Unexpected { .. } => "Something went wrong.".to_string(),
        }
    }
}
