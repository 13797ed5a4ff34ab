//! # Errors
//!
//! Every operation of the framework fails with a [`ResourceError`]. Its variants form a
//! closed taxonomy so callers can branch on [`ErrorKind`] instead of parsing messages:
//!
//! - **Validation**: a structural pre-condition failed before anything was sent.
//! - **Connection**: the transport never obtained a response.
//! - **Api**: a response arrived with a status outside the operation's accepted set.
//! - **Decode**: a successful response carried a body the codec could not parse.
//!
//! Nothing here is retried; errors are surfaced as they were observed.

use std::fmt;

/// Result alias used across the framework.
pub type Result<T> = std::result::Result<T, ResourceError>;

/// Field-level problem reported by the API inside an `<errors>` document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiErrorDetail {
    pub field: Option<String>,
    pub symbol: Option<String>,
    pub message: String,
}

/// The normalized error taxonomy.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResourceError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("API error (status {status}): {message}")]
    Api {
        status: u16,
        message: String,
        symbol: Option<String>,
        details: Vec<ApiErrorDetail>,
    },

    #[error("undecodable response (status {status}): {message}")]
    Decode { status: u16, message: String },
}

/// Discriminant of [`ResourceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Connection,
    Api,
    Decode,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Connection => "connection",
            ErrorKind::Api => "api",
            ErrorKind::Decode => "decode",
        };
        f.write_str(name)
    }
}

impl ResourceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ResourceError::Validation(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ResourceError::Validation(_) => ErrorKind::Validation,
            ResourceError::Connection(_) => ErrorKind::Connection,
            ResourceError::Api { .. } => ErrorKind::Api,
            ResourceError::Decode { .. } => ErrorKind::Decode,
        }
    }

    /// HTTP status that produced this error, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ResourceError::Api { status, .. } | ResourceError::Decode { status, .. } => {
                Some(*status)
            }
            ResourceError::Validation(_) | ResourceError::Connection(_) => None,
        }
    }

    /// Human-readable message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            ResourceError::Validation(m) | ResourceError::Connection(m) => m,
            ResourceError::Api { message, .. } | ResourceError::Decode { message, .. } => message,
        }
    }
}
