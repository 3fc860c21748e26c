//! Error types and handling for Evsched
//!
//! Every fallible step (argument parsing, configuration, transport, JSON
//! decoding and schedule interpretation) reports through [`EvschedError`].
//! Deciding whether an error terminates the process is left to the binary.

use thiserror::Error;

/// Result type alias for Evsched operations
pub type Result<T> = std::result::Result<T, EvschedError>;

/// Main error type for Evsched
#[derive(Debug, Error)]
pub enum EvschedError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Wrong number of command-line arguments
    #[error("Usage error: {message}")]
    Usage { message: String },

    /// Validation errors
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    /// Authentication/authorization errors
    #[error("Authentication error: {message}")]
    Auth { message: String },

    /// Network-related errors
    #[error("Network error: {message}")]
    Network { message: String },

    /// The API answered with something other than 200 OK
    #[error("HTTP error: status {status} - {message}")]
    Http { status: u16, message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// The charging log carried no `schedule` array
    #[error("No schedule returned in JSON")]
    MissingSchedule,

    /// A sample the interpreter cannot classify
    #[error("Invalid sample at index {index}: current {current} before charging started")]
    InvalidSample { index: usize, current: f64 },

    /// File I/O errors
    #[error("I/O error: {message}")]
    Io { message: String },
}

impl EvschedError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        EvschedError::Config {
            message: message.into(),
        }
    }

    /// Create a new usage error
    pub fn usage<S: Into<String>>(message: S) -> Self {
        EvschedError::Usage {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<F: Into<String>, S: Into<String>>(field: F, message: S) -> Self {
        EvschedError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new auth error
    pub fn auth<S: Into<String>>(message: S) -> Self {
        EvschedError::Auth {
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        EvschedError::Network {
            message: message.into(),
        }
    }

    /// Create a new HTTP status error
    pub fn http<S: Into<String>>(status: u16, message: S) -> Self {
        EvschedError::Http {
            status,
            message: message.into(),
        }
    }

    /// Create a new serialization error
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        EvschedError::Serialization {
            message: message.into(),
        }
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        EvschedError::Io {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for EvschedError {
    fn from(err: std::io::Error) -> Self {
        EvschedError::io(err.to_string())
    }
}

impl From<serde_yaml::Error> for EvschedError {
    fn from(err: serde_yaml::Error) -> Self {
        EvschedError::serialization(err.to_string())
    }
}

impl From<serde_json::Error> for EvschedError {
    fn from(err: serde_json::Error) -> Self {
        EvschedError::serialization(err.to_string())
    }
}

impl From<reqwest::Error> for EvschedError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return EvschedError::serialization(err.to_string());
        }
        EvschedError::network(err.to_string())
    }
}

impl From<chrono::ParseError> for EvschedError {
    fn from(err: chrono::ParseError) -> Self {
        EvschedError::validation("datetime", err.to_string())
    }
}
