//! Unified error handling for the slovostat crate
//!
//! Every fallible library operation returns [`Result`]. "No matching data"
//! is not an error anywhere in the crate: query services return empty
//! collections instead.
//!
//! # Usage
//!
//! ```rust,ignore
//! use slovostat::error::{Error, ErrorCategory};
//!
//! fn report(err: &Error) {
//!     if err.category() == ErrorCategory::Storage {
//!         eprintln!("Store unavailable: {err}");
//!     }
//! }
//! ```

use std::io;
use thiserror::Error;

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Store connectivity and I/O errors
    Storage,
    /// Deserialization of imported data or config files
    Parsing,
    /// Configuration and validation errors
    Config,
    /// Invalid user-supplied values
    Input,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    /// Human-readable description of the category
    pub fn description(&self) -> &'static str {
        match self {
            Self::Storage => "storage error",
            Self::Parsing => "parsing error",
            Self::Config => "configuration error",
            Self::Input => "invalid input",
            Self::Other => "other error",
        }
    }
}

/// Unified error type for the slovostat crate
#[derive(Error, Debug)]
pub enum Error {
    /// Database errors (store unreachable, failed query)
    #[error("Database error: {0}")]
    Database(#[source] rusqlite::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML config parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid value supplied by the caller
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a generic error with context
    pub fn other(context: impl Into<String>) -> Self {
        Self::Other {
            context: context.into(),
            source: None,
        }
    }

    /// Create a generic error with context and source
    pub fn with_source(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Other {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get the error category for handling strategies
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Database(_) | Self::Io(_) => ErrorCategory::Storage,
            Self::Json(_) | Self::Toml(_) => ErrorCategory::Parsing,
            Self::Config(_) => ErrorCategory::Config,
            Self::InvalidInput(_) => ErrorCategory::Input,
            Self::Other { .. } => ErrorCategory::Other,
        }
    }

    /// Check if this error is recoverable (can be retried)
    ///
    /// Store failures are fail-fast: the triggered action is abandoned.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Database(_) => false,
            Self::Io(_) => false,
            Self::Json(_) | Self::Toml(_) => false,
            Self::Config(_) => false,
            Self::InvalidInput(_) => true,
            Self::Other { .. } => false,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err)
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
