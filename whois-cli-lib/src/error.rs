//! Error handling for WHOIS lookups.
//!
//! Every failure the library can report is a variant of [`WhoisError`]. The
//! transport collapses DNS failures, refused connections and expired
//! deadlines into a single [`WhoisError::QueryFailed`] class so callers only
//! have to decide one thing: give up, or fall back to a response they
//! already hold.

use std::fmt;
use std::time::Duration;

/// Main error type for WHOIS operations.
#[derive(Debug, Clone)]
pub enum WhoisError {
    /// The domain could not be turned into a queryable name
    InvalidDomain { domain: String, reason: String },

    /// A WHOIS round-trip failed (DNS, connect, write, read or deadline)
    QueryFailed {
        server: String,
        message: String,
        timed_out: bool,
    },

    /// Invalid settings (bad timeout string, unknown output mode, etc.)
    ConfigError { message: String },

    /// File I/O errors when reading configuration or writing output
    FileError { path: String, message: String },
}

impl WhoisError {
    /// Create a new invalid domain error.
    pub fn invalid_domain<D: Into<String>, R: Into<String>>(domain: D, reason: R) -> Self {
        Self::InvalidDomain {
            domain: domain.into(),
            reason: reason.into(),
        }
    }

    /// Create a new query failure for `server`.
    pub fn query_failed<S: Into<String>, M: Into<String>>(server: S, message: M) -> Self {
        Self::QueryFailed {
            server: server.into(),
            message: message.into(),
            timed_out: false,
        }
    }

    /// Create a query failure caused by the exchange deadline expiring.
    pub fn query_timeout<S: Into<String>>(server: S, duration: Duration) -> Self {
        Self::QueryFailed {
            server: server.into(),
            message: format!("no complete response within {:?}", duration),
            timed_out: true,
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new file error.
    pub fn file_error<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::FileError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether this error came out of a network round-trip.
    pub fn is_query_failure(&self) -> bool {
        matches!(self, Self::QueryFailed { .. })
    }

    /// Whether the round-trip failed because its deadline expired.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::QueryFailed {
                timed_out: true,
                ..
            }
        )
    }
}

impl fmt::Display for WhoisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDomain { domain, reason } => {
                write!(f, "Invalid domain '{}': {}", domain, reason)
            }
            Self::QueryFailed {
                server,
                message,
                timed_out,
            } => {
                if *timed_out {
                    write!(f, "WHOIS query to {} timed out: {}", server, message)
                } else {
                    write!(f, "WHOIS query to {} failed: {}", server, message)
                }
            }
            Self::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::FileError { path, message } => {
                write!(f, "File error at '{}': {}", path, message)
            }
        }
    }
}

impl std::error::Error for WhoisError {}

impl From<serde_json::Error> for WhoisError {
    fn from(err: serde_json::Error) -> Self {
        Self::ConfigError {
            message: format!("JSON parsing failed: {}", err),
        }
    }
}

impl From<toml::de::Error> for WhoisError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigError {
            message: format!("Failed to parse TOML configuration: {}", err),
        }
    }
}
