//! Error types and handling for helptoc-core operations.
//!
//! Errors are categorized for easier handling and carry a recoverability hint so hosts
//! can decide whether a failed load is worth another `reload()`.
//!
//! ## Error Categories
//!
//! - **I/O Errors**: Reading datasets or configuration from disk
//! - **Network Errors**: Fetching a dataset over HTTP
//! - **Dataset Errors**: Malformed datasets and rejected references
//! - **Configuration Errors**: Invalid settings or config files
//!
//! Tree lookups never produce errors: a missing id yields `None` or an empty path.
//!
//! ```rust
//! use helptoc_core::{Error, HelpToc};
//!
//! match HelpToc::from_json("{\"topLevelIds\": []}") {
//!     Err(Error::Dataset(msg)) => eprintln!("bad dataset: {msg}"),
//!     Err(e) => eprintln!("other failure ({}): {e}", e.category()),
//!     Ok(_) => unreachable!(),
//! }
//! ```

use thiserror::Error;

/// The main error type for helptoc-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Network operation failed.
    ///
    /// Connection and timeout errors are recoverable, while errors for bad
    /// requests and server-side rejections are not.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The dataset is malformed or references could not be resolved.
    ///
    /// ## Common Causes
    ///
    /// - Body is not JSON
    /// - Missing `entities.pages` or `topLevelIds`
    /// - Dangling parent, anchor or top-level ids under the strict reference policy
    #[error("Invalid dataset: {0}")]
    Dataset(String),

    /// Parsing of some non-dataset input failed (URLs, CLI values).
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// URL is malformed or invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Operation timed out.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// A config file could not be encoded or decoded as TOML.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic error for cases not covered by specific variants.
    #[error("{0}")]
    Other(String),
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

impl Error {
    /// Check if the error might be recoverable by reloading.
    ///
    /// ```rust
    /// use helptoc_core::Error;
    ///
    /// assert!(Error::Timeout("slow mirror".into()).is_recoverable());
    /// assert!(!Error::Dataset("missing field `pages`".into()).is_recoverable());
    /// ```
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout(_) => true,
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }

    /// Get the error category as a string identifier for logging.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Network(_) => "network",
            Self::Dataset(_) => "dataset",
            Self::Parse(_) => "parse",
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
            Self::InvalidUrl(_) => "invalid_url",
            Self::Timeout(_) => "timeout",
            Self::Serialization(_) => "serialization",
            Self::Other(_) => "other",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display_formatting() {
        let cases = vec![
            (Error::Dataset("missing pages".into()), "Invalid dataset"),
            (Error::Parse("bad value".into()), "Parse error"),
            (Error::Config("missing field".into()), "Configuration error"),
            (Error::NotFound("toc.json".into()), "Not found"),
            (Error::InvalidUrl("::".into()), "Invalid URL"),
            (Error::Timeout("30s".into()), "Timeout"),
            (Error::Serialization("eof".into()), "Serialization error"),
        ];

        for (error, prefix) in cases {
            let rendered = error.to_string();
            assert!(rendered.starts_with(prefix), "{rendered} should start with {prefix}");
        }

        assert_eq!(Error::Other("plain".into()).to_string(), "plain");
    }

    #[test]
    fn test_error_from_io_error() {
        let error: Error = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        match error {
            Error::Io(inner) => assert_eq!(inner.kind(), io::ErrorKind::NotFound),
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_error_from_toml() {
        let err = toml::from_str::<toml::Table>("key = [").unwrap_err();
        let error: Error = err.into();
        assert_eq!(error.category(), "serialization");
    }

    #[test]
    fn test_error_categories() {
        let error_categories = vec![
            (Error::Io(io::Error::other("test")), "io"),
            (Error::Dataset("test".into()), "dataset"),
            (Error::Parse("test".into()), "parse"),
            (Error::Config("test".into()), "config"),
            (Error::NotFound("test".into()), "not_found"),
            (Error::InvalidUrl("test".into()), "invalid_url"),
            (Error::Timeout("test".into()), "timeout"),
            (Error::Serialization("test".into()), "serialization"),
            (Error::Other("test".into()), "other"),
        ];

        for (error, expected) in error_categories {
            assert_eq!(error.category(), expected);
        }
    }

    #[test]
    fn test_error_recoverability() {
        let recoverable = vec![
            Error::Io(io::Error::new(io::ErrorKind::TimedOut, "timeout")),
            Error::Io(io::Error::new(io::ErrorKind::Interrupted, "interrupted")),
            Error::Timeout("request timeout".into()),
        ];
        let permanent = vec![
            Error::Io(io::Error::new(io::ErrorKind::NotFound, "not found")),
            Error::Dataset("missing field `pages`".into()),
            Error::Config("invalid config".into()),
            Error::NotFound("missing".into()),
            Error::InvalidUrl("bad url".into()),
            Error::Other("generic error".into()),
        ];

        for error in recoverable {
            assert!(error.is_recoverable(), "Expected {error:?} to be recoverable");
        }
        for error in permanent {
            assert!(!error.is_recoverable(), "Expected {error:?} to be non-recoverable");
        }
    }
}
