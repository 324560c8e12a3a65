//! Error types shared across the crate.
//!
//! None of these are fatal for the page: widgets log them and carry on.

use thiserror::Error;

/// Failures reported by a [`Host`](crate::host::Host) implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    /// A browser global (window, document, head) is not reachable.
    #[error("browser global `{0}` is unavailable")]
    Unavailable(&'static str),

    /// Local storage is disabled or rejected the operation.
    #[error("storage error: {0}")]
    Storage(String),

    /// Any other exception thrown by a browser API.
    #[error("javascript error: {0}")]
    Js(String),
}

/// Malformed site configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid site configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures while building the translation catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("invalid language identifier `{0}`")]
    InvalidLanguage(String),

    #[error("translation file for `{lang}` is not valid UTF-8")]
    Encoding { lang: String },

    #[error("translation file for `{lang}` has {count} syntax error(s)")]
    Syntax { lang: String, count: usize },

    #[error("translation file for `{lang}` defines duplicate messages")]
    Duplicate { lang: String },
}
