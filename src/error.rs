//! Error types for link-preview
//!
//! These variants are internal classification only: the resolver converts
//! every one of them into an in-band `PreviewResult` failure before anything
//! reaches a caller.

use thiserror::Error;

/// Errors that can occur while fetching a page for preview.
#[derive(Debug, Error)]
pub enum Error {
    /// The URL is syntactically valid but cannot be previewed
    /// (e.g. a non-http(s) scheme, or a URL without a host)
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP request failed (timeout, DNS, connection, TLS)
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request refused by the SSRF guard
    #[cfg(feature = "http")]
    #[error("request blocked: {0}")]
    Blocked(String),
}

/// Result type alias for link-preview operations.
pub type Result<T> = std::result::Result<T, Error>;
