//! Preview resolution pipeline
//!
//! Validate the URL, fetch the page once, classify any failure, extract
//! metadata. Every branch ends in a well-formed [`PreviewResult`]; callers
//! never see an error, a failed preview is itself the answer.

use serde::{Deserialize, Serialize};
#[cfg(feature = "http")]
use url::Url;

#[cfg(feature = "http")]
use crate::error::Error;
#[cfg(feature = "http")]
use crate::extract::PageMetadata;
#[cfg(feature = "http")]
use crate::http::{self, FetchOptions};

#[cfg(feature = "http")]
const INVALID_URL_DESC: &str = "The provided URL could not be parsed";
#[cfg(feature = "http")]
const TIMEOUT_DESC: &str = "The request took longer than 10 seconds";
#[cfg(feature = "http")]
const CONNECTION_DESC: &str = "Could not reach the server";

/// Normalized preview of a URL.
///
/// `valid: false` means the fetch failed and `title`/`description` carry a
/// human-readable reason, rendered verbatim by callers. `valid: true` means
/// the page was fetched with a 2xx status; metadata fields may still be
/// absent when the page does not declare them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewResult {
    /// The URL as submitted by the caller
    pub url: String,

    /// Whether the page was fetched and parsed
    pub valid: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
}

#[cfg(feature = "http")]
impl PreviewResult {
    fn failure(url: &str, title: &str, description: &str) -> Self {
        Self {
            url: url.to_string(),
            valid: false,
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            image: None,
            favicon: None,
        }
    }

    fn success(url: &str, metadata: PageMetadata) -> Self {
        Self {
            url: url.to_string(),
            valid: true,
            title: metadata.title,
            description: metadata.description,
            image: metadata.image,
            favicon: metadata.favicon,
        }
    }

    /// Resolve a preview for a URL with default options.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use link_preview::PreviewResult;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let preview = PreviewResult::resolve("https://example.org").await;
    ///     println!("Title: {:?}", preview.title);
    /// }
    /// ```
    pub async fn resolve(url: &str) -> Self {
        Self::resolve_with_options(url, FetchOptions::default()).await
    }

    /// Resolve a preview with custom fetch options.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use std::time::Duration;
    /// use link_preview::{FetchOptions, PreviewResult};
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let options = FetchOptions::new().timeout(Duration::from_secs(5));
    ///     let preview = PreviewResult::resolve_with_options("https://example.org", options).await;
    ///     assert!(preview.valid || preview.title.is_some());
    /// }
    /// ```
    pub async fn resolve_with_options(url: &str, options: FetchOptions) -> Self {
        // Validation is terminal: no network call for a malformed URL
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(_) => return Self::failure(url, "Invalid URL", INVALID_URL_DESC),
        };

        let page = match http::fetch(&parsed, &options).await {
            Ok(page) => page,
            Err(err) => return Self::classify(url, err),
        };

        if !page.is_success() {
            return Self::failure(
                url,
                &format!("Error {}", page.status_code),
                &page.status_text,
            );
        }

        // Relative references resolve against the final URL after redirects
        Self::success(url, PageMetadata::from_html(&page.body, &page.url))
    }

    /// Map a fetch error to its in-band failure shape. No retries: each
    /// failure is classified once and returned immediately.
    fn classify(url: &str, err: Error) -> Self {
        match err {
            Error::InvalidUrl(_) => Self::failure(url, "Invalid URL", INVALID_URL_DESC),
            Error::Http(e) if e.is_timeout() => {
                Self::failure(url, "Request Timeout", TIMEOUT_DESC)
            }
            Error::Blocked(reason) => Self::failure(url, "Connection Error", &reason),
            Error::Http(e) => {
                tracing::debug!(url, error = %e, "preview fetch failed");
                Self::failure(url, "Connection Error", CONNECTION_DESC)
            }
        }
    }
}
