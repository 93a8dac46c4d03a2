//! # link-preview
//!
//! A link preview resolver: fetch an arbitrary URL with a bounded HTTP GET,
//! extract sharing metadata (title, description, image, favicon) with Open
//! Graph precedence, and return a normalized [`PreviewResult`]. Ships with a
//! small HTTP service exposing the resolver as `POST /api/link-preview`, and
//! an independent denylist [`sanitize_html`] for untrusted stored HTML.
//!
//! Resolution never fails: malformed URLs, HTTP error statuses, timeouts,
//! and transport errors all come back as a `valid: false` result whose
//! `title`/`description` carry a human-readable reason. No retries, no
//! caching; every call is hermetic.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use link_preview::PreviewResult;
//!
//! #[tokio::main]
//! async fn main() {
//!     let preview = PreviewResult::resolve("https://example.org").await;
//!
//!     if preview.valid {
//!         println!("Title: {:?}", preview.title);
//!         println!("Image: {:?}", preview.image);
//!     } else {
//!         // The failure reason is the preview
//!         println!("{:?}: {:?}", preview.title, preview.description);
//!     }
//! }
//! ```
//!
//! ## Custom Fetch Options
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use link_preview::{FetchOptions, PreviewResult};
//!
//! #[tokio::main]
//! async fn main() {
//!     let options = FetchOptions::new()
//!         .timeout(Duration::from_secs(5))
//!         .user_agent("MyBot/1.0");
//!
//!     let preview = PreviewResult::resolve_with_options("https://example.org", options).await;
//!     println!("{:?}", preview.title);
//! }
//! ```
//!
//! ## Sanitizing stored HTML
//!
//! ```rust
//! use link_preview::sanitize_html;
//!
//! let stored = r#"<p>About us</p><script>alert(1)</script>"#;
//! assert_eq!(sanitize_html(stored), "<p>About us</p>");
//! ```
//!
//! ## Without HTTP (extraction and sanitization only)
//!
//! If you don't need fetching or the service, disable the default features:
//!
//! ```toml
//! [dependencies]
//! link-preview = { version = "0.1", default-features = false }
//! ```

mod error;
mod extract;
mod preview;
mod sanitize;

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "server")]
pub mod api;

pub use error::{Error, Result};
pub use extract::{PageMetadata, resolve_url};
pub use preview::PreviewResult;
pub use sanitize::sanitize_html;

#[cfg(feature = "http")]
pub use http::{FetchOptions, FetchedPage};
