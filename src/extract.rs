//! Sharing metadata extraction
//!
//! Pulls title, description, image, and favicon out of a fetched page.
//! Open Graph tags always win over their plain-HTML counterparts; relative
//! image and favicon references are resolved against the page's base URL.

use std::sync::OnceLock;

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use url::Url;

fn title_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("title").unwrap())
}

fn meta_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("meta").unwrap())
}

fn link_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("link[href]").unwrap())
}

/// Sharing metadata extracted from a page.
///
/// Every field is best-effort: a page without a given tag simply omits that
/// field, it never fails extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageMetadata {
    /// Page title, `og:title` if present, else the `<title>` text
    pub title: Option<String>,

    /// Description, `og:description` if present, else `<meta name="description">`
    pub description: Option<String>,

    /// `og:image`, resolved to an absolute URL
    pub image: Option<String>,

    /// First `<link rel="*icon*">` href resolved to absolute, or the
    /// conventional `/favicon.ico` against the base origin
    pub favicon: Option<String>,
}

impl PageMetadata {
    /// Extract metadata from HTML, resolving relative URLs against `base`.
    ///
    /// # Example
    /// ```
    /// use link_preview::PageMetadata;
    /// use url::Url;
    ///
    /// let base = Url::parse("https://example.com/page").unwrap();
    /// let html = r#"<html><head><title>Hello</title></head></html>"#;
    /// let meta = PageMetadata::from_html(html, &base);
    /// assert_eq!(meta.title, Some("Hello".to_string()));
    /// assert_eq!(meta.favicon, Some("https://example.com/favicon.ico".to_string()));
    /// ```
    pub fn from_html(html: &str, base: &Url) -> Self {
        let document = Html::parse_document(html);

        let plain_title = document
            .select(title_selector())
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty());

        let mut plain_description = None;
        let mut og_title = None;
        let mut og_description = None;
        let mut og_image = None;

        // Single pass over meta tags; first match wins per field
        for element in document.select(meta_selector()) {
            let el = element.value();

            let Some(content) = el.attr("content").map(str::trim).filter(|c| !c.is_empty())
            else {
                continue;
            };

            let Some(property) = el.attr("property").or_else(|| el.attr("name")) else {
                continue;
            };

            let property = property.trim();
            if property.eq_ignore_ascii_case("og:title") {
                og_title.get_or_insert_with(|| content.to_string());
            } else if property.eq_ignore_ascii_case("og:description") {
                og_description.get_or_insert_with(|| content.to_string());
            } else if property.eq_ignore_ascii_case("og:image") {
                og_image.get_or_insert_with(|| content.to_string());
            } else if property.eq_ignore_ascii_case("description") {
                plain_description.get_or_insert_with(|| content.to_string());
            }
        }

        let favicon = Self::extract_favicon(&document)
            .map(|href| resolve_url(&href, base))
            .or_else(|| Some(resolve_url("/favicon.ico", base)));

        Self {
            title: og_title.or(plain_title),
            description: og_description.or(plain_description),
            image: og_image.map(|href| resolve_url(&href, base)),
            favicon,
        }
    }

    fn extract_favicon(document: &Html) -> Option<String> {
        document
            .select(link_selector())
            .find(|element| {
                element
                    .value()
                    .attr("rel")
                    .is_some_and(|rel| rel.to_ascii_lowercase().contains("icon"))
            })
            .and_then(|element| element.value().attr("href"))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

/// Resolve a possibly-relative reference against the page's base URL.
///
/// Returns the input unchanged when it is already absolute or when the base
/// has no host to resolve against; a broken reference degrades the preview,
/// it never fails it.
pub fn resolve_url(raw: &str, base: &Url) -> String {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        return raw.to_string();
    }

    let Some(host) = base.host_str() else {
        return raw.to_string();
    };

    let authority = match base.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    };

    if let Some(rest) = raw.strip_prefix("//") {
        // Protocol-relative
        format!("{}://{}", base.scheme(), rest)
    } else if raw.starts_with('/') {
        // Root-relative
        format!("{}://{}{}", base.scheme(), authority, raw)
    } else {
        // Bare relative path
        format!("{}://{}/{}", base.scheme(), authority, raw)
    }
}
