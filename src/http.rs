//! Bounded HTTP fetcher for preview targets
//!
//! One GET per call, hard timeout, streaming body read with a size cap, and
//! no retries. A failed fetch is classified once by the resolver and surfaced
//! in-band; nothing here retries or backs off.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::{Client, Response};
use url::Url;

use crate::error::{Error, Result};

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_REDIRECTS: usize = 10;
const DEFAULT_MAX_BODY_SIZE: usize = 10 * 1024 * 1024; // 10 MB

const DEFAULT_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// A fetched page, ready for metadata extraction.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The final URL after following redirects; base for resolving
    /// relative image and favicon references
    pub url: Url,

    /// HTTP status code
    pub status_code: u16,

    /// Canonical reason phrase for the status (e.g. "Not Found")
    pub status_text: String,

    /// Response body as text
    pub body: String,
}

impl FetchedPage {
    /// Whether the response carried a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Configuration for preview fetches.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Request timeout; the in-flight request is aborted when it elapses
    pub timeout: Duration,

    /// Maximum number of redirects to follow
    pub max_redirects: usize,

    /// Maximum response body size in bytes; larger bodies are truncated
    pub max_body_size: usize,

    /// Block requests to private/internal addresses (SSRF protection).
    ///
    /// When enabled, requests to localhost, private networks, link-local
    /// addresses, and cloud metadata endpoints are refused before any
    /// connection is made. Default: true.
    pub block_private_ips: bool,

    /// User-Agent header
    pub user_agent: String,

    /// Accept header
    pub accept: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            block_private_ips: true,
            user_agent: format!("link-preview/{}", env!("CARGO_PKG_VERSION")),
            accept: DEFAULT_ACCEPT.to_string(),
        }
    }
}

impl FetchOptions {
    /// Create a new FetchOptions with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of redirects to follow.
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    /// Set the maximum response body size in bytes.
    pub fn max_body_size(mut self, size: usize) -> Self {
        self.max_body_size = size;
        self
    }

    /// Set whether to block requests to private/internal addresses.
    ///
    /// **Security Note:** Disabling this exposes your application to SSRF
    /// attacks if URLs come from untrusted sources.
    pub fn block_private_ips(mut self, block: bool) -> Self {
        self.block_private_ips = block;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the Accept header.
    pub fn accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = accept.into();
        self
    }

    /// Build a reqwest Client from these options.
    fn build_client(&self) -> Result<Client> {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Ok(accept) = self.accept.parse::<reqwest::header::HeaderValue>() {
            headers.insert(reqwest::header::ACCEPT, accept);
        }

        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::limited(self.max_redirects))
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .default_headers(headers)
            .build()?;

        Ok(client)
    }
}

/// Check if an IPv4 address is private/internal.
fn is_private_ipv4(ip: Ipv4Addr) -> bool {
    ip.is_loopback()                           // 127.0.0.0/8
        || ip.is_private()                     // 10.0.0.0/8, 172.16.0.0/12, 192.168.0.0/16
        || ip.is_link_local()                  // 169.254.0.0/16 (includes cloud metadata)
        || ip.is_broadcast()                   // 255.255.255.255
        || ip.is_unspecified()                 // 0.0.0.0
        || ip.is_documentation()
        || ip.octets()[0] == 0                 // 0.0.0.0/8
        || ip.octets()[0] >= 224 // Multicast and reserved
}

/// Check if an IPv6 address is private/internal.
fn is_private_ipv6(ip: Ipv6Addr) -> bool {
    ip.is_loopback()                           // ::1
        || ip.is_unspecified()                 // ::
        || ip.is_multicast()                   // ff00::/8
        // IPv4-mapped addresses (::ffff:0:0/96)
        || ip.to_ipv4_mapped().is_some_and(is_private_ipv4)
        // Unique local (fc00::/7)
        || (ip.segments()[0] & 0xfe00) == 0xfc00
        // Link-local (fe80::/10)
        || (ip.segments()[0] & 0xffc0) == 0xfe80
}

fn is_private_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => is_private_ipv4(v4),
        IpAddr::V6(v6) => is_private_ipv6(v6),
    }
}

/// Refuse targets that resolve to internal hosts (async DNS resolution).
async fn guard_against_ssrf(url: &Url) -> Result<()> {
    let host = url
        .host_str()
        .ok_or_else(|| Error::InvalidUrl("missing host".to_string()))?;

    let host_lower = host.to_lowercase();
    if host_lower == "localhost"
        || host_lower.ends_with(".local")
        || host_lower.ends_with(".internal")
        || host_lower == "metadata.google.internal"
    {
        return Err(Error::Blocked(format!("internal host: {}", host)));
    }

    let port = url.port().unwrap_or(match url.scheme() {
        "https" => 443,
        _ => 80,
    });

    let addr_str = format!("{}:{}", host, port);
    if let Ok(addrs) = tokio::net::lookup_host(&addr_str).await {
        for addr in addrs {
            if is_private_ip(addr.ip()) {
                return Err(Error::Blocked(format!(
                    "private address: {} (resolved from {})",
                    addr.ip(),
                    host
                )));
            }
        }
    }
    // If DNS resolution fails here, let reqwest report the failure

    Ok(())
}

/// Fetch a URL and return the page for extraction.
///
/// Exactly one outbound request; every failure is returned as-is for the
/// resolver to classify.
pub async fn fetch(url: &Url, options: &FetchOptions) -> Result<FetchedPage> {
    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(Error::InvalidUrl(format!(
                "unsupported scheme '{}', only http/https allowed",
                scheme
            )));
        }
    }

    if options.block_private_ips {
        guard_against_ssrf(url).await?;
    }

    let client = options.build_client()?;
    tracing::debug!(url = %url, "fetching preview target");
    let response = client.get(url.clone()).send().await?;

    response_to_page(response, options.max_body_size).await
}

/// Read a response into a FetchedPage with a streaming body size limit.
async fn response_to_page(response: Response, max_body_size: usize) -> Result<FetchedPage> {
    let url = response.url().clone();
    let status = response.status();
    let status_code = status.as_u16();
    let status_text = status.canonical_reason().unwrap_or("Unknown Status").to_string();

    // Stream the body and stop downloading once the limit is reached
    let content_length = response.content_length().unwrap_or(0) as usize;
    let capacity = content_length.min(max_body_size).min(1024 * 1024);
    let mut bytes = Vec::with_capacity(capacity);
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        let remaining = max_body_size.saturating_sub(bytes.len());
        if remaining == 0 {
            break;
        }
        let to_take = chunk.len().min(remaining);
        bytes.extend_from_slice(&chunk[..to_take]);
        if to_take < chunk.len() {
            break; // Hit the limit
        }
    }

    let body = String::from_utf8_lossy(&bytes).into_owned();

    Ok(FetchedPage {
        url,
        status_code,
        status_text,
        body,
    })
}
