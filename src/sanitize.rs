//! Denylist HTML sanitizer for untrusted stored content
//!
//! Strips the specific attack shapes the patterns match: script/style bodies,
//! inline event-handler attributes, and `javascript:` URIs. This is a
//! denylist, not a safety-proven allowlist sanitizer; entity-encoded or
//! otherwise obfuscated payloads can slip past it. Callers needing a hard
//! guarantee should render through an allowlist sanitizer instead.

use std::sync::LazyLock;

use regex::Regex;

static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script>").unwrap());

static STYLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style>").unwrap());

static EVENT_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\s+on\w+\s*=\s*("[^"]*"|'[^']*')"#).unwrap());

static JS_URI_DQ_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\b(?P<attr>href|src)\s*=\s*"javascript:[^"]*""#).unwrap());

static JS_URI_SQ_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\b(?P<attr>href|src)\s*=\s*'javascript:[^']*'"#).unwrap());

/// Reduce the risk of a snippet of untrusted HTML before rendering it.
///
/// Removes `<script>`/`<style>` element bodies and inline `on*` event
/// handlers, and neutralizes `javascript:`-scheme `href`/`src` values to
/// `"#"` (quote style preserved). Idempotent: sanitizing already-sanitized
/// input returns it unchanged.
///
/// # Example
/// ```
/// use link_preview::sanitize_html;
///
/// let dirty = r#"<p>hi</p><script>alert(1)</script>"#;
/// assert_eq!(sanitize_html(dirty), "<p>hi</p>");
/// ```
pub fn sanitize_html(input: &str) -> String {
    let cleaned = SCRIPT_RE.replace_all(input, "");
    let cleaned = STYLE_RE.replace_all(&cleaned, "");
    let cleaned = EVENT_ATTR_RE.replace_all(&cleaned, "");
    let cleaned = JS_URI_DQ_RE.replace_all(&cleaned, r##"${attr}="#""##);
    let cleaned = JS_URI_SQ_RE.replace_all(&cleaned, r##"${attr}='#'"##);
    cleaned.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_script_blocks() {
        let html = r#"<p>before</p><script>alert(1)</script><p>after</p>"#;
        assert_eq!(sanitize_html(html), "<p>before</p><p>after</p>");
    }

    #[test]
    fn strips_script_with_attributes() {
        let html = r#"<script type="text/javascript" defer>evil()</script>ok"#;
        assert_eq!(sanitize_html(html), "ok");
    }

    #[test]
    fn strips_multiline_script_case_insensitively() {
        let html = "<SCRIPT>\nvar x = 1;\nalert(x);\n</SCRIPT><p>kept</p>";
        assert_eq!(sanitize_html(html), "<p>kept</p>");
    }

    #[test]
    fn strips_style_blocks() {
        let html = r#"<style>.x { color: red; }</style><div class="x">text</div>"#;
        assert_eq!(sanitize_html(html), r#"<div class="x">text</div>"#);
    }

    #[test]
    fn strips_event_handler_attributes() {
        let html = r#"<img src="a.png" onerror="evil()"><a onclick='go()'>x</a>"#;
        assert_eq!(sanitize_html(html), r#"<img src="a.png"><a>x</a>"#);
    }

    #[test]
    fn neutralizes_javascript_href() {
        let html = r#"<a href="javascript:evil()">click</a>"#;
        assert_eq!(sanitize_html(html), r##"<a href="#">click</a>"##);
    }

    #[test]
    fn neutralizes_javascript_src_single_quoted() {
        let html = r#"<iframe src='javascript:evil()'></iframe>"#;
        assert_eq!(sanitize_html(html), r##"<iframe src='#'></iframe>"##);
    }

    #[test]
    fn benign_markup_untouched() {
        let html = r#"<p class="note">Hello <a href="https://example.com">world</a></p>"#;
        assert_eq!(sanitize_html(html), html);
    }

    #[test]
    fn combined_payload() {
        let html = concat!(
            r#"<p>intro</p>"#,
            r#"<script>alert(1)</script>"#,
            r#"<a href="javascript:evil()" onclick="evil()">link</a>"#,
        );
        assert_eq!(sanitize_html(html), r##"<p>intro</p><a href="#">link</a>"##);
    }

    #[test]
    fn idempotent() {
        let html = r#"<script>a</script><a href="javascript:x" onclick="y">z</a><p>ok</p>"#;
        let once = sanitize_html(html);
        let twice = sanitize_html(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_input() {
        assert_eq!(sanitize_html(""), "");
    }
}
