//! URL normalization for safe embedding in the feed.
//!
//! Every URL that ends up in the sitemap goes through [`normalize`]: the
//! `url` crate parses and re-serializes it (percent-encoding path segments
//! along the way), and a final pass percent-encodes the handful of
//! characters that are legal in URLs but unsafe inside markup.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use thiserror::Error;
use url::Url;

/// Characters the `url` crate may leave raw but which have no business in an
/// embedded reference (quotes, angle brackets, backticks, spaces).
const MARKUP_UNSAFE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'\'')
    .add(b'<')
    .add(b'>')
    .add(b'`');

/// Errors produced while normalizing a URL.
#[derive(Debug, Error)]
pub enum UrlError {
    /// The URL string could not be parsed.
    #[error("invalid URL: {0}")]
    Invalid(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
}

/// Normalize a raw URL into a safe absolute reference.
///
/// Scheme and host are preserved, the path is percent-escaped, and
/// markup-unsafe characters are percent-encoded in the final form.
///
/// # Errors
///
/// Returns [`UrlError`] when the URL cannot be parsed or is not http(s).
pub fn normalize(raw: &str) -> Result<String, UrlError> {
    let url = Url::parse(raw.trim())?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_owned())),
    }

    let serialized = url.to_string();
    Ok(utf8_percent_encode(&serialized, MARKUP_UNSAFE).to_string())
}

/// Append a trailing slash unless one is already present.
pub fn ensure_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_owned()
    } else {
        format!("{url}/")
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_plain() {
        assert_eq!(
            normalize("https://example.com/page").unwrap(),
            "https://example.com/page"
        );
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(
            normalize("  https://example.com/page \n").unwrap(),
            "https://example.com/page"
        );
    }

    #[test]
    fn test_normalize_percent_escapes_path() {
        assert_eq!(
            normalize("https://example.com/some page").unwrap(),
            "https://example.com/some%20page"
        );
        assert_eq!(
            normalize("https://example.com/caf\u{e9}").unwrap(),
            "https://example.com/caf%C3%A9"
        );
    }

    #[test]
    fn test_normalize_encodes_markup_unsafe() {
        let normalized = normalize("https://example.com/?q='quoted'").unwrap();
        assert!(!normalized.contains('\''));
        assert!(normalized.contains("%27"));
    }

    #[test]
    fn test_normalize_keeps_query() {
        assert_eq!(
            normalize("https://example.com/search?q=a&b=c").unwrap(),
            "https://example.com/search?q=a&b=c"
        );
    }

    #[test]
    fn test_normalize_rejects_invalid() {
        assert!(matches!(normalize("not a url"), Err(UrlError::Invalid(_))));
        assert!(matches!(
            normalize("/relative/path"),
            Err(UrlError::Invalid(_))
        ));
    }

    #[test]
    fn test_normalize_rejects_non_http() {
        assert!(matches!(
            normalize("file:///etc/passwd"),
            Err(UrlError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            normalize("javascript:alert(1)"),
            Err(UrlError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_ensure_trailing_slash() {
        assert_eq!(ensure_trailing_slash("https://a.test"), "https://a.test/");
        assert_eq!(ensure_trailing_slash("https://a.test/"), "https://a.test/");
    }
}
