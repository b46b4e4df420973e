//! Extraction of the short-link lookup key from a requested URL.

use url::Url;

/// Domain and key identifying a potential short link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLinkKey {
    pub domain: String,
    pub key: String,
}

/// Derives the lookup key for `url`.
///
/// Everything from the first `?` is ignored. The host is lower-cased; the key
/// is the path without its leading slash.
///
/// Returns `None` when the URL can never be a short link: unparsable, not
/// http(s), no host, or an empty path.
///
/// # Examples
///
/// ```ignore
/// let key = parse_short_link_key("https://S.Example.com/promo?utm=qr").unwrap();
/// assert_eq!(key.domain, "s.example.com");
/// assert_eq!(key.key, "promo");
/// ```
pub fn parse_short_link_key(url: &str) -> Option<ShortLinkKey> {
    let without_query = url.split('?').next().unwrap_or(url);
    let parsed = Url::parse(without_query).ok()?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }

    let domain = parsed.host_str()?.to_ascii_lowercase();
    let key = parsed.path().trim_start_matches('/');

    if key.is_empty() {
        return None;
    }

    Some(ShortLinkKey {
        domain,
        key: key.to_string(),
    })
}
