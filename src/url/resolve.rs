use crate::UrlError;
use url::Url;

/// Link schemes that never point at a crawlable document
const NON_NAVIGATIONAL_SCHEMES: &[&str] = &["mailto:", "tel:", "javascript:", "data:"];

/// Parses and validates the seed URL of a crawl
///
/// # Returns
///
/// * `Ok(Url)` - An absolute http(s) URL with a host
/// * `Err(UrlError)` - The URL is malformed, uses another scheme, or has no host
///
/// # Examples
///
/// ```
/// use sumi_audit::url::parse_base_url;
///
/// let url = parse_base_url("https://example.com").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/");
/// assert!(parse_base_url("ftp://example.com").is_err());
/// ```
pub fn parse_base_url(raw: &str) -> Result<Url, UrlError> {
    let url = Url::parse(raw.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingDomain);
    }

    Ok(url)
}

/// Resolves an `href` found on `page_url` into an absolute crawl key
///
/// Returns `None` when the link should be ignored entirely:
/// - empty and fragment-only (`#...`) hrefs
/// - `mailto:`, `tel:`, `javascript:` and `data:` targets
/// - hrefs that cannot be joined onto the page URL
/// - targets whose scheme is not http or https
///
/// The fragment is dropped from the result since it is never sent to the server.
pub fn resolve_href(href: &str, page_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if NON_NAVIGATIONAL_SCHEMES
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
    {
        return None;
    }

    let mut absolute = page_url.join(href).ok()?;
    if absolute.scheme() != "http" && absolute.scheme() != "https" {
        return None;
    }

    absolute.set_fragment(None);
    Some(absolute)
}
