use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// The port is not part of the domain.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_audit::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM:8443/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Checks whether `url` is on the crawl's base host
///
/// This is the internal-link test: only the hostname is compared, so a
/// different scheme or port on the same host still counts as internal.
pub fn is_same_host(url: &Url, base_host: &str) -> bool {
    url.host_str()
        .map(|host| host.eq_ignore_ascii_case(base_host))
        .unwrap_or(false)
}
