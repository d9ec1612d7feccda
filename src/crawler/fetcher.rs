//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests to fetch page content
//! - Manual redirect handling with hop counting and loop detection
//! - Error classification
//!
//! Any HTTP status is returned as data. Only transport failures, timeouts
//! and broken redirect chains become a [`FetchError`].

use crate::config::UserAgentConfig;
use crate::FetchError;
use reqwest::{header, redirect::Policy, Client, StatusCode};
use std::collections::HashSet;
use std::time::{Duration, Instant};
use url::Url;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// A fetched document, whatever its status code
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    /// Status of the last response in the redirect chain
    pub status_code: u16,
    /// Body of the last response
    pub body: String,
    /// URL of the last response
    pub final_url: Url,
    /// Number of redirects that were followed
    pub redirect_hops: u32,
    /// Wall time from the first request to the end of the body
    pub elapsed_ms: u64,
    /// Content-Type header value, empty when absent
    pub content_type: String,
}

impl FetchedDocument {
    /// Returns true if at least one redirect was followed
    pub fn redirected(&self) -> bool {
        self.redirect_hops > 0
    }
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are disabled on the client so that [`fetch_page`] can count
/// every hop itself.
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Per-request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use sumi_audit::config::UserAgentConfig;
/// use sumi_audit::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::ACCEPT, header::HeaderValue::from_static(ACCEPT_HTML));

    Client::builder()
        .user_agent(config.header_value())
        .default_headers(headers)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::none()) // Handle redirects manually
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page, following up to `max_redirects` redirects
///
/// # Request Flow
///
/// 1. Send GET request
/// 2. If the response is a redirect with a `Location` header, resolve it
///    against the current URL and repeat
///    - A location already visited in this chain is a loop
///    - More than `max_redirects` hops is an error
/// 3. Read the body of the last response
///
/// The whole chain, body included, runs under `timeout`.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `timeout` - Overall deadline for the fetch
/// * `max_redirects` - Maximum number of redirect hops to follow
///
/// # Returns
///
/// * `Ok(FetchedDocument)` - A response was received (any status code)
/// * `Err(FetchError)` - Network failure, timeout or broken redirect chain
pub async fn fetch_page(
    client: &Client,
    url: &Url,
    timeout: Duration,
    max_redirects: u32,
) -> Result<FetchedDocument, FetchError> {
    match tokio::time::timeout(timeout, fetch_following_redirects(client, url, max_redirects))
        .await
    {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout {
            url: url.to_string(),
        }),
    }
}

async fn fetch_following_redirects(
    client: &Client,
    url: &Url,
    max_redirects: u32,
) -> Result<FetchedDocument, FetchError> {
    let started = Instant::now();
    let mut current = url.clone();
    let mut seen: HashSet<String> = HashSet::new();
    seen.insert(current.to_string());
    let mut hops = 0u32;

    loop {
        let response = client
            .get(current.clone())
            .send()
            .await
            .map_err(|e| classify_error(current.as_str(), e))?;

        let status = response.status();
        if let Some(location) = redirect_location(status, response.headers()) {
            let next = current
                .join(&location)
                .map_err(|_| FetchError::InvalidRedirect {
                    url: current.to_string(),
                    location: location.clone(),
                })?;

            if !seen.insert(next.to_string()) {
                return Err(FetchError::RedirectLoop {
                    url: next.to_string(),
                });
            }

            hops += 1;
            if hops > max_redirects {
                return Err(FetchError::TooManyRedirects {
                    url: url.to_string(),
                    limit: max_redirects,
                });
            }

            tracing::debug!("Redirect {} -> {} ({})", current, next, status.as_u16());
            current = next;
            continue;
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let body = response
            .text()
            .await
            .map_err(|e| classify_error(current.as_str(), e))?;

        return Ok(FetchedDocument {
            status_code: status.as_u16(),
            body,
            final_url: current,
            redirect_hops: hops,
            elapsed_ms: started.elapsed().as_millis() as u64,
            content_type,
        });
    }
}

/// Returns the `Location` of a followable redirect response
fn redirect_location(status: StatusCode, headers: &header::HeaderMap) -> Option<String> {
    if !status.is_redirection() || status == StatusCode::NOT_MODIFIED {
        return None;
    }

    headers
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn classify_error(url: &str, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            source: err,
        }
    }
}
