//! HTTP(S) source fetching plugin for worldscope
//!
//! This crate fetches remote dataset payloads from HTTP and HTTPS URLs. Both
//! upstream sources served by worldscope are plain CSV files behind GET
//! endpoints, so the surface here is a single fetch call with an explicit
//! request timeout.

use std::time::Duration;

use reqwest::Client;

/// Result type alias for HTTP I/O operations
pub type Result<T> = std::result::Result<T, Error>;

/// Request timeout applied to every fetch. The upstream CSVs are a few
/// megabytes at most; anything slower than this is treated as unreachable.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP I/O error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("Other error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Http(e.to_string())
    }
}

/// Fetch a payload from an HTTP(S) URL
///
/// Returns the raw response body. Non-success status codes, connection
/// failures, and requests exceeding [`FETCH_TIMEOUT`] all fail with
/// [`Error::Http`].
///
/// # Examples
///
/// ```rust,ignore
/// use wsc_io_https::fetch_http;
///
/// let data = fetch_http("https://example.com/gapminder.csv").await.unwrap();
/// ```
pub async fn fetch_http(url: &str) -> Result<Vec<u8>> {
    let client = Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| Error::Other(format!("Failed to create HTTP client: {e}")))?;

    log::debug!("fetching {url}");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| Error::Http(format!("Failed to fetch URL {url}: {e}")))?;

    if !response.status().is_success() {
        return Err(Error::Http(format!(
            "HTTP request for {url} failed with status: {}",
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| Error::Http(format!("Failed to read response body from {url}: {e}")))?;

    log::debug!("fetched {} bytes from {url}", bytes.len());

    Ok(bytes.to_vec())
}

/// Synchronous version using a dedicated tokio runtime
pub fn fetch_http_sync(url: &str) -> Result<Vec<u8>> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Error::Other(format!("Failed to create runtime: {e}")))?
        .block_on(fetch_http(url))
}

/// Check if a string is an HTTP(S) URL
pub fn is_http_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}
