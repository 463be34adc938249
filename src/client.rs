//! HTTP client for the metadata service.

use std::time::Duration;

use reqwest::{Response, Url};
use tracing::debug;

use crate::error::MetadataError;
use crate::metadata::MetaData;

/// Default timeout for metadata requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Default metadata service base URL (link-local address).
pub const DEFAULT_BASE_URL: &str = "http://169.254.169.254";

/// Path of the JSON metadata document, relative to the base URL.
const METADATA_PATH: &str = "/v1.json";

/// Client for the instance metadata service.
///
/// Each call to [`Client::metadata`] performs exactly one GET request. There is no
/// retry and no caching.
///
/// # Example
///
/// ```ignore
/// use vultr_metadata::{region_code_to_id, Client, MetadataError};
///
/// #[tokio::main]
/// async fn main() -> Result<(), MetadataError> {
///     let client = Client::new()?;
///     let metadata = client.metadata().await?;
///
///     println!("{} runs in {}", metadata.hostname, metadata.region.region_code);
///     println!("region id: {:?}", region_code_to_id(&metadata.region.region_code));
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    inner: reqwest::Client,
    base_url: Url,
    timeout: Duration,
    max_size: Option<usize>,
}

impl Client {
    /// Create a client targeting the link-local metadata address with a 3 second timeout.
    pub fn new() -> Result<Self, MetadataError> {
        Ok(Self {
            inner: build_http_client(DEFAULT_TIMEOUT)?,
            base_url: parse_base_url(DEFAULT_BASE_URL)?,
            timeout: DEFAULT_TIMEOUT,
            max_size: None,
        })
    }

    /// Replace the base URL, e.g. to point the client at a mock server.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, MetadataError> {
        self.set_base_url(base_url)?;
        Ok(self)
    }

    /// Use a different timeout for the whole request round trip.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, MetadataError> {
        self.inner = build_http_client(timeout)?;
        self.timeout = timeout;
        Ok(self)
    }

    /// Set the maximum size limit for the response body.
    ///
    /// If the body exceeds this limit, `MetadataError::TooLarge` is returned.
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = Some(max_size);
        self
    }

    /// Replace the base URL.
    ///
    /// On error the previously configured URL is kept.
    pub fn set_base_url(&mut self, base_url: &str) -> Result<(), MetadataError> {
        self.base_url = parse_base_url(base_url)?;
        Ok(())
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch the instance metadata document.
    ///
    /// # Errors
    ///
    /// - `MetadataError::Timeout` if the round trip exceeds the timeout
    /// - `MetadataError::Request` if no connection could be made
    /// - `MetadataError::Body` if the body cannot be read
    /// - `MetadataError::TooLarge` if the body exceeds the configured `max_size`
    /// - `MetadataError::Json` if the body is not a valid metadata document
    /// - `MetadataError::Http` instead of `Json` when the undecodable body came with a
    ///   non-success status
    ///
    /// A non-success status with a valid metadata body still yields the record.
    pub async fn metadata(&self) -> Result<MetaData, MetadataError> {
        let url = self.endpoint();
        debug!(%url, "fetching instance metadata");

        let response = self
            .inner
            .get(&url)
            .send()
            .await
            .map_err(MetadataError::request)?;

        let status = response.status();
        debug!(status = status.as_u16(), "metadata service responded");

        let body = read_body(response, self.max_size).await?;
        serde_json::from_slice(&body).map_err(|err| {
            if status.is_success() {
                MetadataError::Json(err)
            } else {
                MetadataError::Http(status.as_u16())
            }
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.base_url.as_str().trim_end_matches('/'),
            METADATA_PATH
        )
    }
}

fn build_http_client(timeout: Duration) -> Result<reqwest::Client, MetadataError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(MetadataError::Request)
}

fn parse_base_url(base_url: &str) -> Result<Url, MetadataError> {
    let invalid = |reason: String| MetadataError::InvalidUrl {
        url: base_url.to_string(),
        reason,
    };

    let url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("url cannot be used as a base".to_string()));
    }
    Ok(url)
}

/// Collect the response body, enforcing `max_size` when set.
///
/// A declared `Content-Length` over the limit fails before any of the body is read.
async fn read_body(
    mut response: Response,
    max_size: Option<usize>,
) -> Result<Vec<u8>, MetadataError> {
    let limit = max_size.unwrap_or(usize::MAX);
    if let Some(declared) = response.content_length().map(declared_len) {
        if declared > limit {
            return Err(MetadataError::TooLarge(declared, limit));
        }
    }

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(MetadataError::body)? {
        let received = body.len().saturating_add(chunk.len());
        if received > limit {
            return Err(MetadataError::TooLarge(received, limit));
        }
        body.extend_from_slice(&chunk);
    }

    Ok(body)
}

/// `Content-Length` as `usize`, saturating on targets where it does not fit.
fn declared_len(content_length: u64) -> usize {
    usize::try_from(content_length).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeout() {
        assert_eq!(DEFAULT_TIMEOUT, Duration::from_secs(3));
    }

    #[test]
    fn test_default_base_url_parses() {
        let url = parse_base_url(DEFAULT_BASE_URL).unwrap();
        assert_eq!(url.host_str(), Some("169.254.169.254"));
    }

    #[test]
    fn test_client_creation() {
        let client = Client::new().unwrap();
        assert_eq!(client.base_url().as_str(), "http://169.254.169.254/");
        assert_eq!(client.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(client.endpoint(), "http://169.254.169.254/v1.json");
    }

    #[test]
    fn test_client_custom_base_url() {
        let client = Client::new()
            .unwrap()
            .with_base_url("http://localhost:8080")
            .unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8080/v1.json");
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = Client::new()
            .unwrap()
            .with_base_url("http://localhost:8080/metadata/")
            .unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8080/metadata/v1.json");
    }

    #[test]
    fn test_invalid_base_url_keeps_previous() {
        let mut client = Client::new().unwrap();
        client.set_base_url("http://localhost:8080").unwrap();

        let result = client.set_base_url("not a url");
        assert!(matches!(result, Err(MetadataError::InvalidUrl { .. })));
        assert_eq!(client.endpoint(), "http://localhost:8080/v1.json");
    }

    #[test]
    fn test_rejects_cannot_be_a_base() {
        let mut client = Client::new().unwrap();
        let result = client.set_base_url("mailto:root@example.com");
        assert!(matches!(result, Err(MetadataError::InvalidUrl { .. })));
        assert_eq!(client.base_url().as_str(), "http://169.254.169.254/");
    }

    #[test]
    fn test_declared_len() {
        assert_eq!(declared_len(500), 500);
        assert_eq!(declared_len(u64::MAX), usize::MAX);
    }

    #[test]
    fn test_custom_timeout() {
        let client = Client::new()
            .unwrap()
            .with_timeout(Duration::from_millis(250))
            .unwrap();
        assert_eq!(client.timeout(), Duration::from_millis(250));
    }
}
