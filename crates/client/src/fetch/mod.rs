//! Direct HTTP image fetching.
//!
//! This is the CLI's fetch path: a plain GET with a short timeout, no
//! browser in front. The aggregator sometimes answers scrapers with a small
//! HTML challenge page instead of image bytes, so every payload is sniffed
//! before it reaches the decoder.

pub mod url;

use std::time::{Duration, Instant};

use bytes::Bytes;
use reqwest::{Client, Url};

pub use url::{image_url, newspaper_page_url};

use frontpages_core::Error;

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "frontpages/0.1")
    pub user_agent: String,

    /// Request timeout (default: 5s)
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { user_agent: "frontpages/0.1".to_string(), timeout: Duration::from_millis(5000) }
    }
}

/// HTTP fetch client for the direct (non-browser) path.
pub struct FetchClient {
    http: Client,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::Unavailable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http })
    }

    /// Fetch an image URL, returning validated raw bytes.
    ///
    /// Fails with `Unavailable` on a non-success status, network error, or
    /// an HTML challenge payload.
    pub async fn fetch_image(&self, url: &Url) -> Result<Bytes, Error> {
        let start = Instant::now();

        let response = self
            .http
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| Error::Unavailable(format!("network error: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Unavailable(format!("status {} fetching {url}", status.as_u16())));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Unavailable(format!("failed to read response: {e}")))?;

        validate_image_payload(&bytes)?;

        tracing::debug!("fetched {} ({} bytes) in {}ms", url, bytes.len(), start.elapsed().as_millis());

        Ok(bytes)
    }
}

/// True when a payload looks like an anti-scraping HTML challenge page
/// rather than image data: fewer than 1000 bytes whose decoded prefix
/// contains `<html` or `<!doctype`.
pub fn looks_like_challenge(bytes: &[u8]) -> bool {
    if bytes.len() >= 1000 {
        return false;
    }

    let preview = String::from_utf8_lossy(&bytes[..bytes.len().min(200)]).to_lowercase();
    preview.contains("<html") || preview.contains("<!doctype")
}

/// Reject payloads that are an HTML challenge page in disguise.
pub fn validate_image_payload(bytes: &[u8]) -> Result<(), Error> {
    if looks_like_challenge(bytes) {
        return Err(Error::Unavailable("received HTML instead of image data".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.user_agent, "frontpages/0.1");
        assert_eq!(config.timeout, Duration::from_millis(5000));
    }

    #[tokio::test]
    async fn test_fetch_client_new() {
        let client = FetchClient::new(FetchConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_small_html_payload_rejected() {
        let payload = format!("<html><body>checking your browser{}</body></html>", "x".repeat(400));
        assert!(payload.len() < 1000);
        assert!(looks_like_challenge(payload.as_bytes()));
        assert!(validate_image_payload(payload.as_bytes()).is_err());
    }

    #[test]
    fn test_doctype_payload_rejected() {
        let payload = b"<!DOCTYPE html><html></html>";
        assert!(looks_like_challenge(payload));
    }

    #[test]
    fn test_small_binary_payload_accepted() {
        // JPEG magic followed by junk; small but not HTML
        let mut payload = vec![0xFF, 0xD8, 0xFF, 0xE0];
        payload.extend_from_slice(&[0u8; 64]);
        assert!(!looks_like_challenge(&payload));
        assert!(validate_image_payload(&payload).is_ok());
    }

    #[test]
    fn test_large_payload_accepted() {
        // Over the sniff threshold: passed through even if text-ish
        let payload = vec![b'a'; 2000];
        assert!(!looks_like_challenge(&payload));
    }
}
