//! Headless browser fetching for the anti-bot-protected aggregator.
//!
//! This module provides a feature-gated renderer trait and implementation
//! using chromiumoxide for headless Chrome/Chromium browser control. The
//! aggregator inserts image URLs with JavaScript and answers bare HTTP
//! clients with a challenge page, so both the listing pages and the image
//! bytes themselves go through a real browser here.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use frontpages_core::Error as CoreError;

/// Errors that can occur during browser fetching.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Failed to launch or connect to browser.
    #[error("browser launch failed: {0}")]
    BrowserLaunch(String),

    /// Failed to navigate to URL.
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// Failed to get page content.
    #[error("content retrieval failed: {0}")]
    ContentRetrieval(String),

    /// Upstream answered with a non-success status.
    #[error("upstream status {0}")]
    Status(u16),

    /// Timeout waiting for page to load.
    #[error("render timeout after {0}ms")]
    Timeout(u64),
}

impl From<RenderError> for CoreError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Status(code) => CoreError::Unavailable(format!("upstream status {code}")),
            other => CoreError::RenderFailed(other.to_string()),
        }
    }
}

/// Options for rendering a page.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Navigation timeout in milliseconds (default: 45000).
    pub timeout_ms: u64,

    /// How long to let page scripts settle before reading content
    /// (default: 2000ms).
    pub settle_ms: u64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { timeout_ms: 45000, settle_ms: 2000 }
    }
}

/// Result of rendering a page.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Rendered HTML content after scripts have run.
    pub html: String,

    /// Final URL after redirects.
    pub final_url: Url,
}

/// Renderer trait for headless browser page rendering.
#[async_trait::async_trait]
pub trait Renderer: Send + Sync {
    /// Render a URL to post-script HTML via headless browser.
    async fn render(&self, url: &Url, opts: &RenderOptions) -> Result<RenderedPage, RenderError>;

    /// Navigate to an image URL and recover the raw response bytes.
    async fn fetch_bytes(&self, url: &Url, timeout_ms: u64) -> Result<Vec<u8>, RenderError>;
}

/// Headless Chrome/Chromium renderer using chromiumoxide.
pub struct HeadlessRenderer {
    browser: chromiumoxide::Browser,
}

impl HeadlessRenderer {
    /// Create a new headless renderer by launching a browser instance.
    ///
    /// The browser runs in headless mode and uses a background task
    /// to handle Chrome DevTools Protocol events.
    pub async fn new() -> Result<Self, RenderError> {
        use chromiumoxide::browser::{Browser, BrowserConfig};
        use futures_util::StreamExt;

        let (browser, mut handler) = Browser::launch(
            BrowserConfig::builder()
                .build()
                .map_err(RenderError::BrowserLaunch)?,
        )
        .await
        .map_err(|e| RenderError::BrowserLaunch(e.to_string()))?;

        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("browser handler event error: {e}");
                    break;
                }
            }
        });

        Ok(Self { browser })
    }
}

// Re-fetches the displayed resource from inside the page, where the
// browser's challenge cookies apply, and hands it back as base64.
const FETCH_BODY_JS: &str = r#"
(async () => {
    const resp = await fetch(location.href, { credentials: 'include' });
    const bytes = new Uint8Array(await resp.arrayBuffer());
    let bin = '';
    for (let i = 0; i < bytes.length; i++) {
        bin += String.fromCharCode(bytes[i]);
    }
    return { status: resp.status, data: btoa(bin) };
})()
"#;

#[derive(Debug, Deserialize)]
struct FetchedBody {
    status: u16,
    data: String,
}

#[async_trait::async_trait]
impl Renderer for HeadlessRenderer {
    async fn render(&self, url: &Url, opts: &RenderOptions) -> Result<RenderedPage, RenderError> {
        let page = tokio::time::timeout(
            Duration::from_millis(opts.timeout_ms),
            self.browser.new_page(url.as_str()),
        )
        .await
        .map_err(|_| RenderError::Timeout(opts.timeout_ms))?
        .map_err(|e| RenderError::Navigation(e.to_string()))?;

        tokio::time::sleep(Duration::from_millis(opts.settle_ms)).await;

        let html = page
            .content()
            .await
            .map_err(|e| RenderError::ContentRetrieval(e.to_string()))?;

        let page_url = page
            .url()
            .await
            .map_err(|e| RenderError::ContentRetrieval(e.to_string()))?;

        let final_url = Url::parse(page_url.as_deref().unwrap_or(url.as_str()))
            .map_err(|e| RenderError::Navigation(e.to_string()))?;

        page.close().await.ok();
        Ok(RenderedPage { html, final_url })
    }

    async fn fetch_bytes(&self, url: &Url, timeout_ms: u64) -> Result<Vec<u8>, RenderError> {
        let fetched = tokio::time::timeout(Duration::from_millis(timeout_ms), async {
            let page = self
                .browser
                .new_page(url.as_str())
                .await
                .map_err(|e| RenderError::Navigation(e.to_string()))?;

            let result = page
                .evaluate(FETCH_BODY_JS)
                .await
                .map_err(|e| RenderError::ContentRetrieval(e.to_string()))?
                .into_value::<FetchedBody>()
                .map_err(|e| RenderError::ContentRetrieval(e.to_string()));

            page.close().await.ok();
            result
        })
        .await
        .map_err(|_| RenderError::Timeout(timeout_ms))??;

        if !(200..300).contains(&fetched.status) {
            return Err(RenderError::Status(fetched.status));
        }

        BASE64
            .decode(fetched.data)
            .map_err(|e| RenderError::ContentRetrieval(format!("bad base64 body: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_default() {
        let opts = RenderOptions::default();
        assert_eq!(opts.timeout_ms, 45000);
        assert_eq!(opts.settle_ms, 2000);
    }

    #[test]
    fn test_status_error_maps_to_unavailable() {
        let err: CoreError = RenderError::Status(403).into();
        assert!(matches!(err, CoreError::Unavailable(_)));

        let err: CoreError = RenderError::Timeout(30000).into();
        assert!(matches!(err, CoreError::RenderFailed(_)));
    }

    #[tokio::test]
    #[ignore = "requires Chrome/Chromium installation"]
    async fn test_headless_renderer_new() {
        let renderer = HeadlessRenderer::new().await;
        assert!(renderer.is_ok());
    }

    #[tokio::test]
    #[ignore = "requires network and Chrome/Chromium"]
    async fn test_render_simple_page() {
        let renderer = HeadlessRenderer::new().await.unwrap();
        let url = Url::parse("https://example.com").unwrap();
        let opts = RenderOptions::default();

        let result = renderer.render(&url, &opts).await;
        assert!(result.is_ok());
        assert!(result.unwrap().html.contains("<html"));
    }
}
