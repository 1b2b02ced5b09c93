//! get_newspaper tool implementation.
//!
//! Fetches one newspaper's current front page through the headless browser,
//! resizes it to fit the MCP image budget, and returns it as base64 JPEG
//! content. A stale store triggers a full re-scrape before the lookup.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use frontpages_core::Error;

/// Input parameters for get_newspaper tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetNewspaperParams {
    /// The newspaper identifier (e.g., "the-new-york-times").
    /// Use list_newspapers to see all available options.
    pub name: String,
}

/// Resize bound applied to returned front pages.
#[cfg(feature = "render")]
const TOOL_RESIZE: frontpages_client::ResizeTarget = frontpages_client::ResizeTarget { width: 1000, height: 1500 };

/// Implementation of the get_newspaper tool.
///
/// Generic over the renderer so the fetch path can be exercised without a
/// browser; the tool wrapper passes a `HeadlessRenderer`.
#[cfg(feature = "render")]
pub async fn get_impl<R: frontpages_client::render::Renderer>(
    config: &frontpages_core::AppConfig, renderer: &R, params: GetNewspaperParams,
) -> Result<CallToolResult, McpError> {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use frontpages_client::fetch::{image_url, validate_image_payload};
    use frontpages_client::{process_image, scrape};
    use frontpages_core::{UrlStore, store::freshness};

    if params.name.is_empty() {
        return Err(Error::InvalidInput("name cannot be empty".into()).into());
    }

    let store = UrlStore::new(&config.store_path, &config.legacy_store_path);

    if freshness::store_is_stale(&store) {
        tracing::info!("url store is stale, re-scraping before lookup");
        scrape::refresh_store(renderer, config, &store).await?;
    }

    let entries = store.try_load()?;
    let entry = entries
        .get(&params.name)
        .ok_or_else(|| not_found(&params.name, entries.keys()))?;

    let url = image_url(&config.base_url, &entry.path)?;
    let bytes = renderer
        .fetch_bytes(&url, config.browser_timeout_ms)
        .await
        .map_err(Error::from)?;
    validate_image_payload(&bytes)?;

    let jpeg = process_image(&bytes, Some(TOOL_RESIZE))?;

    Ok(CallToolResult::success(vec![Content::image(BASE64.encode(&jpeg), "image/jpeg")]))
}

#[cfg_attr(not(feature = "render"), allow(dead_code))]
fn not_found<'a>(name: &str, known: impl Iterator<Item = &'a String>) -> Error {
    let available: Vec<&str> = known.take(10).map(String::as_str).collect();
    Error::NotFound(format!(
        "newspaper '{name}' not found; available newspapers include: {} (use list_newspapers for the full list)",
        available.join(", ")
    ))
}
