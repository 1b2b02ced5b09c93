//! HTTP front-end.
//!
//! Serves the same operations as the MCP tools over plain GET routes:
//! `/newspapers` (JSON identifier array), `/newspaper/{name}` (JPEG bytes or
//! 404 plain text), and `/frontpage` (a random newspaper's page). Images are
//! fetched per request and returned from an in-memory buffer; nothing is
//! written to disk.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use rand::seq::IteratorRandom;

use frontpages_core::{AppConfig, Error, StoreEntry, UrlStore};

#[derive(Clone)]
pub struct HttpState {
    pub config: Arc<AppConfig>,
}

/// Build the HTTP router.
pub fn router(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/newspapers", get(list_newspapers))
        .route("/newspaper/{name}", get(get_newspaper))
        .route("/frontpage", get(random_front_page))
        .with_state(HttpState { config })
}

fn store_for(config: &AppConfig) -> UrlStore {
    UrlStore::new(&config.store_path, &config.legacy_store_path)
}

async fn list_newspapers(State(state): State<HttpState>) -> Json<Vec<String>> {
    Json(store_for(&state.config).list_identifiers())
}

async fn get_newspaper(State(state): State<HttpState>, Path(name): Path<String>) -> Response {
    let entries = store_for(&state.config).load();
    let Some(entry) = entries.get(&name) else {
        return error_response(Error::NotFound(format!("No newspaper with name {name} found")));
    };

    match fetch_entry(&state.config, entry).await {
        Ok(jpeg) => jpeg_response(jpeg),
        Err(err) => error_response(err),
    }
}

async fn random_front_page(State(state): State<HttpState>) -> Response {
    let entries = store_for(&state.config).load();
    let Some((name, entry)) = entries.iter().choose(&mut rand::rng()) else {
        return error_response(Error::StoreMissing(
            "no newspapers known; run the scraper to build the database".into(),
        ));
    };

    tracing::debug!("serving random front page: {name}");
    match fetch_entry(&state.config, entry).await {
        Ok(jpeg) => jpeg_response(jpeg),
        Err(err) => error_response(err),
    }
}

/// Browser-fetch one stored entry and re-encode it as JPEG, unresized.
#[cfg(feature = "render")]
async fn fetch_entry(config: &AppConfig, entry: &StoreEntry) -> Result<Vec<u8>, Error> {
    use frontpages_client::fetch::{image_url, validate_image_payload};
    use frontpages_client::process_image;
    use frontpages_client::render::{HeadlessRenderer, Renderer};

    let url = image_url(&config.base_url, &entry.path)?;
    let renderer = HeadlessRenderer::new().await.map_err(Error::from)?;
    let bytes = renderer
        .fetch_bytes(&url, config.browser_timeout_ms)
        .await
        .map_err(Error::from)?;
    validate_image_payload(&bytes)?;

    process_image(&bytes, None)
}

#[cfg(not(feature = "render"))]
async fn fetch_entry(_config: &AppConfig, _entry: &StoreEntry) -> Result<Vec<u8>, Error> {
    Err(Error::RenderDisabled)
}

fn jpeg_response(bytes: Vec<u8>) -> Response {
    ([(header::CONTENT_TYPE, "image/jpeg")], bytes).into_response()
}

fn error_response(err: Error) -> Response {
    let (status, message) = match err {
        Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        Error::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
        Error::StoreMissing(msg) | Error::StoreCorrupt(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        Error::Unavailable(msg) | Error::RenderFailed(msg) => (StatusCode::BAD_GATEWAY, msg),
        other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    };

    (status, message).into_response()
}
