//! Listing scraper: rebuilds the URL store from the aggregator site.
//!
//! Visits each known newspaper's page in a fresh browser page (the image
//! URLs gain extra characters from page scripts, so the rendered DOM is
//! scanned rather than the raw HTML), finds the matching image source, and
//! accumulates a new store document. Newspapers are processed strictly
//! sequentially, one page per newspaper, closed before the next.

use scraper::{Html, Selector};

use frontpages_core::store::StoreEntry;

#[cfg(feature = "render")]
use frontpages_core::{AppConfig, Error, UrlStore, newspapers::NEWSPAPERS};

#[cfg(feature = "render")]
use crate::fetch::newspaper_page_url;
#[cfg(feature = "render")]
use crate::render::{RenderOptions, Renderer};

/// What happened for a single newspaper during a scrape batch.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// A matching image source was found and normalized.
    Updated(StoreEntry),
    /// The page rendered but no matching image element was present.
    NoImage,
    /// The page could not be loaded.
    Failed(String),
}

/// Per-newspaper result of a scrape batch.
#[derive(Debug, Clone)]
pub struct ItemOutcome {
    pub identifier: String,
    pub outcome: Outcome,
}

/// Full result of a scrape batch; one item per known newspaper.
#[derive(Debug, Clone, Default)]
pub struct ScrapeReport {
    pub items: Vec<ItemOutcome>,
}

impl ScrapeReport {
    /// Identifier → entry mapping for the newspapers that yielded an image.
    pub fn entries(&self) -> std::collections::BTreeMap<String, StoreEntry> {
        self.items
            .iter()
            .filter_map(|item| match &item.outcome {
                Outcome::Updated(entry) => Some((item.identifier.clone(), entry.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn updated(&self) -> usize {
        self.items.iter().filter(|i| matches!(i.outcome, Outcome::Updated(_))).count()
    }

    pub fn without_image(&self) -> usize {
        self.items.iter().filter(|i| matches!(i.outcome, Outcome::NoImage)).count()
    }

    pub fn failed(&self) -> usize {
        self.items.iter().filter(|i| matches!(i.outcome, Outcome::Failed(_))).count()
    }
}

/// Scan rendered HTML for the front-page image of one newspaper.
///
/// Matches the first `img` whose source contains the identifier and an
/// image-like extension.
pub fn find_front_page_image(html: &str, identifier: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("img[src]").expect("invalid selector");

    document
        .select(&selector)
        .filter_map(|el| el.value().attr("src"))
        .find(|src| src.contains(identifier) && (src.contains(".webp") || src.contains(".jpg")))
        .map(str::to_string)
}

/// Normalize a scraped image source into a stored partial path.
///
/// Rewrites the thumbnail segment (`/t/`) to the full-size segment (`/g/`)
/// and strips the site origin so only the path is kept.
pub fn normalize_image_path(src: &str, base_url: &str) -> String {
    let full_size = src.replace("/t/", "/g/");
    match full_size.strip_prefix(base_url) {
        Some(path) => path.to_string(),
        None => full_size,
    }
}

/// Scrape every known newspaper's page through the given renderer.
///
/// Per-item failures are recorded in the report, never aborting the batch.
#[cfg(feature = "render")]
pub async fn scrape_all<R: Renderer>(renderer: &R, config: &AppConfig, identifiers: &[&str]) -> ScrapeReport {
    let opts = RenderOptions { timeout_ms: config.scrape_timeout_ms, settle_ms: config.settle_ms };
    let mut report = ScrapeReport::default();

    for &identifier in identifiers {
        tracing::info!("fetching: {identifier}");

        let outcome = scrape_one(renderer, config, &opts, identifier).await;
        match &outcome {
            Outcome::Updated(entry) => tracing::info!("  -> {}", entry.path),
            Outcome::NoImage => tracing::warn!("  -> not found"),
            Outcome::Failed(reason) => tracing::warn!("  -> error: {reason}"),
        }

        report.items.push(ItemOutcome { identifier: identifier.to_string(), outcome });
    }

    report
}

#[cfg(feature = "render")]
async fn scrape_one<R: Renderer>(
    renderer: &R, config: &AppConfig, opts: &RenderOptions, identifier: &str,
) -> Outcome {
    let page_url = match newspaper_page_url(&config.base_url, identifier) {
        Ok(url) => url,
        Err(err) => return Outcome::Failed(err.to_string()),
    };

    let page = match renderer.render(&page_url, opts).await {
        Ok(page) => page,
        Err(err) => return Outcome::Failed(err.to_string()),
    };

    match find_front_page_image(&page.html, identifier) {
        Some(src) => Outcome::Updated(StoreEntry::new(normalize_image_path(&src, &config.base_url))),
        None => Outcome::NoImage,
    }
}

/// Run a full scrape over the known newspaper list and persist the result.
#[cfg(feature = "render")]
pub async fn refresh_store<R: Renderer>(
    renderer: &R, config: &AppConfig, store: &UrlStore,
) -> Result<ScrapeReport, Error> {
    let report = scrape_all(renderer, config, NEWSPAPERS).await;
    store.save(&report.entries())?;
    tracing::info!(
        "updated {} newspaper urls ({} without image, {} failed)",
        report.updated(),
        report.without_image(),
        report.failed()
    );
    Ok(report)
}
