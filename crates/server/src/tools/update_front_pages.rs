//! update_front_pages tool implementation.
//!
//! Unconditionally re-scrapes the aggregator and rewrites the URL store,
//! reporting per-batch counts including partial failures.

use rmcp::{ErrorData as McpError, model::*};

use frontpages_core::Error;

#[cfg(feature = "render")]
use frontpages_client::ScrapeReport;

/// Implementation of the update_front_pages tool.
#[cfg(feature = "render")]
pub async fn update_impl(config: &frontpages_core::AppConfig) -> Result<CallToolResult, McpError> {
    use frontpages_client::render::HeadlessRenderer;
    use frontpages_client::scrape;
    use frontpages_core::UrlStore;

    let store = UrlStore::new(&config.store_path, &config.legacy_store_path);
    let renderer = HeadlessRenderer::new().await.map_err(Error::from)?;

    let report = scrape::refresh_store(&renderer, config, &store).await?;

    Ok(CallToolResult::success(vec![Content::text(status_message(&report))]))
}

/// Without browser support the scraper cannot run at all.
#[cfg(not(feature = "render"))]
pub async fn update_impl(_config: &frontpages_core::AppConfig) -> Result<CallToolResult, McpError> {
    Err(Error::RenderDisabled.into())
}

#[cfg(feature = "render")]
fn status_message(report: &ScrapeReport) -> String {
    let mut msg = format!(
        "Successfully updated {} newspaper front pages to today's date",
        report.updated()
    );
    if report.failed() > 0 || report.without_image() > 0 {
        msg.push_str(&format!(
            " ({} pages failed to load, {} had no matching image)",
            report.failed(),
            report.without_image()
        ));
    }
    msg
}

#[cfg(all(test, feature = "render"))]
mod tests {
    use super::*;
    use frontpages_client::{ItemOutcome, Outcome};
    use frontpages_core::StoreEntry;

    #[test]
    fn test_status_message_clean_batch() {
        let report = ScrapeReport {
            items: vec![ItemOutcome {
                identifier: "the-guardian".into(),
                outcome: Outcome::Updated(StoreEntry::new("/g/2025/10/14/g.jpg")),
            }],
        };
        assert_eq!(
            status_message(&report),
            "Successfully updated 1 newspaper front pages to today's date"
        );
    }

    #[test]
    fn test_status_message_reports_partial_failures() {
        let report = ScrapeReport {
            items: vec![
                ItemOutcome {
                    identifier: "the-guardian".into(),
                    outcome: Outcome::Updated(StoreEntry::new("/g/2025/10/14/g.jpg")),
                },
                ItemOutcome { identifier: "le-monde".into(), outcome: Outcome::Failed("timeout".into()) },
                ItemOutcome { identifier: "usa-today".into(), outcome: Outcome::NoImage },
            ],
        };
        let msg = status_message(&report);
        assert!(msg.contains("updated 1"));
        assert!(msg.contains("1 pages failed to load"));
        assert!(msg.contains("1 had no matching image"));
    }
}
