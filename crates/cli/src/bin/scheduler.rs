//! frontpages-scheduler: daily re-scrape trigger.
//!
//! Long-lived process that wakes once a minute and runs the listing scraper
//! the first time the configured local trigger time has passed each day.
//! Starting after today's trigger time waits for tomorrow's occurrence.
//! There is no cancellation mechanism; termination is external.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveTime, Timelike};
use tracing_subscriber::EnvFilter;

use frontpages_client::render::HeadlessRenderer;
use frontpages_client::scrape;
use frontpages_core::{AppConfig, UrlStore};

const POLL_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = AppConfig::load()?;
    let trigger = NaiveTime::from_hms_opt(config.scrape_hour, config.scrape_minute, 0)
        .context("invalid schedule time")?;

    tracing::info!(
        "scheduler running; daily scrape at {:02}:{:02} local time",
        trigger.hour(),
        trigger.minute()
    );

    let mut last_run = startup_last_run(Local::now(), trigger);

    loop {
        let now = Local::now();
        if should_run(now, trigger, last_run) {
            run_scrape(&config).await;
            last_run = Some(now.date_naive());
        }

        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

/// A day whose trigger time already passed at startup counts as handled, so
/// the first scrape fires at the next occurrence.
fn startup_last_run(now: DateTime<Local>, trigger: NaiveTime) -> Option<NaiveDate> {
    (now.time() >= trigger).then(|| now.date_naive())
}

/// True when the trigger time has arrived and today's scrape has not run.
fn should_run(now: DateTime<Local>, trigger: NaiveTime, last_run: Option<NaiveDate>) -> bool {
    now.time() >= trigger && last_run != Some(now.date_naive())
}

/// One scheduled scrape. Failures are logged, never fatal; the next day's
/// trigger still fires.
async fn run_scrape(config: &AppConfig) {
    tracing::info!("running scheduled scrape");

    let store = UrlStore::new(&config.store_path, &config.legacy_store_path);

    let renderer = match HeadlessRenderer::new().await {
        Ok(renderer) => renderer,
        Err(err) => {
            tracing::error!("scheduled scrape skipped, browser launch failed: {err}");
            return;
        }
    };

    match scrape::refresh_store(&renderer, config, &store).await {
        Ok(report) => tracing::info!(
            "scheduled scrape done: {} updated, {} without image, {} failed",
            report.updated(),
            report.without_image(),
            report.failed()
        ),
        Err(err) => tracing::error!("scheduled scrape failed: {err}"),
    }
}
