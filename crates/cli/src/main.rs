//! frontpages CLI.
//!
//! With no argument, prints the sorted newspaper list. With an identifier,
//! fetches that newspaper's front page over direct HTTP (short timeout, no
//! browser), resizes it, and saves it to `fp.jpg`. Exits non-zero on any
//! failure.

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use frontpages_client::fetch::image_url;
use frontpages_client::{FetchClient, FetchConfig, ResizeTarget, process_image};
use frontpages_core::{AppConfig, UrlStore};

const OUTPUT_PATH: &str = "fp.jpg";
const RESIZE: ResizeTarget = ResizeTarget { width: 900, height: 1050 };

/// Fetch and save a newspaper front page image.
#[derive(Parser)]
#[command(name = "frontpages", version)]
struct Cli {
    /// Name of the newspaper to fetch (e.g., 'the-new-york-times').
    /// If not provided, lists available newspapers.
    name: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    let store = UrlStore::new(&config.store_path, &config.legacy_store_path);

    let Some(name) = cli.name else {
        println!("Available newspapers:");
        for name in store.list_identifiers() {
            println!("  {name}");
        }
        return Ok(());
    };

    let entries = store.try_load()?;
    let Some(entry) = entries.get(&name) else {
        let available: Vec<String> = entries.keys().take(10).cloned().collect();
        bail!(
            "Newspaper '{name}' not found. Available newspapers include: {}...",
            available.join(", ")
        );
    };

    let url = image_url(&config.base_url, &entry.path)?;
    println!("Fetching: {url}");

    let client = FetchClient::new(FetchConfig {
        user_agent: config.user_agent.clone(),
        timeout: config.timeout(),
    })?;
    let bytes = client.fetch_image(&url).await?;

    let jpeg = process_image(&bytes, Some(RESIZE))?;
    std::fs::write(OUTPUT_PATH, &jpeg).with_context(|| format!("writing {OUTPUT_PATH}"))?;

    println!("Image saved to {OUTPUT_PATH}");
    Ok(())
}
