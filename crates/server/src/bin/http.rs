//! frontpages-http server entry point.

use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use frontpages_core::AppConfig;
use frontpages_server::http;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = AppConfig::load()?;
    let addr = config.http_addr.clone();

    let app = http::router(Arc::new(config));
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("frontpages http server listening on {addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
