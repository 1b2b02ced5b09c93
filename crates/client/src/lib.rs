//! Client code for frontpages.
//!
//! This crate provides the HTTP fetch pipeline, headless-browser fetching,
//! the listing scraper, and image transformation shared by the servers and
//! CLI.

pub mod fetch;
#[cfg(feature = "render")]
pub mod render;
pub mod scrape;
pub mod transform;

pub use fetch::{FetchClient, FetchConfig, looks_like_challenge};
#[cfg(feature = "render")]
pub use render::{HeadlessRenderer, RenderError, RenderOptions, RenderedPage, Renderer};
pub use scrape::{ItemOutcome, Outcome, ScrapeReport, find_front_page_image, normalize_image_path};
pub use transform::{ResizeTarget, process_image};
