//! Core types and shared functionality for frontpages.
//!
//! This crate provides:
//! - The persisted newspaper URL store
//! - Staleness checking against the current date
//! - Unified error types
//! - Configuration structures

pub mod config;
pub mod error;
pub mod newspapers;
pub mod store;

pub use config::AppConfig;
pub use error::Error;
pub use store::{PageDate, StoreEntry, UrlStore};
