//! MCP tool implementations.
//!
//! This module contains all tools exposed by the frontpages server.

pub mod get_newspaper;
pub mod list_newspapers;
pub mod update_front_pages;

pub use get_newspaper::GetNewspaperParams;
