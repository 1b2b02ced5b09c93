//! Server front-ends for frontpages.
//!
//! Two binaries share this crate: the MCP stdio server (`mcp-frontpages`)
//! and the HTTP server (`frontpages-http`). Both call into the same
//! fetch/transform pipeline from `frontpages-client`.

pub mod handler;
pub mod http;
pub mod tools;
