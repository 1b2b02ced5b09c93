//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use crate::tools::get_newspaper::GetNewspaperParams;
use crate::tools::list_newspapers::list_impl;
use crate::tools::update_front_pages::update_impl;

use frontpages_core::AppConfig;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for frontpages.
#[derive(Clone)]
pub struct FrontPagesServer {
    config: AppConfig,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl FrontPagesServer {
    /// Create a new server handler.
    pub fn new(config: AppConfig) -> Self {
        Self { config, tool_router: Self::tool_router() }
    }

    /// List the newspapers currently known to the URL store.
    #[tool(
        description = "List all available newspapers. Returns identifier strings (e.g. \"the-new-york-times\") usable with get_newspaper."
    )]
    async fn list_newspapers(&self) -> Result<CallToolResult, McpError> {
        list_impl(&self.config).await
    }

    /// Retrieve one newspaper's front page as a JPEG image.
    ///
    /// Re-scrapes the aggregator first when the cached URLs are from a
    /// prior calendar date.
    #[tool(
        description = "Retrieve a specific newspaper's front page image as a JPEG. Use list_newspapers for valid identifiers."
    )]
    async fn get_newspaper(&self, params: Parameters<GetNewspaperParams>) -> Result<CallToolResult, McpError> {
        #[cfg(feature = "render")]
        {
            let renderer = frontpages_client::render::HeadlessRenderer::new()
                .await
                .map_err(frontpages_core::Error::from)?;
            crate::tools::get_newspaper::get_impl(&self.config, &renderer, params.0).await
        }

        #[cfg(not(feature = "render"))]
        {
            let _ = params;
            Err(frontpages_core::Error::RenderDisabled.into())
        }
    }

    /// Unconditionally re-scrape the aggregator and rewrite the URL store.
    #[tool(
        description = "Update the list of available front pages to today's date by re-scraping frontpages.com. Returns a status message with counts."
    )]
    async fn update_front_pages(&self) -> Result<CallToolResult, McpError> {
        update_impl(&self.config).await
    }
}

impl ServerHandler for FrontPagesServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "frontpages".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
