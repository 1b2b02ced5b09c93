//! Unified error types for frontpages.

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Unified error types for the frontpages servers and CLI.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty newspaper name).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// The requested newspaper identifier is not in the store.
    #[error("NOT_FOUND: {0}")]
    NotFound(String),

    /// The URL store file does not exist yet.
    #[error("STORE_MISSING: {0}")]
    StoreMissing(String),

    /// The URL store file exists but could not be parsed.
    #[error("STORE_CORRUPT: {0}")]
    StoreCorrupt(String),

    /// Writing the URL store failed.
    #[error("STORE_WRITE_FAILED: {0}")]
    StoreWrite(String),

    /// Network failure, anti-bot challenge page, or undecodable image data.
    /// Retryable; no retry is performed automatically.
    #[error("UNAVAILABLE: {0}")]
    Unavailable(String),

    /// The listing scrape could not run at all.
    #[error("SCRAPE_FAILED: {0}")]
    ScrapeFailed(String),

    /// Headless browser support was not compiled in.
    #[error("RENDER_DISABLED")]
    RenderDisabled,

    /// Headless browser operation failed.
    #[error("RENDER_FAILED: {0}")]
    RenderFailed(String),
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::NotFound(msg) => (-32001, msg.clone()),
            Error::StoreMissing(msg) => (-32002, msg.clone()),
            Error::StoreCorrupt(msg) => (-32003, msg.clone()),
            Error::StoreWrite(msg) => (-32004, msg.clone()),
            Error::Unavailable(msg) => (-32005, msg.clone()),
            Error::ScrapeFailed(msg) => (-32006, msg.clone()),
            Error::RenderDisabled => (-32007, "Headless browser support is disabled".to_string()),
            Error::RenderFailed(msg) => (-32008, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NotFound("newspaper 'le-monde' not found".to_string());
        assert!(err.to_string().contains("NOT_FOUND"));
        assert!(err.to_string().contains("le-monde"));
    }

    #[test]
    fn test_error_to_mcp_error() {
        let err = Error::NotFound("nope".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32001);
    }

    #[test]
    fn test_unavailable_to_mcp_error() {
        let err = Error::Unavailable("received HTML instead of image data".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32005);
    }
}
