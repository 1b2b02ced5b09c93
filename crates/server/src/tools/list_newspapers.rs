//! list_newspapers tool implementation.
//!
//! Reads the URL store and returns the sorted identifier list. A missing or
//! corrupt store yields an empty list, not an error.

use rmcp::{ErrorData as McpError, model::*};

use frontpages_core::{AppConfig, UrlStore};

/// Implementation of the list_newspapers tool.
pub async fn list_impl(config: &AppConfig) -> Result<CallToolResult, McpError> {
    let store = UrlStore::new(&config.store_path, &config.legacy_store_path);
    let names = store.list_identifiers();

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&names).unwrap_or_default(),
    )]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use frontpages_core::StoreEntry;

    fn config_in(dir: &std::path::Path) -> AppConfig {
        AppConfig {
            store_path: dir.join("frontpageurls.json"),
            legacy_store_path: dir.join("frontpageurls.py"),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_list_missing_store_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let result = list_impl(&config_in(dir.path())).await.unwrap();

        let text = result.content[0].as_text().unwrap();
        let names: Vec<String> = serde_json::from_str(&text.text).unwrap();
        assert!(names.is_empty());
    }

    #[tokio::test]
    async fn test_list_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let store = UrlStore::new(&config.store_path, &config.legacy_store_path);
        let mut entries = BTreeMap::new();
        entries.insert("usa-today".to_string(), StoreEntry::new("/g/2025/10/14/u.jpg"));
        entries.insert("el-pais".to_string(), StoreEntry::new("/g/2025/10/14/e.jpg"));
        store.save(&entries).unwrap();

        let result = list_impl(&config).await.unwrap();
        let text = result.content[0].as_text().unwrap();
        let names: Vec<String> = serde_json::from_str(&text.text).unwrap();
        assert_eq!(names, vec!["el-pais", "usa-today"]);
    }
}
