//! Persisted mapping from newspaper identifier to front-page image path.
//!
//! The store is a single JSON document, rewritten wholesale on every scrape
//! and treated as a cache: a missing or corrupt file degrades to "no
//! newspapers known". A save goes through a temp file and rename so readers
//! never observe a partially written document. Alongside the JSON document a
//! legacy companion file is written containing a literal list of paths for
//! older consumers.

pub mod freshness;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Date segment embedded in a stored image path, parsed once at scrape time.
///
/// Paths look like `/g/2025/10/14/the-guardian-abc.jpg`; the three segments
/// after `/g/` carry the capture date used for staleness checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Image filename without the date segments, e.g. `the-guardian-abc.jpg`.
    pub slug: String,
}

impl PageDate {
    /// Parse the date-coded prefix of a partial image path.
    ///
    /// Returns `None` if the path does not carry a valid `/g/YYYY/MM/DD/`
    /// prefix or the segments do not form a real calendar date.
    pub fn from_path(path: &str) -> Option<Self> {
        let mut parts = path.split('/');
        if !parts.next()?.is_empty() {
            return None;
        }
        parts.next()?; // the "g" (or legacy "t") segment

        let year: i32 = parts.next()?.parse().ok()?;
        let month: u32 = parts.next()?.parse().ok()?;
        let day: u32 = parts.next()?.parse().ok()?;
        let slug = parts.next()?.to_string();

        NaiveDate::from_ymd_opt(year, month, day)?;

        Some(Self { year, month, day, slug })
    }

    /// The date as a `NaiveDate` for comparison with today.
    pub fn as_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    /// ISO-8601 rendering (`YYYY-MM-DD`).
    pub fn iso(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// One newspaper's stored front-page location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreEntry {
    /// Partial image path (no scheme/host), e.g. `/g/2025/10/14/x.jpg`.
    pub path: String,

    /// Structured capture date, parsed from the path at scrape time.
    /// `None` when the path had no recognizable date prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<PageDate>,
}

impl StoreEntry {
    /// Build an entry from a partial path, parsing its date prefix.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let date = PageDate::from_path(&path);
        Self { path, date }
    }
}

// Older store files map identifiers straight to path strings; both forms
// must load.
#[derive(Deserialize)]
#[serde(untagged)]
enum EntryRepr {
    Structured {
        path: String,
        #[serde(default)]
        date: Option<PageDate>,
    },
    Legacy(String),
}

impl<'de> Deserialize<'de> for StoreEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match EntryRepr::deserialize(deserializer)? {
            EntryRepr::Structured { path, date } => {
                let date = date.or_else(|| PageDate::from_path(&path));
                Ok(StoreEntry { path, date })
            }
            EntryRepr::Legacy(path) => Ok(StoreEntry::new(path)),
        }
    }
}

/// The persisted identifier → entry mapping.
pub struct UrlStore {
    path: PathBuf,
    legacy_path: PathBuf,
}

impl UrlStore {
    /// Create a store handle over the JSON document and its legacy companion.
    pub fn new(path: impl Into<PathBuf>, legacy_path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), legacy_path: legacy_path.into() }
    }

    /// Load the mapping, failing soft to an empty map on a missing or
    /// malformed file.
    pub fn load(&self) -> BTreeMap<String, StoreEntry> {
        match self.try_load() {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!("url store unreadable, treating as empty: {err}");
                BTreeMap::new()
            }
        }
    }

    /// Load the mapping, distinguishing a missing file from a corrupt one.
    pub fn try_load(&self) -> Result<BTreeMap<String, StoreEntry>, Error> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::StoreMissing(format!(
                    "newspapers database {} not found; run the scraper to build it",
                    self.path.display()
                )));
            }
            Err(err) => {
                return Err(Error::StoreMissing(format!(
                    "newspapers database {} unreadable: {err}; run the scraper to rebuild it",
                    self.path.display()
                )));
            }
        };

        serde_json::from_str(&raw).map_err(|err| {
            Error::StoreCorrupt(format!(
                "newspapers database {} is corrupted: {err}; run the scraper to regenerate it",
                self.path.display()
            ))
        })
    }

    /// Persist the full mapping, replacing any prior content.
    ///
    /// The JSON document is written to a temp file and renamed into place.
    /// The legacy companion file (a literal list of paths) is rewritten
    /// afterwards, best effort for old consumers.
    pub fn save(&self, entries: &BTreeMap<String, StoreEntry>) -> Result<(), Error> {
        let json = serde_json::to_string(entries)
            .map_err(|err| Error::StoreWrite(format!("serializing url store: {err}")))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .map_err(|err| Error::StoreWrite(format!("writing {}: {err}", tmp.display())))?;
        fs::rename(&tmp, &self.path)
            .map_err(|err| Error::StoreWrite(format!("renaming into {}: {err}", self.path.display())))?;

        if let Err(err) = fs::write(&self.legacy_path, legacy_document(entries)) {
            tracing::warn!("failed to write legacy companion {}: {err}", self.legacy_path.display());
        }

        tracing::info!("saved {} newspaper urls to {}", entries.len(), self.path.display());
        Ok(())
    }

    /// Sorted, duplicate-free identifiers; empty when the store is missing
    /// or malformed.
    pub fn list_identifiers(&self) -> Vec<String> {
        self.load().into_keys().collect()
    }

    /// Path to the JSON document.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

// `urls = ['/g/...', '/g/...']`, the shape old consumers import.
fn legacy_document(entries: &BTreeMap<String, StoreEntry>) -> String {
    let quoted: Vec<String> = entries.values().map(|e| format!("'{}'", e.path)).collect();
    format!("urls = [{}]\n", quoted.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &Path) -> UrlStore {
        UrlStore::new(dir.join("frontpageurls.json"), dir.join("frontpageurls.py"))
    }

    #[test]
    fn test_page_date_from_path() {
        let date = PageDate::from_path("/g/2025/10/14/the-guardian-abc.jpg").unwrap();
        assert_eq!(date.year, 2025);
        assert_eq!(date.month, 10);
        assert_eq!(date.day, 14);
        assert_eq!(date.slug, "the-guardian-abc.jpg");
        assert_eq!(date.iso(), "2025-10-14");
    }

    #[test]
    fn test_page_date_rejects_garbage() {
        assert!(PageDate::from_path("").is_none());
        assert!(PageDate::from_path("no-leading-slash").is_none());
        assert!(PageDate::from_path("/g/not/a/date/x.jpg").is_none());
        assert!(PageDate::from_path("/g/2025/13/40/x.jpg").is_none());
    }

    #[test]
    fn test_load_missing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        assert!(store.load().is_empty());
        assert!(store.list_identifiers().is_empty());
        assert!(matches!(store.try_load(), Err(Error::StoreMissing(_))));
    }

    #[test]
    fn test_load_corrupt_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        fs::write(store.path(), "{not json").unwrap();
        assert!(store.load().is_empty());
        assert!(matches!(store.try_load(), Err(Error::StoreCorrupt(_))));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        let mut entries = BTreeMap::new();
        entries.insert(
            "the-guardian".to_string(),
            StoreEntry::new("/g/2025/10/14/the-guardian-abc.jpg"),
        );
        entries.insert("le-monde".to_string(), StoreEntry::new("/g/2025/10/14/le-monde-xyz.webp"));
        store.save(&entries).unwrap();

        let loaded = store.try_load().unwrap();
        assert_eq!(loaded, entries);
        assert_eq!(loaded["the-guardian"].date.as_ref().unwrap().iso(), "2025-10-14");

        // no temp file left behind
        assert!(!dir.path().join("frontpageurls.json.tmp").exists());
    }

    #[test]
    fn test_legacy_string_form_loads() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        fs::write(store.path(), r#"{"the-guardian": "/g/2025/10/14/the-guardian-abc.jpg"}"#)
            .unwrap();

        let loaded = store.try_load().unwrap();
        let entry = &loaded["the-guardian"];
        assert_eq!(entry.path, "/g/2025/10/14/the-guardian-abc.jpg");
        assert_eq!(entry.date.as_ref().unwrap().iso(), "2025-10-14");
    }

    #[test]
    fn test_list_identifiers_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        let mut entries = BTreeMap::new();
        entries.insert("usa-today".to_string(), StoreEntry::new("/g/2025/10/14/u.jpg"));
        entries.insert("el-pais".to_string(), StoreEntry::new("/g/2025/10/14/e.jpg"));
        entries.insert("le-monde".to_string(), StoreEntry::new("/g/2025/10/14/l.jpg"));
        store.save(&entries).unwrap();

        assert_eq!(store.list_identifiers(), vec!["el-pais", "le-monde", "usa-today"]);
    }

    #[test]
    fn test_save_survives_unwritable_legacy_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = UrlStore::new(
            dir.path().join("frontpageurls.json"),
            dir.path().join("no-such-dir").join("frontpageurls.py"),
        );

        let mut entries = BTreeMap::new();
        entries.insert("the-guardian".to_string(), StoreEntry::new("/g/2025/10/14/g.jpg"));
        store.save(&entries).unwrap();

        assert_eq!(store.try_load().unwrap(), entries);
    }

    #[test]
    fn test_legacy_companion_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        let mut entries = BTreeMap::new();
        entries.insert("the-guardian".to_string(), StoreEntry::new("/g/2025/10/14/g.jpg"));
        store.save(&entries).unwrap();

        let legacy = fs::read_to_string(dir.path().join("frontpageurls.py")).unwrap();
        assert_eq!(legacy, "urls = ['/g/2025/10/14/g.jpg']\n");
    }
}
