//! Staleness check for the URL store.
//!
//! Samples one arbitrary entry and compares its capture date to today.
//! This is an approximation: it does not verify per-newspaper freshness.
//! Anything that prevents the comparison (empty store, missing file, entry
//! without a parsed date) counts as stale, failing toward a re-scrape.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};

use super::{StoreEntry, UrlStore};

/// True when the sampled entry was not captured on `today`.
pub fn is_stale(entries: &BTreeMap<String, StoreEntry>, today: NaiveDate) -> bool {
    let Some(entry) = entries.values().next() else {
        return true;
    };

    match entry.date.as_ref().and_then(|d| d.as_date()) {
        Some(captured) => captured != today,
        None => true,
    }
}

/// Load the store and check it against the local date.
pub fn store_is_stale(store: &UrlStore) -> bool {
    is_stale(&store.load(), Local::now().date_naive())
}
