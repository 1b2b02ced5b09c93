//! The fixed set of newspaper identifiers known to the scraper.
//!
//! Identifiers match the path slugs used by frontpages.com, e.g.
//! `https://www.frontpages.com/the-new-york-times`.

/// Newspapers the listing scraper visits, in scrape order.
pub const NEWSPAPERS: &[&str] = &[
    "chicago-tribune",
    "el-pais",
    "financial-times",
    "le-monde",
    "los-angeles-times",
    "the-boston-globe",
    "the-guardian",
    "the-new-york-times",
    "the-wall-street-journal",
    "the-washington-post",
    "the-times",
    "usa-today",
];
