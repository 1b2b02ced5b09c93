//! URL construction against the aggregator origin.

use reqwest::Url;

use frontpages_core::Error;

/// Full URL of a newspaper's listing page, e.g.
/// `https://www.frontpages.com/the-guardian`.
pub fn newspaper_page_url(base_url: &str, identifier: &str) -> Result<Url, Error> {
    if identifier.is_empty() {
        return Err(Error::InvalidInput("newspaper identifier cannot be empty".into()));
    }

    Url::parse(&format!("{base_url}/{identifier}"))
        .map_err(|e| Error::InvalidInput(format!("bad newspaper page url: {e}")))
}

/// Full URL of a stored partial image path, e.g.
/// `https://www.frontpages.com/g/2025/10/14/the-guardian-abc.jpg`.
pub fn image_url(base_url: &str, partial_path: &str) -> Result<Url, Error> {
    if !partial_path.starts_with('/') {
        return Err(Error::InvalidInput(format!("partial path must start with '/': {partial_path}")));
    }

    Url::parse(&format!("{base_url}{partial_path}"))
        .map_err(|e| Error::InvalidInput(format!("bad image url: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.frontpages.com";

    #[test]
    fn test_newspaper_page_url() {
        let url = newspaper_page_url(BASE, "the-guardian").unwrap();
        assert_eq!(url.as_str(), "https://www.frontpages.com/the-guardian");
    }

    #[test]
    fn test_newspaper_page_url_empty_identifier() {
        assert!(matches!(newspaper_page_url(BASE, ""), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_image_url() {
        let url = image_url(BASE, "/g/2025/10/14/the-guardian-abc.jpg").unwrap();
        assert_eq!(url.as_str(), "https://www.frontpages.com/g/2025/10/14/the-guardian-abc.jpg");
    }

    #[test]
    fn test_image_url_relative_path_rejected() {
        assert!(matches!(image_url(BASE, "g/2025/10/14/x.jpg"), Err(Error::InvalidInput(_))));
    }
}
