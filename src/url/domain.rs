use url::Url;

/// Extracts the lowercased host of a parsed URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use trap_sieve::url::extract_domain;
///
/// let url = Url::parse("http://Vision.ICS.uci.edu/papers").unwrap();
/// assert_eq!(extract_domain(&url), Some("vision.ics.uci.edu".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Parses `raw` and returns its lowercased, non-empty host
///
/// Used when attributing an accepted outlink to a subdomain; anything that
/// does not parse or has an empty host yields `None`.
pub fn hostname(raw: &str) -> Option<String> {
    let url = Url::parse(raw.trim()).ok()?;
    extract_domain(&url).filter(|h| !h.is_empty())
}
