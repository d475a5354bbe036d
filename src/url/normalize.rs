use url::Url;

/// Builds the key the frontier uses to suppress duplicate URLs
///
/// # Normalization Steps
///
/// 1. Parse the URL; unparseable input has no key
/// 2. Drop the scheme, so `http://` and `https://` variants collapse
/// 3. Lowercase the host (done by the parser for http(s))
/// 4. Remove the fragment
/// 5. Remove a trailing slash from non-root paths
/// 6. Keep the query string as-is (parameter order can be meaningful)
///
/// The scheme-less form matches how an offline corpus indexes its pages.
///
/// # Examples
///
/// ```
/// use trap_sieve::url::frontier_key;
///
/// assert_eq!(
///     frontier_key("https://WWW.ics.uci.edu/about/#top").as_deref(),
///     Some("www.ics.uci.edu/about")
/// );
/// ```
pub fn frontier_key(url_str: &str) -> Option<String> {
    let url = Url::parse(url_str.trim()).ok()?;
    let host = url.host_str()?;

    let mut key = host.to_string();
    if let Some(port) = url.port() {
        key.push_str(&format!(":{}", port));
    }

    let path = url.path();
    if path.len() > 1 && path.ends_with('/') {
        key.push_str(&path[..path.len() - 1]);
    } else if path != "/" {
        key.push_str(path);
    }

    if let Some(query) = url.query() {
        key.push('?');
        key.push_str(query);
    }

    Some(key)
}

/// Strips the scheme and `://` from a URL string, as an offline corpus index expects
///
/// Returns the input unchanged if it has no scheme separator.
pub fn strip_scheme(url_str: &str) -> &str {
    let trimmed = url_str.trim();
    match trimmed.split_once("://") {
        Some((_, rest)) => rest,
        None => trimmed,
    }
}
