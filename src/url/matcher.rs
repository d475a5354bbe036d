use std::collections::HashSet;

/// Checks whether a URL path repeats any of its folder segments
///
/// The path is split on `/` and empty segments are dropped, so
/// `/events/2020/events/` repeats `events` while `/a//b/` does not repeat
/// anything. Repeated segments are the usual signature of calendar and
/// pagination traps that keep nesting the same directory.
///
/// # Examples
///
/// ```
/// use trap_sieve::url::has_repeating_segment;
///
/// assert!(has_repeating_segment("/events/2020/events/"));
/// assert!(!has_repeating_segment("/events/2020/"));
/// ```
pub fn has_repeating_segment(path: &str) -> bool {
    let mut seen = HashSet::new();
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .any(|segment| !seen.insert(segment))
}

/// Returns true if any of `separators` occurs more than `max` times in `text`
///
/// # Examples
///
/// ```
/// use trap_sieve::url::exceeds_separator_count;
///
/// assert!(exceeds_separator_count("a=1&b=2&c=3&d=4", &['&', '=', '%'], 2));
/// assert!(!exceeds_separator_count("a=1&b=2", &['&', '=', '%'], 2));
/// ```
pub fn exceeds_separator_count(text: &str, separators: &[char], max: usize) -> bool {
    separators
        .iter()
        .any(|sep| text.chars().filter(|c| c == sep).count() > max)
}

/// Returns the lowercased extension of the last path segment, if any
pub fn path_extension(path: &str) -> Option<String> {
    let last = path.rsplit('/').next()?;
    let (_, ext) = last.rsplit_once('.')?;
    Some(ext.to_lowercase())
}
