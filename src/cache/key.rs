//! Cache key construction.

/// Build a cache key from a request path and its query parameters.
///
/// Parameters are sorted by name, then value, and percent-encoded, so two requests
/// that differ only in parameter order map to the same key.
pub fn cache_key(path: &str, params: &[(&str, &str)]) -> String {
    let path = path.trim_end_matches('?');
    if params.is_empty() {
        return path.to_string();
    }

    let mut pairs: Vec<(&str, &str)> = params.to_vec();
    pairs.sort_unstable();

    let query = pairs
        .iter()
        .map(|(name, value)| {
            format!(
                "{}={}",
                urlencoding::encode(name),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", path, query)
}
