//! Query utilities for LibreNMS API
//!
//! Provides helpers for appending filter parameters to API paths.

/// Build a query string from key/value pairs, skipping absent values
pub fn build_query_string(params: &[(&str, Option<&str>)]) -> String {
    params
        .iter()
        .filter_map(|&(k, v)| v.map(|v| (k, v)))
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Append a query string to a URL, if there is one
#[must_use]
pub fn with_query(url: String, params: &[(&str, Option<&str>)]) -> String {
    let query = build_query_string(params);
    if query.is_empty() {
        url
    } else {
        format!("{url}?{query}")
    }
}

/// [`with_query`] for parameters that are always present
#[must_use]
pub fn with_params(url: String, params: &[(&str, String)]) -> String {
    let pairs: Vec<(&str, Option<&str>)> = params
        .iter()
        .map(|(k, v)| (*k, Some(v.as_str())))
        .collect();
    with_query(url, &pairs)
}
