//! FRED URL construction.

/// Base URL of the FRED API.
pub const BASE_URL: &str = "https://api.stlouisfed.org/fred";

/// Joins a base URL and an endpoint path.
///
/// Trailing slashes on the base and leading slashes on the endpoint are
/// trimmed so exactly one separator remains.
///
/// # Example
///
/// ```
/// use fredtools_client::url::endpoint_url;
///
/// let url = endpoint_url("https://example.com/", "/release/tables");
/// assert_eq!(url, "https://example.com/release/tables");
/// ```
#[must_use]
pub fn endpoint_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}
