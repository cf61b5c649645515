//! URL helpers for endpoint requests.

use web_sys::Url;

use crate::config::PATH_QUERY_PARAM;

/// Build `endpoint?path=<path>`, resolving relative endpoints against the page URL.
///
/// Existing query parameters on the endpoint are kept; `path` is encoded.
pub fn endpoint_url(endpoint: &str, path: &str) -> Result<String, String> {
    let base = web_sys::window()
        .and_then(|w| w.location().href().ok())
        .ok_or_else(|| "page location not available".to_string())?;

    let url = Url::new_with_base(endpoint, &base)
        .map_err(|_| format!("'{}' is not a valid endpoint", endpoint))?;
    url.search_params().set(PATH_QUERY_PARAM, path);
    Ok(url.href())
}
