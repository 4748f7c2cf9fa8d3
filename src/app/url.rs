//! Command-line URL validation and normalization.

use log::warn;

/// Validates and normalizes a URL given on the command line.
///
/// Adds an `https://` prefix when no scheme is present, then checks that the
/// result parses and uses http or https. Logs a warning and returns `None`
/// otherwise.
///
/// # Arguments
///
/// * `url` - The URL string to validate and normalize
///
/// # Returns
///
/// `Some(normalized_url)` if the URL can be fetched, `None` otherwise.
pub fn validate_and_normalize_url(url: &str) -> Option<String> {
    let url = url.trim();
    let normalized = if url.contains("://") {
        url.to_string()
    } else {
        format!("https://{url}")
    };

    match url::Url::parse(&normalized) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" if parsed.host().is_some() => Some(normalized),
            "http" | "https" => {
                warn!("Skipping URL without host: {url}");
                None
            }
            scheme => {
                warn!("Skipping unsupported scheme '{scheme}' for URL: {url}");
                None
            }
        },
        Err(e) => {
            warn!("Skipping invalid URL {url}: {e}");
            None
        }
    }
}
