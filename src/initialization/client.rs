//! HTTP client initialization.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::error_handling::InitializationError;

/// Initializes the HTTP client used by the network transport.
///
/// Creates a `reqwest::Client` configured with:
/// - Timeout from the session options
/// - Redirect following enabled (reqwest default policy)
/// - No cookie store and no default User-Agent: both come from the session
///
/// # Arguments
///
/// * `timeout_seconds` - Per-request timeout
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(timeout_seconds: u64) -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()?;
    Ok(client)
}
