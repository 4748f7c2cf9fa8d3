//! Error categorization.
//!
//! This module maps transport failures onto `TransportErrorKind` for logging.

use super::types::{TransportError, TransportErrorKind};

/// Categorizes a `reqwest::Error` into a `TransportErrorKind`.
///
/// Timeouts and connection failures are checked before the generic request
/// category because reqwest reports them as request errors too.
///
/// # Arguments
///
/// * `error` - The `reqwest::Error` to categorize
///
/// # Returns
///
/// The appropriate `TransportErrorKind` for the error.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> TransportErrorKind {
    if error.is_builder() {
        TransportErrorKind::Builder
    } else if error.is_redirect() {
        TransportErrorKind::Redirect
    } else if error.is_timeout() {
        TransportErrorKind::Timeout
    } else if error.is_connect() {
        TransportErrorKind::Connect
    } else if error.is_request() {
        TransportErrorKind::Request
    } else if error.is_body() {
        TransportErrorKind::Body
    } else if error.is_decode() {
        TransportErrorKind::Decode
    } else {
        TransportErrorKind::Other
    }
}

impl TransportError {
    /// Returns the category of this failure.
    pub fn kind(&self) -> TransportErrorKind {
        match self {
            TransportError::Http(e) => categorize_reqwest_error(e),
            TransportError::FixtureNotFound { .. } | TransportError::Fixture(_) => {
                TransportErrorKind::Fixture
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_errors_are_fixture_kind() {
        let missing = TransportError::FixtureNotFound {
            method: "GET".to_string(),
            url: "http://www.example.com/".to_string(),
        };
        assert_eq!(missing.kind(), TransportErrorKind::Fixture);

        let invalid = TransportError::Fixture("bad status".to_string());
        assert_eq!(invalid.kind(), TransportErrorKind::Fixture);
    }

    #[tokio::test]
    async fn test_invalid_url_is_builder_error() {
        let client = reqwest::Client::new();
        let error = client
            .get("not a url")
            .send()
            .await
            .expect_err("relative URL should not be sendable");
        assert_eq!(categorize_reqwest_error(&error), TransportErrorKind::Builder);
    }

    #[tokio::test]
    async fn test_refused_connection_is_connect_error() {
        // Bind and drop a listener to get a port nobody listens on
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let error = reqwest::Client::new()
            .get(format!("http://127.0.0.1:{port}/"))
            .send()
            .await
            .expect_err("nothing listens on the port");
        let kind = categorize_reqwest_error(&error);
        assert_eq!(kind, TransportErrorKind::Connect);
        assert_eq!(TransportError::Http(error).kind(), kind);
    }
}
