//! Exchange record format.
//!
//! One JSON object per request:
//!
//! ```json
//! {
//!   "request": { "url": "...", "method": "GET", "headers": { "cookie": "foo=bar" } },
//!   "response": { "status": 200, "headers": { "Set-Cookie": ["foo=bar"] }, "body": "<base64>" }
//! }
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, SET_COOKIE};
use serde::{Deserialize, Serialize};

use crate::error_handling::TransportError;
use crate::fetch::{RawResponse, RequestDescriptor};

/// One captured request/response pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRecord {
    /// What was sent
    pub request: RecordedRequest,
    /// What came back
    pub response: RecordedResponse,
}

/// Request half of an exchange record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedRequest {
    /// Request URL
    pub url: String,
    /// `GET` or `POST`
    pub method: String,
    /// Session headers worth keeping
    pub headers: RecordedRequestHeaders,
}

/// Recorded request headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedRequestHeaders {
    /// Cookie header sent, empty when the session held no cookies
    #[serde(default)]
    pub cookie: String,
}

/// Response half of an exchange record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedResponse {
    /// HTTP status code
    pub status: u16,
    /// Recorded response headers
    #[serde(default)]
    pub headers: RecordedResponseHeaders,
    /// Standard base64 of the raw body bytes
    pub body: String,
}

/// Recorded response headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedResponseHeaders {
    /// Every Set-Cookie value, omitted when there were none
    #[serde(
        rename = "Set-Cookie",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub set_cookie: Vec<String>,
}

impl ExchangeRecord {
    /// Captures a request descriptor and the raw response it produced.
    pub fn from_exchange(request: &RequestDescriptor, response: &RawResponse) -> Self {
        let set_cookie = response
            .headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect();

        Self {
            request: RecordedRequest {
                url: request.url.clone(),
                method: request.method.to_string(),
                headers: RecordedRequestHeaders {
                    cookie: request.headers.cookie.clone().unwrap_or_default(),
                },
            },
            response: RecordedResponse {
                status: response.status,
                headers: RecordedResponseHeaders { set_cookie },
                body: STANDARD.encode(&response.body),
            },
        }
    }

    /// Rebuilds the raw response this record captured.
    ///
    /// Only Set-Cookie headers are restored; the format keeps no others.
    pub fn to_raw_response(&self) -> Result<RawResponse, TransportError> {
        let body = STANDARD.decode(&self.response.body).map_err(|e| {
            TransportError::Fixture(format!("{}: invalid body: {e}", self.request.url))
        })?;

        let mut headers = HeaderMap::new();
        for value in &self.response.headers.set_cookie {
            let value = HeaderValue::from_str(value).map_err(|e| {
                TransportError::Fixture(format!("{}: invalid Set-Cookie: {e}", self.request.url))
            })?;
            headers.append(SET_COOKIE, value);
        }

        Ok(RawResponse {
            status: self.response.status,
            headers,
            body,
        })
    }
}
