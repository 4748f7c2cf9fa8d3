//! Transport adapters.
//!
//! A `Transport` executes a fully-headered request and returns status, headers
//! and the raw body. Connection handling, TLS and redirects live here, never in
//! the session logic.

use async_trait::async_trait;
use log::debug;
use reqwest::header::HeaderMap;

use super::{Method, RequestDescriptor};
use crate::error_handling::TransportError;

/// Status, headers and raw body of a response, as received.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers, including every Set-Cookie value
    pub headers: HeaderMap,
    /// Undecoded response body
    pub body: Vec<u8>,
}

/// Executes request descriptors.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Executes `request`, failing when no status and body can be obtained.
    async fn execute(&self, request: &RequestDescriptor) -> Result<RawResponse, TransportError>;
}

/// Network transport backed by a shared `reqwest::Client`.
///
/// The client must not carry its own cookie store; cookies are owned by the
/// session and sent explicitly.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Wraps an already configured client.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &RequestDescriptor) -> Result<RawResponse, TransportError> {
        let builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => {
                let builder = self.client.post(&request.url);
                match &request.form {
                    Some(form) => builder.form(form),
                    None => builder,
                }
            }
        };
        let builder = request.headers.apply_to_request_builder(builder);

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        debug!(
            "{} {} -> {} ({} bytes)",
            request.method,
            request.url,
            status,
            body.len()
        );

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}
