//! Request descriptors and session header application.

use super::{FormBody, Method};

/// Headers synthesized from session state for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHeaders {
    /// Session identity, sent on every request
    pub user_agent: String,
    /// Serialized cookie jar, absent when no cookies are held
    pub cookie: Option<String>,
    /// URL of the previous response, absent on a session's first request
    pub referer: Option<String>,
}

impl RequestHeaders {
    /// Applies the session headers to a `reqwest::RequestBuilder`.
    ///
    /// Invalid header values surface as a builder error when the request is sent.
    pub fn apply_to_request_builder(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        let mut builder = builder.header(reqwest::header::USER_AGENT, &self.user_agent);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(reqwest::header::COOKIE, cookie);
        }
        if let Some(referer) = &self.referer {
            builder = builder.header(reqwest::header::REFERER, referer);
        }
        builder
    }
}

/// A fully-headered request, built fresh for every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    /// Target URL
    pub url: String,
    /// HTTP method
    pub method: Method,
    /// Form body (POST only)
    pub form: Option<FormBody>,
    /// Session headers
    pub headers: RequestHeaders,
}
