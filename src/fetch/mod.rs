//! Fetching: requests, transports, and the session-aware fetcher.
//!
//! Control flow for one call on a `Scraper`:
//! 1. Synthesize headers from the session (User-Agent, Cookie, Referer)
//! 2. Execute the descriptor through a `Transport`
//! 3. Merge Set-Cookie headers and the referer back into the session
//! 4. Optionally write an exchange record
//! 5. Wrap the body in a queryable `Document`
//!
//! `Fetcher` is the seam decorators (such as the cache) plug into.

mod client;
mod request;
mod response;
mod transport;

use async_trait::async_trait;
use strum_macros::Display;

use crate::config::PersistPolicy;
use crate::error_handling::ScraperError;

pub use client::Scraper;
pub use request::{RequestDescriptor, RequestHeaders};
pub use response::{Document, FetchResult, ResponseMeta};
pub use transport::{HttpTransport, RawResponse, Transport};

/// Form payload of a POST request, sent as `application/x-www-form-urlencoded`.
pub type FormBody = Vec<(String, String)>;

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    /// Idempotent fetch; eligible for caching
    Get,
    /// Form submission; never cached
    Post,
}

/// What the caller asks for: a URL, a method and an optional form body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Target URL
    pub url: String,
    /// HTTP method
    pub method: Method,
    /// Form body (POST only)
    pub form: Option<FormBody>,
}

impl Request {
    /// A GET request for `url`.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: Method::Get,
            form: None,
        }
    }

    /// A POST request for `url` carrying `form`.
    pub fn post(url: impl Into<String>, form: FormBody) -> Self {
        Self {
            url: url.into(),
            method: Method::Post,
            form: Some(form),
        }
    }
}

/// Something that turns a `Request` into a `FetchResult`.
///
/// Implemented by `Scraper` and by decorators wrapping another `Fetcher`.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Performs `request`, yielding exactly one result or one error.
    async fn fetch(&self, request: Request) -> Result<FetchResult, ScraperError>;

    /// Fetches `url` with GET.
    async fn get(&self, url: &str) -> Result<FetchResult, ScraperError> {
        self.fetch(Request::get(url)).await
    }

    /// Submits `form` to `url` with POST.
    async fn post(&self, url: &str, form: FormBody) -> Result<FetchResult, ScraperError> {
        self.fetch(Request::post(url, form)).await
    }

    /// Failure policy for anything this fetcher persists.
    ///
    /// Decorators adopt the policy of the fetcher they wrap.
    fn persist_policy(&self) -> PersistPolicy {
        PersistPolicy::FailSafe
    }
}

/// Builds a `FormBody` from borrowed pairs.
///
/// # Examples
///
/// ```
/// use session_scraper::form;
///
/// let body = form(&[("foo", "bar")]);
/// assert_eq!(body, vec![("foo".to_string(), "bar".to_string())]);
/// ```
pub fn form(pairs: &[(&str, &str)]) -> FormBody {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.to_string(), "POST");
    }

    #[test]
    fn test_request_constructors() {
        let get = Request::get("http://www.example.com/");
        assert_eq!(get.method, Method::Get);
        assert!(get.form.is_none());

        let post = Request::post("http://www.example.com/results.php", form(&[("q", "x")]));
        assert_eq!(post.method, Method::Post);
        assert_eq!(post.form.as_deref(), Some(&[("q".to_string(), "x".to_string())][..]));
    }
}
