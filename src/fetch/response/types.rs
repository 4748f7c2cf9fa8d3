//! Response data structures.

use reqwest::header::{HeaderMap, SET_COOKIE};

use super::document::Document;

/// Status and headers of a response.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseMeta {
    /// HTTP status code
    pub status: u16,
    /// Response headers, including every Set-Cookie value
    pub headers: HeaderMap,
}

impl ResponseMeta {
    /// All Set-Cookie header values that are valid strings, in received order.
    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect()
    }
}

/// Result of one fetch: the parsed document, the raw body, and response metadata.
///
/// Owned by the caller; the library never touches it after returning it.
#[derive(Debug)]
pub struct FetchResult {
    /// Queryable document over `body`
    pub document: Document,
    /// Decoded response body
    pub body: String,
    /// Status and headers
    pub response: ResponseMeta,
}

impl FetchResult {
    /// Builds a result, parsing `body` into a document.
    pub fn new(response: ResponseMeta, body: String) -> Self {
        Self {
            document: Document::parse(&body),
            body,
            response,
        }
    }

    /// HTTP status code of the response.
    pub fn status(&self) -> u16 {
        self.response.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_set_cookies_in_order() {
        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("a=1"));
        headers.append(SET_COOKIE, HeaderValue::from_static("b=2; Path=/"));
        let meta = ResponseMeta {
            status: 200,
            headers,
        };
        assert_eq!(meta.set_cookies(), vec!["a=1", "b=2; Path=/"]);
    }

    #[test]
    fn test_fetch_result_can_cross_threads() {
        fn assert_send<T: Send + 'static>() {}
        assert_send::<FetchResult>();
        assert_send::<Document>();
    }

    #[test]
    fn test_fetch_result_exposes_body_and_document() {
        let body = "<html><body><h1>Hello, World!</h1></body></html>".to_string();
        let result = FetchResult::new(
            ResponseMeta {
                status: 200,
                headers: HeaderMap::new(),
            },
            body.clone(),
        );
        assert_eq!(result.status(), 200);
        assert_eq!(result.body, body);
        assert_eq!(result.document.text("h1"), "Hello, World!");
    }
}
